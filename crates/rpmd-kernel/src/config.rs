use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rpmd_core::{RpmdError, RpmdResult};

/// Descriptor for one path-integral integrator instance.
///
/// Units follow the host convention: `step_size` in ps, `friction` in 1/ps,
/// `temperature` in K. `num_copies` is the number of beads per particle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RpmdConfig {
    pub num_copies: usize,
    pub step_size: f64,
    pub friction: f64,
    pub temperature: f64,
    #[serde(default = "default_true")]
    pub apply_thermostat: bool,
    #[serde(default)]
    pub use_open_path: bool,
    #[serde(default)]
    pub random_seed: u32,
    /// Force group id -> number of copies that group is evaluated on.
    #[serde(default)]
    pub contractions: BTreeMap<i32, usize>,
    /// Mask of force groups the integrator evaluates at all.
    #[serde(default = "default_groups")]
    pub integration_force_groups: i32,
}

fn default_true() -> bool {
    true
}

fn default_groups() -> i32 {
    -1
}

impl RpmdConfig {
    pub fn new(num_copies: usize, step_size: f64, friction: f64, temperature: f64) -> Self {
        Self {
            num_copies,
            step_size,
            friction,
            temperature,
            apply_thermostat: true,
            use_open_path: false,
            random_seed: 0,
            contractions: BTreeMap::new(),
            integration_force_groups: -1,
        }
    }

    pub fn with_thermostat(mut self, apply: bool) -> Self {
        self.apply_thermostat = apply;
        self
    }

    pub fn with_open_path(mut self, open: bool) -> Self {
        self.use_open_path = open;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn with_contraction(mut self, group: i32, copies: usize) -> Self {
        self.contractions.insert(group, copies);
        self
    }

    pub fn with_integration_force_groups(mut self, mask: i32) -> Self {
        self.integration_force_groups = mask;
        self
    }

    /// Validate the contraction table and derive the evaluation schedule.
    ///
    /// Groups contracted onto the full bead count are elided; everything not
    /// contracted is evaluated on the full ring under the complement mask,
    /// restricted to the integration force groups.
    pub fn contraction_plan(&self) -> RpmdResult<ContractionPlan> {
        let mut by_copies: BTreeMap<usize, i32> = BTreeMap::new();
        let mut groups_not_contracted: i32 = -1;
        let mut max_contracted_copies = 0;
        for (&group, &copies) in &self.contractions {
            if !(0..=31).contains(&group) {
                return Err(RpmdError::ForceGroupOutOfRange);
            }
            if copies == 0 || copies > self.num_copies {
                return Err(RpmdError::InvalidContractionCopies);
            }
            if copies == self.num_copies {
                continue;
            }
            *by_copies.entry(copies).or_insert(0) |= 1 << group;
            groups_not_contracted &= !(1 << group);
            if copies > max_contracted_copies {
                max_contracted_copies = copies;
            }
        }
        groups_not_contracted &= self.integration_force_groups;
        Ok(ContractionPlan {
            groups_by_copies: by_copies.into_iter().collect(),
            groups_not_contracted,
            max_contracted_copies,
        })
    }
}

/// Evaluation schedule derived from a descriptor at initialization.
#[derive(Clone, Debug)]
pub struct ContractionPlan {
    /// `(copies, group mask)` pairs, sorted by copies.
    pub groups_by_copies: Vec<(usize, i32)>,
    /// Mask of groups evaluated directly on the full ring.
    pub groups_not_contracted: i32,
    pub max_contracted_copies: usize,
}

impl ContractionPlan {
    pub fn has_contractions(&self) -> bool {
        !self.groups_by_copies.is_empty()
    }
}
