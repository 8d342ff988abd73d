use thiserror::Error;

/// Failure modes of the path-integral kernel.
///
/// Configuration errors surface from `initialize`; the barostat and LePIGS
/// variants abort the step they occur in. Messages are stable and matched
/// by host-side code, so they must not be reworded.
#[derive(Debug, Error)]
pub enum RpmdError {
    #[error("Force group must be between 0 and 31")]
    ForceGroupOutOfRange,
    #[error("Number of copies for contraction cannot be greater than the total number of copies being simulated")]
    InvalidContractionCopies,
    #[error("Standard barostats cannot be used with RPMDIntegrator. Use RPMDMonteCarloBarostat instead.")]
    BarostatNotSupported,
    #[error("Contractions are not implemented for LePIGS!")]
    OpenPathContraction,
}

pub type RpmdResult<T> = Result<T, RpmdError>;
