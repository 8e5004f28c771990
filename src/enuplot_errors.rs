use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnuplotError {
    #[error("Invalid calendar timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Non-finite ECEF coordinate")]
    NonFiniteCoordinate,

    #[error("ECEF point lies on the polar axis (x^2 + y^2 = 0), geographic conversion is singular")]
    SingularEcefPoint,

    #[error(
        "Geographic conversion did not converge after {iterations} iterations (residual {residual} m)"
    )]
    ConvergenceFailure { iterations: usize, residual: f64 },

    #[error("No solution records to process")]
    EmptyRecordSet,

    #[error("Time grid step must be strictly positive, got {0}")]
    InvalidGridStep(f64),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Plot rendering failed: {0}")]
    Rendering(String),
}
