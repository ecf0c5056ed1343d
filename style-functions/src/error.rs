use thiserror::Error;

/// Failure to declare a style function.
///
/// Every variant is a hard construction error: the offending factory returns
/// it synchronously and no partially built value escapes.
#[derive(Error, Clone, Copy, Eq, PartialEq, Debug)]
pub enum ConstructionError {
    /// Categorical, interval and exponential stops need at least one stop.
    #[error("stops must not be empty")]
    EmptyStops,
    /// A composite fold over zero flat stops has no zoom grouping.
    #[error("composite stops must contain at least one stop")]
    EmptyComposite,
}

pub type ConstructionResult<T> = Result<T, ConstructionError>;
