#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum NonMaxError {
    #[error("Invalid search radius: {0} (must be >= 0)")]
    InvalidRadius(i32),

    #[error("Intensity image is empty: {width}x{height}")]
    EmptyImage { width: usize, height: usize },

    #[error("Invalid minimum block size: {0} (must be > 0)")]
    InvalidBlockSize(usize),
}

pub type NonMaxResult<T> = Result<T, NonMaxError>;
