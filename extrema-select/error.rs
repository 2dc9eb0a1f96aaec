#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SelectError {
    #[error("Point ({x}, {y}) lies outside the {width}x{height} intensity image")]
    PointOutsideImage {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("Intensity image is empty: {width}x{height}")]
    EmptyImage { width: usize, height: usize },

    #[error("Invalid inverse region scale: {0} (must be finite and > 0)")]
    InvalidRegionScale(f64),

    #[error("Invalid minimum cell length: {0} (must be > 0)")]
    InvalidMinCellLength(usize),

    #[error("Unknown selector type: {0}")]
    UnknownSelector(String),
}

pub type SelectResult<T> = Result<T, SelectError>;
