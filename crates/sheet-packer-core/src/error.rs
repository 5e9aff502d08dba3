use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetPackerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "image")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid atlas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Duplicate sprite name: {0}")]
    DuplicateName(String),
    #[error("Nothing to pack")]
    Empty,
    #[error("Atlas out of space: '{name}' did not fit after {placed} of {total} sprites were placed")]
    OutOfSpace {
        placed: usize,
        total: usize,
        name: String,
    },
    #[error("Encoding error: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, SheetPackerError>;
