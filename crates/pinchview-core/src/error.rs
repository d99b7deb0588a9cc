use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found: {name} in {location}")]
    ResourceNotFound { name: String, location: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, PreviewError>;
