/// Errors raised when building or processing images.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// The pixel buffer length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Two images that must have the same size do not.
    #[error("Invalid image size ({0}, {1}) mismatch ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// The image holds no pixels.
    #[error("Image data is not initialized")]
    ImageDataNotInitialized,

    /// A value cannot be represented in the target type.
    #[error("Failed to cast image data")]
    CastError,
}
