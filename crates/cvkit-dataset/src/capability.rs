use std::path::Path;

use cvkit_image::Image;

use crate::manifest::Label;

/// Boxed error returned by loaders and preprocessing steps.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Turns a resolved sample path into a raw sample.
///
/// Implemented for any `Fn(&Path) -> Result<S, BoxError>` closure, so a
/// custom loader is usually written inline:
///
/// ```
/// use std::path::Path;
/// use cvkit_dataset::{BoxError, LoadSample};
///
/// let loader = |path: &Path| -> Result<usize, BoxError> {
///     Ok(path.as_os_str().len())
/// };
/// assert_eq!(loader.load(Path::new("a.png")).unwrap(), 5);
/// ```
pub trait LoadSample<S>: Send + Sync {
    /// Load the sample stored at `path`.
    fn load(&self, path: &Path) -> Result<S, BoxError>;
}

impl<S, F> LoadSample<S> for F
where
    F: Fn(&Path) -> Result<S, BoxError> + Send + Sync,
{
    fn load(&self, path: &Path) -> Result<S, BoxError> {
        self(path)
    }
}

/// Transforms a raw sample and its label.
///
/// Implemented for any `Fn(S, Label) -> Result<(O, Label), BoxError>`
/// closure.
pub trait Preprocess<S, O>: Send + Sync {
    /// Apply the transformation.
    fn apply(&self, sample: S, label: Label) -> Result<(O, Label), BoxError>;
}

impl<S, O, F> Preprocess<S, O> for F
where
    F: Fn(S, Label) -> Result<(O, Label), BoxError> + Send + Sync,
{
    fn apply(&self, sample: S, label: Label) -> Result<(O, Label), BoxError> {
        self(sample, label)
    }
}

/// Preprocessing step that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<S> Preprocess<S, S> for Identity {
    fn apply(&self, sample: S, label: Label) -> Result<(S, Label), BoxError> {
        Ok((sample, label))
    }
}

/// Default loader: decodes any supported image file to 8-bit RGB.
#[derive(Debug, Clone, Copy, Default)]
pub struct RgbImageLoader;

impl LoadSample<Image<u8, 3>> for RgbImageLoader {
    fn load(&self, path: &Path) -> Result<Image<u8, 3>, BoxError> {
        Ok(cvkit_io::read_image_any_rgb8(path)?)
    }
}
