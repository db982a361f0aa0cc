use cvkit_image::{Image, ImageError};

use crate::interpolation::InterpolationMode;
use crate::parallel;

/// Rotation about a fixed point, evaluated from output back to input.
#[derive(Debug, Clone, Copy)]
struct InverseRotation {
    center: (f32, f32),
    cos: f32,
    sin: f32,
}

impl InverseRotation {
    /// Rotation by `degrees`, counter-clockwise as displayed (rows grow down).
    fn new(center: (f32, f32), degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self { center, cos, sin }
    }

    /// Input position that lands on output position `(x, y)`.
    fn source_of(&self, x: f32, y: f32) -> (f32, f32) {
        let (cx, cy) = self.center;
        let (dx, dy) = (x - cx, y - cy);
        (
            cx + dx * self.cos - dy * self.sin,
            cy + dx * self.sin + dy * self.cos,
        )
    }
}

/// Rotates an image around its center.
///
/// The output has the same size as the input. Output pixels whose source
/// falls outside the input are set to zero.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image, same size as `src`.
/// * `angle` - The rotation angle in degrees, counter-clockwise.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// Returns an error if `src` and `dst` differ in size or `src` is empty.
///
/// # Example
///
/// ```
/// use cvkit_image::Image;
/// use cvkit_imgproc::interpolation::InterpolationMode;
/// use cvkit_imgproc::warp::rotate;
///
/// let src = Image::<f32, 1>::new([2, 2].into(), vec![0.0, 1.0, 2.0, 3.0]).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
///
/// rotate(&src, &mut dst, 90.0, InterpolationMode::Nearest).unwrap();
/// assert_eq!(dst.as_slice(), &[1.0, 3.0, 0.0, 2.0]);
/// ```
pub fn rotate<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    angle: f32,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if src.as_slice().is_empty() {
        return Err(ImageError::ImageDataNotInitialized);
    }

    let (cols, rows) = (src.cols() as f32, src.rows() as f32);
    // pixel centers, so a quarter turn maps pixels exactly onto pixels
    let rotation = InverseRotation::new(((cols - 1.0) / 2.0, (rows - 1.0) / 2.0), angle);

    parallel::par_fill_pixels(dst, |x, y, pixel| {
        let (u, v) = rotation.source_of(x as f32, y as f32);
        if (-0.5..cols - 0.5).contains(&u) && (-0.5..rows - 0.5).contains(&v) {
            interpolation.sample_pixel(src, u, v, pixel);
        } else {
            pixel.fill(0.0);
        }
    });

    Ok(())
}
