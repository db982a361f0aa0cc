use cvkit_image::{Image, ImageError};

use crate::interpolation::InterpolationMode;
use crate::parallel;

/// Evenly spaced sample positions of `n` points in `[0, last]`.
fn linspace_step(last: usize, n: usize) -> f32 {
    if n > 1 {
        last as f32 / (n - 1) as f32
    } else {
        0.0
    }
}

/// Resize an image to a new size.
///
/// The function resizes an image to the size of `dst` using the specified
/// interpolation mode. It supports any number of channels. The corner pixels of
/// the source map onto the corner pixels of the destination.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container, already allocated with the new size.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// Returns an error if the source image is empty.
///
/// # Example
///
/// ```
/// use cvkit_image::{Image, ImageSize};
/// use cvkit_imgproc::interpolation::InterpolationMode;
/// use cvkit_imgproc::resize::resize_native;
///
/// let image = Image::<_, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0.0).unwrap();
///
/// resize_native(&image, &mut image_resized, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize_native<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if src.as_slice().is_empty() {
        return Err(ImageError::ImageDataNotInitialized);
    }

    let step_x = linspace_step(src.cols() - 1, dst.cols());
    let step_y = linspace_step(src.rows() - 1, dst.rows());

    parallel::par_fill_pixels(dst, |x, y, pixel| {
        interpolation.sample_pixel(src, x as f32 * step_x, y as f32 * step_y, pixel);
    });

    Ok(())
}
