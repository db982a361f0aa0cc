use cvkit_image::{Image, ImageError};
use num_traits::Float;

use crate::parallel;

/// Find the minimum and maximum values in an image.
///
/// # Errors
///
/// Returns an error if the image holds no pixels.
///
/// # Example
///
/// ```
/// use cvkit_image::{Image, ImageSize};
/// use cvkit_imgproc::normalize::find_min_max;
///
/// let image = Image::<u8, 3>::new(
///   ImageSize {
///     width: 2,
///     height: 2,
///   },
///   vec![0u8, 1, 0, 1, 2, 3, 0, 1, 0, 1, 2, 3],
/// )
/// .unwrap();
///
/// let (min, max) = find_min_max(&image).unwrap();
/// assert_eq!(min, 0);
/// assert_eq!(max, 3);
/// ```
pub fn find_min_max<T, const C: usize>(image: &Image<T, C>) -> Result<(T, T), ImageError>
where
    T: Copy + PartialOrd,
{
    let first_element = match image.as_slice().first() {
        Some(x) => x,
        None => return Err(ImageError::ImageDataNotInitialized),
    };

    let mut min = first_element;
    let mut max = first_element;

    for x in image.as_slice().iter() {
        if x < min {
            min = x;
        }
        if x > max {
            max = x;
        }
    }

    Ok((*min, *max))
}

/// Normalize an image using the minimum and maximum values.
///
/// The formula for normalizing an image is:
///
/// (image - min_val) * (max - min) / (max_val - min_val) + min
///
/// where `min_val` and `max_val` are computed over all channels. A constant
/// image has no range and maps entirely to `min`.
///
/// # Arguments
///
/// * `src` - The input image of shape (height, width, channels).
/// * `dst` - The output image of shape (height, width, channels).
/// * `min` - The minimum output value.
/// * `max` - The maximum output value.
///
/// # Example
///
/// ```
/// use cvkit_image::{Image, ImageSize};
/// use cvkit_imgproc::normalize::normalize_min_max;
///
/// let size = ImageSize { width: 3, height: 1 };
/// let image = Image::<f32, 1>::new(size, vec![2.0, 4.0, 6.0]).unwrap();
/// let mut normalized = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// normalize_min_max(&image, &mut normalized, 0.0, 1.0).unwrap();
/// assert_eq!(normalized.as_slice(), &[0.0, 0.5, 1.0]);
/// ```
pub fn normalize_min_max<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    min: T,
    max: T,
) -> Result<(), ImageError>
where
    T: Float + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let (min_val, max_val) = find_min_max(src)?;
    let range = max_val - min_val;

    parallel::par_map_values(src, dst, |value| {
        if range > T::zero() {
            (value - min_val) * (max - min) / range + min
        } else {
            min
        }
    });

    Ok(())
}
