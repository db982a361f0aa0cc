use cvkit_image::{Image, ImageError};

use crate::parallel;

/// Performs weighted addition of two images `src1` and `src2` with weights `alpha`
/// and `beta`, and an optional scalar `gamma`. The formula used is:
///
/// dst(x,y,c) = (src1(x,y,c) * alpha + src2(x,y,c) * beta + gamma)
///
/// # Arguments
///
/// * `src1` - The first input image.
/// * `alpha` - Weight of the first image elements to be multiplied.
/// * `src2` - The second input image.
/// * `beta` - Weight of the second image elements to be multiplied.
/// * `gamma` - Scalar added to each sum.
/// * `dst` - The output image.
///
/// # Errors
///
/// Returns an error if the sizes of `src1`, `src2` and `dst` do not match.
pub fn add_weighted<T, const C: usize>(
    src1: &Image<T, C>,
    alpha: T,
    src2: &Image<T, C>,
    beta: T,
    gamma: T,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError>
where
    T: num_traits::Float + Send + Sync,
{
    if src1.size() != src2.size() {
        return Err(ImageError::InvalidImageSize(
            src1.cols(),
            src1.rows(),
            src2.cols(),
            src2.rows(),
        ));
    }

    if src1.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src1.cols(),
            src1.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_zip_values(src1, src2, dst, |a, b| a * alpha + b * beta + gamma);

    Ok(())
}

/// Blends two images with a normalized factor.
///
/// dst(x,y,c) = alpha * src1(x,y,c) + (1 - alpha) * src2(x,y,c)
///
/// An `alpha` of 1 returns `src1`, an `alpha` of 0 returns `src2`.
///
/// # Example
///
/// ```
/// use cvkit_image::{Image, ImageSize};
/// use cvkit_imgproc::enhance::blend;
///
/// let size = ImageSize { width: 1, height: 1 };
/// let black = Image::<f32, 3>::from_size_val(size, 0.0).unwrap();
/// let white = Image::<f32, 3>::from_size_val(size, 1.0).unwrap();
/// let mut gray = Image::<f32, 3>::from_size_val(size, 0.0).unwrap();
///
/// blend(&white, &black, 0.25, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[0.25, 0.25, 0.25]);
/// ```
pub fn blend<T, const C: usize>(
    src1: &Image<T, C>,
    src2: &Image<T, C>,
    alpha: T,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError>
where
    T: num_traits::Float + Send + Sync,
{
    add_weighted(src1, alpha, src2, T::one() - alpha, T::zero(), dst)
}

#[cfg(test)]
mod tests {
    use cvkit_image::{Image, ImageError, ImageSize};

    #[test]
    fn add_weighted_values() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let src1 = Image::<f32, 1>::new(size, vec![1.0, 2.0])?;
        let src2 = Image::<f32, 1>::new(size, vec![10.0, 20.0])?;
        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0)?;

        super::add_weighted(&src1, 2.0, &src2, 0.5, 1.0, &mut dst)?;
        assert_eq!(dst.as_slice(), &[8.0, 15.0]);

        Ok(())
    }

    #[test]
    fn blend_extremes() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let src1 = Image::<f32, 1>::new(size, vec![1.0, 2.0, 3.0, 4.0])?;
        let src2 = Image::<f32, 1>::new(size, vec![5.0, 6.0, 7.0, 8.0])?;
        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0)?;

        super::blend(&src1, &src2, 1.0, &mut dst)?;
        assert_eq!(dst.as_slice(), src1.as_slice());

        super::blend(&src1, &src2, 0.0, &mut dst)?;
        assert_eq!(dst.as_slice(), src2.as_slice());

        Ok(())
    }

    #[test]
    fn blend_size_mismatch() -> Result<(), ImageError> {
        let src1 = Image::<f32, 1>::from_size_val([2, 2].into(), 0.0)?;
        let src2 = Image::<f32, 1>::from_size_val([3, 2].into(), 0.0)?;
        let mut dst = Image::<f32, 1>::from_size_val([2, 2].into(), 0.0)?;

        assert_eq!(
            super::blend(&src1, &src2, 0.5, &mut dst),
            Err(ImageError::InvalidImageSize(2, 2, 3, 2))
        );

        Ok(())
    }
}
