use rayon::prelude::*;

use cvkit_image::Image;

/// Write `f(value)` for every value of `src` to the same position in `dst`.
///
/// Both images are expected to have the same size.
pub fn par_map_values<T1, T2, const C: usize>(
    src: &Image<T1, C>,
    dst: &mut Image<T2, C>,
    f: impl Fn(T1) -> T2 + Send + Sync,
) where
    T1: Copy + Send + Sync,
    T2: Send,
{
    dst.as_slice_mut()
        .par_iter_mut()
        .zip(src.as_slice().par_iter())
        .for_each(|(out, &value)| *out = f(value));
}

/// Write `f(a, b)` for every pair of values of `src1` and `src2` to the same
/// position in `dst`.
pub fn par_zip_values<T1, T2, T3, const C: usize>(
    src1: &Image<T1, C>,
    src2: &Image<T2, C>,
    dst: &mut Image<T3, C>,
    f: impl Fn(T1, T2) -> T3 + Send + Sync,
) where
    T1: Copy + Send + Sync,
    T2: Copy + Send + Sync,
    T3: Send,
{
    dst.as_slice_mut()
        .par_iter_mut()
        .zip(src1.as_slice().par_iter().zip(src2.as_slice().par_iter()))
        .for_each(|(out, (&a, &b))| *out = f(a, b));
}

/// Compute every pixel of `dst` from its position, one row per task.
///
/// `f` receives the column, the row and the channels of the pixel to fill.
pub fn par_fill_pixels<T, const C: usize>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, usize, &mut [T]) + Send + Sync,
) where
    T: Send,
{
    let row_len = dst.cols() * C;
    if row_len == 0 {
        return;
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            row.chunks_exact_mut(C)
                .enumerate()
                .for_each(|(x, pixel)| f(x, y, pixel));
        });
}

#[cfg(test)]
mod tests {
    use cvkit_image::{Image, ImageError};

    use super::*;

    #[test]
    fn fill_pixels_sees_positions() -> Result<(), ImageError> {
        let mut image = Image::<usize, 2>::from_size_val([3, 2].into(), 0)?;
        par_fill_pixels(&mut image, |x, y, pixel| {
            pixel[0] = x;
            pixel[1] = y;
        });
        assert_eq!(image.as_slice(), &[0, 0, 1, 0, 2, 0, 0, 1, 1, 1, 2, 1]);
        Ok(())
    }

    #[test]
    fn map_and_zip_values() -> Result<(), ImageError> {
        let a = Image::<u8, 1>::new([3, 1].into(), vec![1, 2, 3])?;
        let b = Image::<f32, 1>::new([3, 1].into(), vec![0.5, 0.25, 0.0])?;

        let mut doubled = Image::<u16, 1>::from_size_val(a.size(), 0)?;
        par_map_values(&a, &mut doubled, |v| v as u16 * 2);
        assert_eq!(doubled.as_slice(), &[2, 4, 6]);

        let mut sum = Image::<f32, 1>::from_size_val(a.size(), 0.0)?;
        par_zip_values(&a, &b, &mut sum, |x, y| x as f32 + y);
        assert_eq!(sum.as_slice(), &[1.5, 2.25, 3.0]);
        Ok(())
    }
}
