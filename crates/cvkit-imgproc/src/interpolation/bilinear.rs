use cvkit_image::Image;

/// Weighted mean of the four pixels around `(u, v)`.
///
/// The position is clamped to the pixel centres of the border first, so
/// nothing is extrapolated.
pub(super) fn sample<const C: usize>(image: &Image<f32, C>, u: f32, v: f32, c: usize) -> f32 {
    let (rows, cols) = (image.rows(), image.cols());
    let u = u.clamp(0.0, (cols - 1) as f32);
    let v = v.clamp(0.0, (rows - 1) as f32);

    let (u0, v0) = (u.floor() as usize, v.floor() as usize);
    let (u1, v1) = ((u0 + 1).min(cols - 1), (v0 + 1).min(rows - 1));
    let (wu, wv) = (u - u0 as f32, v - v0 as f32);

    let data = image.as_slice();
    let at = |iv: usize, iu: usize| data[(iv * cols + iu) * C + c];

    let top = at(v0, u0) + (at(v0, u1) - at(v0, u0)) * wu;
    let bottom = at(v1, u0) + (at(v1, u1) - at(v1, u0)) * wu;
    top + (bottom - top) * wv
}

#[cfg(test)]
mod tests {
    use cvkit_image::{Image, ImageError};

    #[test]
    fn bilinear_midpoint_and_border() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new([2, 2].into(), vec![0.0, 2.0, 4.0, 6.0])?;

        approx::assert_relative_eq!(super::sample(&image, 0.5, 0.5, 0), 3.0);
        approx::assert_relative_eq!(super::sample(&image, 1.0, 0.0, 0), 2.0);
        // clamped, not extrapolated
        approx::assert_relative_eq!(super::sample(&image, -0.4, 0.0, 0), 0.0);
        approx::assert_relative_eq!(super::sample(&image, 1.4, 1.4, 0), 6.0);
        Ok(())
    }
}
