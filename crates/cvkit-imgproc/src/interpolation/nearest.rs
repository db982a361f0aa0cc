use cvkit_image::Image;

/// Value of the pixel closest to `(u, v)`, clamped to the border.
pub(super) fn sample<const C: usize>(image: &Image<f32, C>, u: f32, v: f32, c: usize) -> f32 {
    let (rows, cols) = (image.rows(), image.cols());

    let iu = (u.round().max(0.0) as usize).min(cols - 1);
    let iv = (v.round().max(0.0) as usize).min(rows - 1);

    image.as_slice()[(iv * cols + iu) * C + c]
}
