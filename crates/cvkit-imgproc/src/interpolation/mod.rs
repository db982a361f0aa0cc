//! Sampling an image at sub-pixel positions.

mod bilinear;
mod nearest;

use cvkit_image::Image;

/// How values between pixel centres are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Blend the four surrounding pixels.
    #[default]
    Bilinear,
    /// Take the closest pixel.
    Nearest,
}

impl InterpolationMode {
    /// Channel `c` of `image` at column `u`, row `v`.
    ///
    /// Positions past the border read the border pixels. `image` must hold
    /// at least one pixel.
    ///
    /// ```
    /// use cvkit_image::Image;
    /// use cvkit_imgproc::interpolation::InterpolationMode;
    ///
    /// let ramp = Image::<f32, 1>::new([3, 1].into(), vec![0.0, 10.0, 20.0]).unwrap();
    /// assert_eq!(InterpolationMode::Bilinear.sample(&ramp, 1.5, 0.0, 0), 15.0);
    /// assert_eq!(InterpolationMode::Nearest.sample(&ramp, 1.4, 0.0, 0), 10.0);
    /// ```
    pub fn sample<const C: usize>(self, image: &Image<f32, C>, u: f32, v: f32, c: usize) -> f32 {
        match self {
            InterpolationMode::Bilinear => bilinear::sample(image, u, v, c),
            InterpolationMode::Nearest => nearest::sample(image, u, v, c),
        }
    }

    /// Fill every channel of `pixel` with the samples at `(u, v)`.
    pub(crate) fn sample_pixel<const C: usize>(
        self,
        image: &Image<f32, C>,
        u: f32,
        v: f32,
        pixel: &mut [f32],
    ) {
        for (c, value) in pixel.iter_mut().enumerate() {
            *value = self.sample(image, u, v, c);
        }
    }
}
