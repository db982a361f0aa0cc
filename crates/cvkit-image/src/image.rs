use crate::error::ImageError;

/// Width and height of an image, in pixels.
///
/// ```
/// use cvkit_image::ImageSize;
///
/// let size = ImageSize::from([640, 480]);
/// assert_eq!((size.width, size.height), (640, 480));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// `[width, height]`
impl From<[usize; 2]> for ImageSize {
    fn from([width, height]: [usize; 2]) -> Self {
        ImageSize { width, height }
    }
}

/// An owned image with `CHANNELS` interleaved channels of type `T`.
///
/// Pixels are stored row by row with the channels of each pixel next to
/// each other, so the flat layout is `(height, width, channels)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Wrap `data` as an image of the given size.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidChannelShape`] when `data` does not hold exactly
    /// `width * height * CHANNELS` values.
    ///
    /// ```
    /// use cvkit_image::{Image, ImageSize};
    ///
    /// let size = ImageSize { width: 4, height: 3 };
    /// let image = Image::<u8, 3>::new(size, vec![0; 4 * 3 * 3]).unwrap();
    /// assert_eq!(image.size(), size);
    /// assert!(Image::<u8, 3>::new(size, vec![0; 10]).is_err());
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.width * size.height * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// An image of the given size with every value set to `val`.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        Image::new(size, vec![val; size.width * size.height * CHANNELS])
    }

    /// Size in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Number of columns, same as [`Image::width`].
    #[inline]
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Number of rows, same as [`Image::height`].
    #[inline]
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Number of channels per pixel.
    #[inline]
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// All values in storage order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// All values in storage order, mutably.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// The value at `[row, col, channel]`, or `None` when out of bounds.
    ///
    /// ```
    /// use cvkit_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![3, 7]).unwrap();
    /// assert_eq!(image.get([0, 1, 0]), Some(&7));
    /// assert_eq!(image.get([1, 0, 0]), None);
    /// ```
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        let [y, x, c] = index;
        if y >= self.height() || x >= self.width() || c >= CHANNELS {
            return None;
        }
        self.data.get((y * self.width() + x) * CHANNELS + c)
    }

    /// Convert every value to `U`.
    ///
    /// # Errors
    ///
    /// [`ImageError::CastError`] when a value does not fit in `U`.
    pub fn cast<U>(&self) -> Result<Image<U, CHANNELS>, ImageError>
    where
        U: num_traits::NumCast,
        T: num_traits::NumCast + Copy,
    {
        self.map_values(|x| U::from(x).ok_or(ImageError::CastError))
    }

    /// Convert every value to `U` and multiply it by `scale`.
    ///
    /// ```
    /// use cvkit_image::{Image, ImageSize};
    ///
    /// let rgb = Image::<u8, 3>::new(
    ///     ImageSize { width: 1, height: 2 },
    ///     vec![0, 0, 255, 0, 0, 255],
    /// ).unwrap();
    ///
    /// let unit = rgb.cast_and_scale::<f32>(1. / 255.0).unwrap();
    /// assert_eq!(unit.get([1, 0, 2]), Some(&1.0f32));
    /// ```
    pub fn cast_and_scale<U>(&self, scale: U) -> Result<Image<U, CHANNELS>, ImageError>
    where
        U: num_traits::NumCast + std::ops::Mul<Output = U> + Copy,
        T: num_traits::NumCast + Copy,
    {
        self.map_values(|x| {
            U::from(x)
                .map(|v| v * scale)
                .ok_or(ImageError::CastError)
        })
    }

    fn map_values<U>(
        &self,
        f: impl Fn(T) -> Result<U, ImageError>,
    ) -> Result<Image<U, CHANNELS>, ImageError>
    where
        T: Copy,
    {
        let data = self
            .data
            .iter()
            .map(|&x| f(x))
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(self.size, data)
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageError, ImageSize};

    #[test]
    fn image_size_display() {
        let size = ImageSize::from([10, 20]);
        assert_eq!(size.width, 10);
        assert_eq!(size.height, 20);
        assert_eq!(size.to_string(), "10x20");
    }

    #[test]
    fn image_from_size_val() -> Result<(), ImageError> {
        let image = Image::<f32, 2>::from_size_val([3, 2].into(), 0.5)?;
        assert_eq!((image.cols(), image.rows()), (3, 2));
        assert_eq!(image.num_channels(), 2);
        assert_eq!(image.as_slice().len(), 12);
        assert!(image.as_slice().iter().all(|&v| v == 0.5));
        Ok(())
    }

    #[test]
    fn image_wrong_length() {
        let res = Image::<u8, 3>::new([2, 2].into(), vec![0u8; 5]);
        assert_eq!(res, Err(ImageError::InvalidChannelShape(5, 12)));
    }

    #[test]
    fn image_get() -> Result<(), ImageError> {
        let image = Image::<u8, 2>::new([2, 2].into(), vec![0, 1, 2, 3, 4, 5, 6, 7])?;
        assert_eq!(image.get([0, 1, 1]), Some(&3));
        assert_eq!(image.get([1, 0, 0]), Some(&4));
        assert_eq!(image.get([0, 2, 0]), None);
        assert_eq!(image.get([0, 0, 2]), None);
        Ok(())
    }

    #[test]
    fn image_cast() -> Result<(), ImageError> {
        let image_u8 = Image::<u8, 3>::new([1, 2].into(), vec![0, 1, 2, 3, 4, 5])?;

        let image_i32: Image<i32, 3> = image_u8.cast()?;
        assert_eq!(image_i32.as_slice(), &[0, 1, 2, 3, 4, 5]);

        let doubled = image_u8.cast_and_scale(2.0f64)?;
        assert_eq!(doubled.get([1, 0, 2]), Some(&10.0));

        let image_f32 = Image::<f32, 1>::new([1, 1].into(), vec![300.0])?;
        assert_eq!(image_f32.cast::<u8>(), Err(ImageError::CastError));

        Ok(())
    }

    #[test]
    fn image_as_slice_mut() -> Result<(), ImageError> {
        let mut image = Image::<u8, 1>::from_size_val([2, 1].into(), 0)?;
        image.as_slice_mut()[1] = 9;
        assert_eq!(image.get([0, 1, 0]), Some(&9));
        Ok(())
    }
}
