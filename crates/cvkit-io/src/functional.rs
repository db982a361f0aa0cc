use std::path::Path;

use cvkit_image::{Image, ImageSize};
use image::imageops::FilterType;

use crate::error::IoError;

/// Decodes any image format supported by the image crate, sniffing the format
/// from the file content.
fn read_image_any(file_path: &Path) -> Result<image::DynamicImage, IoError> {
    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    log::trace!(
        "decoded {} ({}x{}, {:?})",
        file_path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    Ok(img)
}

fn image_size(width: u32, height: u32) -> ImageSize {
    ImageSize {
        width: width as usize,
        height: height as usize,
    }
}

/// Reads an image from the given file path as 8-bit RGB.
///
/// The method tries to read from any image format supported by the image crate.
/// Grayscale and alpha images are converted to three channels.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB8 image containing the image data.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let img = read_image_any(file_path.as_ref())?.into_rgb8();
    let size = image_size(img.width(), img.height());
    Ok(Image::new(size, img.into_raw())?)
}

/// Reads an image from the given file path as 8-bit RGBA.
///
/// Images without alpha get a fully opaque alpha channel.
pub fn read_image_any_rgba8(file_path: impl AsRef<Path>) -> Result<Image<u8, 4>, IoError> {
    let img = read_image_any(file_path.as_ref())?.into_rgba8();
    let size = image_size(img.width(), img.height());
    Ok(Image::new(size, img.into_raw())?)
}

/// Reads an image from the given file path as 8-bit grayscale.
pub fn read_image_any_gray8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let img = read_image_any(file_path.as_ref())?.into_luma8();
    let size = image_size(img.width(), img.height());
    Ok(Image::new(size, img.into_raw())?)
}

/// Reads an image as 8-bit RGB and resizes it to `size` while decoding.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
/// * `size` - The desired output resolution.
pub fn read_image_rgb8_resized(
    file_path: impl AsRef<Path>,
    size: ImageSize,
) -> Result<Image<u8, 3>, IoError> {
    let img = read_image_any(file_path.as_ref())?.into_rgb8();
    let resized = image::imageops::resize(
        &img,
        size.width as u32,
        size.height as u32,
        FilterType::Triangle,
    );
    Ok(Image::new(size, resized.into_raw())?)
}

fn write_image_raw(
    file_path: &Path,
    data: &[u8],
    size: ImageSize,
    color: image::ExtendedColorType,
) -> Result<(), IoError> {
    // the encoder is chosen from the extension
    if file_path.extension().is_none() {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    image::save_buffer(
        file_path,
        data,
        size.width as u32,
        size.height as u32,
        color,
    )?;

    Ok(())
}

/// Writes an RGB8 image to the given file path.
///
/// The format is chosen from the file extension (e.g. `png`, `jpg`, `bmp`).
pub fn write_image_rgb8(file_path: impl AsRef<Path>, image: &Image<u8, 3>) -> Result<(), IoError> {
    write_image_raw(
        file_path.as_ref(),
        image.as_slice(),
        image.size(),
        image::ExtendedColorType::Rgb8,
    )
}

/// Writes an RGBA8 image to the given file path.
pub fn write_image_rgba8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 4>,
) -> Result<(), IoError> {
    write_image_raw(
        file_path.as_ref(),
        image.as_slice(),
        image.size(),
        image::ExtendedColorType::Rgba8,
    )
}

/// Writes a grayscale image to the given file path.
pub fn write_image_gray8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
) -> Result<(), IoError> {
    write_image_raw(
        file_path.as_ref(),
        image.as_slice(),
        image.size(),
        image::ExtendedColorType::L8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard() -> Result<Image<u8, 3>, IoError> {
        let size = ImageSize {
            width: 4,
            height: 2,
        };
        let data = (0..size.width * size.height)
            .flat_map(|i| {
                if i % 2 == 0 {
                    [255u8, 0, 0]
                } else {
                    [0u8, 0, 255]
                }
            })
            .collect();
        Ok(Image::new(size, data)?)
    }

    #[test]
    fn read_write_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("board.png");

        let image = checkerboard()?;
        write_image_rgb8(&file_path, &image)?;
        assert!(file_path.exists(), "File does not exist: {file_path:?}");

        let image_back = read_image_any_rgb8(&file_path)?;
        assert_eq!(image_back.size(), image.size());
        assert_eq!(image_back.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn read_as_gray_and_rgba() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("board.png");
        write_image_rgb8(&file_path, &checkerboard()?)?;

        let gray = read_image_any_gray8(&file_path)?;
        assert_eq!(gray.num_channels(), 1);
        assert_eq!(gray.size().width, 4);

        let rgba = read_image_any_rgba8(&file_path)?;
        assert_eq!(rgba.num_channels(), 4);
        assert_eq!(rgba.get([0, 0, 3]), Some(&255));

        Ok(())
    }

    #[test]
    fn read_resized() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("board.png");
        write_image_rgb8(&file_path, &checkerboard()?)?;

        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let image = read_image_rgb8_resized(&file_path, size)?;
        assert_eq!(image.size(), size);

        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let res = read_image_any_rgb8("does/not/exist.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn write_without_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let res = write_image_rgb8(tmp_dir.path().join("board"), &checkerboard()?);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
        Ok(())
    }
}
