use argh::FromArgs;
use std::path::PathBuf;

use cvkit::image::{Image, ImageSize};
use cvkit::imgproc::{self, interpolation::InterpolationMode};
use cvkit::io;

#[derive(FromArgs)]
/// Resize, rotate and blend an image, then save the results
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// output directory
    #[argh(option, short = 'o')]
    output_dir: PathBuf,

    /// rotation angle in degrees
    #[argh(option, short = 'a', default = "30.0")]
    angle: f32,

    /// blend weight of the rotated image
    #[argh(option, default = "0.5")]
    alpha: f32,
}

fn to_u8<const C: usize>(
    image: &Image<f32, C>,
) -> Result<Image<u8, C>, Box<dyn std::error::Error>> {
    let mut scaled = Image::<f32, C>::from_size_val(image.size(), 0.0)?;
    imgproc::normalize::normalize_min_max(image, &mut scaled, 0.0, 255.0)?;
    Ok(scaled.cast::<u8>()?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();
    std::fs::create_dir_all(&args.output_dir)?;

    let rgb = io::read_image_any_rgb8(&args.image_path)?;
    let rgb = rgb.cast_and_scale::<f32>(1.0 / 255.0)?;
    log::info!("loaded {} ({})", args.image_path.display(), rgb.size());

    let half = ImageSize {
        width: (rgb.width() / 2).max(1),
        height: (rgb.height() / 2).max(1),
    };
    let mut small = Image::<f32, 3>::from_size_val(half, 0.0)?;
    imgproc::resize::resize_native(&rgb, &mut small, InterpolationMode::Bilinear)?;

    let mut rotated = Image::<f32, 3>::from_size_val(rgb.size(), 0.0)?;
    imgproc::warp::rotate(&rgb, &mut rotated, args.angle, InterpolationMode::Bilinear)?;

    let mut blended = Image::<f32, 3>::from_size_val(rgb.size(), 0.0)?;
    imgproc::enhance::blend(&rotated, &rgb, args.alpha, &mut blended)?;

    let outputs = [
        ("resized.png", &small),
        ("rotated.png", &rotated),
        ("blended.png", &blended),
    ];
    for (name, image) in outputs {
        let path = args.output_dir.join(name);
        io::write_image_rgb8(&path, &to_u8(image)?)?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}
