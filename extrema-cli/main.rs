use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use argh::FromArgs;
use extrema_cli::{all_pixels, intensity_from_luma, PipelineConfig, PostProcessor};
use image::{ImageReader, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_circle_mut;
use log::info;

#[derive(FromArgs)]
/// Find local intensity extrema in an image and keep a limited set of them
struct Args {
    /// path to the input image
    #[argh(positional)]
    input: PathBuf,

    /// where to write the annotated image
    #[argh(option, short = 'o', default = "PathBuf::from(\"features.png\")")]
    output: PathBuf,

    /// pipeline configuration in TOML
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// maximum number of features to keep
    #[argh(option, short = 'n')]
    limit: Option<usize>,

    /// selection policy: best_n, uniform_best, random or first
    #[argh(option, short = 's')]
    selector: Option<String>,

    /// search radius in pixels
    #[argh(option, short = 'r')]
    radius: Option<i32>,

    /// look for dark minima instead of bright maxima
    #[argh(switch, short = 'm')]
    minimum: bool,

    /// use the single-threaded verifier
    #[argh(switch)]
    sequential: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut config = match &args.config {
        Some(path) => PipelineConfig::load_toml(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(limit) = args.limit {
        config.max_features = limit;
    }
    if let Some(selector) = &args.selector {
        config.selector.selector_type = selector.parse()?;
    }
    if let Some(radius) = args.radius {
        config.nonmax.radius = radius;
    }
    if args.sequential {
        config.parallel = false;
    }
    info!("{}", config.summary());

    let img = ImageReader::open(&args.input)?.decode()?.to_luma8();
    let (w, h) = img.dimensions();
    let intensity = intensity_from_luma(&img)?;
    let candidates = all_pixels(w as usize, h as usize);

    let mut processor = PostProcessor::new(config)?;

    let t0 = Instant::now();
    let features = if args.minimum {
        processor.run_minimum(&intensity, &candidates)?
    } else {
        processor.run_maximum(&intensity, &candidates)?
    };
    info!("Processed {}x{} image in {:.2?}", w, h, t0.elapsed());
    println!("Kept {} features", features.len());

    let mut output: RgbaImage = image::DynamicImage::ImageLuma8(img).into_rgba8();
    for p in &features {
        draw_hollow_circle_mut(&mut output, (p.x, p.y), 3, Rgba([255, 0, 0, 255]));
    }
    output.save(&args.output)?;
    println!("Saved result image as {}", args.output.display());

    Ok(())
}
