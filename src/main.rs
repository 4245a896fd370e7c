use std::path::PathBuf;
use std::time::Instant;
use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use raylib::prelude::*;

use zoom_carousel::config::CarouselConfig;
use zoom_carousel::constants::*;
use zoom_carousel::slide::Slide;
use zoom_carousel::texture_loader::{load_sorted_image_paths, load_texture_with_exif_rotation};
use zoom_carousel::viewer::Viewer;

/// Scroll to zoom through a carousel of images and text cards.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory of images to show, sorted by file name
    image_directory: Option<PathBuf>,

    /// Text slide appended after the images (repeatable)
    #[arg(long = "text", value_name = "LABEL")]
    texts: Vec<String>,

    /// TOML file with min_scale, max_scale, scroll_sensitivity, switch_threshold
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long)]
    min_scale: Option<f64>,

    #[arg(long)]
    max_scale: Option<f64>,

    /// Scale change per wheel event
    #[arg(long)]
    sensitivity: Option<f64>,

    /// Scale at which the next slide is shown
    #[arg(long)]
    threshold: Option<f64>,
}

fn load_config(args: &Args) -> Result<CarouselConfig> {
    let base = match &args.config {
        Some(path) => CarouselConfig::load_from_path(path)
            .with_context(|| format!("Invalid config file {}", path.display()))?,
        None => CarouselConfig::default(),
    };
    base.with_overrides(args.min_scale, args.max_scale, args.sensitivity, args.threshold)
        .context("Invalid carousel settings")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;

    // Fail on a bad directory before opening a window
    let image_paths = match &args.image_directory {
        Some(dir) => load_sorted_image_paths(dir)?,
        None => Vec::new(),
    };

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title("Zoom Carousel")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Load Slides ---
    let mut slides: Vec<Slide> = Vec::new();
    for path in &image_paths {
        match load_texture_with_exif_rotation(&mut rl, &thread, path) {
            Ok(texture) => slides.push(Slide::image(texture)),
            Err(e) => warn!("Skipping image: {e:#}"),
        }
    }
    slides.extend(args.texts.iter().map(|label| Slide::text(label.as_str())));
    if slides.is_empty() {
        slides.extend((1..=DEFAULT_TEXT_SLIDES).map(|n| Slide::text(format!("item{n}"))));
    }
    info!("Loaded {} slides", slides.len());

    let mut viewer = Viewer::new(slides, config)?;

    // --- Main Loop ---
    while !rl.window_should_close() {
        viewer.update(&mut rl, Instant::now());

        let mut d = rl.begin_drawing(&thread);
        viewer.draw(&mut d);
    }

    Ok(())
}
