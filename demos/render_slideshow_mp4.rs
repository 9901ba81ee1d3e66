//! Renders the stock fifteen-image slideshow to `assets/slideshow.mp4`.
//!
//! Expects `assets/img/1.jpg` .. `assets/img/15.jpg` next to the working
//! directory and `ffmpeg` on PATH.

use std::path::PathBuf;

use slidereel::{
    Canvas, CpuBackend, Fps, FrameIndex, FrameRange, PreparedImageStore, RenderSettings,
    RenderThreading, RenderToMp4Opts, SlideshowBuilder, Timeline, render_to_mp4,
};

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut builder = SlideshowBuilder::new(
        Fps::new(30, 1)?,
        Canvas {
            width: 1920,
            height: 1080,
        },
    )
    .id("MyVideo");
    for i in 1..=15 {
        builder = builder.image(format!("img/{i}.jpg"));
    }
    let show = builder.build()?;

    let timeline = Timeline::assemble(&show)?;
    let assets = PreparedImageStore::prepare(&show, "assets")?;

    let settings = RenderSettings {
        clear_rgba: Some([0, 0, 0, 255]),
    };
    let mut backend = CpuBackend::new(settings.clone());

    let threads = std::env::var("SLIDEREEL_THREADS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(4);

    let out_path = PathBuf::from("assets").join("slideshow.mp4");
    render_to_mp4(
        &timeline,
        &out_path,
        RenderToMp4Opts {
            range: FrameRange::new(FrameIndex(0), timeline.duration)?,
            bg_rgba: settings.clear_rgba.unwrap_or([0, 0, 0, 255]),
            overwrite: true,
            threading: RenderThreading {
                parallel: true,
                chunk_size: 48,
                threads: Some(threads),
            },
        },
        &mut backend,
        &assets,
    )?;

    eprintln!("threads={threads}");
    eprintln!("wrote {}", out_path.display());
    Ok(())
}
