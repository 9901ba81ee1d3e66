use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "slidereel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the assembled timeline as JSON.
    Timeline(TimelineArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Input slideshow JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input slideshow JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input slideshow JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Render frame chunks on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker thread count (defaults to the rayon global heuristic).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn read_show_json(path: &Path) -> anyhow::Result<slidereel::Slideshow> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("open slideshow '{}'", path.display()))?;
    let show = slidereel::Slideshow::from_json_str(&s)?;
    show.validate()?;
    Ok(show)
}

fn assets_root(in_path: &Path) -> &Path {
    in_path.parent().unwrap_or_else(|| Path::new("."))
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let show = read_show_json(&args.in_path)?;
    let timeline = slidereel::Timeline::assemble(&show)?;
    println!("{}", serde_json::to_string_pretty(&timeline)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let show = read_show_json(&args.in_path)?;
    let timeline = slidereel::Timeline::assemble(&show)?;

    let settings = slidereel::RenderSettings {
        clear_rgba: Some([0, 0, 0, 255]),
    };
    let mut backend = slidereel::CpuBackend::new(settings);
    let assets = slidereel::PreparedImageStore::prepare(&show, assets_root(&args.in_path))?;

    let frame = slidereel::render_frame(
        &timeline,
        slidereel::FrameIndex(args.frame),
        &mut backend,
        &assets,
    )?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let show = read_show_json(&args.in_path)?;
    let timeline = slidereel::Timeline::assemble(&show)?;

    let settings = slidereel::RenderSettings {
        clear_rgba: Some([0, 0, 0, 255]),
    };
    let mut backend = slidereel::CpuBackend::new(settings.clone());
    let assets = slidereel::PreparedImageStore::prepare(&show, assets_root(&args.in_path))?;

    let opts = slidereel::RenderToMp4Opts {
        range: slidereel::FrameRange::new(slidereel::FrameIndex(0), timeline.duration)?,
        bg_rgba: settings.clear_rgba.unwrap_or([0, 0, 0, 255]),
        overwrite: true,
        threading: slidereel::RenderThreading {
            parallel: args.parallel,
            threads: args.threads,
            ..slidereel::RenderThreading::default()
        },
    };

    slidereel::render_to_mp4(&timeline, &args.out, opts, &mut backend, &assets)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
