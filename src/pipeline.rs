use rayon::prelude::*;

use crate::{
    assets::PreparedImageStore,
    compile::compile_frame,
    core::{FrameIndex, FrameRange},
    error::{SlidereelError, SlidereelResult},
    eval::Evaluator,
    render::{FrameRGBA, RenderBackend, RenderSettings},
    render_cpu::CpuBackend,
    timeline::Timeline,
};

/// Evaluate + compile + render a single frame.
///
/// This is the primary one-shot API for producing pixels from a [`Timeline`].
///
/// Pipeline:
/// 1. [`Evaluator::eval_frame`](crate::Evaluator::eval_frame)
/// 2. [`compile_frame`](crate::compile_frame)
/// 3. [`RenderBackend::render_plan`](crate::RenderBackend::render_plan)
///
/// Returns a [`FrameRGBA`] containing **premultiplied** RGBA8 pixels.
pub fn render_frame(
    timeline: &Timeline,
    frame: FrameIndex,
    backend: &mut dyn RenderBackend,
    assets: &PreparedImageStore,
) -> SlidereelResult<FrameRGBA> {
    let eval = Evaluator::eval_frame(timeline, frame)?;
    let plan = compile_frame(timeline, &eval, assets)?;
    backend.render_plan(&plan, assets)
}

/// Render a range of frames (inclusive start, exclusive end).
pub fn render_frames(
    timeline: &Timeline,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    assets: &PreparedImageStore,
) -> SlidereelResult<Vec<FrameRGBA>> {
    if range.is_empty() {
        return Err(SlidereelError::validation("render range must be non-empty"));
    }

    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    for f in range.start.0..range.end.0 {
        out.push(render_frame(timeline, FrameIndex(f), backend, assets)?);
    }
    Ok(out)
}

#[derive(Clone, Debug)]
pub struct RenderThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Options for [`render_to_mp4`].
///
/// `bg_rgba` is used when flattening alpha for the encoder.
#[derive(Clone, Debug)]
pub struct RenderToMp4Opts {
    /// Frame range to render (start inclusive, end exclusive).
    pub range: FrameRange,
    /// Background color to flatten alpha over (RGBA8, straight alpha).
    pub bg_rgba: [u8; 4],
    /// Whether to overwrite `out_path` if it already exists.
    pub overwrite: bool,
    /// Render threading/chunking configuration.
    pub threading: RenderThreading,
}

impl Default for RenderToMp4Opts {
    fn default() -> Self {
        Self {
            range: FrameRange {
                start: FrameIndex(0),
                end: FrameIndex(1),
            },
            bg_rgba: [0, 0, 0, 255],
            overwrite: true,
            threading: RenderThreading::default(),
        }
    }
}

/// Render a timeline to an MP4 by invoking the system `ffmpeg` binary.
///
/// `ffmpeg` must be installed and on `PATH`; this checks up front and returns
/// an error if it is not available. Segments carry no cross-frame state, so
/// with `threading.parallel` chunks of frames render on a rayon pool with one
/// worker backend per thread; output order is preserved either way.
pub fn render_to_mp4(
    timeline: &Timeline,
    out_path: impl Into<std::path::PathBuf>,
    opts: RenderToMp4Opts,
    backend: &mut dyn RenderBackend,
    assets: &PreparedImageStore,
) -> SlidereelResult<()> {
    if opts.range.end.0 > timeline.duration.0 {
        return Err(SlidereelError::validation(
            "render_to_mp4 range must be within timeline duration",
        ));
    }
    if opts.range.is_empty() {
        return Err(SlidereelError::validation(
            "render_to_mp4 range must be non-empty",
        ));
    }

    let fps = if timeline.fps.den == 1 {
        timeline.fps.num
    } else {
        return Err(SlidereelError::validation(
            "render_to_mp4 currently requires integer fps (fps.den == 1)",
        ));
    };

    if !crate::encode_ffmpeg::is_ffmpeg_on_path() {
        return Err(SlidereelError::evaluation(
            "ffmpeg is required for MP4 rendering, but was not found on PATH",
        ));
    }

    let cfg = crate::encode_ffmpeg::EncodeConfig {
        width: timeline.canvas.width,
        height: timeline.canvas.height,
        fps,
        out_path: out_path.into(),
        overwrite: opts.overwrite,
    };
    let mut enc = crate::encode_ffmpeg::FfmpegEncoder::new(cfg, opts.bg_rgba)?;

    let chunk_size = normalized_chunk_size(opts.threading.chunk_size);
    let mut maybe_pool = None;
    let mut maybe_worker_settings = None;
    if opts.threading.parallel {
        maybe_pool = Some(build_thread_pool(opts.threading.threads)?);
        maybe_worker_settings = Some(backend.worker_render_settings().ok_or_else(|| {
            SlidereelError::evaluation(
                "parallel render_to_mp4 requires backend worker settings support (CpuBackend)",
            )
        })?);
    }

    let mut chunk_start = opts.range.start.0;
    while chunk_start < opts.range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(opts.range.end.0);
        let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))
            .map_err(|e| SlidereelError::evaluation(format!("invalid chunk range: {e}")))?;

        let frames = if opts.threading.parallel {
            render_chunk_parallel_cpu(
                timeline,
                chunk,
                assets,
                maybe_worker_settings
                    .as_ref()
                    .expect("worker settings present when parallel"),
                maybe_pool.as_ref().expect("pool present when parallel"),
            )?
        } else {
            render_frames(timeline, chunk, backend, assets)?
        };

        for frame in &frames {
            enc.encode_frame(frame)?;
        }
        tracing::debug!(
            start = chunk_start,
            end = chunk_end,
            "encoded frame chunk"
        );
        chunk_start = chunk_end;
    }

    enc.finish()?;
    tracing::info!(
        frames = opts.range.len_frames(),
        "finished mp4 encode"
    );
    Ok(())
}

fn render_chunk_parallel_cpu(
    timeline: &Timeline,
    range: FrameRange,
    assets: &PreparedImageStore,
    settings: &RenderSettings,
    pool: &rayon::ThreadPool,
) -> SlidereelResult<Vec<FrameRGBA>> {
    let rendered = pool.install(|| {
        (range.start.0..range.end.0)
            .into_par_iter()
            .map_init(
                || CpuBackend::new(settings.clone()),
                |worker, f| -> SlidereelResult<FrameRGBA> {
                    let frame = FrameIndex(f);
                    let eval = Evaluator::eval_frame(timeline, frame)?;
                    let plan = compile_frame(timeline, &eval, assets)?;
                    worker.render_plan(&plan, assets)
                },
            )
            .collect::<Vec<_>>()
    });

    let mut out = Vec::with_capacity(rendered.len());
    for item in rendered {
        out.push(item?);
    }
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> SlidereelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SlidereelError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SlidereelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 { 1 } else { chunk_size as u64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_chunk_size_normalizes_to_one() {
        assert_eq!(normalized_chunk_size(0), 1);
        assert_eq!(normalized_chunk_size(64), 64);
    }

    #[test]
    fn thread_pool_rejects_zero_threads() {
        assert!(build_thread_pool(Some(0)).is_err());
        assert!(build_thread_pool(Some(2)).is_ok());
        assert!(build_thread_pool(None).is_ok());
    }
}
