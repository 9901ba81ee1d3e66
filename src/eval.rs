use crate::{
    core::{Fps, FrameIndex},
    error::{SlidereelError, SlidereelResult},
    interp::{Extrapolate, InterpOptions, interpolate},
    model::{ImageAsset, SlideStyle},
    timeline::Timeline,
};

/// Per-frame visual state of a slide. Derived, never stored.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameState {
    pub scale: f64,
    pub opacity: f64,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedFrame {
    pub frame: FrameIndex,
    pub segment_index: usize,
    pub segment_name: String,
    pub asset: ImageAsset,
    pub local_frame: FrameIndex,
    pub state: FrameState,
}

/// Compute scale and opacity for a segment-local frame.
///
/// The zoom channel maps `[0, floor(duration_secs*fps)]` to `[zoom.from,
/// zoom.to]` and never clamps: past the window the value keeps extrapolating
/// linearly and is unbounded. The fade channel maps `[0,
/// floor(fade_secs*fps)]` to `[0, 1]` and clamps on both sides. `local_frame`
/// is signed so callers replaying before a segment's start get the clamped
/// fade value rather than an error.
pub fn frame_state(style: &SlideStyle, local_frame: i64, fps: Fps) -> SlidereelResult<FrameState> {
    let zoom_frames = fps.secs_to_frames_floor(style.duration_secs);
    if zoom_frames == 0 {
        return Err(SlidereelError::evaluation(
            "slide duration must span at least one frame",
        ));
    }
    let f = local_frame as f64;

    let scale = interpolate(
        f,
        [0.0, zoom_frames as f64],
        [style.zoom.from, style.zoom.to],
        InterpOptions::default(),
    )?;

    let fade_frames = fps.secs_to_frames_floor(style.fade.duration_secs);
    let opacity = if fade_frames == 0 {
        1.0
    } else {
        interpolate(
            f,
            [0.0, fade_frames as f64],
            [0.0, 1.0],
            InterpOptions {
                left: Extrapolate::Clamp,
                right: Extrapolate::Clamp,
                ease: style.fade.ease,
            },
        )?
    };

    Ok(FrameState { scale, opacity })
}

pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(timeline))]
    pub fn eval_frame(timeline: &Timeline, frame: FrameIndex) -> SlidereelResult<EvaluatedFrame> {
        if frame.0 >= timeline.duration.0 {
            return Err(SlidereelError::evaluation("frame is out of bounds"));
        }

        let segment = timeline.segment_at(frame).ok_or_else(|| {
            SlidereelError::evaluation("no segment covers an in-bounds frame (timeline bug)")
        })?;
        let local = FrameIndex(frame.0 - segment.range.start.0);
        let state = frame_state(&timeline.style, local.0 as i64, timeline.fps)?;

        Ok(EvaluatedFrame {
            frame,
            segment_index: segment.index,
            segment_name: segment.name.clone(),
            asset: segment.asset.clone(),
            local_frame: local,
            state,
        })
    }
}
