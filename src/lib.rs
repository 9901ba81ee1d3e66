#![forbid(unsafe_code)]

pub mod assets;
pub mod compile;
pub mod core;
pub mod dsl;
pub mod encode_ffmpeg;
pub mod error;
pub mod eval;
pub mod interp;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod render_cpu;
pub mod timeline;

pub use assets::{AssetId, PreparedImage, PreparedImageStore};
pub use compile::{DrawOp, FramePlan, compile_frame, cover_fit, zoom_about_center};
pub use self::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Rect, Rgba8Premul, Vec2};
pub use dsl::SlideshowBuilder;
pub use error::{SlidereelError, SlidereelResult};
pub use eval::{EvaluatedFrame, Evaluator, FrameState, frame_state};
pub use interp::{Ease, Extrapolate, InterpOptions, interpolate};
pub use model::{FadeSpec, ImageAsset, SlideStyle, Slideshow, ZoomSpec};
pub use pipeline::{RenderThreading, RenderToMp4Opts, render_frame, render_frames, render_to_mp4};
pub use render::{FrameRGBA, RenderBackend, RenderSettings};
pub use render_cpu::CpuBackend;
pub use timeline::{Segment, Timeline};
