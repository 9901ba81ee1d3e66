use crate::{
    core::{Canvas, Fps},
    error::{SlidereelError, SlidereelResult},
    interp::Ease,
};

/// Declarative description of a slideshow: an ordered list of images plus the
/// style every slide shares. This is the JSON interchange type; omitted fields
/// fall back to the stock configuration (1920x1080 at 30 fps, 8 s slides with
/// a 1.0 -> 1.1 zoom and a 3 s fade-in).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Slideshow {
    #[serde(default = "default_id")]
    pub id: String,
    #[serde(default = "default_fps")]
    pub fps: Fps,
    #[serde(default = "default_canvas")]
    pub canvas: Canvas,
    pub images: Vec<ImageAsset>,
    #[serde(default)]
    pub style: SlideStyle,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageAsset {
    /// Composition-relative path to the encoded image bytes.
    pub source: String,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct SlideStyle {
    /// How long each slide stays on screen. Also the zoom window.
    #[serde(default = "default_slide_secs")]
    pub duration_secs: f64,
    #[serde(default)]
    pub zoom: ZoomSpec,
    #[serde(default)]
    pub fade: FadeSpec,
}

impl Default for SlideStyle {
    fn default() -> Self {
        Self {
            duration_secs: default_slide_secs(),
            zoom: ZoomSpec::default(),
            fade: FadeSpec::default(),
        }
    }
}

/// Scale at the slide's first frame and at its nominal last frame. The zoom
/// channel never clamps, so frames past the window keep extrapolating.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ZoomSpec {
    pub from: f64,
    pub to: f64,
}

impl Default for ZoomSpec {
    fn default() -> Self {
        Self { from: 1.0, to: 1.1 }
    }
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct FadeSpec {
    /// Fade-in window measured from the slide's first frame. Zero disables
    /// the fade entirely.
    #[serde(default = "default_fade_secs")]
    pub duration_secs: f64,
    #[serde(default = "default_fade_ease")]
    pub ease: Ease,
}

impl Default for FadeSpec {
    fn default() -> Self {
        Self {
            duration_secs: default_fade_secs(),
            ease: default_fade_ease(),
        }
    }
}

fn default_id() -> String {
    "MyVideo".to_string()
}

fn default_fps() -> Fps {
    Fps { num: 30, den: 1 }
}

fn default_canvas() -> Canvas {
    Canvas {
        width: 1920,
        height: 1080,
    }
}

fn default_slide_secs() -> f64 {
    8.0
}

fn default_fade_secs() -> f64 {
    3.0
}

fn default_fade_ease() -> Ease {
    Ease::Linear
}

impl Slideshow {
    pub fn from_json_str(s: &str) -> SlidereelResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| SlidereelError::serde(format!("parse slideshow JSON: {e}")))
    }

    pub fn validate(&self) -> SlidereelResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(SlidereelError::validation("fps must have num>0 and den>0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SlidereelError::validation(
                "canvas width/height must be > 0",
            ));
        }
        self.style.validate(self.fps)?;

        for (index, asset) in self.images.iter().enumerate() {
            if asset.source.trim().is_empty() {
                return Err(SlidereelError::validation(format!(
                    "image {index} has an empty source path"
                )));
            }
        }

        Ok(())
    }
}

impl SlideStyle {
    pub fn validate(&self, fps: Fps) -> SlidereelResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(SlidereelError::validation(
                "slide duration_secs must be finite and > 0",
            ));
        }
        if fps.secs_to_frames_floor(self.duration_secs) == 0 {
            return Err(SlidereelError::validation(
                "slide duration must span at least one frame",
            ));
        }
        if !self.zoom.from.is_finite() || !self.zoom.to.is_finite() {
            return Err(SlidereelError::validation("zoom from/to must be finite"));
        }
        if !self.fade.duration_secs.is_finite() || self.fade.duration_secs < 0.0 {
            return Err(SlidereelError::validation(
                "fade duration_secs must be finite and >= 0",
            ));
        }
        Ok(())
    }
}
