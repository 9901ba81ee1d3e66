use crate::{
    core::{Canvas, Fps},
    error::SlidereelResult,
    interp::Ease,
    model::{FadeSpec, ImageAsset, SlideStyle, Slideshow, ZoomSpec},
};

pub struct SlideshowBuilder {
    id: String,
    fps: Fps,
    canvas: Canvas,
    style: SlideStyle,
    images: Vec<ImageAsset>,
}

impl SlideshowBuilder {
    pub fn new(fps: Fps, canvas: Canvas) -> Self {
        Self {
            id: "MyVideo".to_string(),
            fps,
            canvas,
            style: SlideStyle::default(),
            images: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn style(mut self, style: SlideStyle) -> Self {
        self.style = style;
        self
    }

    pub fn slide_duration_secs(mut self, secs: f64) -> Self {
        self.style.duration_secs = secs;
        self
    }

    pub fn zoom(mut self, from: f64, to: f64) -> Self {
        self.style.zoom = ZoomSpec { from, to };
        self
    }

    pub fn fade(mut self, duration_secs: f64, ease: Ease) -> Self {
        self.style.fade = FadeSpec {
            duration_secs,
            ease,
        };
        self
    }

    pub fn image(mut self, source: impl Into<String>) -> Self {
        self.images.push(ImageAsset {
            source: source.into(),
        });
        self
    }

    pub fn build(self) -> SlidereelResult<Slideshow> {
        let show = Slideshow {
            id: self.id,
            fps: self.fps,
            canvas: self.canvas,
            images: self.images,
            style: self.style,
        };
        show.validate()?;
        Ok(show)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_creates_expected_structure() {
        let show = SlideshowBuilder::new(
            Fps::new(30, 1).unwrap(),
            Canvas {
                width: 1920,
                height: 1080,
            },
        )
        .id("MyVideo")
        .slide_duration_secs(8.0)
        .zoom(1.0, 1.1)
        .fade(3.0, Ease::Linear)
        .image("img/1.jpg")
        .image("img/2.jpg")
        .build()
        .unwrap();

        assert_eq!(show.images.len(), 2);
        assert_eq!(show.style.zoom.to, 1.1);
        assert_eq!(show.images[0].source, "img/1.jpg");
    }

    #[test]
    fn builder_rejects_invalid_style() {
        let result = SlideshowBuilder::new(
            Fps::new(30, 1).unwrap(),
            Canvas {
                width: 640,
                height: 360,
            },
        )
        .slide_duration_secs(0.0)
        .image("img/1.jpg")
        .build();
        assert!(result.is_err());
    }
}
