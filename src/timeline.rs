use crate::{
    core::{Canvas, Fps, FrameIndex, FrameRange},
    error::SlidereelResult,
    model::{ImageAsset, SlideStyle, Slideshow},
};

/// A contiguous span of frames assigned to one image.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Segment {
    pub index: usize,
    pub name: String,
    pub range: FrameRange, // [index*D, (index+1)*D)
    pub asset: ImageAsset,
}

/// The assembled composition: N segments of constant duration placed
/// back-to-back from frame 0, total duration N*D. Immutable once built.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Timeline {
    pub id: String,
    pub fps: Fps,
    pub canvas: Canvas,
    pub duration: FrameIndex,
    pub style: SlideStyle,
    pub segments: Vec<Segment>,
}

impl Timeline {
    pub fn assemble(show: &Slideshow) -> SlidereelResult<Self> {
        show.validate()?;

        let seg_frames = show.fps.secs_to_frames_floor(show.style.duration_secs);
        let mut segments = Vec::with_capacity(show.images.len());
        for (index, asset) in show.images.iter().enumerate() {
            let start = index as u64 * seg_frames;
            let range = FrameRange::new(FrameIndex(start), FrameIndex(start + seg_frames))?;
            segments.push(Segment {
                index,
                name: format!("image-{index}"),
                range,
                asset: asset.clone(),
            });
        }

        // An empty image list assembles a zero-length timeline.
        Ok(Self {
            id: show.id.clone(),
            fps: show.fps,
            canvas: show.canvas,
            duration: FrameIndex(show.images.len() as u64 * seg_frames),
            style: show.style,
            segments,
        })
    }

    /// Frames per segment (constant across the timeline).
    pub fn segment_frames(&self) -> u64 {
        self.fps.secs_to_frames_floor(self.style.duration_secs)
    }

    /// The unique segment covering `frame`, or `None` past the end.
    pub fn segment_at(&self, frame: FrameIndex) -> Option<&Segment> {
        if frame.0 >= self.duration.0 {
            return None;
        }
        let seg = self.segments.get((frame.0 / self.segment_frames()) as usize)?;
        debug_assert!(seg.range.contains(frame));
        Some(seg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SlideStyle;

    fn show_with_images(n: usize) -> Slideshow {
        Slideshow {
            id: "MyVideo".to_string(),
            fps: Fps::new(30, 1).unwrap(),
            canvas: Canvas {
                width: 1920,
                height: 1080,
            },
            images: (1..=n)
                .map(|i| ImageAsset {
                    source: format!("img/{i}.jpg"),
                })
                .collect(),
            style: SlideStyle::default(),
        }
    }

    #[test]
    fn segments_are_contiguous_and_non_overlapping() {
        let timeline = Timeline::assemble(&show_with_images(4)).unwrap();
        for (i, seg) in timeline.segments.iter().enumerate() {
            assert_eq!(seg.index, i);
            assert_eq!(seg.range.start.0, i as u64 * 240);
            assert_eq!(seg.range.len_frames(), 240);
        }
        for pair in timeline.segments.windows(2) {
            assert_eq!(pair[0].range.end, pair[1].range.start);
        }
    }

    #[test]
    fn fifteen_images_declare_the_stock_composition() {
        let timeline = Timeline::assemble(&show_with_images(15)).unwrap();
        assert_eq!(timeline.id, "MyVideo");
        assert_eq!(timeline.duration, FrameIndex(3600));
        assert_eq!(timeline.segments.len(), 15);
        assert_eq!(timeline.segments[14].range.start, FrameIndex(3360));
        assert_eq!(timeline.segments[14].name, "image-14");
        assert_eq!(timeline.segments[0].name, "image-0");
        assert_eq!(timeline.fps.frames_to_secs(timeline.duration.0), 120.0);
    }

    #[test]
    fn empty_show_assembles_zero_length_timeline() {
        let timeline = Timeline::assemble(&show_with_images(0)).unwrap();
        assert_eq!(timeline.duration, FrameIndex(0));
        assert!(timeline.segments.is_empty());
        assert!(timeline.segment_at(FrameIndex(0)).is_none());
    }

    #[test]
    fn segment_at_resolves_boundaries() {
        let timeline = Timeline::assemble(&show_with_images(3)).unwrap();
        assert_eq!(timeline.segment_at(FrameIndex(0)).unwrap().index, 0);
        assert_eq!(timeline.segment_at(FrameIndex(239)).unwrap().index, 0);
        assert_eq!(timeline.segment_at(FrameIndex(240)).unwrap().index, 1);
        assert_eq!(timeline.segment_at(FrameIndex(719)).unwrap().index, 2);
        assert!(timeline.segment_at(FrameIndex(720)).is_none());
    }
}
