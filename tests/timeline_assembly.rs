use slidereel::{Canvas, Fps, FrameIndex, SlideshowBuilder, Timeline};

fn show_with_images(n: usize) -> slidereel::Slideshow {
    let mut builder = SlideshowBuilder::new(
        Fps::new(30, 1).unwrap(),
        Canvas {
            width: 1920,
            height: 1080,
        },
    );
    for i in 1..=n {
        builder = builder.image(format!("img/{i}.jpg"));
    }
    builder.build().unwrap()
}

#[test]
fn placement_properties_hold_for_various_sizes() {
    for n in [1usize, 2, 7, 15] {
        let timeline = Timeline::assemble(&show_with_images(n)).unwrap();
        assert_eq!(timeline.segments.len(), n);
        assert_eq!(timeline.duration.0, n as u64 * 240);

        for (i, seg) in timeline.segments.iter().enumerate() {
            assert_eq!(seg.range.start.0, i as u64 * 240);
            assert_eq!(seg.range.len_frames(), 240);
            assert_eq!(seg.name, format!("image-{i}"));
        }

        // Pairwise non-overlap: each segment ends exactly where the next starts.
        for pair in timeline.segments.windows(2) {
            assert_eq!(pair[0].range.end, pair[1].range.start);
            assert!(!pair[0].range.contains(pair[1].range.start));
        }
    }
}

#[test]
fn stock_fifteen_image_composition() {
    let timeline = Timeline::assemble(&show_with_images(15)).unwrap();

    assert_eq!(timeline.id, "MyVideo");
    assert_eq!(timeline.canvas.width, 1920);
    assert_eq!(timeline.canvas.height, 1080);
    assert_eq!(timeline.fps, Fps::new(30, 1).unwrap());
    assert_eq!(timeline.duration, FrameIndex(3600));
    assert_eq!(timeline.fps.frames_to_secs(3600), 120.0);

    let last = &timeline.segments[14];
    assert_eq!(last.range.start, FrameIndex(3360));
    assert_eq!(last.range.len_frames(), 240);
    assert_eq!(last.asset.source, "img/15.jpg");
}

#[test]
fn every_in_bounds_frame_is_covered_by_exactly_one_segment() {
    let timeline = Timeline::assemble(&show_with_images(3)).unwrap();
    for f in 0..timeline.duration.0 {
        let covering = timeline
            .segments
            .iter()
            .filter(|s| s.range.contains(FrameIndex(f)))
            .count();
        assert_eq!(covering, 1, "frame {f}");
        assert!(timeline.segment_at(FrameIndex(f)).is_some());
    }
    assert!(timeline.segment_at(timeline.duration).is_none());
}

#[test]
fn timeline_serializes_with_segment_names() {
    let timeline = Timeline::assemble(&show_with_images(2)).unwrap();
    let json = serde_json::to_value(&timeline).unwrap();
    assert_eq!(json["id"], "MyVideo");
    assert_eq!(json["segments"][1]["name"], "image-1");
    assert_eq!(json["segments"][1]["range"]["start"], 240);
}
