use slidereel::{Canvas, Evaluator, Fps, FrameIndex, SlideshowBuilder, Timeline};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let show = SlideshowBuilder::new(
        Fps::new(30, 1)?,
        Canvas {
            width: 1920,
            height: 1080,
        },
    )
    .image("img/1.jpg")
    .image("img/2.jpg")
    .image("img/3.jpg")
    .build()?;

    let timeline = Timeline::assemble(&show)?;
    println!(
        "timeline '{}': {} segments, {} frames total",
        timeline.id,
        timeline.segments.len(),
        timeline.duration.0
    );

    for f in [0u64, 45, 90, 239, 240, 480, 719] {
        let g = Evaluator::eval_frame(&timeline, FrameIndex(f))?;
        println!(
            "frame {f}: {} local={} scale={:.4} opacity={:.4}",
            g.segment_name, g.local_frame.0, g.state.scale, g.state.opacity
        );
    }

    Ok(())
}
