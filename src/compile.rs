use crate::{
    assets::{AssetId, PreparedImageStore},
    core::{Affine, Canvas, Vec2},
    error::{SlidereelError, SlidereelResult},
    eval::EvaluatedFrame,
    timeline::Timeline,
};

#[derive(Clone, Debug)]
pub struct FramePlan {
    pub canvas: Canvas,
    pub ops: Vec<DrawOp>,
}

#[derive(Clone, Debug)]
pub enum DrawOp {
    Image {
        asset: AssetId,
        /// Maps image pixel space onto the canvas (cover-fit, then zoom about
        /// the canvas center).
        transform: Affine,
        opacity: f32,
    },
}

/// Turn an evaluated frame into a draw plan.
///
/// Opacity is clamped to [0, 1] at this boundary; scale is not, matching the
/// channels' extrapolation policies. Fully transparent frames compile to an
/// empty plan so the renderer only clears.
pub fn compile_frame(
    timeline: &Timeline,
    eval: &EvaluatedFrame,
    assets: &PreparedImageStore,
) -> SlidereelResult<FramePlan> {
    let mut ops = Vec::with_capacity(1);

    let opacity = (eval.state.opacity as f32).clamp(0.0, 1.0);
    if opacity > 0.0 {
        let id = assets.id_for_source(&eval.asset.source)?;
        let image = assets.get(id)?;

        let cover = cover_fit(image.width, image.height, timeline.canvas)?;
        let zoom = zoom_about_center(timeline.canvas, eval.state.scale);
        ops.push(DrawOp::Image {
            asset: id,
            transform: zoom * cover,
            opacity,
        });
    }

    Ok(FramePlan {
        canvas: timeline.canvas,
        ops,
    })
}

/// Affine that scales an image to fill the canvas while preserving aspect
/// ratio, centered so the cropped overflow splits evenly.
pub fn cover_fit(image_width: u32, image_height: u32, canvas: Canvas) -> SlidereelResult<Affine> {
    if image_width == 0 || image_height == 0 {
        return Err(SlidereelError::evaluation(
            "cover_fit requires a non-empty image",
        ));
    }
    if canvas.width == 0 || canvas.height == 0 {
        return Err(SlidereelError::evaluation(
            "cover_fit requires a non-empty canvas",
        ));
    }

    let sx = f64::from(canvas.width) / f64::from(image_width);
    let sy = f64::from(canvas.height) / f64::from(image_height);
    let s = sx.max(sy);

    let offset_x = (f64::from(canvas.width) - f64::from(image_width) * s) / 2.0;
    let offset_y = (f64::from(canvas.height) - f64::from(image_height) * s) / 2.0;

    Ok(Affine::translate(Vec2::new(offset_x, offset_y)) * Affine::scale(s))
}

/// Scale about the canvas center, leaving the center point fixed.
pub fn zoom_about_center(canvas: Canvas, scale: f64) -> Affine {
    let center = canvas.center();
    Affine::translate(center) * Affine::scale(scale) * Affine::translate(-center)
}
