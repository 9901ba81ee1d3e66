use crate::error::{SlidereelError, SlidereelResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

/// What happens to progress values outside the input range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Extrapolate {
    /// Keep the linear mapping going past the range boundary.
    Extend,
    /// Pin to the boundary value.
    Clamp,
}

#[derive(Clone, Copy, Debug)]
pub struct InterpOptions {
    pub left: Extrapolate,
    pub right: Extrapolate,
    pub ease: Ease,
}

impl Default for InterpOptions {
    fn default() -> Self {
        Self {
            left: Extrapolate::Extend,
            right: Extrapolate::Extend,
            ease: Ease::Linear,
        }
    }
}

/// Map `value` linearly from `input` to `output`.
///
/// Each side of the input range carries its own [`Extrapolate`] policy, so one
/// channel can extrapolate while another clamps. `ease` shapes the normalized
/// progress only within [0, 1]; extrapolated progress stays linear so `Extend`
/// keeps its exact straight-line continuation (ease endpoints are stable, so
/// the curve stays continuous at the seam).
pub fn interpolate(
    value: f64,
    input: [f64; 2],
    output: [f64; 2],
    opts: InterpOptions,
) -> SlidereelResult<f64> {
    let [i0, i1] = input;
    let [o0, o1] = output;

    if !(i0.is_finite() && i1.is_finite() && o0.is_finite() && o1.is_finite()) {
        return Err(SlidereelError::interpolation(
            "interpolate ranges must be finite",
        ));
    }
    if i0 >= i1 {
        return Err(SlidereelError::interpolation(
            "interpolate input range must be strictly increasing",
        ));
    }
    if !value.is_finite() {
        return Err(SlidereelError::interpolation(
            "interpolate value must be finite",
        ));
    }

    let mut t = (value - i0) / (i1 - i0);
    if t < 0.0 && opts.left == Extrapolate::Clamp {
        t = 0.0;
    }
    if t > 1.0 && opts.right == Extrapolate::Clamp {
        t = 1.0;
    }
    if (0.0..=1.0).contains(&t) {
        t = opts.ease.apply(t);
    }

    Ok(o0 + (o1 - o0) * t)
}
