use crate::{assets::PreparedImageStore, compile::FramePlan, error::SlidereelResult};

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Background to clear to before drawing (straight RGBA8). `None` leaves
    /// the background transparent.
    pub clear_rgba: Option<[u8; 4]>,
}

pub trait RenderBackend {
    fn render_plan(
        &mut self,
        plan: &FramePlan,
        assets: &PreparedImageStore,
    ) -> SlidereelResult<FrameRGBA>;

    /// Settings a parallel pipeline can use to construct per-worker clones of
    /// this backend. `None` means the backend cannot be replicated.
    fn worker_render_settings(&self) -> Option<RenderSettings> {
        None
    }
}
