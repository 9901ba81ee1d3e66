pub mod decode;

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    error::{SlidereelError, SlidereelResult},
    model::Slideshow,
};

/// Prepared raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Stable hashed identifier for a prepared image, derived from its normalized
/// source path so the same file referenced twice shares one decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AssetId(u64);

impl AssetId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Immutable store of decoded images keyed by normalized source path.
///
/// Preparation front-loads all IO and decoding so the evaluate/compile/render
/// stages stay deterministic and IO-free.
#[derive(Clone, Debug)]
pub struct PreparedImageStore {
    root: PathBuf,
    ids_by_source: HashMap<String, AssetId>,
    images_by_id: HashMap<AssetId, PreparedImage>,
}

impl PreparedImageStore {
    pub fn prepare(show: &Slideshow, root: impl Into<PathBuf>) -> SlidereelResult<Self> {
        let mut out = Self {
            root: root.into(),
            ids_by_source: HashMap::new(),
            images_by_id: HashMap::new(),
        };

        for asset in &show.images {
            let norm = normalize_rel_path(&asset.source)?;
            if out.ids_by_source.contains_key(&norm) {
                continue;
            }
            let id = AssetId(stable_hash64(norm.as_bytes()));
            let bytes = out.read_bytes(&norm)?;
            let image = decode::decode_image(&bytes)?;
            out.ids_by_source.insert(norm, id);
            out.images_by_id.insert(id, image);
        }

        Ok(out)
    }

    /// Root directory used when resolving relative source paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn id_for_source(&self, source: &str) -> SlidereelResult<AssetId> {
        let norm = normalize_rel_path(source)?;
        self.ids_by_source
            .get(&norm)
            .copied()
            .ok_or_else(|| SlidereelError::evaluation(format!("unknown image source '{source}'")))
    }

    pub fn get(&self, id: AssetId) -> SlidereelResult<&PreparedImage> {
        self.images_by_id
            .get(&id)
            .ok_or_else(|| SlidereelError::evaluation(format!("unknown AssetId {}", id.as_u64())))
    }

    fn read_bytes(&self, norm_path: &str) -> SlidereelResult<Vec<u8>> {
        let path = self.root.join(Path::new(norm_path));
        std::fs::read(&path)
            .with_context(|| format!("read image bytes from '{}'", path.display()))
            .map_err(SlidereelError::from)
    }
}

/// Normalize and validate composition-relative source paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> SlidereelResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(SlidereelError::validation("image paths must be relative"));
    }
    if s.is_empty() {
        return Err(SlidereelError::validation("image path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(SlidereelError::validation("image paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(SlidereelError::validation(
            "image path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

fn stable_hash64(bytes: &[u8]) -> u64 {
    // FNV-1a 64.
    let mut h = 0xcbf2_9ce4_8422_2325u64;
    for &b in bytes {
        h ^= u64::from(b);
        h = h.wrapping_mul(0x0000_0100_0000_01B3);
    }
    h
}
