//! Texture loading
//!
//! Files are decoded once and cached by name. A texture that cannot be
//! read is reported and replaced by [`TextureHandle::MISSING`], the run
//! carries on without it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::TextureHandle;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Texture not found: {0}")]
    NotFound(PathBuf),

    #[error("Unable to load image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decoded RGBA pixels
#[derive(Debug, Clone)]
pub struct Texture {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Read and decode an image file into RGBA8
pub fn decode(path: &Path) -> Result<Texture, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let img = image::open(path).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = img.to_rgba8();

    Ok(Texture {
        name: path.display().to_string(),
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

pub struct TextureCache {
    root: PathBuf,
    by_name: HashMap<String, TextureHandle>,
    textures: Vec<Texture>,
    failures: usize,
}

impl TextureCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            by_name: HashMap::new(),
            textures: Vec::new(),
            failures: 0,
        }
    }

    /// Handle for `name` under the asset root, decoding it on first use
    pub fn load(&mut self, name: &str) -> TextureHandle {
        if let Some(&handle) = self.by_name.get(name) {
            return handle;
        }

        let handle = match decode(&self.root.join(name)) {
            Ok(texture) => {
                log::debug!("Loaded {} ({}x{})", name, texture.width, texture.height);
                self.textures.push(texture);
                // Handles start at 1; 0 is MISSING
                TextureHandle(self.textures.len() as u32)
            }
            Err(e) => {
                log::warn!("{}", e);
                self.failures += 1;
                TextureHandle::MISSING
            }
        };

        self.by_name.insert(name.to_string(), handle);
        handle
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        if handle == TextureHandle::MISSING {
            return None;
        }
        self.textures.get(handle.0 as usize - 1)
    }

    pub fn loaded(&self) -> usize {
        self.textures.len()
    }

    /// Distinct names that failed to load
    pub fn failures(&self) -> usize {
        self.failures
    }
}
