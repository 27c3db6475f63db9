//! Texture assets.
//!
//! Textures are requested up front and resolved later: [`TextureRegistry::request`]
//! hands out a handle immediately so the material can be configured while
//! the bytes are still in flight. Fetching goes through an [`AssetSource`];
//! decoding the image is left to the renderer.

use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;

/// Typed texture handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Raw, undecoded texture bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub path: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextureState {
    Pending,
    Ready(Texture),
    Failed(String),
}

/// Where asset bytes come from.
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn fetch(&self, path: &str) -> anyhow::Result<Bytes>;
}

/// In-memory source, mostly for headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    files: HashMap<String, Bytes>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        self.files.insert(path.into(), bytes.into());
        self
    }
}

#[async_trait]
impl AssetSource for MemorySource {
    async fn fetch(&self, path: &str) -> anyhow::Result<Bytes> {
        self.files
            .get(path)
            .cloned()
            .with_context(|| format!("asset not found: {path}"))
    }
}

/// Tracks requested textures and their load state.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    next_id: u64,
    entries: HashMap<TextureHandle, (String, TextureState)>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a texture path and returns its handle in `Pending` state.
    ///
    /// Requesting the same path twice returns the existing handle.
    pub fn request(&mut self, path: &str) -> TextureHandle {
        if let Some((handle, _)) = self.entries.iter().find(|(_, (p, _))| p == path) {
            return *handle;
        }
        let handle = TextureHandle(self.next_id);
        self.next_id += 1;
        self.entries
            .insert(handle, (path.to_string(), TextureState::Pending));
        handle
    }

    /// Stores a fetch result. Returns the ready texture, if any.
    pub fn resolve(
        &mut self,
        handle: TextureHandle,
        result: anyhow::Result<Bytes>,
    ) -> Option<&Texture> {
        let (path, state) = self.entries.get_mut(&handle)?;
        *state = match result {
            Ok(bytes) => TextureState::Ready(Texture {
                path: path.clone(),
                bytes,
            }),
            Err(e) => TextureState::Failed(format!("{e:#}")),
        };
        match &*state {
            TextureState::Ready(texture) => Some(texture),
            _ => None,
        }
    }

    pub fn path(&self, handle: TextureHandle) -> Option<&str> {
        self.entries.get(&handle).map(|(p, _)| p.as_str())
    }

    pub fn state(&self, handle: TextureHandle) -> Option<&TextureState> {
        self.entries.get(&handle).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_is_pending_until_resolved() {
        let mut registry = TextureRegistry::new();
        let h = registry.request("textures/particles/1.png");
        assert_eq!(registry.state(h), Some(&TextureState::Pending));
        assert_eq!(registry.request("textures/particles/1.png"), h);
        assert_eq!(registry.len(), 1);

        let texture = registry.resolve(h, Ok(Bytes::from_static(b"png"))).cloned();
        assert_eq!(texture.map(|t| t.bytes), Some(Bytes::from_static(b"png")));
        assert!(matches!(registry.state(h), Some(TextureState::Ready(_))));
    }

    #[test]
    fn failed_fetch_is_recorded() {
        let mut registry = TextureRegistry::new();
        let h = registry.request("missing.png");
        assert!(registry
            .resolve(h, Err(anyhow::anyhow!("not found")))
            .is_none());
        assert_eq!(
            registry.state(h),
            Some(&TextureState::Failed("not found".to_string()))
        );
    }

    #[tokio::test]
    async fn memory_source_serves_known_paths() {
        let source = MemorySource::new().with_file("a.png", Bytes::from_static(b"\x89PNG"));
        assert_eq!(source.fetch("a.png").await.unwrap(), Bytes::from_static(b"\x89PNG"));
        assert!(source.fetch("b.png").await.is_err());
    }
}
