//! Filesystem asset source.

use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use wavefield_shared::assets::AssetSource;

/// Reads assets relative to a root directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl AssetSource for FsSource {
    async fn fetch(&self, path: &str) -> anyhow::Result<Bytes> {
        let full = self.root.join(path);
        let data = tokio::fs::read(&full)
            .await
            .with_context(|| format!("read asset {}", full.display()))?;
        Ok(Bytes::from(data))
    }
}
