use anyhow::Context;
use async_trait::async_trait;
use soulguide_core::{ProfileProvider, SoulProfile};
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Profile snapshots stored as `<root>/<id>.json`.
pub struct JsonFileProvider {
    root: PathBuf,
}

impl JsonFileProvider {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Read a single snapshot file.
    pub async fn read_file<P: AsRef<Path>>(path: P) -> anyhow::Result<SoulProfile> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read profile: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse profile: {}", path.display()))
    }
}

#[async_trait]
impl ProfileProvider for JsonFileProvider {
    async fn load_profile(&self, id: Uuid) -> anyhow::Result<SoulProfile> {
        let profile = Self::read_file(self.root.join(format!("{}.json", id))).await?;
        if profile.id != id {
            anyhow::bail!("Profile file for {} contains profile {}", id, profile.id);
        }
        Ok(profile)
    }
}
