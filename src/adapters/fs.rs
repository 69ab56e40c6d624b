use crate::domain::ports::ArtifactSource;
use crate::utils::error::{Result, ServeError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 從本機目錄讀取 artifact
#[derive(Debug, Clone)]
pub struct LocalArtifactSource {
    base_path: PathBuf,
}

impl LocalArtifactSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl ArtifactSource for LocalArtifactSource {
    fn locate(&self, name: &str) -> String {
        self.base_path.join(name).display().to_string()
    }

    async fn read_artifact(&self, name: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(name);
        tracing::debug!("Reading artifact from {}", full_path.display());

        match tokio::fs::read(&full_path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ServeError::ArtifactNotFound {
                path: full_path.display().to_string(),
            }),
            Err(e) => Err(ServeError::IoError(e)),
        }
    }
}
