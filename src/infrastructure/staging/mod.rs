use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Local working directories for in-flight jobs: one for raw downloads,
/// one for transcoded output. Files staged here live only for the duration
/// of a single request.
#[derive(Clone)]
pub struct Staging {
    raw_dir: PathBuf,
    processed_dir: PathBuf,
}

impl Staging {
    pub fn new(raw_dir: impl Into<PathBuf>, processed_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            processed_dir: processed_dir.into(),
        }
    }

    /// Create both working directories if they do not exist yet.
    pub async fn ensure(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.raw_dir).await?;
        tokio::fs::create_dir_all(&self.processed_dir).await?;
        info!(
            "📁 Staging directories ready: {} / {}",
            self.raw_dir.display(),
            self.processed_dir.display()
        );
        Ok(())
    }

    pub fn raw_path(&self, filename: &str) -> PathBuf {
        self.raw_dir.join(filename)
    }

    pub fn processed_path(&self, filename: &str) -> PathBuf {
        self.processed_dir.join(filename)
    }

    /// Remove a staged file. A file that is already gone is a success,
    /// so cleanup can run unconditionally on every exit path.
    pub async fn remove(path: &Path) -> io::Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
