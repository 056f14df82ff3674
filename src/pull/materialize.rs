use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use tar::Archive;

use crate::api::Remote;
use crate::store::FunctionEntry;

/// A downloaded deployment archive; the file is removed when this is dropped.
pub struct TempArchive {
    path: PathBuf,
}

impl TempArchive {
    /// `<dir>/<function_id>-<unix millis>.tar.gz`
    pub fn new(dir: &Path, function_id: &str) -> Self {
        let name = format!(
            "{}-{}.tar.gz",
            function_id,
            chrono::Utc::now().timestamp_millis()
        );
        Self {
            path: dir.join(name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArchive {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove archive");
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Extraction {
    pub files: usize,
    pub skipped: usize,
}

/// Download a function's active deployment and unpack it into its local path.
///
/// Returns `None` when the function has no deployment. `base_dir` is the
/// directory the function's relative path is resolved against.
pub async fn materialize(
    remote: &dyn Remote,
    base_dir: &Path,
    function: &FunctionEntry,
) -> Result<Option<Extraction>> {
    let Some(deployment) = function.deployment() else {
        return Ok(None);
    };

    let archive = TempArchive::new(base_dir, &function.id);
    remote
        .download_deployment(&function.id, deployment, archive.path())
        .await
        .with_context(|| {
            format!(
                "Failed to download deployment '{}' of function '{}'",
                deployment, function.id
            )
        })?;

    let dest = base_dir.join(&function.path);
    tokio::fs::create_dir_all(&dest)
        .await
        .with_context(|| format!("Failed to create {}", dest.display()))?;

    let archive_path = archive.path().to_path_buf();
    let extraction = tokio::task::spawn_blocking(move || extract_archive(&archive_path, &dest))
        .await
        .context("Extraction task panicked")??;

    drop(archive);
    Ok(Some(extraction))
}

/// Unpack a gzip tarball into `dest`, overwriting files it contains.
///
/// Entries that cannot be unpacked (unsupported types, paths escaping `dest`)
/// are skipped with a warning. An archive that cannot be decoded is an error.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<Extraction> {
    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open {}", archive_path.display()))?;
    let mut archive = Archive::new(GzDecoder::new(file));
    archive.set_overwrite(true);

    let mut extraction = Extraction::default();
    let entries = archive
        .entries()
        .with_context(|| format!("Failed to read {}", archive_path.display()))?;

    for entry in entries {
        let mut entry =
            entry.with_context(|| format!("Corrupt archive {}", archive_path.display()))?;
        let name = entry
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "<invalid path>".to_string());
        let is_file = entry.header().entry_type().is_file();

        match entry.unpack_in(dest) {
            Ok(true) => {
                if is_file {
                    extraction.files += 1;
                }
            }
            Ok(false) => {
                tracing::warn!(entry = %name, "skipping archive entry outside the function directory");
                extraction.skipped += 1;
            }
            Err(e) => {
                tracing::warn!(entry = %name, error = %e, "skipping archive entry");
                extraction.skipped += 1;
            }
        }
    }

    Ok(extraction)
}
