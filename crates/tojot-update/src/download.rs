//! Artifact download with progress tracking
//!
//! Every download goes into its own freshly created temporary directory so
//! that concurrent or repeated downloads never collide. The request is a
//! single streamed GET; there is no retry and no resume.

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::CONTENT_LENGTH;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tojot_core::types::NetworkConfig;
use tracing::{debug, info, warn};

use crate::error::{Result, UpdateError};
use crate::releases::UpdateInfo;

/// Prefix of every per-download temporary directory
pub const TEMP_DIR_PREFIX: &str = "tojot-update-";

/// A fully written artifact on local disk
#[derive(Debug, Clone)]
pub struct DownloadedArtifact {
    /// Path to the downloaded file
    pub path: PathBuf,

    /// Directory created for this download; owned by the artifact
    pub dir: PathBuf,

    /// What was downloaded
    pub info: UpdateInfo,

    /// Size in bytes
    pub size: u64,

    /// Hex SHA256 of the written bytes
    pub sha256: String,
}

impl DownloadedArtifact {
    /// Lowercased file name, used for installer dispatch
    pub fn file_name_lower(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    /// Remove the artifact and its directory
    pub fn cleanup(&self) {
        if let Err(e) = fs::remove_dir_all(&self.dir) {
            warn!("Failed to remove {:?}: {}", self.dir, e);
        } else {
            debug!("Removed download directory {:?}", self.dir);
        }
    }
}

/// Downloads resolved update artifacts
pub struct ArtifactFetcher {
    client: reqwest::Client,

    /// Parent for per-download directories; system temp dir when unset
    temp_root: Option<PathBuf>,

    show_progress: bool,
}

impl ArtifactFetcher {
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .timeout(network.download_timeout())
            .build()?;

        Ok(Self {
            client,
            temp_root: None,
            show_progress: false,
        })
    }

    /// Enable or disable the terminal progress bar
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Create download directories under `root` instead of the system temp dir
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    /// Download `info.download_url` into a new temporary directory
    pub async fn fetch(&self, info: &UpdateInfo) -> Result<DownloadedArtifact> {
        let dir = self.create_download_dir()?;

        match self.fetch_into(info, &dir).await {
            Ok(artifact) => Ok(artifact),
            Err(e) => {
                // Partial files are useless without resume
                let _ = fs::remove_dir_all(&dir);
                Err(e)
            }
        }
    }

    fn create_download_dir(&self) -> Result<PathBuf> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_DIR_PREFIX);

        let created = match &self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        };

        let root_for_error = self.temp_root.clone().unwrap_or_else(std::env::temp_dir);
        let dir = created.map_err(|e| UpdateError::filesystem(root_for_error, e))?;

        // Lifetime of the directory is tied to the artifact, not this guard
        Ok(dir.keep())
    }

    async fn fetch_into(&self, info: &UpdateInfo, dir: &Path) -> Result<DownloadedArtifact> {
        let file_name = Path::new(&info.asset_name)
            .file_name()
            .ok_or_else(|| UpdateError::unsupported(format!("invalid asset name '{}'", info.asset_name)))?;
        let path = dir.join(file_name);

        info!("Downloading {} from {}", info.asset_name, info.download_url);

        let response = self.client.get(&info.download_url).send().await?;

        if !response.status().is_success() {
            return Err(UpdateError::network(format!(
                "Download failed with status: {}",
                response.status()
            )));
        }

        let expected_len = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());

        let progress = self.progress_bar(expected_len, &info.asset_name);

        let mut file = File::create(&path).map_err(|e| UpdateError::filesystem(&path, e))?;
        let mut hasher = Sha256::new();
        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)
                .map_err(|e| UpdateError::filesystem(&path, e))?;
            hasher.update(&chunk);
            written += chunk.len() as u64;

            if let Some(pb) = &progress {
                pb.set_position(written);
            }
        }

        file.flush().map_err(|e| UpdateError::filesystem(&path, e))?;
        drop(file);

        if let Some(pb) = progress {
            pb.finish_with_message(format!("Downloaded {}", info.asset_name));
        }

        if let Some(expected) = expected_len {
            if expected != written {
                return Err(UpdateError::network(format!(
                    "Incomplete download: expected {} bytes, got {}",
                    expected, written
                )));
            }
        }

        let sha256 = format!("{:x}", hasher.finalize());
        info!(
            "Downloaded {} ({}) sha256={}",
            info.asset_name,
            human_readable_size(written),
            sha256
        );

        Ok(DownloadedArtifact {
            path,
            dir: dir.to_path_buf(),
            info: info.clone(),
            size: written,
            sha256,
        })
    }

    fn progress_bar(&self, total: Option<u64>, name: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = match total {
            Some(len) => ProgressBar::new(len),
            None => ProgressBar::new_spinner(),
        };
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message(format!("Downloading {}", name));
        Some(pb)
    }
}

/// Convert bytes to human-readable size
pub(crate) fn human_readable_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::UpdateClassification;

    #[test]
    fn test_human_readable_size() {
        assert_eq!(human_readable_size(0), "0.00 B");
        assert_eq!(human_readable_size(1023), "1023.00 B");
        assert_eq!(human_readable_size(1024), "1.00 KB");
        assert_eq!(human_readable_size(1024 * 1024), "1.00 MB");
    }

    #[test]
    fn test_file_name_lower_and_cleanup() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("tojot-update-abc");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("toJot-x86_64.AppImage");
        fs::write(&path, b"x").unwrap();

        let artifact = DownloadedArtifact {
            path,
            dir: dir.clone(),
            info: UpdateInfo {
                classification: UpdateClassification::PackagedInstaller,
                version: "1.0.0".to_string(),
                download_url: "https://example.com/a".to_string(),
                asset_name: "toJot-x86_64.AppImage".to_string(),
            },
            size: 1,
            sha256: String::new(),
        };

        assert_eq!(artifact.file_name_lower(), "tojot-x86_64.appimage");

        artifact.cleanup();
        assert!(!dir.exists());
    }
}
