//! Fetching and unpacking release archives.

use crate::error::EvalError;
use crate::registry::{DEFAULT_DOWNLOAD_TIMEOUT, resilient_download};
use flate2::bufread::GzDecoder;
use ohno::bail;
use std::path::{Path, PathBuf};
use tar::Archive;

const LOG_TARGET: &str = "  download";

/// Default location of release tarballs.
pub const DEFAULT_ARCHIVE_URL: &str = "https://ftp.drupal.org/files/projects";

/// Where release archives are downloaded from.
#[derive(Debug, Clone)]
pub struct ArchiveSource {
    client: reqwest::Client,
    base: String,
}

impl ArchiveSource {
    #[must_use]
    pub fn new(client: reqwest::Client, base: &str) -> Self {
        Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn archive_url(&self, name: &str, version: &str) -> String {
        format!("{}/{name}-{version}.tar.gz", self.base)
    }

    /// Downloads `name` at `version` and unpacks it into `dest`.
    ///
    /// Returns the unpacked project directory, `<dest>/<name>`.
    pub async fn fetch(&self, name: &str, version: &str, dest: &Path) -> Result<PathBuf, EvalError> {
        let url = self.archive_url(name, version);
        log::debug!(target: LOG_TARGET, "GET {url}");

        let client = self.client.clone();
        let body = resilient_download("archive download", url.clone(), Some(DEFAULT_DOWNLOAD_TIMEOUT), move |url: String| {
            download_archive(client.clone(), url)
        })
        .await
        .map_err(|e| EvalError::download(&url, e))?
        .map_err(|status| EvalError::download(&url, format!("server returned {status}")))?;

        log::debug!(target: LOG_TARGET, "Downloaded {} bytes from {url}", body.len());

        let unpack_dir = dest.to_path_buf();
        tokio::task::spawn_blocking(move || Archive::new(GzDecoder::new(&body[..])).unpack(&unpack_dir))
            .await
            .map_err(|e| EvalError::download(&url, e))?
            .map_err(|e| EvalError::download(&url, format!("could not unpack archive: {e}")))?;

        let project_dir = dest.join(name);
        if !project_dir.is_dir() {
            return Err(EvalError::download(&url, format!("archive has no '{name}' directory")));
        }

        log::info!(target: LOG_TARGET, "Unpacked {name} {version} into '{}'", project_dir.display());
        Ok(project_dir)
    }
}

/// One download attempt. Server errors are retryable, other failing statuses are final.
async fn download_archive(client: reqwest::Client, url: String) -> crate::Result<Result<Vec<u8>, reqwest::StatusCode>> {
    let resp = client.get(&url).send().await?;
    let status = resp.status();
    if status.is_server_error() {
        bail!("server returned {status}");
    }
    if !status.is_success() {
        return Ok(Err(status));
    }
    Ok(Ok(Vec::from(resp.bytes().await?)))
}
