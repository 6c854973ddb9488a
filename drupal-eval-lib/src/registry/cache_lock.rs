use crate::Result;
use fs4::fs_std::FileExt;
use ohno::IntoAppError;
use std::fs::{self, File, OpenOptions};
use std::path::Path;

const LOG_TARGET: &str = "     cache";

const LOCK_FILE: &str = "registry.lock";

/// Holds the registry cache exclusively until dropped.
#[derive(Debug)]
pub struct CacheLockGuard(File);

impl Drop for CacheLockGuard {
    fn drop(&mut self) {
        if let Err(e) = self.0.unlock() {
            log::warn!(target: LOG_TARGET, "Could not unlock registry cache: {e:#}");
        }
    }
}

/// Takes an advisory lock on the registry cache, creating the directory if needed.
///
/// Blocks while another run holds the lock.
pub async fn acquire_cache_lock(cache_dir: &Path) -> Result<CacheLockGuard> {
    fs::create_dir_all(cache_dir).into_app_err_with(|| format!("creating cache directory '{}'", cache_dir.display()))?;
    let lock_path = cache_dir.join(LOCK_FILE);

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .into_app_err_with(|| format!("opening cache lock file at '{}'", lock_path.display()))?;

    let file = tokio::task::spawn_blocking(move || {
        file.lock_exclusive()
            .into_app_err_with(|| format!("acquiring exclusive lock on '{}'", lock_path.display()))?;
        log::debug!(target: LOG_TARGET, "Acquired cache lock at '{}'", lock_path.display());
        Ok::<_, ohno::AppError>(file)
    })
    .await
    .into_app_err("lock task panicked")??;

    Ok(CacheLockGuard(file))
}
