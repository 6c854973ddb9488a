//! On-disk cache of registry responses.
//!
//! Each response is stored as a JSON envelope stamped with the time it was
//! fetched. Entries are keyed by the full request URL, so registries sharing a
//! cache directory never serve each other's responses.

use super::node_list::NodeList;
use super::path_utils::sanitize_path_component;
use crate::Result;
use chrono::{DateTime, Utc};
use core::time::Duration;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use url::Url;

const LOG_TARGET: &str = "     cache";

/// Longest readable prefix kept in an entry's file name.
const MAX_STEM_LEN: usize = 96;

#[derive(Debug, Clone, Deserialize, Serialize)]
struct Envelope {
    timestamp: DateTime<Utc>,
    url: String,
    payload: NodeList,
}

/// A TTL-aware, directory-backed cache of node listings.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: Option<PathBuf>,
    ttl: Duration,
    now: DateTime<Utc>,
    ignore: bool,
}

impl ResponseCache {
    /// Creates a cache in `cache_dir`.
    ///
    /// With `ignore_cache` set, existing entries are never served but fresh
    /// responses are still written.
    #[must_use]
    pub fn new(cache_dir: impl Into<PathBuf>, ttl: Duration, now: DateTime<Utc>, ignore_cache: bool) -> Self {
        Self {
            dir: Some(cache_dir.into()),
            ttl,
            now,
            ignore: ignore_cache,
        }
    }

    /// A cache that never serves or stores anything.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            dir: None,
            ttl: Duration::ZERO,
            now: Utc::now(),
            ignore: true,
        }
    }

    /// File name of the entry holding the response for `url`.
    ///
    /// A readable prefix of the URL followed by a digest of the whole URL, so
    /// the name is the same from one run or toolchain to the next.
    #[must_use]
    pub fn entry_name(url: &Url) -> String {
        let text = url.as_str();
        let without_scheme = text.split_once("://").map_or(text, |(_, rest)| rest);

        let stem: String = sanitize_path_component(&without_scheme.replace(['&', '=', '%', '#'], "_"))
            .chars()
            .take(MAX_STEM_LEN)
            .collect();
        format!("{stem}-{}.json", short_hash(text))
    }

    /// Returns the cached response for `url` if one exists and is still fresh.
    #[must_use]
    pub fn load(&self, url: &Url) -> Option<NodeList> {
        let dir = self.dir.as_ref()?;
        if self.ignore {
            return None;
        }

        let filename = Self::entry_name(url);
        let path = dir.join(&filename);

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Cache miss for {filename}: {e:#}");
                return None;
            }
        };

        let envelope: Envelope = match serde_json::from_reader(BufReader::new(file)) {
            Ok(envelope) => envelope,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Cache miss for {filename}: {e:#}");
                return None;
            }
        };

        if envelope.url != url.as_str() {
            log::debug!(target: LOG_TARGET, "Cache collision for {filename}, ignoring entry");
            return None;
        }

        // Clock skew can leave entries stamped in the future; those count as fresh.
        let age = self.now.signed_duration_since(envelope.timestamp);
        if let Ok(age) = age.to_std()
            && age >= self.ttl
        {
            log::debug!(target: LOG_TARGET, "Cache expired for {filename} (age: {:.1} hours)", age.as_secs_f64() / 3600.0);
            return None;
        }

        log::debug!(target: LOG_TARGET, "Cache hit for {filename}");
        Some(envelope.payload)
    }

    /// Stores the response fetched from `url`.
    pub fn save(&self, url: &Url, list: &NodeList) -> Result<()> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };

        fs::create_dir_all(dir).into_app_err_with(|| format!("creating directory '{}'", dir.display()))?;

        let path = dir.join(Self::entry_name(url));
        let envelope = Envelope {
            timestamp: self.now,
            url: url.to_string(),
            payload: list.clone(),
        };

        let file = File::create(&path).into_app_err_with(|| format!("creating cache file '{}'", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &envelope).into_app_err_with(|| format!("writing cache file '{}'", path.display()))?;
        writer
            .flush()
            .into_app_err_with(|| format!("flushing cache file '{}'", path.display()))?;
        Ok(())
    }
}

fn short_hash(s: &str) -> String {
    let mut hex = blake3::hash(s.as_bytes()).to_hex().to_string();
    hex.truncate(16);
    hex
}
