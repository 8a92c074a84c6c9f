/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::v2::properties::Method;
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

/// Where [`FileAccessLog`] appends when no path is given.
pub const DEFAULT_ACCESS_LOG_PATH: &str = "data/log/ooyala_requests.log";

// Endpoint name fragments whose requests are kept out of the access log.
// Credit/quota polling would otherwise drown the useful entries.
const DEFAULT_OMITTED_FRAGMENTS: &[&str] = &["remaining_credits_and_reset_time"];

/// One dispatched request, as recorded in the access log. The URL has been
/// redacted before the entry is built: percent-decoded, stripped of the
/// origin, and truncated at `expires` so no credential material is kept.
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub timestamp: DateTime<Utc>,
    pub url: String,
    pub method: Method,
    pub elapsed_ms: u64,
}

impl AccessLogEntry {
    pub fn format_line(&self) -> String {
        format!(
            "[{}] \"{}\" method={} ms={}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.url,
            self.method,
            self.elapsed_ms
        )
    }
}

/// Records dispatched requests. Implementations are advisory only and must
/// never fail the request they describe.
pub trait AccessLog: Send + Sync {
    fn record(&self, entry: &AccessLogEntry);
}

/// Discards every entry. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAccessLog;

impl AccessLog for NoopAccessLog {
    fn record(&self, _entry: &AccessLogEntry) {}
}

/// Appends entries as lines to a log file, creating it on first use.
/// Write failures are swallowed.
#[derive(Debug, Clone)]
pub struct FileAccessLog {
    path: PathBuf,
    omit_fragments: Vec<String>,
}

impl FileAccessLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            omit_fragments: DEFAULT_OMITTED_FRAGMENTS
                .iter()
                .map(|fragment| (*fragment).to_owned())
                .collect(),
        }
    }

    /// Replaces the endpoint fragments that suppress an entry.
    pub fn with_omitted_fragments(mut self, fragments: Vec<String>) -> Self {
        self.omit_fragments = fragments;
        self
    }

    fn append(&self, line: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let created = !self.path.exists();
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        if created {
            // Other processes on the host tail and rotate this file
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let _ = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o666));
            }
        }
        file.write_all(line.as_bytes())
    }
}

impl Default for FileAccessLog {
    fn default() -> Self {
        Self::new(DEFAULT_ACCESS_LOG_PATH)
    }
}

impl AccessLog for FileAccessLog {
    fn record(&self, entry: &AccessLogEntry) {
        if self
            .omit_fragments
            .iter()
            .any(|fragment| entry.url.contains(fragment.as_str()))
        {
            return;
        }
        if let Err(err) = self.append(&format!("{}\n", entry.format_line())) {
            log::warn!("access log write to {} failed: {err}", self.path.display());
        }
    }
}
