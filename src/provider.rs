//! Location source port: the external position provider.
//!
//! The engine pulls fixes while a session is active and cancels the
//! subscription on stop. A source yields either a raw fix or a provider
//! error; errors never end the session, they just produce no point.

use std::{fs, io, path::Path};

use tracing::debug;

use crate::model::RawFix;

/// Provider-reported failure for a single fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FixError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position signal unavailable")]
    SignalUnavailable,

    #[error("position request timed out")]
    Timeout,
}

/// A stream of position fixes.
pub trait LocationSource {
    /// The next fix, a provider error, or `None` when the stream is done.
    fn next_fix(&mut self) -> Option<core::result::Result<RawFix, FixError>>;

    /// Stop delivering fixes. Idempotent; safe to call when already
    /// cancelled.
    fn cancel(&mut self);
}

/// Replays fixes recorded as one JSON object per line.
pub struct ReplaySource {
    fixes: std::vec::IntoIter<RawFix>,
    cancelled: bool,
}

impl ReplaySource {
    /// Reads a JSONL fix log from disk.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::from_fixes(read_fix_log(path)?))
    }

    pub fn from_jsonl(contents: &str) -> Self {
        Self::from_fixes(parse_fix_log(contents))
    }

    pub fn from_fixes(fixes: Vec<RawFix>) -> Self {
        Self {
            fixes: fixes.into_iter(),
            cancelled: false,
        }
    }
}

impl LocationSource for ReplaySource {
    fn next_fix(&mut self) -> Option<core::result::Result<RawFix, FixError>> {
        if self.cancelled {
            return None;
        }
        self.fixes.next().map(Ok)
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }
}

/// Reads a JSONL fix log. Unparseable lines are skipped with a debug
/// log; a partial replay beats none.
pub fn read_fix_log(path: impl AsRef<Path>) -> io::Result<Vec<RawFix>> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_fix_log(&contents))
}

fn parse_fix_log(contents: &str) -> Vec<RawFix> {
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str(line) {
            Ok(fix) => Some(fix),
            Err(e) => {
                debug!("skipping unparseable fix line: {e}");
                None
            }
        })
        .collect()
}
