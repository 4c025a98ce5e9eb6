//! Window-title to profile mapping.
//!
//! `profiles.json` is a single JSON object mapping case-insensitive
//! window-title substrings to profile names, e.g.
//!
//! `{"asphalt": "racing", "counter-strike": "fps", "paint": "mouse"}`
//!
//! The file is loaded once at startup.  A missing or malformed file
//! degrades to an empty mapping: auto-switching is disabled and the
//! engine stays in its starting profile.  Entry order in the file is the
//! match order; the first matching substring wins.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::engine::profile::ControlProfile;

/// Ordered (title substring, profile) pairs.
#[derive(Debug, Clone, Default)]
pub struct ProfileMap {
    entries: Vec<(String, ControlProfile)>,
}

impl ProfileMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from JSON text, keeping entries in file order.
    ///
    /// Entries with a non-string value or an unknown profile name are
    /// skipped with a warning rather than failing the whole map.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(text).context("profile map is not a JSON object")?;

        let mut entries = Vec::new();
        for (substring, value) in &raw {
            let Some(name) = value.as_str() else {
                warn!("profile map entry {:?} is not a string, skipping", substring);
                continue;
            };
            match ControlProfile::from_str(&name.to_ascii_lowercase()) {
                Some(profile) => entries.push((substring.to_lowercase(), profile)),
                None => warn!(
                    "profile map entry {:?} names unknown profile {:?}, skipping",
                    substring, name,
                ),
            }
        }
        Ok(Self { entries })
    }

    /// Load from disk, degrading to an empty mapping on any failure.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    "could not read {}: {err}; auto-switching disabled",
                    path.display(),
                );
                return Self::new();
            }
        };
        match Self::from_json(&text) {
            Ok(map) => {
                info!(
                    "loaded {} profile mapping(s) from {}",
                    map.len(),
                    path.display(),
                );
                map
            }
            Err(err) => {
                warn!(
                    "could not parse {}: {err:#}; auto-switching disabled",
                    path.display(),
                );
                Self::new()
            }
        }
    }

    /// Number of mappings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty (auto-switching inert).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a window title to a profile.
    ///
    /// The first substring match in file order wins; no match falls back
    /// to the default profile.
    pub fn resolve(&self, title: &str) -> ControlProfile {
        let title = title.to_lowercase();
        for (substring, profile) in &self.entries {
            if title.contains(substring.as_str()) {
                return *profile;
            }
        }
        ControlProfile::Default
    }
}

// ── Tests ──────────────────────────────────────────────────
