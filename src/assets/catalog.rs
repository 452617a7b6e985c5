use std::collections::HashMap;
use std::path::Path;

use anyhow::Context as _;

use super::decode::{FALLBACK_DURATION_MS, gif_duration_ms};

/// Known-name allowlist for the common pool. Discovered files matching an
/// entry are common; everything else is rare.
pub const DEFAULT_COMMON: &[&str] = &["idle.gif"];

/// The set of animations available for playback, split into a common pool and
/// a rare pool, with every entry's duration computed once at build time.
///
/// Built once at startup and read-only afterward. A failed directory scan
/// degrades to the empty catalog; the scheduler still serves its default name
/// in that case.
#[derive(Clone, Debug)]
pub struct Catalog {
    common: Vec<String>,
    rare: Vec<String>,
    durations: HashMap<String, u32>,
    default_name: String,
}

impl Catalog {
    /// Catalog with no discovered animations.
    pub fn empty(allowlist: &[&str]) -> Self {
        Self {
            common: Vec::new(),
            rare: Vec::new(),
            durations: HashMap::new(),
            default_name: default_name(allowlist),
        }
    }

    /// Partition `names` against `allowlist` and cache a duration for each,
    /// fetching raw bytes through `read`.
    ///
    /// A name whose bytes cannot be fetched still enters its pool with the
    /// fallback duration; timing is cosmetic and must not fail the build.
    pub fn build<F>(mut names: Vec<String>, allowlist: &[&str], mut read: F) -> Self
    where
        F: FnMut(&str) -> anyhow::Result<Vec<u8>>,
    {
        names.sort();

        let mut common = Vec::new();
        let mut rare = Vec::new();
        for name in &names {
            if allowlist.iter().any(|a| a == name) {
                common.push(name.clone());
            } else {
                rare.push(name.clone());
            }
        }

        let mut durations = HashMap::with_capacity(names.len());
        for name in names {
            let duration = match read(&name) {
                Ok(bytes) => gif_duration_ms(&bytes),
                Err(err) => {
                    tracing::warn!(name = %name, error = %err, "failed to read animation bytes");
                    FALLBACK_DURATION_MS
                }
            };
            durations.insert(name, duration);
        }

        Self {
            common,
            rare,
            durations,
            default_name: default_name(allowlist),
        }
    }

    /// Enumerate `*.gif` files directly under `dir` and build the catalog.
    ///
    /// Any enumeration failure is absorbed: the result is the empty catalog,
    /// never an error.
    #[tracing::instrument(skip(allowlist))]
    pub fn scan_dir(dir: &Path, allowlist: &[&str]) -> Self {
        let names = match list_gif_names(dir) {
            Ok(names) => names,
            Err(err) => {
                tracing::warn!(error = %err, "failed to enumerate animation directory");
                return Self::empty(allowlist);
            }
        };
        Self::build(names, allowlist, |name| {
            std::fs::read(dir.join(name)).with_context(|| format!("read animation '{name}'"))
        })
    }

    /// Names in the common pool, sorted.
    pub fn common(&self) -> &[String] {
        &self.common
    }

    /// Names in the rare pool, sorted.
    pub fn rare(&self) -> &[String] {
        &self.rare
    }

    /// True when no animations were discovered at all.
    pub fn is_empty(&self) -> bool {
        self.common.is_empty() && self.rare.is_empty()
    }

    /// Name served when both pools are empty: the first allowlist entry.
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Cached duration for `name`, or the fallback if it was never computed.
    pub fn duration_ms(&self, name: &str) -> u32 {
        self.durations
            .get(name)
            .copied()
            .unwrap_or(FALLBACK_DURATION_MS)
    }
}

fn default_name(allowlist: &[&str]) -> String {
    allowlist.first().unwrap_or(&DEFAULT_COMMON[0]).to_string()
}

fn list_gif_names(dir: &Path) -> anyhow::Result<Vec<String>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("read animation directory '{}'", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.context("read directory entry")?;
        if !entry.file_type().context("stat directory entry")?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"))
        {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
