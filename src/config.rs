// src/config.rs
//! Gate configuration: every scoring threshold and weight in one immutable
//! structure, loadable from TOML with env overrides, plus a thread-safe
//! handle with optional dev-only hot reload.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, SystemTime};

use crate::validator::{validate, validate_with_threshold, ValidationResult};

// --- env defaults & names ---
pub const DEFAULT_GATE_CONFIG_PATH: &str = "config/gate.toml";

pub const ENV_GATE_CONFIG_PATH: &str = "GATE_CONFIG_PATH";
pub const ENV_GATE_MIN_SCORE: &str = "GATE_MIN_SCORE";

/// All thresholds used by the quality scorer and validator. Tests override
/// individual fields instead of touching global state.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Minimum acceptable quality score (0-100) for regular-length text.
    pub min_score: f32,
    /// Floor applied instead of `min_score` when the text is 20..60 chars.
    pub short_text_min_score: f32,
    /// Entropy threshold for texts of at most 50 characters.
    pub min_entropy: f32,
    /// Entropy threshold for texts longer than 50 characters.
    pub min_entropy_long: f32,
    /// Entropy value that earns full partial credit.
    pub entropy_ceiling: f32,
    pub min_unique_word_ratio: f32,
    pub max_repetition_ratio: f32,
    pub min_letter_ratio: f32,
    pub weights: GateWeights,
}

/// Per-factor deduction weights of the scorer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateWeights {
    pub entropy: f32,
    pub word_diversity: f32,
    pub repetition: f32,
    pub structure: f32,
    /// Missing-punctuation penalty for texts under 60 characters.
    pub punctuation_short: f32,
    /// Missing-punctuation penalty for 60+ character texts.
    pub punctuation_long: f32,
    pub letters: f32,
    pub keyboard: f32,
    pub gibberish: f32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_score: 40.0,
            short_text_min_score: 50.0,
            min_entropy: 2.0,
            min_entropy_long: 2.5,
            entropy_ceiling: 5.0,
            min_unique_word_ratio: 0.30,
            max_repetition_ratio: 0.15,
            min_letter_ratio: 0.60,
            weights: GateWeights::default(),
        }
    }
}

impl Default for GateWeights {
    fn default() -> Self {
        Self {
            entropy: 30.0,
            word_diversity: 25.0,
            repetition: 15.0,
            structure: 20.0,
            punctuation_short: 20.0,
            punctuation_long: 10.0,
            letters: 15.0,
            keyboard: 10.0,
            gibberish: 10.0,
        }
    }
}

// parse optional float env and clamp to <0.0..=100.0>
fn parse_min_score_env(raw: Option<String>) -> Option<f32> {
    raw.and_then(|s| s.trim().parse::<f32>().ok())
        .map(|v| v.clamp(0.0, 100.0))
}

impl GateConfig {
    /// Load from a TOML file. Uses GATE_CONFIG_PATH or defaults to
    /// "config/gate.toml"; a missing file yields the built-in defaults,
    /// a malformed file is an error.
    pub fn from_toml() -> anyhow::Result<Self> {
        let path = std::env::var(ENV_GATE_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_GATE_CONFIG_PATH));

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                anyhow::anyhow!("Failed to read gate config at {}: {}", path.display(), e)
            })?;
            Self::from_toml_str(&content)?
        } else {
            Self::default()
        };

        // optional: override the minimum score from env
        if let Some(m) = parse_min_score_env(std::env::var(ENV_GATE_MIN_SCORE).ok()) {
            cfg.min_score = m;
        } else if !cfg.min_score.is_finite() {
            cfg.min_score = Self::default().min_score;
        }

        Ok(cfg)
    }

    /// Load from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: GateConfig = toml::from_str(toml_str)?;
        Ok(cfg)
    }
}

/* ----------------------------
Thread-safe handle + hot reload
---------------------------- */

/// A threadsafe handle that can hot-reload the underlying config in dev/local.
/// - Enable by setting GATE_HOT_RELOAD=1
/// - Dev-gated: active only if cfg!(debug_assertions) OR SHUTTLE_ENV is
///   "local"/"development"/"dev".
#[derive(Clone)]
pub struct GateHandle {
    inner: Arc<RwLock<GateConfig>>,
}

impl GateHandle {
    pub fn new(cfg: GateConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cfg)),
        }
    }

    /// Snapshot of the current config.
    pub fn current(&self) -> GateConfig {
        self.inner
            .read()
            .map(|g| g.clone())
            .unwrap_or_default()
    }

    /// Validate text against the current config. `min_score` overrides the
    /// configured threshold for this call only.
    pub fn validate(&self, text: &str, min_score: Option<f32>) -> ValidationResult {
        let cfg = self.current();
        match min_score {
            Some(m) => validate_with_threshold(text, m.clamp(0.0, 100.0), &cfg),
            None => validate(text, &cfg),
        }
    }
}

/// Returns true if we should enable hot reload (dev/local only).
fn hot_reload_enabled() -> bool {
    let want = std::env::var("GATE_HOT_RELOAD")
        .ok()
        .map(|v| v == "1")
        .unwrap_or(false);
    if !want {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// Start a simple polling watcher on `path` to hot-reload into `handle`.
/// Polls mtime every 2s. Uses only std, no external deps.
pub fn start_hot_reload_thread(handle: GateHandle, path: PathBuf) {
    if !hot_reload_enabled() {
        return;
    }

    thread::spawn(move || {
        let poll = Duration::from_secs(2);
        let mut last_mtime: Option<SystemTime> = None;

        loop {
            match fs::metadata(&path).and_then(|m| m.modified()) {
                Ok(mtime) => {
                    let changed = match last_mtime {
                        None => {
                            last_mtime = Some(mtime);
                            false
                        }
                        Some(prev) => mtime > prev,
                    };
                    if changed {
                        // Reload file and swap config atomically
                        if let Ok(content) = fs::read_to_string(&path) {
                            if let Ok(new_cfg) = GateConfig::from_toml_str(&content) {
                                if let Ok(mut guard) = handle.inner.write() {
                                    *guard = new_cfg;
                                }
                            }
                        }
                        last_mtime = Some(mtime);
                    }
                }
                Err(_) => {
                    // File missing or unreadable; keep trying.
                }
            }
            thread::sleep(poll);
        }
    });
}
