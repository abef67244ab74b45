// Configuration loading and parsing (offer.toml, app.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub offer: OfferConfig,
    /// Explicit market percentiles; replaces the band table lookup.
    pub benchmark_override: Option<BenchmarkOverride>,
    /// CSV file with extra benchmark bands, relative to the working directory.
    pub bands_path: Option<String>,
    pub simulator: SimulatorConfig,
    pub clipboard: ClipboardConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// offer.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for offer.toml.
#[derive(Debug, Clone, Deserialize)]
struct OfferFile {
    offer: OfferConfig,
    #[serde(default)]
    benchmarks: Option<BenchmarkOverride>,
}

/// The offer as entered by the candidate. Amounts are in lakhs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OfferConfig {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub base: f64,
    #[serde(default)]
    pub bonus: f64,
    #[serde(default)]
    pub joining_bonus: f64,
}

impl OfferConfig {
    /// Trim text fields and substitute the intake defaults for blank ones.
    fn normalized(mut self) -> Self {
        self.role = or_default(&self.role, "Analyst");
        self.level = or_default(&self.level, "L4");
        self.city = or_default(&self.city, "BLR");
        self
    }
}

/// `[benchmarks]` table in offer.toml.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchmarkOverride {
    #[serde(default)]
    pub p25: Option<f64>,
    pub p50: f64,
    pub p75: f64,
}

// ---------------------------------------------------------------------------
// app.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire app.toml file.
#[derive(Debug, Clone, Deserialize)]
struct AppFile {
    #[serde(default)]
    benchmarks: BenchmarksSection,
    simulator: SimulatorConfig,
    clipboard: ClipboardConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct BenchmarksSection {
    #[serde(default)]
    bands_path: Option<String>,
}

/// Slider bounds for the two percentage levers.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct SimulatorConfig {
    pub base_pct_min: i32,
    pub base_pct_max: i32,
    pub bonus_pct_min: i32,
    pub bonus_pct_max: i32,
    pub step: i32,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            base_pct_min: -10,
            base_pct_max: 40,
            bonus_pct_min: 0,
            bonus_pct_max: 50,
            step: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClipboardConfig {
    /// Copy command argv, e.g. `["xclip", "-selection", "clipboard"]`.
    /// When omitted the first available platform tool is used.
    #[serde(default)]
    pub command: Option<Vec<String>>,
    /// How long the "Copied." status stays visible.
    pub status_clear_ms: u64,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        ClipboardConfig {
            command: None,
            status_clear_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default)]
    pub filter: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/offer.toml` and
/// `config/app.toml`, relative to the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- offer.toml (required) ---
    let offer_path = config_dir.join("offer.toml");
    let offer_text = read_file(&offer_path)?;
    let offer_file: OfferFile =
        toml::from_str(&offer_text).map_err(|e| ConfigError::ParseError {
            path: offer_path.clone(),
            source: e,
        })?;

    // --- app.toml (required) ---
    let app_path = config_dir.join("app.toml");
    let app_text = read_file(&app_path)?;
    let app_file: AppFile = toml::from_str(&app_text).map_err(|e| ConfigError::ParseError {
        path: app_path.clone(),
        source: e,
    })?;

    let config = Config {
        offer: offer_file.offer.normalized(),
        benchmark_override: offer_file.benchmarks,
        bands_path: app_file
            .benchmarks
            .bands_path
            .filter(|p| !p.trim().is_empty()),
        simulator: app_file.simulator,
        clipboard: app_file.clipboard,
        logging: app_file.logging,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let offer = &config.offer;
    let amounts: &[(&str, f64)] = &[
        ("offer.base", offer.base),
        ("offer.bonus", offer.bonus),
        ("offer.joining_bonus", offer.joining_bonus),
    ];
    for (name, val) in amounts {
        if !val.is_finite() || *val < 0.0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be a finite amount >= 0, got {val}"),
            });
        }
    }

    if let Some(bm) = &config.benchmark_override {
        let mut percentiles = vec![("benchmarks.p50", bm.p50), ("benchmarks.p75", bm.p75)];
        if let Some(p25) = bm.p25 {
            percentiles.push(("benchmarks.p25", p25));
        }
        for (name, val) in percentiles {
            if !val.is_finite() || val < 0.0 {
                return Err(ConfigError::ValidationError {
                    field: name.to_string(),
                    message: format!("must be a finite amount >= 0, got {val}"),
                });
            }
        }
        if bm.p75 < bm.p50 {
            return Err(ConfigError::ValidationError {
                field: "benchmarks.p75".into(),
                message: format!("must be >= p50 ({}), got {}", bm.p50, bm.p75),
            });
        }
        if bm.p25.is_some_and(|p25| p25 > bm.p50) {
            return Err(ConfigError::ValidationError {
                field: "benchmarks.p25".into(),
                message: format!("must be <= p50 ({})", bm.p50),
            });
        }
    }

    let sim = &config.simulator;
    if sim.base_pct_min > sim.base_pct_max {
        return Err(ConfigError::ValidationError {
            field: "simulator.base_pct_min".into(),
            message: format!(
                "must be <= base_pct_max ({}), got {}",
                sim.base_pct_max, sim.base_pct_min
            ),
        });
    }
    if sim.bonus_pct_min > sim.bonus_pct_max {
        return Err(ConfigError::ValidationError {
            field: "simulator.bonus_pct_min".into(),
            message: format!(
                "must be <= bonus_pct_max ({}), got {}",
                sim.bonus_pct_max, sim.bonus_pct_min
            ),
        });
    }
    if sim.step <= 0 {
        return Err(ConfigError::ValidationError {
            field: "simulator.step".into(),
            message: format!("must be > 0, got {}", sim.step),
        });
    }

    if config.clipboard.status_clear_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "clipboard.status_clear_ms".into(),
            message: "must be > 0".into(),
        });
    }
    if config
        .clipboard
        .command
        .as_ref()
        .is_some_and(|argv| argv.is_empty() || argv[0].trim().is_empty())
    {
        return Err(ConfigError::ValidationError {
            field: "clipboard.command".into(),
            message: "must name a program when set".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
