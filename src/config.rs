//! wakeqr runtime configuration handling
//!
//! Values are resolved in order: built-in defaults, an optional TOML/YAML
//! file, `WAKEQR_*` environment variables, then command-line flags (applied
//! by the binary).

use crate::error::{Error, Result};
use crate::qr::{ErrorCorrection, QrPayload, SymbolConfig};
use crate::render::{Palette, RenderOptions};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Secret the companion wake-up app expects when no other is configured.
pub const DEFAULT_SECRET: &str = "DESLIGAR_WAKEUP_AGORA";

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "qr.png";

/// Top-level configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WakeQrConfig {
    /// Text to encode; must match the value the scanning app compares against
    pub secret: String,
    /// Destination image path
    pub output: PathBuf,
    /// Decode the written file and compare it with the secret
    pub verify: bool,
    /// QR symbol parameters
    pub symbol: SymbolConfig,
    /// Raster parameters
    pub render: RenderSettings,
    /// Logging configuration
    pub logging: LoggingOptions,
    /// Configuration file the values were read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
    /// Problems noticed while loading, held until logging is installed
    #[serde(skip)]
    pub warnings: Vec<String>,
}

impl Default for WakeQrConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            verify: false,
            symbol: SymbolConfig::default(),
            render: RenderSettings::default(),
            logging: LoggingOptions::default(),
            source: None,
            warnings: Vec::new(),
        }
    }
}

impl WakeQrConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    ///
    /// Nothing is logged here since the subscriber depends on the result;
    /// call [`WakeQrConfig::log_diagnostics`] once logging is initialised.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let source = match explicit_path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover_file()?,
        };

        let mut config = match source {
            Some(ref path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.source = source;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Emit the file source and any override warnings gathered by `load`.
    pub fn log_diagnostics(&self) {
        match &self.source {
            Some(path) => tracing::info!("Using configuration file: {}", path.display()),
            None => tracing::debug!("No wakeqr.toml / wakeqr.yaml found, using defaults"),
        }
        for warning in &self.warnings {
            tracing::warn!("{warning}");
        }
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["wakeqr.toml", "wakeqr.yaml", "wakeqr.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("wakeqr");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply `WAKEQR_*` overrides resolved through `lookup`.
    ///
    /// Unparsable values are skipped and recorded in `warnings`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let warnings = &mut self.warnings;
        if let Some(secret) = lookup("WAKEQR_SECRET") {
            self.secret = secret;
        }
        if let Some(output) = lookup("WAKEQR_OUTPUT") {
            self.output = PathBuf::from(output);
        }
        if let Some(verify) = lookup_parsed(&lookup, "WAKEQR_VERIFY", parse_flag, warnings) {
            self.verify = verify;
        }
        if let Some(version) =
            lookup_parsed(&lookup, "WAKEQR_VERSION", |v| v.parse::<u8>().ok(), warnings)
        {
            self.symbol.version = version;
        }
        if let Some(level) =
            lookup_parsed(&lookup, "WAKEQR_EC_LEVEL", ErrorCorrection::parse, warnings)
        {
            self.symbol.ec_level = level;
        }
        if let Some(fit) = lookup_parsed(&lookup, "WAKEQR_FIT", parse_flag, warnings) {
            self.symbol.fit = fit;
        }
        self.render.apply_overrides(&lookup, warnings);
        self.logging.apply_overrides(&lookup, warnings);
    }

    /// The payload described by `secret`.
    pub fn payload(&self) -> QrPayload {
        QrPayload::from_string(self.secret.clone())
    }

    /// Produce fully resolved render options, parsing colours.
    pub fn render_options(&self) -> Result<RenderOptions> {
        self.render.to_render_options()
    }
}

/// User-facing raster settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderSettings {
    /// Pixels per module
    pub box_size: u32,
    /// Quiet zone in modules
    pub border: u32,
    /// CSS colour of dark modules
    pub fill_color: String,
    /// CSS colour of light modules and border
    pub back_color: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            box_size: 20,
            border: 4,
            fill_color: "black".to_string(),
            back_color: "white".to_string(),
        }
    }
}

impl RenderSettings {
    fn apply_overrides<F>(&mut self, lookup: &F, warnings: &mut Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_u32 = |v: &str| v.parse::<u32>().ok();
        if let Some(size) = lookup_parsed(lookup, "WAKEQR_BOX_SIZE", parse_u32, warnings) {
            self.box_size = size;
        }
        if let Some(border) = lookup_parsed(lookup, "WAKEQR_BORDER", parse_u32, warnings) {
            self.border = border;
        }
        if let Some(color) = lookup("WAKEQR_FILL_COLOR") {
            self.fill_color = color;
        }
        if let Some(color) = lookup("WAKEQR_BACK_COLOR") {
            self.back_color = color;
        }
    }

    /// Parse colours and validate sizes.
    pub fn to_render_options(&self) -> Result<RenderOptions> {
        let options = RenderOptions {
            box_size: self.box_size,
            border: self.border,
            palette: Palette::parse(&self.fill_color, &self.back_color)?,
        };
        options.validate()?;
        Ok(options)
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `WAKEQR_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stderr logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    fn apply_overrides<F>(&mut self, lookup: &F, warnings: &mut Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("WAKEQR_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(file) = lookup("WAKEQR_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(color) = lookup_parsed(lookup, "WAKEQR_LOG_COLOR", parse_flag, warnings) {
            self.color = color;
        }
        if let Some(rotation) =
            lookup_parsed(lookup, "WAKEQR_LOG_ROTATION", LogRotation::from_str, warnings)
        {
            self.rotation = Some(rotation);
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

/// Look up `key` and parse it, recording a warning when the value is unusable.
fn lookup_parsed<F, T>(
    lookup: &F,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
    warnings: &mut Vec<String>,
) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        warnings.push(format!("Ignoring invalid {key} '{raw}'"));
    }
    parsed
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
