use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use wlscan_core::{DecodeOptions, ScanOptions};

const MAX_SETTLE_DELAY_MS: u64 = 30_000;
const MAX_RECORDS_LIMIT: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WlscanConfig {
    pub scan: ScanConfig,
    pub decoder: DecoderConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub trigger: bool,
    pub settle_delay_ms: u64,
    /// Upper bound on one whole scan, settle delays included.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub max_records: u32,
    pub allow_trailing_ie_data: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            trigger: true,
            settle_delay_ms: 3000,
            timeout_secs: 60,
        }
    }
}

// Buffers from the OS carry IE blobs past the last entry, so the CLI
// relaxes the decoder's exact size check by default.
impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_records: DecodeOptions::default().max_records,
            allow_trailing_ie_data: true,
        }
    }
}

impl WlscanConfig {
    /// Read the config at `path`, writing the defaults there when it does
    /// not exist yet.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Self::load_from_str(&content)
                .with_context(|| format!("invalid config {}", path.display())),
            Err(_) => {
                let config = Self::default();
                match fs::write(path, toml::to_string_pretty(&config)?) {
                    Ok(()) => info!("wrote default config to {}", path.display()),
                    Err(e) => warn!("could not write default config {}: {}", path.display(), e),
                }
                Ok(config)
            }
        }
    }

    pub fn load_from_str(s: &str) -> Result<Self> {
        let config: WlscanConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.scan.settle_delay_ms <= MAX_SETTLE_DELAY_MS,
            "scan.settle_delay_ms must be <= {}, got {}",
            MAX_SETTLE_DELAY_MS,
            self.scan.settle_delay_ms
        );
        anyhow::ensure!(
            self.scan.timeout_secs > 0,
            "scan.timeout_secs must be > 0, got {}",
            self.scan.timeout_secs
        );
        anyhow::ensure!(
            (1..=MAX_RECORDS_LIMIT).contains(&self.decoder.max_records),
            "decoder.max_records must be between 1 and {}, got {}",
            MAX_RECORDS_LIMIT,
            self.decoder.max_records
        );
        Ok(())
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            max_records: self.decoder.max_records,
            allow_trailing_data: self.decoder.allow_trailing_ie_data,
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            trigger_scan: self.scan.trigger,
            settle_delay: Duration::from_millis(self.scan.settle_delay_ms),
            decode: self.decode_options(),
        }
    }

    pub fn scan_timeout(&self) -> Duration {
        Duration::from_secs(self.scan.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_accept_trailing_ie_data() {
        let config = WlscanConfig::default();
        let options = config.scan_options();
        assert!(options.trigger_scan);
        assert_eq!(options.settle_delay, ScanOptions::default().settle_delay);
        assert_eq!(options.decode.max_records, 100);
        assert!(options.decode.allow_trailing_data);
        assert_eq!(config.scan_timeout(), Duration::from_secs(60));
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn parses_full_file() {
        let config = WlscanConfig::load_from_str(
            r#"
            [scan]
            trigger = false
            settle_delay_ms = 500
            timeout_secs = 10

            [decoder]
            max_records = 250
            allow_trailing_ie_data = false

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        let options = config.scan_options();
        assert!(!options.trigger_scan);
        assert_eq!(options.settle_delay, Duration::from_millis(500));
        assert_eq!(options.decode.max_records, 250);
        assert!(!options.decode.allow_trailing_data);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = WlscanConfig::load_from_str("[scan]\ntrigger = false\n").unwrap();
        assert!(!config.scan.trigger);
        assert_eq!(config.scan.settle_delay_ms, 3000);
        assert_eq!(config.decoder, DecoderConfig::default());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = WlscanConfig::load_from_str("[scan]\nsettle_delay_ms = 30001\n").unwrap_err();
        assert!(err.to_string().contains("scan.settle_delay_ms"));

        let err = WlscanConfig::load_from_str("[scan]\ntimeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("scan.timeout_secs"));

        let err = WlscanConfig::load_from_str("[decoder]\nmax_records = 0\n").unwrap_err();
        assert!(err.to_string().contains("decoder.max_records"));

        assert!(WlscanConfig::load_from_str("[output]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wlscan.toml");

        let config = WlscanConfig::load(&path).unwrap();
        assert_eq!(config, WlscanConfig::default());
        assert!(path.exists());

        let reloaded = WlscanConfig::load(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[decoder]\nmax_records = 5000\n").unwrap();

        let err = WlscanConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("bad.toml"));
        assert!(format!("{err:#}").contains("decoder.max_records"));
    }
}
