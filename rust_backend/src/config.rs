//! Extractor configuration file support.
//!
//! Every tuned constant of the reconstruction (tick thresholds, frame
//! widths, exam colour) can be overridden from a TOML file. Missing
//! sections and fields keep their defaults.
//!
//! ```toml
//! [calibration]
//! dark_threshold = 150
//! release_threshold = 200
//!
//! [exam]
//! yellow_threshold_percent = 10.0
//!
//! [output]
//! level = "L3"
//! timezone = "Europe/Paris"
//! ```

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{ExtractError, ExtractResult};
use crate::core::geometry::{Axis, AxisRange};
use crate::io::providers::ColorRange;

/// Extractor configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub frames: FrameConfig,
    #[serde(default)]
    pub exam: ExamConfig,
    #[serde(default)]
    pub split: SplitConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Tick detection thresholds on the 0-255 brightness profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// A value below this starts a tick.
    #[serde(default = "default_dark_threshold")]
    pub dark_threshold: u8,
    /// A tick lasts while values stay below this.
    #[serde(default = "default_release_threshold")]
    pub release_threshold: u8,
}

/// Accepted frame widths, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameConfig {
    #[serde(default = "default_class_min_width")]
    pub class_min_width: i32,
    #[serde(default = "default_class_max_width")]
    pub class_max_width: i32,
    #[serde(default = "default_week_min_width")]
    pub week_min_width: i32,
    #[serde(default = "default_week_max_width")]
    pub week_max_width: i32,
}

/// Exam highlight detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamConfig {
    #[serde(default = "default_yellow_threshold_percent")]
    pub yellow_threshold_percent: f64,
    /// Lower BGR bound of the highlight colour.
    #[serde(default = "default_yellow_lower_bgr")]
    pub yellow_lower_bgr: [u8; 3],
    /// Upper BGR bound of the highlight colour.
    #[serde(default = "default_yellow_upper_bgr")]
    pub yellow_upper_bgr: [u8; 3],
}

/// Stacked week handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// How many times a block may be split. Blocks at the bound are
    /// reconstructed whole.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Subject given to cells without a readable subject.
    #[serde(default = "default_unknown_subject")]
    pub unknown_subject: String,
    /// Class level; overrides the level of the page document.
    #[serde(default)]
    pub level: Option<String>,
    /// Date used to infer the year of week dates; today when unset.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    /// Time zone the timetable's wall-clock hours are read in.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
}

fn default_dark_threshold() -> u8 {
    150
}

fn default_release_threshold() -> u8 {
    200
}

fn default_class_min_width() -> i32 {
    80
}

fn default_class_max_width() -> i32 {
    1000
}

fn default_week_min_width() -> i32 {
    1900
}

fn default_week_max_width() -> i32 {
    2200
}

fn default_yellow_threshold_percent() -> f64 {
    10.0
}

fn default_yellow_lower_bgr() -> [u8; 3] {
    [0, 220, 220]
}

fn default_yellow_upper_bgr() -> [u8; 3] {
    [50, 255, 255]
}

fn default_max_depth() -> usize {
    1
}

fn default_unknown_subject() -> String {
    "Inconnu".to_string()
}

fn default_timezone() -> Tz {
    chrono_tz::Europe::Paris
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            dark_threshold: default_dark_threshold(),
            release_threshold: default_release_threshold(),
        }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            class_min_width: default_class_min_width(),
            class_max_width: default_class_max_width(),
            week_min_width: default_week_min_width(),
            week_max_width: default_week_max_width(),
        }
    }
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            yellow_threshold_percent: default_yellow_threshold_percent(),
            yellow_lower_bgr: default_yellow_lower_bgr(),
            yellow_upper_bgr: default_yellow_upper_bgr(),
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            unknown_subject: default_unknown_subject(),
            level: None,
            reference_date: None,
            timezone: default_timezone(),
        }
    }
}

impl FrameConfig {
    /// Width range of class cell frames.
    pub fn class_widths(&self) -> AxisRange {
        AxisRange::new(self.class_min_width, self.class_max_width, Axis::Horizontal)
    }

    /// Width range of week block frames.
    pub fn week_widths(&self) -> AxisRange {
        AxisRange::new(self.week_min_width, self.week_max_width, Axis::Horizontal)
    }
}

impl ExamConfig {
    pub fn yellow(&self) -> ColorRange {
        ColorRange {
            lower: self.yellow_lower_bgr,
            upper: self.yellow_upper_bgr,
        }
    }
}

impl ExtractorConfig {
    /// Load extractor configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ExtractorConfig)` if successful
    /// * `Err(ExtractError)` if file cannot be read, parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> ExtractResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ExtractError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse extractor configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ExtractResult<Self> {
        let config: ExtractorConfig = toml::from_str(content).map_err(|e| {
            ExtractError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load extractor configuration from the default location.
    ///
    /// Searches for `edt.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(ExtractorConfig)` if found and parsed successfully
    /// * `Err(ExtractError)` if no config file found or parse error
    pub fn from_default_location() -> ExtractResult<Self> {
        let search_paths = vec![
            PathBuf::from("edt.toml"),
            PathBuf::from("rust_backend/edt.toml"),
            PathBuf::from("../edt.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ExtractError::ConfigurationError(
            "No edt.toml found in standard locations".to_string(),
        ))
    }

    /// Check that thresholds and ranges are consistent.
    pub fn validate(&self) -> ExtractResult<()> {
        if self.calibration.dark_threshold > self.calibration.release_threshold {
            return Err(ExtractError::ConfigurationError(format!(
                "calibration.dark_threshold ({}) must not exceed calibration.release_threshold ({})",
                self.calibration.dark_threshold, self.calibration.release_threshold
            )));
        }

        if self.frames.class_min_width > self.frames.class_max_width {
            return Err(ExtractError::ConfigurationError(
                "frames.class_min_width must not exceed frames.class_max_width".to_string(),
            ));
        }

        if self.frames.week_min_width > self.frames.week_max_width {
            return Err(ExtractError::ConfigurationError(
                "frames.week_min_width must not exceed frames.week_max_width".to_string(),
            ));
        }

        let percent = self.exam.yellow_threshold_percent;
        if !(0.0..=100.0).contains(&percent) {
            return Err(ExtractError::ConfigurationError(format!(
                "exam.yellow_threshold_percent must be within 0..=100, got {}",
                percent
            )));
        }

        if (0..3).any(|i| self.exam.yellow_lower_bgr[i] > self.exam.yellow_upper_bgr[i]) {
            return Err(ExtractError::ConfigurationError(
                "exam.yellow_lower_bgr must not exceed exam.yellow_upper_bgr".to_string(),
            ));
        }

        Ok(())
    }
}
