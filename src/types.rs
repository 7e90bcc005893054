//! Core types for the toaseries pipeline
//!
//! This module defines the data structures that flow through each stage of
//! the conversion: the input configuration, the set of TOAs read from the
//! source, the resolved series parameters, and the final report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::DEFAULT_BLOCK_LEN;

/// On-disk layout of the TOA source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToaFormat {
    /// One ASCII floating-point value per line; `#` lines and blank lines
    /// are ignored.
    Text,
    /// Raw, headerless, densely packed IEEE single-precision values.
    Float32,
    /// Raw, headerless, densely packed IEEE double-precision values.
    Float64,
}

impl ToaFormat {
    /// Width of one binary record in bytes, or `None` for text input.
    pub fn record_width(&self) -> Option<usize> {
        match self {
            ToaFormat::Text => None,
            ToaFormat::Float32 => Some(4),
            ToaFormat::Float64 => Some(8),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToaFormat::Text => "text",
            ToaFormat::Float32 => "float32",
            ToaFormat::Float64 => "float64",
        }
    }
}

/// Unit in which the TOAs (and the reference epoch) are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EpochUnit {
    /// Modified Julian Date days, the usual pulsar-timing convention.
    MjdDays,
    /// Already expressed in seconds; offsets need no scaling.
    Seconds,
}

/// Immutable configuration for one conversion run.
///
/// Built once (by the CLI or a library caller) and threaded through the
/// pipeline by parameter; nothing in the pipeline mutates it.
#[derive(Debug, Clone)]
pub struct SeriesConfig {
    /// Path of the TOA source.
    pub source: PathBuf,
    /// Path of the output time-series sink.
    pub sink: PathBuf,
    /// Layout of the source data.
    pub format: ToaFormat,
    /// Width of each output bin in seconds, if given explicitly.
    pub bin_width: Option<f64>,
    /// Number of output bins, if given explicitly.
    pub num_bins: Option<u64>,
    /// Reference epoch, if given explicitly. Same unit as the TOAs.
    pub epoch: Option<f64>,
    /// Unit of the TOAs and the epoch.
    pub epoch_unit: EpochUnit,
    /// Optional descriptor (.inf) file supplying defaults for the three
    /// series parameters.
    pub descriptor: Option<PathBuf>,
    /// Output block capacity in bins. Bounds peak memory only; has no
    /// effect on the values written.
    pub block_len: usize,
}

impl SeriesConfig {
    /// Configuration with defaults: text input, MJD-day units, nothing
    /// explicit, default block capacity.
    pub fn new(source: impl Into<PathBuf>, sink: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            sink: sink.into(),
            format: ToaFormat::Text,
            bin_width: None,
            num_bins: None,
            epoch: None,
            epoch_unit: EpochUnit::MjdDays,
            descriptor: None,
            block_len: DEFAULT_BLOCK_LEN,
        }
    }
}

/// The three resolved output parameters, read-only after resolution.
///
/// `epoch` stays `None` when neither the caller nor a descriptor supplied
/// one; the normalizer then falls back to the smallest TOA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesDescriptor {
    /// Width of each output bin in seconds. Always positive.
    pub bin_width: f64,
    /// Number of output bins. Always positive.
    pub num_bins: u64,
    /// Reference epoch in the configured unit, if one was supplied.
    pub epoch: Option<f64>,
}

/// Metadata fields recognized in a descriptor (.inf) file.
///
/// Every field is optional at this layer; the resolver decides which
/// absences are fatal after merging with the explicit configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfMetadata {
    /// Free-text data identifier.
    pub data_name: Option<String>,
    /// Number of bins in the time series.
    pub num_bins: Option<u64>,
    /// Width of each time-series bin in seconds.
    pub bin_width: Option<f64>,
    /// Epoch of observation as a merged MJD value.
    pub epoch_mjd: Option<f64>,
}

/// TOAs read from a source plus the per-line skip tally for text input.
#[derive(Debug, Clone, Default)]
pub struct ToaSet {
    /// The unordered TOA values, in source order.
    pub toas: Vec<f64>,
    /// Data lines whose numeric content failed to parse (text mode only).
    pub skipped_lines: u64,
}

/// Counters produced by one pass of the binning writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinningSummary {
    /// Number of offsets presented to the writer.
    pub total: u64,
    /// Events that landed inside `[0, num_bins * bin_width)`.
    pub placed: u64,
    /// Events outside the series span. Always `total - placed`.
    pub dropped: u64,
    /// Blocks flushed to the sink.
    pub blocks_written: u64,
}

/// Full record of one conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub source: String,
    pub sink: String,
    pub format: ToaFormat,
    /// TOAs read from the source.
    pub total_toas: u64,
    /// Text data lines skipped as unparsable.
    pub skipped_lines: u64,
    pub placed: u64,
    pub dropped: u64,
    pub blocks_written: u64,
    pub num_bins: u64,
    pub bin_width: f64,
    /// The reference epoch actually used, in the configured unit.
    /// `None` only when the input contained no TOAs at all.
    pub epoch: Option<f64>,
    pub epoch_unit: EpochUnit,
    pub computed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_widths() {
        assert_eq!(ToaFormat::Text.record_width(), None);
        assert_eq!(ToaFormat::Float32.record_width(), Some(4));
        assert_eq!(ToaFormat::Float64.record_width(), Some(8));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&ToaFormat::Float32).unwrap(),
            "\"float32\""
        );
        assert_eq!(
            serde_json::to_string(&EpochUnit::MjdDays).unwrap(),
            "\"mjd-days\""
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = SeriesConfig::new("a", "b");
        assert_eq!(config.format, ToaFormat::Text);
        assert_eq!(config.epoch_unit, EpochUnit::MjdDays);
        assert_eq!(config.block_len, DEFAULT_BLOCK_LEN);
        assert_eq!(config.bin_width, None);
    }
}
