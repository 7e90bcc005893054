//! Descriptor (.inf) file reading
//!
//! PRESTO-style information files describe an existing time series with
//! lines of the form:
//!
//! ```text
//!  Data file name without suffix          =  mydata
//!  Number of bins in the time series      =  1198080
//!  Width of each time series bin (sec)    =  0.000072
//!  Epoch of observation (MJD)             =  53010.484257438890
//! ```
//!
//! The grammar here is a tolerant key/value split on the first `=`: keys
//! are matched by prefix and anything unrecognized is ignored rather than
//! being undefined behavior. The resolver is responsible for deciding
//! which missing fields are fatal.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::ConvertError;
use crate::types::InfMetadata;

/// Read descriptor metadata from an `.inf` file on disk.
pub fn read_inf(path: &Path) -> Result<InfMetadata, ConvertError> {
    let file = File::open(path).map_err(|source| ConvertError::File {
        path: path.display().to_string(),
        source,
    })?;
    parse_inf(BufReader::new(file))
}

/// Parse descriptor metadata from any buffered reader.
pub fn parse_inf<R: BufRead>(reader: R) -> Result<InfMetadata, ConvertError> {
    let mut meta = InfMetadata::default();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        if key.starts_with("Data file name") {
            meta.data_name = Some(value.trim_matches('"').to_string());
        } else if key.starts_with("Number of bins") {
            meta.num_bins = value.parse().ok();
        } else if key.starts_with("Width of each time series bin") {
            meta.bin_width = value.parse().ok();
        } else if key.starts_with("Epoch of observation") {
            meta.epoch_mjd = parse_mjd(value);
        }
    }

    Ok(meta)
}

/// Parse an MJD value as separate integer and fractional parts merged into
/// one f64. Trailing non-digit annotation after the fraction is tolerated.
fn parse_mjd(value: &str) -> Option<f64> {
    match value.split_once('.') {
        Some((int_part, frac_part)) => {
            let int: f64 = int_part.trim().parse().ok()?;
            let digits: String = frac_part
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            if digits.is_empty() {
                return Some(int);
            }
            let frac: f64 = digits.parse().ok()?;
            Some(int + frac * 10f64.powi(-(digits.len() as i32)))
        }
        None => value.split_whitespace().next()?.parse().ok(),
    }
}
