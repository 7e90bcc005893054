//! TOA input reading
//!
//! This module loads a full TOA set into memory from either a line-oriented
//! text source or a raw binary array of IEEE floats. Reading is front-loaded:
//! the whole source is consumed before any downstream stage runs.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::ConvertError;
use crate::types::{ToaFormat, ToaSet};

/// Reader for TOA sources.
pub struct ToaReader;

impl ToaReader {
    /// Read the TOA set from a file path, dispatching on `format`.
    pub fn read_path(path: &Path, format: ToaFormat) -> Result<ToaSet, ConvertError> {
        let file = File::open(path).map_err(|source| ConvertError::File {
            path: path.display().to_string(),
            source,
        })?;
        Self::read(BufReader::new(file), format)
    }

    /// Read the TOA set from any buffered reader, dispatching on `format`.
    pub fn read<R: BufRead>(reader: R, format: ToaFormat) -> Result<ToaSet, ConvertError> {
        let toas = match format {
            ToaFormat::Text => return Self::read_text(reader),
            ToaFormat::Float32 => Self::read_f32(reader)?,
            ToaFormat::Float64 => Self::read_f64(reader)?,
        };
        Ok(ToaSet {
            toas,
            skipped_lines: 0,
        })
    }

    /// Scan a text source line by line.
    ///
    /// A line is a data line when its first non-blank character is not `#`
    /// and it is not empty. A data line whose leading token fails to parse
    /// as a real number is skipped and tallied, not fatal.
    fn read_text<R: BufRead>(reader: R) -> Result<ToaSet, ConvertError> {
        let mut set = ToaSet::default();

        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let token = trimmed.split_whitespace().next().unwrap_or("");
            match token.parse::<f64>() {
                Ok(toa) => set.toas.push(toa),
                Err(_) => set.skipped_lines += 1,
            }
        }

        Ok(set)
    }

    /// Read the raw bytes of a headerless binary array.
    ///
    /// The record count is the byte length divided by the record width of
    /// the selected element type. A trailing remainder means the source is
    /// not an array of that type.
    fn read_raw<R: Read>(
        mut reader: R,
        width: usize,
        format: ToaFormat,
    ) -> Result<Vec<u8>, ConvertError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        if bytes.len() % width != 0 {
            return Err(ConvertError::Format(format!(
                "byte length {} is not a multiple of the {}-byte record width ({})",
                bytes.len(),
                width,
                format.as_str()
            )));
        }
        Ok(bytes)
    }

    /// Single-precision records, widened to the f64 working precision.
    fn read_f32<R: Read>(reader: R) -> Result<Vec<f64>, ConvertError> {
        let bytes = Self::read_raw(reader, 4, ToaFormat::Float32)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f64)
            .collect())
    }

    /// Double-precision records.
    fn read_f64<R: Read>(reader: R) -> Result<Vec<f64>, ConvertError> {
        let bytes = Self::read_raw(reader, 8, ToaFormat::Float64)?;
        Ok(bytes
            .chunks_exact(8)
            .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
            .collect())
    }
}
