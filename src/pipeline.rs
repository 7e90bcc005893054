//! Pipeline orchestration
//!
//! This module provides the public API for toaseries. It wires the four
//! stages together: read the TOA set, resolve the series parameters,
//! normalize to sorted second-offsets, and stream the offsets into the
//! binned output.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};

use chrono::Utc;

use crate::binner::BinningWriter;
use crate::error::ConvertError;
use crate::normalizer::Normalizer;
use crate::reader::ToaReader;
use crate::resolver::Resolver;
use crate::types::{ConversionReport, SeriesConfig, SeriesDescriptor};

/// Run a full conversion for `config`, reading from and writing to the
/// configured paths.
///
/// Exactly one pass is made over the sorted data; blocks are flushed to
/// the sink as they are produced. Any failure aborts the whole run.
pub fn convert(config: &SeriesConfig) -> Result<ConversionReport, ConvertError> {
    let series = Resolver::resolve(config)?;
    let toas = ToaReader::read_path(&config.source, config.format)?;

    let sink = File::create(&config.sink).map_err(|source| ConvertError::File {
        path: config.sink.display().to_string(),
        source,
    })?;

    run_conversion(config, &series, toas.toas, toas.skipped_lines, BufWriter::new(sink))
}

/// Run a conversion over an already-open source and sink.
///
/// Useful for callers that do not work with paths; `convert` is a thin
/// file-backed wrapper around this.
pub fn convert_streams<R: BufRead, W: Write>(
    config: &SeriesConfig,
    reader: R,
    sink: W,
) -> Result<ConversionReport, ConvertError> {
    let series = Resolver::resolve(config)?;
    let toas = ToaReader::read(reader, config.format)?;
    run_conversion(config, &series, toas.toas, toas.skipped_lines, sink)
}

fn run_conversion<W: Write>(
    config: &SeriesConfig,
    series: &SeriesDescriptor,
    toas: Vec<f64>,
    skipped_lines: u64,
    sink: W,
) -> Result<ConversionReport, ConvertError> {
    let normalized = Normalizer::normalize(toas, series.epoch, config.epoch_unit);

    let writer = BinningWriter::with_block_len(series, config.block_len);
    let summary = writer.write_series(&normalized.offsets, sink)?;

    Ok(ConversionReport {
        source: config.source.display().to_string(),
        sink: config.sink.display().to_string(),
        format: config.format,
        total_toas: summary.total,
        skipped_lines,
        placed: summary.placed,
        dropped: summary.dropped,
        blocks_written: summary.blocks_written,
        num_bins: series.num_bins,
        bin_width: series.bin_width,
        epoch: normalized.epoch,
        epoch_unit: config.epoch_unit,
        computed_at: Utc::now(),
    })
}
