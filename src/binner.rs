//! Streaming binning writer
//!
//! One forward pass over the sorted second-offsets accumulates per-bin
//! event counts into bounded-size blocks and flushes each block to the
//! sink in epoch order. The block capacity caps peak memory; it never
//! changes the values written.
//!
//! Block `i` covers the half-open interval `[i*W*dt, (i+1)*W*dt)`. An
//! offset at exactly a block's upper edge belongs to the next block.
//! Offsets before the current block or at/after `num_bins * bin_width`
//! are dropped and tallied; dropping is a normal outcome, not an error.

use std::io::Write;

use crate::error::ConvertError;
use crate::types::{BinningSummary, SeriesDescriptor};
use crate::DEFAULT_BLOCK_LEN;

/// Writer that streams sorted offsets into fixed-width bins.
pub struct BinningWriter {
    bin_width: f64,
    num_bins: u64,
    block_len: usize,
}

impl BinningWriter {
    /// Writer with the default block capacity.
    pub fn new(series: &SeriesDescriptor) -> Self {
        Self::with_block_len(series, DEFAULT_BLOCK_LEN)
    }

    /// Writer with an explicit block capacity in bins. Must be positive;
    /// the resolver rejects zero before a writer is ever built.
    pub fn with_block_len(series: &SeriesDescriptor, block_len: usize) -> Self {
        debug_assert!(block_len > 0);
        Self {
            bin_width: series.bin_width,
            num_bins: series.num_bins,
            block_len,
        }
    }

    /// Bin `offsets` (sorted ascending, in seconds) and write the series
    /// to `sink` as little-endian f32 counts, one value per bin.
    ///
    /// The scratch block is allocated once and reset between blocks. The
    /// read cursor only moves forward; no block is revisited.
    pub fn write_series<W: Write>(
        &self,
        offsets: &[f64],
        mut sink: W,
    ) -> Result<BinningSummary, ConvertError> {
        let num_blocks = self.num_bins.div_ceil(self.block_len as u64);
        let block_span = self.block_len as f64 * self.bin_width;
        let inv_width = 1.0 / self.bin_width;

        let mut counts = vec![0f32; self.block_len];
        let mut bytes = Vec::with_capacity(self.block_len * 4);
        let mut cursor = 0usize;
        let mut placed = 0u64;

        for block in 0..num_blocks {
            // Computed the same way on both sides of a seam so adjacent
            // blocks agree bit-for-bit on the boundary time.
            let lo = block as f64 * block_span;
            let hi = (block + 1) as f64 * block_span;
            let bins_left = self.num_bins - block * self.block_len as u64;
            let bins_this_block = (self.block_len as u64).min(bins_left) as usize;

            counts[..bins_this_block].fill(0.0);

            while cursor < offsets.len() {
                let offset = offsets[cursor];
                if offset >= hi {
                    break;
                }
                if offset >= lo {
                    let idx = ((offset - lo) * inv_width) as usize;
                    // The final block's time span can extend past the end
                    // of the series; anything beyond num_bins is dropped.
                    if idx < bins_this_block {
                        counts[idx] += 1.0;
                        placed += 1;
                    }
                }
                cursor += 1;
            }

            bytes.clear();
            for &count in &counts[..bins_this_block] {
                bytes.extend_from_slice(&count.to_le_bytes());
            }
            sink.write_all(&bytes)?;
        }
        sink.flush()?;

        let total = offsets.len() as u64;
        Ok(BinningSummary {
            total,
            placed,
            dropped: total - placed,
            blocks_written: num_blocks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn series(bin_width: f64, num_bins: u64) -> SeriesDescriptor {
        SeriesDescriptor {
            bin_width,
            num_bins,
            epoch: None,
        }
    }

    fn run(writer: &BinningWriter, offsets: &[f64]) -> (Vec<f32>, BinningSummary) {
        let mut sink = Vec::new();
        let summary = writer.write_series(offsets, &mut sink).unwrap();
        let bins = sink
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes(c.try_into().unwrap()))
            .collect();
        (bins, summary)
    }

    #[test]
    fn test_basic_binning() {
        let writer = BinningWriter::new(&series(1.0, 2));
        let (bins, summary) = run(&writer, &[0.0, 0.5, 0.5, 1.9]);
        assert_eq!(bins, vec![3.0, 1.0]);
        assert_eq!(summary.placed, 4);
        assert_eq!(summary.dropped, 0);
    }

    #[test]
    fn test_out_of_range_events_dropped_not_fatal() {
        let writer = BinningWriter::new(&series(1.0, 3));
        let (bins, summary) = run(&writer, &[-1.0, 5.0]);
        assert_eq!(bins, vec![0.0, 0.0, 0.0]);
        assert_eq!(summary.placed, 0);
        assert_eq!(summary.dropped, 2);
    }

    #[test]
    fn test_conservation_across_blocks() {
        let writer = BinningWriter::with_block_len(&series(1.0, 10), 4);
        let offsets = [-2.0, 0.5, 3.99, 4.0, 7.5, 9.999, 10.0, 25.0];
        let (bins, summary) = run(&writer, &offsets);
        assert_eq!(bins.len(), 10);
        assert_eq!(summary.total, 8);
        assert_eq!(summary.placed + summary.dropped, summary.total);
        assert_eq!(summary.placed, 5);
        assert_eq!(bins.iter().sum::<f32>(), 5.0);
    }

    #[test]
    fn test_block_seam_upper_edge_goes_to_next_block() {
        // With W = 4 and dt = 1, offset 4.0 sits exactly on the seam
        // between blocks 0 and 1 and must land in bin 4, not bin 3.
        let writer = BinningWriter::with_block_len(&series(1.0, 8), 4);
        let (bins, summary) = run(&writer, &[4.0]);
        assert_eq!(bins[3], 0.0);
        assert_eq!(bins[4], 1.0);
        assert_eq!(summary.placed, 1);
    }

    #[test]
    fn test_final_partial_block_sizing() {
        // 10 bins with capacity 4: blocks of 4, 4, and 2 bins.
        let writer = BinningWriter::with_block_len(&series(1.0, 10), 4);
        let (bins, summary) = run(&writer, &[]);
        assert_eq!(bins.len(), 10);
        assert_eq!(summary.blocks_written, 3);
    }

    #[test]
    fn test_evenly_divisible_final_block_is_full_size() {
        let writer = BinningWriter::with_block_len(&series(1.0, 8), 4);
        let (bins, summary) = run(&writer, &[]);
        assert_eq!(bins.len(), 8);
        assert_eq!(summary.blocks_written, 2);
    }

    #[test]
    fn test_event_in_final_block_span_but_past_series_end_dropped() {
        // 6 bins with capacity 4: the last block spans [4, 8) in time but
        // only bins 4 and 5 exist. Offset 6.5 is inside the span yet past
        // the series end, so it is dropped.
        let writer = BinningWriter::with_block_len(&series(1.0, 6), 4);
        let (bins, summary) = run(&writer, &[5.5, 6.5]);
        assert_eq!(bins.len(), 6);
        assert_eq!(bins[5], 1.0);
        assert_eq!(summary.placed, 1);
        assert_eq!(summary.dropped, 1);
    }

    #[test]
    fn test_coincident_events_accumulate() {
        let writer = BinningWriter::new(&series(0.5, 4));
        let (bins, summary) = run(&writer, &[0.6, 0.6, 0.6, 0.6]);
        assert_eq!(bins, vec![0.0, 4.0, 0.0, 0.0]);
        assert_eq!(summary.placed, 4);
    }

    #[test]
    fn test_fractional_bin_width() {
        let writer = BinningWriter::new(&series(0.25, 4));
        let (bins, _) = run(&writer, &[0.0, 0.26, 0.51, 0.99]);
        assert_eq!(bins, vec![1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_large_series_many_blocks() {
        let writer = BinningWriter::with_block_len(&series(1.0, 1000), 64);
        let offsets: Vec<f64> = (0..1000).map(|i| i as f64 + 0.5).collect();
        let (bins, summary) = run(&writer, &offsets);
        assert_eq!(bins.len(), 1000);
        assert_eq!(summary.blocks_written, 16);
        assert_eq!(summary.placed, 1000);
        assert!(bins.iter().all(|&b| b == 1.0));
    }
}
