//! Series parameter resolution
//!
//! This module merges explicit configuration with descriptor-derived
//! defaults into the final, read-only [`SeriesDescriptor`]. It never
//! touches TOA data.

use crate::descriptor;
use crate::error::ConvertError;
use crate::types::{InfMetadata, SeriesConfig, SeriesDescriptor};

/// Resolver for the three output parameters (bin width, bin count, epoch).
pub struct Resolver;

impl Resolver {
    /// Resolve the series parameters for `config`, loading the descriptor
    /// file first when one is configured.
    pub fn resolve(config: &SeriesConfig) -> Result<SeriesDescriptor, ConvertError> {
        let meta = match &config.descriptor {
            Some(path) => Some(descriptor::read_inf(path)?),
            None => None,
        };
        Self::merge(config, meta.as_ref())
    }

    /// Merge explicit configuration over descriptor defaults.
    ///
    /// An explicitly supplied value always wins; in particular an explicit
    /// epoch is never overridden by a descriptor epoch. Missing or
    /// non-positive bin width / bin count after the merge is fatal.
    pub fn merge(
        config: &SeriesConfig,
        meta: Option<&InfMetadata>,
    ) -> Result<SeriesDescriptor, ConvertError> {
        let bin_width = config
            .bin_width
            .or_else(|| meta.and_then(|m| m.bin_width))
            .ok_or_else(|| {
                ConvertError::Config("bin width not given and not found in descriptor".into())
            })?;
        if !(bin_width > 0.0) {
            return Err(ConvertError::Config(format!(
                "bin width must be positive, got {bin_width}"
            )));
        }

        let num_bins = config
            .num_bins
            .or_else(|| meta.and_then(|m| m.num_bins))
            .ok_or_else(|| {
                ConvertError::Config("bin count not given and not found in descriptor".into())
            })?;
        if num_bins == 0 {
            return Err(ConvertError::Config("bin count must be positive".into()));
        }

        if config.block_len == 0 {
            return Err(ConvertError::Config(
                "block capacity must be positive".into(),
            ));
        }

        let epoch = config.epoch.or_else(|| meta.and_then(|m| m.epoch_mjd));

        Ok(SeriesDescriptor {
            bin_width,
            num_bins,
            epoch,
        })
    }
}
