//! toaseries - convert pulsar times of arrival into an evenly sampled time series
//!
//! A TOA set (photon or pulse times of arrival, in MJD days or seconds) is
//! turned into a fixed-bin-width intensity series, the canonical input for
//! downstream periodicity searches. The conversion is a deterministic
//! pipeline: read → resolve series parameters → normalize → bin and write.
//!
//! ## Modules
//!
//! - **reader**: load a TOA set from text or raw-binary sources
//! - **descriptor**: read `.inf` descriptor files supplying series defaults
//! - **resolver**: merge explicit configuration over descriptor defaults
//! - **normalizer**: sort TOAs and convert to second-offsets from the epoch
//! - **binner**: stream offsets into fixed-width bins, block by block
//! - **pipeline**: one-call orchestration of the full conversion

pub mod binner;
pub mod descriptor;
pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod reader;
pub mod resolver;
pub mod types;

pub use binner::BinningWriter;
pub use error::ConvertError;
pub use normalizer::Normalizer;
pub use pipeline::{convert, convert_streams};
pub use reader::ToaReader;
pub use resolver::Resolver;
pub use types::{
    BinningSummary, ConversionReport, EpochUnit, InfMetadata, SeriesConfig, SeriesDescriptor,
    ToaFormat, ToaSet,
};

/// Crate version embedded in conversion reports and CLI output.
pub const TOASERIES_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seconds per Modified-Julian-Date day.
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Default output block capacity in bins. Bounds peak memory during the
/// binning pass; the written series is identical for any positive value.
pub const DEFAULT_BLOCK_LEN: usize = 65536;
