//! TOA normalization
//!
//! This module sorts the TOA set ascending and rewrites each value as a
//! signed offset in seconds from the reference epoch. Both steps are
//! order-preserving, so the output is non-decreasing by construction.

use crate::types::EpochUnit;
use crate::SECONDS_PER_DAY;

/// Sorted second-offsets plus the epoch they are measured from.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedToas {
    /// Offsets in seconds from `epoch`, sorted ascending.
    pub offsets: Vec<f64>,
    /// The reference epoch actually used, in the input unit.
    /// `None` only for an empty TOA set with no explicit epoch.
    pub epoch: Option<f64>,
}

/// Normalizer for converting raw TOAs into sorted second-offsets.
pub struct Normalizer;

impl Normalizer {
    /// Sort `toas` ascending and convert each to a second-offset from the
    /// reference epoch.
    ///
    /// When `epoch` is `None` the smallest TOA becomes the reference, so
    /// the first offset is exactly zero. MJD-day input is scaled by 86400;
    /// second input is used as-is.
    pub fn normalize(mut toas: Vec<f64>, epoch: Option<f64>, unit: EpochUnit) -> NormalizedToas {
        toas.sort_by(f64::total_cmp);

        let epoch = epoch.or_else(|| toas.first().copied());
        let Some(t0) = epoch else {
            return NormalizedToas {
                offsets: toas,
                epoch: None,
            };
        };

        let scale = match unit {
            EpochUnit::MjdDays => SECONDS_PER_DAY,
            EpochUnit::Seconds => 1.0,
        };
        for toa in &mut toas {
            *toa = (*toa - t0) * scale;
        }

        NormalizedToas {
            offsets: toas,
            epoch: Some(t0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sorts_and_offsets_in_seconds() {
        let toas = vec![3.0, 1.0, 2.0];
        let norm = Normalizer::normalize(toas, Some(1.0), EpochUnit::Seconds);
        assert_eq!(norm.offsets, vec![0.0, 1.0, 2.0]);
        assert_eq!(norm.epoch, Some(1.0));
    }

    #[test]
    fn test_default_epoch_is_smallest_toa() {
        let toas = vec![53010.5, 53010.25, 53011.0];
        let norm = Normalizer::normalize(toas, None, EpochUnit::Seconds);
        assert_eq!(norm.epoch, Some(53010.25));
        assert_eq!(norm.offsets[0], 0.0);
    }

    #[test]
    fn test_changing_smallest_toa_changes_default_epoch() {
        let norm_a = Normalizer::normalize(vec![10.0, 20.0], None, EpochUnit::Seconds);
        let norm_b = Normalizer::normalize(vec![5.0, 20.0], None, EpochUnit::Seconds);
        assert_eq!(norm_a.epoch, Some(10.0));
        assert_eq!(norm_b.epoch, Some(5.0));
    }

    #[test]
    fn test_mjd_days_scaled_to_seconds() {
        let toas = vec![53010.0, 53010.5];
        let norm = Normalizer::normalize(toas, Some(53010.0), EpochUnit::MjdDays);
        assert_eq!(norm.offsets, vec![0.0, 43200.0]);
    }

    #[test]
    fn test_epoch_before_all_toas_gives_positive_offsets() {
        let norm = Normalizer::normalize(vec![2.0, 3.0], Some(1.0), EpochUnit::Seconds);
        assert_eq!(norm.offsets, vec![1.0, 2.0]);
    }

    #[test]
    fn test_toa_before_epoch_gives_negative_offset() {
        let norm = Normalizer::normalize(vec![-1.0, 5.0], Some(0.0), EpochUnit::Seconds);
        assert_eq!(norm.offsets, vec![-1.0, 5.0]);
    }

    #[test]
    fn test_result_is_non_decreasing() {
        let toas = vec![9.0, 1.5, 7.25, 7.25, 0.125, 3.0];
        let norm = Normalizer::normalize(toas, None, EpochUnit::MjdDays);
        assert!(norm.offsets.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_empty_set_without_epoch() {
        let norm = Normalizer::normalize(Vec::new(), None, EpochUnit::MjdDays);
        assert!(norm.offsets.is_empty());
        assert_eq!(norm.epoch, None);
    }
}
