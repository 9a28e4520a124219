//! Daylight glare probability (DGP) classification.
//!
//! The comfort bands are fixed constants from the glare literature, not
//! configuration. Boundary values belong to the higher (worse) band, so
//! every comparison below is a strict `<`.

use crate::{DgError, DgResult, ensure_finite};

/// DGP below this is imperceptible.
pub const DGP_PERCEPTIBLE: f64 = 0.35;
/// DGP below this (and at least [`DGP_PERCEPTIBLE`]) is perceptible.
pub const DGP_DISTURBING: f64 = 0.40;
/// DGP below this (and at least [`DGP_DISTURBING`]) is disturbing;
/// anything at or above is intolerable.
pub const DGP_INTOLERABLE: f64 = 0.45;

/// Glare comfort category derived from a DGP value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComfortCategory {
    Imperceptible,
    Perceptible,
    Disturbing,
    Intolerable,
}

impl ComfortCategory {
    /// Classify a DGP value into its comfort band.
    pub fn from_dgp(dgp: f64) -> Self {
        if dgp < DGP_PERCEPTIBLE {
            ComfortCategory::Imperceptible
        } else if dgp < DGP_DISTURBING {
            ComfortCategory::Perceptible
        } else if dgp < DGP_INTOLERABLE {
            ComfortCategory::Disturbing
        } else {
            ComfortCategory::Intolerable
        }
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            ComfortCategory::Imperceptible => "Imperceptible Glare",
            ComfortCategory::Perceptible => "Perceptible Glare",
            ComfortCategory::Disturbing => "Disturbing Glare",
            ComfortCategory::Intolerable => "Intolerable Glare",
        }
    }
}

impl core::fmt::Display for ComfortCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// A parsed glare evaluation: the DGP plus whatever trailing indices the
/// analysis tool reported after it.
#[derive(Debug, Clone, PartialEq)]
pub struct GlareScore {
    pub dgp: f64,
    pub extra_indices: Vec<f64>,
}

impl GlareScore {
    /// Build a score from the full index list, first value being the DGP.
    pub fn from_indices(mut indices: Vec<f64>) -> DgResult<Self> {
        if indices.is_empty() {
            return Err(DgError::InvalidArg {
                what: "glare index list is empty",
            });
        }
        let dgp = ensure_finite(indices.remove(0), "dgp")?;
        Ok(Self {
            dgp,
            extra_indices: indices,
        })
    }

    pub fn category(&self) -> ComfortCategory {
        ComfortCategory::from_dgp(self.dgp)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn classification_is_monotonic(a in 0.0_f64..=1.0, b in 0.0_f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ComfortCategory::from_dgp(lo) <= ComfortCategory::from_dgp(hi));
        }

        #[test]
        fn band_index_counts_crossed_thresholds(dgp in 0.0_f64..=1.0) {
            // The category ordinal must equal the number of thresholds at or
            // below the value, which pins boundaries to the higher band.
            let crossed = [DGP_PERCEPTIBLE, DGP_DISTURBING, DGP_INTOLERABLE]
                .iter()
                .filter(|t| dgp >= **t)
                .count();
            let expected = match crossed {
                0 => ComfortCategory::Imperceptible,
                1 => ComfortCategory::Perceptible,
                2 => ComfortCategory::Disturbing,
                _ => ComfortCategory::Intolerable,
            };
            prop_assert_eq!(ComfortCategory::from_dgp(dgp), expected);
        }
    }
}
