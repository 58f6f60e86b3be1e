use super::model::{Dataset, LaunchRecord, SiteSelector};
use crate::error::{DashError, Result};

// ---------------------------------------------------------------------------
// Payload range: validated slider bounds
// ---------------------------------------------------------------------------

/// Inclusive payload interval in kilograms.
///
/// Only constructible through [`PayloadRange::new`], so holding one means
/// `0 <= min <= max <= ceiling` was checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    min: f64,
    max: f64,
}

impl PayloadRange {
    pub fn new(min: f64, max: f64, ceiling: f64) -> Result<Self> {
        let valid = min.is_finite()
            && max.is_finite()
            && min >= 0.0
            && min <= max
            && max <= ceiling;
        if !valid {
            return Err(DashError::InvalidRange { min, max, ceiling });
        }
        Ok(Self { min, max })
    }

    /// The range spanning every record in the dataset.
    pub fn full(dataset: &Dataset) -> Self {
        Self {
            min: dataset.min_payload(),
            max: dataset.max_payload(),
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.min <= payload_mass_kg && payload_mass_kg <= self.max
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Records with payload in `[min, max]` at the selected site(s), in dataset
/// order.
///
/// Fails with [`DashError::InvalidRange`] unless
/// `0 <= min <= max <= dataset.payload_ceiling()`.
pub fn filter_by_payload<'a>(
    dataset: &'a Dataset,
    min: f64,
    max: f64,
    selector: &SiteSelector,
) -> Result<Vec<&'a LaunchRecord>> {
    let range = PayloadRange::new(min, max, dataset.payload_ceiling())?;
    Ok(filter_records(dataset, &range, selector))
}

/// Same as [`filter_by_payload`] for an already validated range.
/// A site not present in the dataset yields an empty result.
pub fn filter_records<'a>(
    dataset: &'a Dataset,
    range: &PayloadRange,
    selector: &SiteSelector,
) -> Vec<&'a LaunchRecord> {
    dataset
        .records()
        .iter()
        .filter(|rec| range.contains(rec.payload_mass_kg) && selector.matches(&rec.site))
        .collect()
}
