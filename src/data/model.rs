use std::collections::HashSet;
use std::fmt;

use anyhow::{bail, Result};

use crate::error::DashError;

/// Lower bound for the upper end of any payload filter, in kilograms.
/// Raised to the heaviest payload when the dataset exceeds it.
pub const MAX_POSSIBLE_PAYLOAD_KG: f64 = 10_000.0;

/// Wire form of the "all sites" selector. Not accepted as a site name.
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// OutcomeClass – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch result. Declaration order gives `Failure < Success`, which is also
/// the order slices appear in per-site aggregations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutcomeClass {
    Failure,
    Success,
}

impl OutcomeClass {
    /// Numeric value as stored in the `class` column.
    pub fn as_i64(self) -> i64 {
        match self {
            OutcomeClass::Failure => 0,
            OutcomeClass::Success => 1,
        }
    }

    /// Y coordinate on the scatter chart.
    pub fn as_f64(self) -> f64 {
        self.as_i64() as f64
    }
}

impl TryFrom<i64> for OutcomeClass {
    type Error = String;

    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(OutcomeClass::Failure),
            1 => Ok(OutcomeClass::Success),
            other => Err(format!("class must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeClass::Failure => write!(f, "Failure (0)"),
            OutcomeClass::Success => write!(f, "Success (1)"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// `Launch Site` column.
    pub site: String,
    /// `Payload Mass (kg)` column.
    pub payload_mass_kg: f64,
    /// `Booster Version Category` column.
    pub booster_category: String,
    /// `class` column.
    pub outcome: OutcomeClass,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        booster_category: impl Into<String>,
        outcome: OutcomeClass,
    ) -> Self {
        Self {
            site: site.into(),
            payload_mass_kg,
            booster_category: booster_category.into(),
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == OutcomeClass::Success
    }
}

// ---------------------------------------------------------------------------
// SiteSelector – dropdown value
// ---------------------------------------------------------------------------

/// Either every site or one named site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl SiteSelector {
    /// Whether a record at `site` passes this selector.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelector::All => true,
            SiteSelector::Site(s) => s == site,
        }
    }

    /// Text shown in the dropdown.
    pub fn label(&self) -> &str {
        match self {
            SiteSelector::All => "All Sites",
            SiteSelector::Site(s) => s,
        }
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelector::All => write!(f, "{ALL_SITES}"),
            SiteSelector::Site(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded launch table with values derived once at construction.
///
/// There are no mutating methods; the app owns one instance for its whole
/// lifetime and every query borrows it.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
    sites: Vec<String>,
    boosters: Vec<String>,
    min_payload: f64,
    max_payload: f64,
    payload_ceiling: f64,
}

impl Dataset {
    /// Validate rows and build the lookup values.
    ///
    /// Sites and booster categories keep first-appearance order.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self> {
        if records.is_empty() {
            bail!("dataset contains no launch records");
        }

        let mut sites = Vec::new();
        let mut boosters = Vec::new();
        let mut seen_sites = HashSet::new();
        let mut seen_boosters = HashSet::new();
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;

        for (row, rec) in records.iter().enumerate() {
            if rec.site.trim().is_empty() {
                bail!("row {row}: empty launch site");
            }
            if rec.site == ALL_SITES {
                bail!("row {row}: '{ALL_SITES}' is reserved for the all-sites selector");
            }
            if !rec.payload_mass_kg.is_finite() || rec.payload_mass_kg < 0.0 {
                bail!(
                    "row {row}: payload mass must be a non-negative number, got {}",
                    rec.payload_mass_kg
                );
            }
            if seen_sites.insert(rec.site.as_str()) {
                sites.push(rec.site.clone());
            }
            if seen_boosters.insert(rec.booster_category.as_str()) {
                boosters.push(rec.booster_category.clone());
            }
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
        }

        Ok(Dataset {
            sites,
            boosters,
            min_payload,
            max_payload,
            payload_ceiling: max_payload.max(MAX_POSSIBLE_PAYLOAD_KG),
            records,
        })
    }

    /// Parse a dropdown value: `"ALL"` or the exact name of a known site.
    pub fn selector(&self, value: &str) -> crate::error::Result<SiteSelector> {
        if value == ALL_SITES {
            return Ok(SiteSelector::All);
        }
        if self.sites.iter().any(|s| s == value) {
            Ok(SiteSelector::Site(value.to_string()))
        } else {
            Err(DashError::UnknownSite(value.to_string()))
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Distinct sites in first-appearance order.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Distinct booster categories in first-appearance order.
    pub fn boosters(&self) -> &[String] {
        &self.boosters
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    /// Largest value accepted as the upper bound of a payload filter.
    pub fn payload_ceiling(&self) -> f64 {
        self.payload_ceiling
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// The three-row example used across the data-layer tests.
    pub(crate) fn small_dataset() -> Dataset {
        Dataset::from_records(vec![
            LaunchRecord::new("CCAFS", 500.0, "v1.0", OutcomeClass::Success),
            LaunchRecord::new("CCAFS", 1000.0, "v1.1", OutcomeClass::Failure),
            LaunchRecord::new("KSC", 2000.0, "FT", OutcomeClass::Success),
        ])
        .unwrap()
    }

    #[test]
    fn test_outcome_class_try_from() {
        assert_eq!(OutcomeClass::try_from(0i64), Ok(OutcomeClass::Failure));
        assert_eq!(OutcomeClass::try_from(1i64), Ok(OutcomeClass::Success));
        assert!(OutcomeClass::try_from(2i64).is_err());
        assert!(OutcomeClass::try_from(-1i64).is_err());
    }

    #[test]
    fn test_outcome_ordering_failure_first() {
        assert!(OutcomeClass::Failure < OutcomeClass::Success);
    }

    #[test]
    fn test_derived_values() {
        let ds = small_dataset();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.min_payload(), 500.0);
        assert_eq!(ds.max_payload(), 2000.0);
        assert_eq!(ds.sites(), ["CCAFS", "KSC"]);
        assert_eq!(ds.boosters(), ["v1.0", "v1.1", "FT"]);
        assert_eq!(ds.payload_ceiling(), MAX_POSSIBLE_PAYLOAD_KG);
    }

    #[test]
    fn test_every_payload_within_min_max() {
        let ds = small_dataset();
        for rec in ds.records() {
            assert!(ds.min_payload() <= rec.payload_mass_kg);
            assert!(rec.payload_mass_kg <= ds.max_payload());
        }
    }

    #[test]
    fn test_sites_keep_first_appearance_order() {
        let ds = Dataset::from_records(vec![
            LaunchRecord::new("VAFB SLC-4E", 100.0, "FT", OutcomeClass::Success),
            LaunchRecord::new("CCAFS LC-40", 200.0, "FT", OutcomeClass::Success),
            LaunchRecord::new("VAFB SLC-4E", 300.0, "FT", OutcomeClass::Failure),
        ])
        .unwrap();
        assert_eq!(ds.sites(), ["VAFB SLC-4E", "CCAFS LC-40"]);
    }

    #[test]
    fn test_ceiling_raised_for_heavy_payloads() {
        let ds = Dataset::from_records(vec![LaunchRecord::new(
            "KSC",
            15_600.0,
            "B5",
            OutcomeClass::Success,
        )])
        .unwrap();
        assert_eq!(ds.payload_ceiling(), 15_600.0);
    }

    #[test]
    fn test_empty_dataset_rejected() {
        assert!(Dataset::from_records(Vec::new()).is_err());
    }

    #[test]
    fn test_negative_payload_rejected() {
        let err = Dataset::from_records(vec![LaunchRecord::new(
            "KSC",
            -1.0,
            "FT",
            OutcomeClass::Success,
        )])
        .unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_nan_payload_rejected() {
        let res = Dataset::from_records(vec![LaunchRecord::new(
            "KSC",
            f64::NAN,
            "FT",
            OutcomeClass::Success,
        )]);
        assert!(res.is_err());
    }

    #[test]
    fn test_empty_site_rejected() {
        let res = Dataset::from_records(vec![LaunchRecord::new(
            "  ",
            10.0,
            "FT",
            OutcomeClass::Success,
        )]);
        assert!(res.is_err());
    }

    #[test]
    fn test_site_named_all_rejected() {
        let err = Dataset::from_records(vec![
            LaunchRecord::new("KSC", 10.0, "FT", OutcomeClass::Success),
            LaunchRecord::new(ALL_SITES, 20.0, "FT", OutcomeClass::Failure),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("reserved"), "got: {err}");

        // Other spellings are ordinary site names.
        let ds = Dataset::from_records(vec![LaunchRecord::new(
            "All",
            10.0,
            "FT",
            OutcomeClass::Success,
        )])
        .unwrap();
        assert_eq!(
            ds.selector("All").unwrap(),
            SiteSelector::Site("All".to_string())
        );
    }

    #[test]
    fn test_selector_parsing() {
        let ds = small_dataset();
        assert_eq!(ds.selector("ALL").unwrap(), SiteSelector::All);
        assert_eq!(
            ds.selector("KSC").unwrap(),
            SiteSelector::Site("KSC".to_string())
        );
        match ds.selector("Baikonur") {
            Err(DashError::UnknownSite(s)) => assert_eq!(s, "Baikonur"),
            other => panic!("expected UnknownSite, got {other:?}"),
        }
    }

    #[test]
    fn test_selector_matches_and_display() {
        let all = SiteSelector::All;
        let ksc = SiteSelector::Site("KSC".to_string());
        assert!(all.matches("anything"));
        assert!(ksc.matches("KSC"));
        assert!(!ksc.matches("CCAFS"));
        assert_eq!(all.to_string(), "ALL");
        assert_eq!(all.label(), "All Sites");
        assert_eq!(ksc.label(), "KSC");
    }
}
