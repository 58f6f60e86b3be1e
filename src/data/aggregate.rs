use std::collections::BTreeMap;
use std::fmt;

use super::model::{Dataset, OutcomeClass, SiteSelector};

/// What a pie slice counts: launches at a site, or launches with an outcome.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SliceLabel {
    Site(String),
    Outcome(OutcomeClass),
}

impl fmt::Display for SliceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceLabel::Site(s) => write!(f, "{s}"),
            SliceLabel::Outcome(o) => write!(f, "{o}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceCount {
    pub label: SliceLabel,
    pub count: usize,
}

/// Count launches for the pie chart.
///
/// * `All` – successful launches per site, sorted by site name. A site with
///   no success has no group and is left out.
/// * `Site(s)` – every launch at `s` split by outcome, failures first.
///   Empty when `s` is not in the dataset.
pub fn aggregate_successes(dataset: &Dataset, selector: &SiteSelector) -> Vec<SliceCount> {
    match selector {
        SiteSelector::All => {
            let mut by_site: BTreeMap<&str, usize> = BTreeMap::new();
            for rec in dataset.records().iter().filter(|r| r.is_success()) {
                *by_site.entry(rec.site.as_str()).or_default() += 1;
            }
            by_site
                .into_iter()
                .map(|(site, count)| SliceCount {
                    label: SliceLabel::Site(site.to_string()),
                    count,
                })
                .collect()
        }
        SiteSelector::Site(site) => {
            let mut by_outcome: BTreeMap<OutcomeClass, usize> = BTreeMap::new();
            for rec in dataset.records().iter().filter(|r| &r.site == site) {
                *by_outcome.entry(rec.outcome).or_default() += 1;
            }
            by_outcome
                .into_iter()
                .map(|(outcome, count)| SliceCount {
                    label: SliceLabel::Outcome(outcome),
                    count,
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::small_dataset;
    use crate::data::model::LaunchRecord;

    fn pairs(slices: &[SliceCount]) -> Vec<(String, usize)> {
        slices
            .iter()
            .map(|s| (s.label.to_string(), s.count))
            .collect()
    }

    fn mixed_dataset() -> Dataset {
        Dataset::from_records(vec![
            LaunchRecord::new("VAFB SLC-4E", 500.0, "FT", OutcomeClass::Success),
            LaunchRecord::new("CCAFS LC-40", 600.0, "v1.0", OutcomeClass::Failure),
            LaunchRecord::new("CCAFS LC-40", 700.0, "v1.1", OutcomeClass::Failure),
            LaunchRecord::new("KSC LC-39A", 800.0, "FT", OutcomeClass::Success),
            LaunchRecord::new("CCAFS SLC-40", 900.0, "B4", OutcomeClass::Failure),
            LaunchRecord::new("KSC LC-39A", 5300.0, "B5", OutcomeClass::Success),
            LaunchRecord::new("CCAFS LC-40", 3100.0, "FT", OutcomeClass::Success),
        ])
        .unwrap()
    }

    #[test]
    fn test_all_sites_example() {
        let ds = small_dataset();
        let out = aggregate_successes(&ds, &SiteSelector::All);
        assert_eq!(
            pairs(&out),
            vec![("CCAFS".to_string(), 1), ("KSC".to_string(), 1)]
        );
    }

    #[test]
    fn test_all_sites_sorted_and_zero_success_omitted() {
        let ds = mixed_dataset();
        let out = aggregate_successes(&ds, &SiteSelector::All);
        assert_eq!(
            pairs(&out),
            vec![
                ("CCAFS LC-40".to_string(), 1),
                ("KSC LC-39A".to_string(), 2),
                ("VAFB SLC-4E".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_all_sites_sum_equals_success_count() {
        let ds = mixed_dataset();
        let total: usize = aggregate_successes(&ds, &SiteSelector::All)
            .iter()
            .map(|s| s.count)
            .sum();
        let successes = ds.records().iter().filter(|r| r.is_success()).count();
        assert_eq!(total, successes);
    }

    #[test]
    fn test_single_site_split_by_outcome() {
        let ds = mixed_dataset();
        let sel = SiteSelector::Site("CCAFS LC-40".to_string());
        let out = aggregate_successes(&ds, &sel);
        assert_eq!(
            out,
            vec![
                SliceCount {
                    label: SliceLabel::Outcome(OutcomeClass::Failure),
                    count: 2
                },
                SliceCount {
                    label: SliceLabel::Outcome(OutcomeClass::Success),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_single_site_sum_equals_site_total() {
        let ds = mixed_dataset();
        for site in ds.sites() {
            let sel = SiteSelector::Site(site.clone());
            let total: usize = aggregate_successes(&ds, &sel).iter().map(|s| s.count).sum();
            let expected = ds.records().iter().filter(|r| &r.site == site).count();
            assert_eq!(total, expected, "site {site}");
        }
    }

    #[test]
    fn test_single_site_only_failures() {
        let ds = mixed_dataset();
        let sel = SiteSelector::Site("CCAFS SLC-40".to_string());
        let out = aggregate_successes(&ds, &sel);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].label, SliceLabel::Outcome(OutcomeClass::Failure));
    }

    #[test]
    fn test_unknown_site_is_empty() {
        let ds = mixed_dataset();
        let sel = SiteSelector::Site("Baikonur".to_string());
        assert!(aggregate_successes(&ds, &sel).is_empty());
    }

    #[test]
    fn test_aggregate_idempotent() {
        let ds = mixed_dataset();
        let a = aggregate_successes(&ds, &SiteSelector::All);
        let b = aggregate_successes(&ds, &SiteSelector::All);
        assert_eq!(a, b);
    }
}
