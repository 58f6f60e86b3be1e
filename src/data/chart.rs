//! Chart descriptions built from aggregation and filter output.
//!
//! Nothing here touches egui, so every chart the dashboard draws can be
//! checked in plain unit tests.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::aggregate::SliceCount;
use super::model::{Dataset, LaunchRecord, SiteSelector};

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of the whole pie in `0.0..=1.0`.
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn new(selector: &SiteSelector, counts: &[SliceCount]) -> Self {
        let title = match selector {
            SiteSelector::All => "Total Success Launches by Site".to_string(),
            SiteSelector::Site(site) => format!("Total Success Launches for Site {site}"),
        };

        let total: usize = counts.iter().map(|c| c.count).sum();
        let slices = counts
            .iter()
            .filter(|c| c.count > 0)
            .map(|c| PieSlice {
                label: c.label.to_string(),
                count: c.count,
                fraction: c.count as f64 / total as f64,
            })
            .collect();

        PieChart { title, slices }
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Closed polygon for one pie slice on the unit circle.
///
/// Fractions are measured clockwise from 12 o'clock. The first vertex is the
/// centre; `segments` is the vertex count of a full circle and is scaled down
/// for narrow slices (never below two arc segments).
pub fn wedge_polygon(start_fraction: f64, fraction: f64, segments: usize) -> Vec<[f64; 2]> {
    let arc_segments = ((segments as f64 * fraction).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(arc_segments + 2);
    points.push([0.0, 0.0]);
    for i in 0..=arc_segments {
        let t = start_fraction + fraction * i as f64 / arc_segments as f64;
        let angle = FRAC_PI_2 - t * TAU;
        points.push([angle.cos(), angle.sin()]);
    }
    points
}

// ---------------------------------------------------------------------------
// Scatter: payload vs. outcome, one series per booster category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    /// 0.0 for failure, 1.0 for success.
    pub class: f64,
    pub site: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub booster: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    /// Group filtered records by booster category, in the dataset's booster
    /// order. Categories with no visible record get no series.
    pub fn new(dataset: &Dataset, selector: &SiteSelector, records: &[&LaunchRecord]) -> Self {
        let title = match selector {
            SiteSelector::All => "Correlation between Payload and Success for all Sites".to_string(),
            SiteSelector::Site(site) => {
                format!("Correlation between Payload and Success for Site {site}")
            }
        };

        let series = dataset
            .boosters()
            .iter()
            .filter_map(|booster| {
                let points: Vec<ScatterPoint> = records
                    .iter()
                    .filter(|r| &r.booster_category == booster)
                    .map(|r| ScatterPoint {
                        payload_mass_kg: r.payload_mass_kg,
                        class: r.outcome.as_f64(),
                        site: r.site.clone(),
                    })
                    .collect();
                (!points.is_empty()).then(|| ScatterSeries {
                    booster: booster.clone(),
                    points,
                })
            })
            .collect();

        ScatterChart { title, series }
    }

    /// Number of plotted points across all series.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}
