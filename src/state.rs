use crate::color::ColorMap;
use crate::config::PayloadConfig;
use crate::data::aggregate::aggregate_successes;
use crate::data::chart::{PieChart, ScatterChart};
use crate::data::filter::{filter_records, PayloadRange};
use crate::data::model::{Dataset, SiteSelector};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Each control change goes through one method here, which recomputes the
/// affected chart eagerly; rendering only reads the cached charts.
pub struct AppState {
    /// Loaded once at startup, never replaced.
    pub dataset: Dataset,

    /// Current dropdown value.
    pub site: SiteSelector,

    /// Current payload slider bounds.
    pub payload: PayloadRange,

    /// Right end of the payload sliders.
    pub slider_max_kg: f64,

    pub step_kg: f64,

    /// Cached pie chart for the current site.
    pub pie: PieChart,

    /// Cached scatter chart for the current site and payload range.
    pub scatter: ScatterChart,

    pub site_colors: ColorMap,
    pub booster_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Start with all sites selected and the payload range spanning the data.
    pub fn new(dataset: Dataset, payload_config: &PayloadConfig) -> Self {
        let site = SiteSelector::All;
        let payload = PayloadRange::full(&dataset);
        let slider_max_kg = payload_config
            .slider_max_kg
            .max(dataset.max_payload())
            .min(dataset.payload_ceiling());

        let pie = PieChart::new(&site, &aggregate_successes(&dataset, &site));
        let scatter = ScatterChart::new(
            &dataset,
            &site,
            &filter_records(&dataset, &payload, &site),
        );

        // Colours follow the sorted slice order of the all-sites pie.
        let mut site_labels: Vec<String> = dataset.sites().to_vec();
        site_labels.sort_unstable();
        let site_colors = ColorMap::new(&site_labels);
        let booster_colors = ColorMap::new(dataset.boosters());

        Self {
            site_colors,
            booster_colors,
            dataset,
            site,
            payload,
            slider_max_kg,
            step_kg: payload_config.step_kg,
            pie,
            scatter,
            status_message: None,
        }
    }

    /// Apply a dropdown value (`"ALL"` or a site name) and refresh both charts.
    ///
    /// An unknown site leaves the state untouched and is reported in the
    /// status line.
    pub fn select_site(&mut self, value: &str) -> Result<()> {
        match self.dataset.selector(value) {
            Ok(site) => {
                self.site = site;
                self.status_message = None;
                self.refresh_pie();
                self.refresh_scatter();
                Ok(())
            }
            Err(e) => {
                log::warn!("Rejected site selection: {e}");
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Apply new payload slider bounds and refresh the scatter chart.
    ///
    /// Invalid bounds keep the previous range and chart.
    pub fn set_payload_bounds(&mut self, min: f64, max: f64) -> Result<()> {
        match PayloadRange::new(min, max, self.dataset.payload_ceiling()) {
            Ok(range) => {
                self.payload = range;
                self.status_message = None;
                self.refresh_scatter();
                Ok(())
            }
            Err(e) => {
                log::warn!("Rejected payload range: {e}");
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    fn refresh_pie(&mut self) {
        let counts = aggregate_successes(&self.dataset, &self.site);
        self.pie = PieChart::new(&self.site, &counts);
        log::debug!("Pie for {}: {} slices", self.site, self.pie.slices.len());
    }

    fn refresh_scatter(&mut self) {
        let records = filter_records(&self.dataset, &self.payload, &self.site);
        self.scatter = ScatterChart::new(&self.dataset, &self.site, &records);
        log::debug!(
            "Scatter for {} in [{}, {}] kg: {} points",
            self.site,
            self.payload.min(),
            self.payload.max(),
            records.len()
        );
    }

    /// Number of launches currently drawn on the scatter chart.
    pub fn visible_count(&self) -> usize {
        self.scatter.point_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::small_dataset;
    use crate::error::DashError;

    fn state() -> AppState {
        AppState::new(small_dataset(), &PayloadConfig::default())
    }

    #[test]
    fn test_initial_state_shows_everything() {
        let st = state();
        assert_eq!(st.site, SiteSelector::All);
        assert_eq!(st.payload.min(), 500.0);
        assert_eq!(st.payload.max(), 2000.0);
        assert_eq!(st.visible_count(), 3);
        assert_eq!(st.pie.total(), 2);
        assert_eq!(st.slider_max_kg, 10_000.0);
        assert!(st.status_message.is_none());
    }

    #[test]
    fn test_select_site_refreshes_charts() {
        let mut st = state();
        st.select_site("CCAFS").unwrap();
        assert_eq!(st.site, SiteSelector::Site("CCAFS".to_string()));
        assert_eq!(st.pie.title, "Total Success Launches for Site CCAFS");
        assert_eq!(st.pie.total(), 2);
        assert_eq!(st.visible_count(), 2);

        st.select_site("ALL").unwrap();
        assert_eq!(st.visible_count(), 3);
    }

    #[test]
    fn test_unknown_site_keeps_previous_selection() {
        let mut st = state();
        st.select_site("KSC").unwrap();
        let err = st.select_site("Baikonur").unwrap_err();
        assert!(matches!(err, DashError::UnknownSite(_)));
        assert_eq!(st.site, SiteSelector::Site("KSC".to_string()));
        assert!(st.status_message.as_deref().unwrap().contains("Baikonur"));
    }

    #[test]
    fn test_payload_bounds_filter_scatter_only() {
        let mut st = state();
        let pie_before = st.pie.clone();
        st.set_payload_bounds(0.0, 1000.0).unwrap();
        assert_eq!(st.visible_count(), 2);
        assert_eq!(st.pie, pie_before);
    }

    #[test]
    fn test_inverted_payload_bounds_rejected() {
        let mut st = state();
        st.set_payload_bounds(0.0, 1000.0).unwrap();
        let err = st.set_payload_bounds(3000.0, 1000.0).unwrap_err();
        assert!(matches!(err, DashError::InvalidRange { .. }));
        assert_eq!(st.payload.max(), 1000.0);
        assert_eq!(st.visible_count(), 2);
        assert!(st.status_message.is_some());

        // a valid change clears the message
        st.set_payload_bounds(0.0, 2000.0).unwrap();
        assert!(st.status_message.is_none());
    }

    #[test]
    fn test_slider_max_clamped_to_ceiling() {
        let config = PayloadConfig {
            slider_max_kg: 50_000.0,
            step_kg: 1000.0,
        };
        let st = AppState::new(small_dataset(), &config);
        assert_eq!(st.slider_max_kg, st.dataset.payload_ceiling());
    }
}
