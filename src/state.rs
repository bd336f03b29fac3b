use crate::color::ColorMap;
use crate::data::chart::{PieChartSpec, ScatterChartSpec, pie_chart_data, scatter_chart_data};
use crate::data::model::{
    ALL_SITES_LABEL, BOOSTER_VERSION_COLUMN, LaunchDataset, PayloadRange, SiteSelection,
};

// ---------------------------------------------------------------------------
// Payload slider configuration
// ---------------------------------------------------------------------------

pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
pub const PAYLOAD_SLIDER_STEP: f64 = 1_000.0;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Inputs change only through the setters below, which recompute exactly
/// the charts that depend on them: the pie on the site, the scatter on the
/// site and the payload range.
pub struct DashboardState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<LaunchDataset>,

    site: SiteSelection,
    payload_range: PayloadRange,

    /// Cached chart data for the current inputs.
    pub pie: Option<PieChartSpec>,
    pub scatter: Option<ScatterChartSpec>,

    /// Booster-version colours for the scatter plot.
    pub booster_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            dataset: None,
            site: SiteSelection::AllSites,
            payload_range: PayloadRange::new(PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_MAX),
            pie: None,
            scatter: None,
            booster_colors: None,
            status_message: None,
        }
    }
}

impl DashboardState {
    /// Ingest a newly loaded dataset and reset the inputs to their defaults.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.site = SiteSelection::AllSites;
        self.payload_range = dataset.payload_bounds();
        self.booster_colors = Some(ColorMap::new(
            BOOSTER_VERSION_COLUMN,
            dataset.records.iter().map(|r| r.booster_version.as_str()),
        ));
        self.dataset = Some(dataset);
        self.status_message = None;

        self.recompute_pie();
        self.recompute_scatter();
    }

    pub fn site(&self) -> &SiteSelection {
        &self.site
    }

    pub fn payload_range(&self) -> PayloadRange {
        self.payload_range
    }

    /// Dropdown entries: the sentinel first, then sites in dataset order.
    pub fn site_options(&self) -> Vec<String> {
        let mut options = vec![ALL_SITES_LABEL.to_string()];
        if let Some(ds) = &self.dataset {
            options.extend(ds.sites.iter().cloned());
        }
        options
    }

    /// Dropdown changed: both charts depend on the site.
    pub fn select_site(&mut self, site: SiteSelection) {
        if site == self.site {
            return;
        }
        log::debug!("Site selection → {site}");
        self.site = site;
        self.recompute_pie();
        self.recompute_scatter();
    }

    /// Slider moved: only the scatter chart depends on the payload range.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if range == self.payload_range {
            return;
        }
        self.payload_range = range;
        self.recompute_scatter();
    }

    /// Apply a slider edit; `None` means that handle did not move.
    ///
    /// The moved handle pushes the other one along rather than crossing it.
    pub fn move_payload_handles(&mut self, low: Option<f64>, high: Option<f64>) {
        let current = self.payload_range;
        let range = match (low, high) {
            (None, None) => return,
            (Some(l), None) => PayloadRange::new(l, current.high.max(l)),
            (None, Some(h)) => PayloadRange::new(current.low.min(h), h),
            (Some(l), Some(h)) => PayloadRange::new(l, h),
        };
        self.set_payload_range(range);
    }

    /// Rows visible in the scatter chart.
    pub fn visible_count(&self) -> usize {
        self.scatter.as_ref().map_or(0, |s| s.rows.len())
    }

    fn recompute_pie(&mut self) {
        self.pie = self
            .dataset
            .as_ref()
            .map(|ds| pie_chart_data(ds, &self.site));
    }

    fn recompute_scatter(&mut self) {
        self.scatter = self
            .dataset
            .as_ref()
            .map(|ds| scatter_chart_data(ds, &self.site, &self.payload_range));
    }
}
