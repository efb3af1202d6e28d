use crate::color::ColorMap;
use crate::config::SliderConfig;
use crate::data::filter::{
    OutcomeCounts, PayloadRange, SiteSelection, outcome_counts, payload_outcome_points,
};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file has been loaded).
    pub dataset: Option<LaunchDataset>,

    /// Dropdown selection.
    pub site: SiteSelection,

    /// Range slider handles (kg). Kept ordered by [`AppState::set_payload_range`].
    pub payload_low: f64,
    pub payload_high: f64,

    /// Slider bounds and step.
    pub slider: SliderConfig,

    /// Pie chart data for the current site (cached).
    pub outcome_counts: OutcomeCounts,

    /// Indices of records shown in the scatter chart (cached).
    pub visible_indices: Vec<usize>,

    /// Booster category colours.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SliderConfig::default(), SiteSelection::All)
    }
}

impl AppState {
    pub fn new(slider: SliderConfig, site: SiteSelection) -> Self {
        Self {
            dataset: None,
            site,
            payload_low: slider.min,
            payload_high: slider.max,
            slider,
            outcome_counts: OutcomeCounts::default(),
            visible_indices: Vec::new(),
            color_map: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset, reset the slider and colours.
    ///
    /// The slider starts at the dataset's own payload bounds. A selected site
    /// the new dataset does not contain falls back to all sites.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        let (low, high) = dataset
            .payload_bounds
            .unwrap_or((self.slider.min, self.slider.max));
        self.payload_low = low;
        self.payload_high = high;

        if let SiteSelection::Site(s) = &self.site {
            if !dataset.sites.contains(s) {
                log::warn!("Site {s:?} not in dataset, showing all sites");
                self.site = SiteSelection::All;
            }
        }

        self.color_map = Some(ColorMap::new(&dataset.booster_categories));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    pub fn payload_range(&self) -> PayloadRange {
        PayloadRange::new(self.payload_low, self.payload_high)
    }

    /// Dropdown changed: both charts depend on the site.
    pub fn select_site(&mut self, site: SiteSelection) {
        if site == self.site {
            return;
        }
        log::debug!("Site selection changed to {site}");
        self.site = site;
        self.recompute();
    }

    /// Slider moved: only the scatter chart depends on the range.
    /// The handles never cross; `low` wins when they would.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        let high = high.max(low);
        if low == self.payload_low && high == self.payload_high {
            return;
        }
        log::debug!("Payload range changed to [{low}, {high}]");
        self.payload_low = low;
        self.payload_high = high;
        self.refilter();
    }

    /// Recompute both charts.
    pub fn recompute(&mut self) {
        if let Some(ds) = &self.dataset {
            self.outcome_counts = outcome_counts(ds, &self.site);
        }
        self.refilter();
    }

    /// Recompute `visible_indices` after a range or site change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = payload_outcome_points(ds, &self.site, self.payload_range());
        }
    }
}
