use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::{GroupField, filter_by_payload, filter_by_site, site_scope};
use super::model::{
    BOOSTER_VERSION_COLUMN, CLASS_COLUMN, LaunchDataset, LaunchRecord, PAYLOAD_MASS_COLUMN,
    PayloadRange, SiteSelection,
};

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// One wedge of the pie: a group label and how many rows fall under it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChartSpec {
    pub title: String,
    pub group_field: GroupField,
    pub rows: Vec<LaunchRecord>,
    /// Largest slice first; ties broken by label.
    pub slices: Vec<PieSlice>,
}

impl PieChartSpec {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }
}

/// Success counts for the pie chart. Only the site selection matters here.
///
/// An unknown site yields an empty chart rather than an error.
pub fn pie_chart_data(dataset: &LaunchDataset, selection: &SiteSelection) -> PieChartSpec {
    let title = match selection {
        SiteSelection::AllSites => "Total Success Launches By all sites".to_string(),
        SiteSelection::Site(site) => format!("Total Success Launches for site {site}"),
    };

    let (rows, group_field) = match filter_by_site(dataset, selection) {
        Ok(picked) => (picked.rows, picked.group_field),
        Err(e) => {
            log::warn!("Pie chart: {e}; rendering empty chart");
            let field = match selection {
                SiteSelection::AllSites => GroupField::LaunchSite,
                SiteSelection::Site(_) => GroupField::OutcomeClass,
            };
            (Vec::new(), field)
        }
    };

    let slices = aggregate(&rows, group_field);
    log::debug!(
        "Pie chart for {selection}: {} rows in {} slices",
        rows.len(),
        slices.len()
    );

    PieChartSpec {
        title,
        group_field,
        rows: rows.into_iter().cloned().collect(),
        slices,
    }
}

fn aggregate(rows: &[&LaunchRecord], field: GroupField) -> Vec<PieSlice> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for rec in rows {
        *counts.entry(field.key_of(rec)).or_default() += 1;
    }
    let mut slices: Vec<PieSlice> = counts
        .into_iter()
        .map(|(label, count)| PieSlice { label, count })
        .collect();
    // BTreeMap already ordered by label, so a stable sort keeps ties sorted.
    slices.sort_by(|a, b| b.count.cmp(&a.count));
    slices
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Column-to-channel mapping of the scatter plot. Fixed for every selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScatterEncoding {
    pub x: &'static str,
    pub y: &'static str,
    pub color: &'static str,
    pub size: &'static str,
    pub hover: &'static str,
}

pub const SCATTER_ENCODING: ScatterEncoding = ScatterEncoding {
    x: PAYLOAD_MASS_COLUMN,
    y: CLASS_COLUMN,
    color: BOOSTER_VERSION_COLUMN,
    size: PAYLOAD_MASS_COLUMN,
    hover: PAYLOAD_MASS_COLUMN,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChartSpec {
    pub title: String,
    pub encoding: ScatterEncoding,
    pub rows: Vec<LaunchRecord>,
}

/// Payload-vs-outcome points for the selected sites inside the payload window.
///
/// Unlike the pie chart, "All Sites" keeps failures too.
pub fn scatter_chart_data(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    range: &PayloadRange,
) -> ScatterChartSpec {
    let title = match selection {
        SiteSelection::AllSites => "Correlation between Payload and Success for all Sites".to_string(),
        SiteSelection::Site(site) => {
            format!("Correlation between Payload and Success for site {site}")
        }
    };

    let scoped = site_scope(dataset, selection).unwrap_or_else(|e| {
        log::warn!("Scatter chart: {e}; rendering empty chart");
        Vec::new()
    });
    let rows = filter_by_payload(&scoped, range);
    log::debug!(
        "Scatter chart for {selection} in ({}, {}) kg: {} of {} rows",
        range.low,
        range.high,
        rows.len(),
        scoped.len()
    );

    ScatterChartSpec {
        title,
        encoding: SCATTER_ENCODING,
        rows: rows.into_iter().cloned().collect(),
    }
}
