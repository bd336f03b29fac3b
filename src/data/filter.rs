use serde::Serialize;
use thiserror::Error;

use super::model::{
    CLASS_COLUMN, LAUNCH_SITE_COLUMN, LaunchDataset, LaunchRecord, PayloadRange, SiteSelection,
};

/// A selection that cannot be answered from the loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("unknown launch site '{0}'")]
    UnknownSite(String),
}

// ---------------------------------------------------------------------------
// Grouping dimension
// ---------------------------------------------------------------------------

/// The column a pie chart aggregates its rows by. Serializes as that column's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupField {
    /// One slice per site: "which sites succeed most".
    #[serde(rename = "Launch_Site")]
    LaunchSite,
    /// Success vs. failure: "what is this site's success rate".
    #[serde(rename = "class")]
    OutcomeClass,
}

impl GroupField {
    pub fn column(self) -> &'static str {
        match self {
            GroupField::LaunchSite => LAUNCH_SITE_COLUMN,
            GroupField::OutcomeClass => CLASS_COLUMN,
        }
    }

    /// The slice label a record falls under.
    pub fn key_of(self, rec: &LaunchRecord) -> String {
        match self {
            GroupField::LaunchSite => rec.launch_site.clone(),
            GroupField::OutcomeClass => outcome_label(rec.class).to_string(),
        }
    }
}

pub fn outcome_label(class: u8) -> &'static str {
    if class == 1 {
        "Success"
    } else {
        "Failure"
    }
}

// ---------------------------------------------------------------------------
// Site filter
// ---------------------------------------------------------------------------

/// Rows picked by a site selection together with their grouping dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteRows<'a> {
    pub rows: Vec<&'a LaunchRecord>,
    pub group_field: GroupField,
}

/// Pie-chart view of a site selection.
///
/// * `AllSites` → successful launches only, grouped by site
/// * `Site(s)`  → every launch from `s`, grouped by outcome class
pub fn filter_by_site<'a>(
    dataset: &'a LaunchDataset,
    selection: &SiteSelection,
) -> Result<SiteRows<'a>, SelectionError> {
    match selection {
        SiteSelection::AllSites => Ok(SiteRows {
            rows: dataset.records.iter().filter(|r| r.is_success()).collect(),
            group_field: GroupField::LaunchSite,
        }),
        SiteSelection::Site(_) => Ok(SiteRows {
            rows: site_scope(dataset, selection)?,
            group_field: GroupField::OutcomeClass,
        }),
    }
}

/// Every launch in scope of a selection, successes and failures alike.
pub fn site_scope<'a>(
    dataset: &'a LaunchDataset,
    selection: &SiteSelection,
) -> Result<Vec<&'a LaunchRecord>, SelectionError> {
    match selection {
        SiteSelection::AllSites => Ok(dataset.records.iter().collect()),
        SiteSelection::Site(site) => {
            if !dataset.has_site(site) {
                return Err(SelectionError::UnknownSite(site.clone()));
            }
            Ok(dataset
                .records
                .iter()
                .filter(|r| &r.launch_site == site)
                .collect())
        }
    }
}

// ---------------------------------------------------------------------------
// Payload range filter
// ---------------------------------------------------------------------------

/// Keep rows whose payload mass lies strictly between the range ends.
pub fn filter_by_payload<'a>(
    rows: &[&'a LaunchRecord],
    range: &PayloadRange,
) -> Vec<&'a LaunchRecord> {
    rows.iter()
        .copied()
        .filter(|r| range.contains(r.payload_mass_kg))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn two_site_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("A", 1, 500.0, "v1.0"),
            record("A", 1, 1000.0, "v1.1"),
            record("B", 0, 1500.0, "FT"),
            record("A", 0, 2000.0, "FT"),
            record("B", 1, 2500.0, "B4"),
            record("A", 1, 3000.0, "B5"),
            record("B", 0, 3500.0, "B5"),
            record("B", 1, 4000.0, "B5"),
        ])
        .unwrap()
    }

    #[test]
    fn all_sites_keeps_only_successes() {
        let ds = two_site_dataset();
        let picked = filter_by_site(&ds, &SiteSelection::AllSites).unwrap();

        assert_eq!(picked.group_field, GroupField::LaunchSite);
        assert_eq!(picked.rows.len(), 5);
        assert!(picked.rows.iter().all(|r| r.class == 1));
        let successes: Vec<&LaunchRecord> = ds.records.iter().filter(|r| r.class == 1).collect();
        assert_eq!(picked.rows, successes);
    }

    #[test]
    fn single_site_keeps_successes_and_failures_from_that_site_only() {
        let ds = two_site_dataset();
        let picked = filter_by_site(&ds, &SiteSelection::Site("A".into())).unwrap();

        assert_eq!(picked.group_field, GroupField::OutcomeClass);
        assert_eq!(picked.rows.len(), 4);
        assert!(picked.rows.iter().all(|r| r.launch_site == "A"));
        assert_eq!(picked.rows.iter().filter(|r| r.class == 0).count(), 1);
    }

    #[test]
    fn unknown_site_is_rejected() {
        let ds = two_site_dataset();
        let err = filter_by_site(&ds, &SiteSelection::Site("Boca Chica".into())).unwrap_err();
        assert_eq!(err, SelectionError::UnknownSite("Boca Chica".into()));
        assert!(site_scope(&ds, &SiteSelection::Site("Boca Chica".into())).is_err());
    }

    #[test]
    fn payload_bounds_are_exclusive() {
        let ds = LaunchDataset::from_records(vec![
            record("A", 1, 500.0, "FT"),
            record("A", 1, 1000.0, "FT"),
            record("A", 1, 1500.0, "FT"),
            record("A", 1, 2000.0, "FT"),
        ])
        .unwrap();
        let all = site_scope(&ds, &SiteSelection::AllSites).unwrap();

        let kept = filter_by_payload(&all, &PayloadRange::new(1000.0, 2000.0));

        let masses: Vec<f64> = kept.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(masses, vec![1500.0]);
    }

    #[test]
    fn widening_the_range_never_drops_rows() {
        let ds = two_site_dataset();
        let all = site_scope(&ds, &SiteSelection::AllSites).unwrap();
        let windows = [
            (2000.0, 2500.0),
            (1500.0, 3000.0),
            (1000.0, 3000.0),
            (0.0, 4000.0),
            (0.0, 10000.0),
        ];

        let mut previous: Vec<&LaunchRecord> = Vec::new();
        for (low, high) in windows {
            let kept = filter_by_payload(&all, &PayloadRange::new(low, high));
            for r in &previous {
                assert!(kept.contains(r), "{low}..{high} dropped {}", r.payload_mass_kg);
            }
            previous = kept;
        }
        assert_eq!(previous.len(), ds.len());
    }

    #[test]
    fn empty_window_yields_no_rows() {
        let ds = two_site_dataset();
        let all = site_scope(&ds, &SiteSelection::AllSites).unwrap();
        assert!(filter_by_payload(&all, &PayloadRange::new(1000.0, 1000.0)).is_empty());
    }

    #[test]
    fn filters_are_idempotent() {
        let ds = two_site_dataset();
        let sel = SiteSelection::Site("B".into());
        assert_eq!(filter_by_site(&ds, &sel), filter_by_site(&ds, &sel));

        let all = site_scope(&ds, &SiteSelection::AllSites).unwrap();
        let range = PayloadRange::new(900.0, 3100.0);
        assert_eq!(filter_by_payload(&all, &range), filter_by_payload(&all, &range));
    }
}
