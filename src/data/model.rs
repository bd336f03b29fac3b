use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Canonical schema
// ---------------------------------------------------------------------------

/// Canonical column names, in source order. Raw headers are replaced
/// positionally by these.
pub const CANONICAL_COLUMNS: [&str; 14] = [
    "Flight Number",
    "Date",
    "Time (UTC)",
    "Booster_Version",
    "Launch_Site",
    "Payload",
    "PAYLOAD_MASS__KG_",
    "Orbit",
    "Customer",
    "Mission Outcome",
    "Landing Outcome",
    "class",
    "Lat",
    "Long",
];

pub const LAUNCH_SITE_COLUMN: &str = "Launch_Site";
pub const PAYLOAD_MASS_COLUMN: &str = "PAYLOAD_MASS__KG_";
pub const BOOSTER_VERSION_COLUMN: &str = "Booster_Version";
pub const CLASS_COLUMN: &str = "class";

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
///
/// Field order matches [`CANONICAL_COLUMNS`]; rows are deserialized
/// positionally, so the order here is load-bearing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub flight_number: u32,
    pub date: String,
    pub time_utc: String,
    pub booster_version: String,
    pub launch_site: String,
    pub payload: String,
    /// Kilograms, non-negative.
    pub payload_mass_kg: f64,
    pub orbit: String,
    pub customer: String,
    pub mission_outcome: String,
    pub landing_outcome: String,
    /// Outcome class: 1 = success, 0 = failure.
    pub class: u8,
    pub lat: f64,
    pub long: f64,
}

impl LaunchRecord {
    pub fn is_success(&self) -> bool {
        self.class == 1
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Built once, then only ever borrowed.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchDataset {
    /// All launches, in source order.
    pub records: Vec<LaunchRecord>,
    /// Distinct launch sites in order of first appearance.
    pub sites: Vec<String>,
    pub min_payload: f64,
    pub max_payload: f64,
}

impl LaunchDataset {
    /// Derive the site index and payload bounds from the records.
    /// Returns `None` for an empty record set, whose bounds are undefined.
    pub fn from_records(records: Vec<LaunchRecord>) -> Option<Self> {
        let first = records.first()?;
        let mut min_payload = first.payload_mass_kg;
        let mut max_payload = first.payload_mass_kg;
        let mut sites: Vec<String> = Vec::new();

        for rec in &records {
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
            if !sites.iter().any(|s| s == &rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
        }

        Some(LaunchDataset {
            records,
            sites,
            min_payload,
            max_payload,
        })
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    /// The dataset's observed payload bounds as a range.
    pub fn payload_bounds(&self) -> PayloadRange {
        PayloadRange::new(self.min_payload, self.max_payload)
    }
}

// ---------------------------------------------------------------------------
// SiteSelection
// ---------------------------------------------------------------------------

/// Label of the "every site" sentinel as shown in the dropdown.
pub const ALL_SITES_LABEL: &str = "All Sites";

/// The dropdown value: every site, or one concrete site.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum SiteSelection {
    #[default]
    AllSites,
    Site(String),
}

impl SiteSelection {
    /// Map a dropdown label back to a selection.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_SITES_LABEL {
            SiteSelection::AllSites
        } else {
            SiteSelection::Site(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SiteSelection::AllSites => ALL_SITES_LABEL,
            SiteSelection::Site(s) => s,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// PayloadRange
// ---------------------------------------------------------------------------

/// A payload-mass window in kilograms, `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    /// Build a range from two handle positions, in either order.
    pub fn new(a: f64, b: f64) -> Self {
        PayloadRange {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// Both ends exclusive: a mass equal to `low` or `high` is outside.
    pub fn contains(&self, mass: f64) -> bool {
        mass > self.low && mass < self.high
    }
}
