use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` flag
// ---------------------------------------------------------------------------

/// Launch outcome decoded from the `class` column (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    /// Decode the numeric flag. Anything other than exactly 0 or 1 is rejected.
    pub fn from_flag(flag: f64) -> Option<Self> {
        if flag == 1.0 {
            Some(Outcome::Success)
        } else if flag == 0.0 {
            Some(Outcome::Failure)
        } else {
            None
        }
    }

    /// The flag value, used as the y coordinate of the scatter plot.
    pub fn class(self) -> f64 {
        match self {
            Outcome::Success => 1.0,
            Outcome::Failure => 0.0,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors raised while validating loaded rows
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("row {row}: payload mass {value} is negative or not finite")]
    InvalidPayload { row: usize, value: f64 },

    #[error("row {row}: outcome flag {value} is not 0 or 1")]
    InvalidOutcome { row: usize, value: f64 },

    #[error("row {row}: empty launch site")]
    MissingSite { row: usize },
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Payload mass in kg, never negative.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

impl LaunchRecord {
    /// Validate one raw row. `row` is only used for error reporting.
    pub fn from_raw(
        row: usize,
        launch_site: String,
        payload_mass_kg: f64,
        class: f64,
        booster_version_category: String,
    ) -> Result<Self, DatasetError> {
        if launch_site.trim().is_empty() {
            return Err(DatasetError::MissingSite { row });
        }
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            return Err(DatasetError::InvalidPayload {
                row,
                value: payload_mass_kg,
            });
        }
        let outcome =
            Outcome::from_flag(class).ok_or(DatasetError::InvalidOutcome { row, value: class })?;

        Ok(LaunchRecord {
            launch_site,
            payload_mass_kg,
            outcome,
            booster_version_category,
        })
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed indices. Immutable after load.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    /// All records, in file order.
    pub records: Vec<LaunchRecord>,
    /// Distinct launch sites in order of first appearance.
    pub sites: Vec<String>,
    /// Distinct booster version categories in order of first appearance.
    pub booster_categories: Vec<String>,
    /// `(min, max)` payload mass, `None` when there are no records.
    pub payload_bounds: Option<(f64, f64)>,
}

impl LaunchDataset {
    /// Build indices from already-validated records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            if !sites.contains(&rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            if !booster_categories.contains(&rec.booster_version_category) {
                booster_categories.push(rec.booster_version_category.clone());
            }
            let m = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                Some((lo, hi)) => (lo.min(m), hi.max(m)),
                None => (m, m),
            });
        }

        LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_bounds,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
