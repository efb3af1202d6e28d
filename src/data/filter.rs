use std::fmt;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Site selection: the dropdown value
// ---------------------------------------------------------------------------

/// Either every site or one concrete launch site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Dropdown value of the "all sites" entry.
    pub const ALL_VALUE: &'static str = "ALL";

    /// Whether `record` belongs to the selection.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.launch_site == *site,
        }
    }

    /// Parse a dropdown value; `ALL` maps to [`SiteSelection::All`].
    pub fn from_value(value: &str) -> Self {
        if value == Self::ALL_VALUE {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "All Sites"),
            SiteSelection::Site(site) => write!(f, "{site}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload range: the slider value
// ---------------------------------------------------------------------------

/// Closed payload interval `[low, high]` in kg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    /// Build a range, swapping the ends if they arrive reversed.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            PayloadRange { low: a, high: b }
        } else {
            PayloadRange { low: b, high: a }
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }
}

// ---------------------------------------------------------------------------
// Success / failure aggregation (pie chart)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutcomeCounts {
    pub success: usize,
    pub failure: usize,
}

impl OutcomeCounts {
    pub fn total(&self) -> usize {
        self.success + self.failure
    }

    /// Non-zero slices in pie order: outcomes absent from the selection are
    /// left out rather than drawn as empty wedges.
    pub fn slices(&self) -> Vec<(Outcome, usize)> {
        [
            (Outcome::Success, self.success),
            (Outcome::Failure, self.failure),
        ]
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .collect()
    }
}

impl std::ops::Add for OutcomeCounts {
    type Output = OutcomeCounts;

    fn add(self, rhs: Self) -> Self::Output {
        OutcomeCounts {
            success: self.success + rhs.success,
            failure: self.failure + rhs.failure,
        }
    }
}

/// Count successes and failures among records matching `site`.
/// A site that never occurs yields zero for both.
pub fn outcome_counts(dataset: &LaunchDataset, site: &SiteSelection) -> OutcomeCounts {
    dataset
        .records
        .iter()
        .filter(|rec| site.matches(rec))
        .fold(OutcomeCounts::default(), |mut acc, rec| {
            match rec.outcome {
                Outcome::Success => acc.success += 1,
                Outcome::Failure => acc.failure += 1,
            }
            acc
        })
}

// ---------------------------------------------------------------------------
// Payload / outcome filter (scatter chart)
// ---------------------------------------------------------------------------

/// Return indices of records inside `range` that match `site`, in dataset order.
pub fn payload_outcome_points(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| range.contains(rec.payload_mass_kg) && site.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Chart titles
// ---------------------------------------------------------------------------

pub fn pie_title(site: &SiteSelection) -> String {
    match site {
        SiteSelection::All => "Total Success and Failure Launches for All Sites".to_string(),
        SiteSelection::Site(s) => format!("Total Success and Failure Launches for site {s}"),
    }
}

pub fn scatter_title(site: &SiteSelection) -> String {
    match site {
        SiteSelection::All => "Correlation between Payload and Success for all Sites".to_string(),
        SiteSelection::Site(s) => format!("Correlation between Payload and Success for site {s}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(site: &str, mass: f64, class: f64, booster: &str) -> LaunchRecord {
        LaunchRecord::from_raw(0, site.into(), mass, class, booster.into()).unwrap()
    }

    /// Site A: 2 successes, 1 failure. Site B: 2 failures.
    fn two_site_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            rec("A", 500.0, 1.0, "v1.0"),
            rec("A", 5000.0, 1.0, "FT"),
            rec("A", 2500.0, 0.0, "v1.1"),
            rec("B", 5000.0, 0.0, "FT"),
            rec("B", 9600.0, 0.0, "B4"),
        ])
    }

    fn site(s: &str) -> SiteSelection {
        SiteSelection::Site(s.to_string())
    }

    #[test]
    fn counts_for_all_and_single_site() {
        let ds = two_site_dataset();
        assert_eq!(
            outcome_counts(&ds, &SiteSelection::All),
            OutcomeCounts { success: 2, failure: 3 }
        );
        assert_eq!(
            outcome_counts(&ds, &site("A")),
            OutcomeCounts { success: 2, failure: 1 }
        );
        assert_eq!(
            outcome_counts(&ds, &site("B")),
            OutcomeCounts { success: 0, failure: 2 }
        );
    }

    #[test]
    fn unknown_site_counts_zero() {
        let ds = two_site_dataset();
        let counts = outcome_counts(&ds, &site("nowhere"));
        assert_eq!(counts, OutcomeCounts::default());
        assert!(counts.slices().is_empty());
    }

    #[test]
    fn counts_total_matches_selected_records() {
        let ds = two_site_dataset();
        for s in &ds.sites {
            let expected = ds.records.iter().filter(|r| r.launch_site == *s).count();
            assert_eq!(outcome_counts(&ds, &site(s)).total(), expected);
        }
        assert_eq!(outcome_counts(&ds, &SiteSelection::All).total(), ds.len());
    }

    #[test]
    fn all_sites_is_sum_of_each_site() {
        let ds = two_site_dataset();
        let summed = ds
            .sites
            .iter()
            .map(|s| outcome_counts(&ds, &site(s)))
            .fold(OutcomeCounts::default(), |a, b| a + b);
        assert_eq!(summed, outcome_counts(&ds, &SiteSelection::All));
    }

    #[test]
    fn slices_skip_absent_outcomes() {
        let counts = OutcomeCounts { success: 0, failure: 2 };
        assert_eq!(counts.slices(), vec![(Outcome::Failure, 2)]);
    }

    #[test]
    fn full_range_returns_every_record() {
        let ds = two_site_dataset();
        let idx = payload_outcome_points(&ds, &SiteSelection::All, PayloadRange::new(0.0, 10000.0));
        assert_eq!(idx, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn degenerate_range_is_inclusive() {
        let ds = two_site_dataset();
        let idx =
            payload_outcome_points(&ds, &SiteSelection::All, PayloadRange::new(5000.0, 5000.0));
        assert_eq!(idx, vec![1, 3]);
        assert!(idx.iter().all(|&i| ds.records[i].payload_mass_kg == 5000.0));
    }

    #[test]
    fn site_and_range_combine() {
        let ds = two_site_dataset();
        let idx = payload_outcome_points(&ds, &site("B"), PayloadRange::new(0.0, 6000.0));
        assert_eq!(idx, vec![3]);
    }

    #[test]
    fn empty_result_is_valid() {
        let ds = two_site_dataset();
        let idx = payload_outcome_points(&ds, &site("A"), PayloadRange::new(9000.0, 10000.0));
        assert!(idx.is_empty());
    }

    #[test]
    fn narrower_range_is_subset() {
        let ds = two_site_dataset();
        let ranges = [(0.0, 10000.0), (400.0, 9600.0), (500.0, 5000.0), (2500.0, 2500.0)];
        let selections: Vec<SiteSelection> = std::iter::once(SiteSelection::All)
            .chain(ds.sites.iter().map(|s| site(s)))
            .collect();

        for sel in &selections {
            for window in ranges.windows(2) {
                let wide_range = PayloadRange::new(window[0].0, window[0].1);
                let narrow_range = PayloadRange::new(window[1].0, window[1].1);
                let wide = payload_outcome_points(&ds, sel, wide_range);
                let narrow = payload_outcome_points(&ds, sel, narrow_range);

                assert!(narrow.iter().all(|i| wide.contains(i)), "{sel}: {window:?}");
                assert!(narrow.iter().all(|&i| {
                    let rec = &ds.records[i];
                    narrow_range.contains(rec.payload_mass_kg) && sel.matches(rec)
                }));
            }
        }
    }

    #[test]
    fn reversed_range_is_normalised() {
        let r = PayloadRange::new(8000.0, 2000.0);
        assert_eq!(r, PayloadRange { low: 2000.0, high: 8000.0 });
        assert!(r.contains(2000.0) && r.contains(8000.0));
        assert!(!r.contains(8000.5));
    }

    #[test]
    fn dropdown_value_parsing() {
        assert_eq!(SiteSelection::from_value("ALL"), SiteSelection::All);
        assert_eq!(SiteSelection::from_value("KSC LC-39A"), site("KSC LC-39A"));
        assert_eq!(SiteSelection::All.to_string(), "All Sites");
    }

    #[test]
    fn titles_follow_selection() {
        assert_eq!(
            pie_title(&SiteSelection::All),
            "Total Success and Failure Launches for All Sites"
        );
        assert_eq!(
            scatter_title(&site("VAFB SLC-4E")),
            "Correlation between Payload and Success for site VAFB SLC-4E"
        );
    }
}
