//! Threshold tables shared by the UV and clothing advisors.
//!
//! A table is an ascending list of [`Band`]s. Each band covers the closed-lower,
//! open-upper interval from its own `from` up to the next band's `from`; the
//! last band is unbounded above. A value sitting exactly on a boundary belongs
//! to the higher band.

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band<T> {
    /// Inclusive lower bound.
    pub from: f64,
    #[serde(flatten)]
    pub value: T,
}

impl<T> Band<T> {
    pub fn new(from: f64, value: T) -> Self {
        Self { from, value }
    }
}

/// Find the band containing `x`.
///
/// Returns `None` for `NaN` or for values below the first band.
pub fn classify<T>(bands: &[Band<T>], x: f64) -> Option<&T> {
    classify_position(bands, x).map(|idx| &bands[idx].value)
}

/// Like [`classify`], but returns the band's position in the table.
pub fn classify_position<T>(bands: &[Band<T>], x: f64) -> Option<usize> {
    if x.is_nan() {
        return None;
    }
    bands.iter().rposition(|band| x >= band.from)
}

/// Reject empty tables and bounds that are not strictly ascending.
pub fn check_ascending<T>(table: &str, bands: &[Band<T>]) -> Result<()> {
    if bands.is_empty() {
        return Err(AdvisorError::config(format!("{table}: table is empty")));
    }

    for pair in bands.windows(2) {
        let (lower, upper) = (pair[0].from, pair[1].from);
        if lower.is_nan() || upper.is_nan() || lower >= upper {
            return Err(AdvisorError::config(format!(
                "{table}: band bounds must be strictly ascending ({lower} then {upper})"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn table() -> Vec<Band<&'static str>> {
        vec![
            Band::new(f64::NEG_INFINITY, "cold"),
            Band::new(10.0, "mild"),
            Band::new(20.0, "hot"),
        ]
    }

    #[rstest]
    #[case(-40.0, "cold")]
    #[case(9.999, "cold")]
    #[case(10.0, "mild")]
    #[case(19.999, "mild")]
    #[case(20.0, "hot")]
    #[case(1e9, "hot")]
    fn boundary_belongs_to_higher_band(#[case] x: f64, #[case] expected: &str) {
        assert_eq!(classify(&table(), x), Some(&expected));
    }

    #[test]
    fn value_below_first_band_has_no_match() {
        let bands = vec![Band::new(0.0, "low"), Band::new(3.0, "moderate")];

        assert_eq!(classify(&bands, -0.1), None);
        assert_eq!(classify_position(&bands, 0.0), Some(0));
        assert_eq!(classify_position(&bands, 3.0), Some(1));
    }

    #[test]
    fn nan_has_no_match() {
        assert_eq!(classify(&table(), f64::NAN), None);
    }

    #[test]
    fn ascending_check() {
        assert!(check_ascending("ok", &table()).is_ok());

        let unsorted = vec![Band::new(5.0, ()), Band::new(5.0, ())];
        let err = check_ascending("dup", &unsorted).unwrap_err();
        assert!(err.to_string().contains("strictly ascending"));

        let empty: Vec<Band<()>> = Vec::new();
        assert!(check_ascending("empty", &empty).is_err());
    }
}
