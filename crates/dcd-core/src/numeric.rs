use crate::{CoreError, CoreResult, TimeSeries};

/// Floating point type used for every cost, volume and emission value
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Element-wise `nearly_equal` over two aligned series.
///
/// Empty series compare equal to each other whatever their start year.
pub fn series_nearly_equal(a: &TimeSeries<Real>, b: &TimeSeries<Real>, tol: Tolerances) -> bool {
    if a.is_empty() && b.is_empty() {
        return true;
    }
    a.start_year == b.start_year
        && a.len() == b.len()
        && a
            .values
            .iter()
            .zip(&b.values)
            .all(|(x, y)| nearly_equal(*x, *y, tol))
}

/// Reject NaN and infinite entries, reporting the first offending year.
pub fn ensure_finite_series(series: &TimeSeries<Real>, what: &str) -> CoreResult<()> {
    match series.iter().find(|(_, v)| !v.is_finite()) {
        Some((year, value)) => Err(CoreError::NonFinite {
            what: what.to_string(),
            year,
            value: *value,
        }),
        None => Ok(()),
    }
}
