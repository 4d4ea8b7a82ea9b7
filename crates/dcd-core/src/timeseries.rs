//! Yearly time series and the profile merge algorithm.
//!
//! A [`TimeSeries`] holds one value per year starting at `start_year`. Years are
//! plain integers: stored profiles are usually relative to a case's DG4 year, so
//! zero and negative start years are as valid as calendar years.

use std::ops::{Add, Mul};

/// Ordered yearly values: `values[i]` belongs to year `start_year + i`.
///
/// A series without values is *empty*. Empty series contribute nothing when
/// merged and all compare equal, whatever their `start_year`.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSeries<T> {
    pub start_year: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub values: Vec<T>,
}

impl<T: PartialEq> PartialEq for TimeSeries<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.values.is_empty() && other.values.is_empty() {
            return true;
        }
        self.start_year == other.start_year && self.values == other.values
    }
}

impl<T> TimeSeries<T> {
    pub fn new(start_year: i32, values: Vec<T>) -> Self {
        Self { start_year, values }
    }

    /// The zero-length series, identity element of [`merge`].
    pub fn empty() -> Self {
        Self {
            start_year: 0,
            values: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Last year covered, `None` for an empty series.
    pub fn last_year(&self) -> Option<i32> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.start_year + (self.values.len() as i32 - 1))
        }
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        (0..self.values.len()).map(move |i| self.start_year + i as i32)
    }

    /// Iterate `(year, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &T)> + '_ {
        self.years().zip(self.values.iter())
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> TimeSeries<U> {
        TimeSeries {
            start_year: self.start_year,
            values: self.values.iter().map(f).collect(),
        }
    }

    /// Same values moved by `offset` years (e.g. relative years to calendar years).
    pub fn shifted(&self, offset: i32) -> Self
    where
        T: Clone,
    {
        Self {
            start_year: self.start_year + offset,
            values: self.values.clone(),
        }
    }

    fn end_exclusive(&self) -> i64 {
        self.start_year as i64 + self.values.len() as i64
    }
}

impl<T: Copy> TimeSeries<T> {
    /// Value for `year`, `None` outside the covered range.
    pub fn value_at(&self, year: i32) -> Option<T> {
        let offset = year as i64 - self.start_year as i64;
        if offset < 0 {
            return None;
        }
        self.values.get(offset as usize).copied()
    }
}

impl<T: Copy + Mul<Output = T>> TimeSeries<T> {
    /// Multiply every value by `factor`.
    pub fn scale(&self, factor: T) -> Self {
        self.map(|v| *v * factor)
    }
}

impl<T: Copy + Default + Add<Output = T>> TimeSeries<T> {
    pub fn total(&self) -> T {
        self.values.iter().fold(T::default(), |acc, v| acc + *v)
    }
}

impl TimeSeries<i32> {
    pub fn cast_f64(&self) -> TimeSeries<f64> {
        self.map(|v| f64::from(*v))
    }
}

/// Align two series on the union of their year ranges and sum them.
///
/// The result starts at the earlier start year and ends at the later last
/// year; a year missing from one operand counts as zero there. An empty
/// operand leaves the other one unchanged.
pub fn merge<T>(a: &TimeSeries<T>, b: &TimeSeries<T>) -> TimeSeries<T>
where
    T: Copy + Default + Add<Output = T>,
{
    if b.is_empty() {
        return a.clone();
    }
    if a.is_empty() {
        return b.clone();
    }

    let start_year = a.start_year.min(b.start_year);
    let end = a.end_exclusive().max(b.end_exclusive());
    let len = (end - start_year as i64) as usize;

    let values = (0..len)
        .map(|i| {
            let year = start_year + i as i32;
            a.value_at(year).unwrap_or_default() + b.value_at(year).unwrap_or_default()
        })
        .collect();

    TimeSeries { start_year, values }
}

/// Left fold of [`merge`] over `series`, starting from the empty series.
pub fn merge_all<'a, T, I>(series: I) -> TimeSeries<T>
where
    T: Copy + Default + Add<Output = T> + 'a,
    I: IntoIterator<Item = &'a TimeSeries<T>>,
{
    series
        .into_iter()
        .fold(TimeSeries::empty(), |acc, s| merge(&acc, s))
}

/// Inclusive `(first, last)` year span over the non-empty profiles given.
pub fn year_span<'a, T, I>(profiles: I) -> Option<(i32, i32)>
where
    T: 'a,
    I: IntoIterator<Item = Option<&'a TimeSeries<T>>>,
{
    profiles
        .into_iter()
        .flatten()
        .filter_map(|p| p.last_year().map(|last| (p.start_year, last)))
        .reduce(|(lo, hi), (first, last)| (lo.min(first), hi.max(last)))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn series() -> impl Strategy<Value = TimeSeries<f64>> {
        (
            -50_i32..2100,
            prop::collection::vec(-1.0e6_f64..1.0e6_f64, 0..12),
        )
            .prop_map(|(start_year, values)| TimeSeries::new(start_year, values))
    }

    proptest! {
        #[test]
        fn merge_is_commutative(a in series(), b in series()) {
            prop_assert_eq!(merge(&a, &b), merge(&b, &a));
        }

        #[test]
        fn empty_is_identity(a in series(), year in -100_i32..100) {
            let empty = TimeSeries::new(year, Vec::new());
            prop_assert_eq!(merge(&a, &empty), a.clone());
            prop_assert_eq!(merge(&empty, &a), a);
        }

        #[test]
        fn merged_span_covers_both(a in series(), b in series()) {
            let merged = merge(&a, &b);
            let expected = year_span([Some(&a), Some(&b)]);
            let actual = year_span([Some(&merged)]);
            prop_assert_eq!(actual, expected);
        }
    }
}
