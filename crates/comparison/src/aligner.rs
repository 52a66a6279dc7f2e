use crate::error::ComparisonError;
use chrono::NaiveDate;
use core_types::{AlignedRow, AlignedTable, TimeSeries};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

/// Builds a date-ordered table from the union of all series' dates.
///
/// Each row carries a value for exactly the series that define that date;
/// gaps stay absent and are never interpolated or forward-filled. Columns keep
/// the order the series were passed in.
pub fn align_by_date(series: &[TimeSeries]) -> Result<AlignedTable, ComparisonError> {
    // 1. Column names must be unique, or rows would silently overwrite each other.
    let mut seen = HashSet::with_capacity(series.len());
    for s in series {
        if !seen.insert(s.name()) {
            return Err(ComparisonError::DuplicateSeriesName(s.name().to_string()));
        }
    }

    // 2. Fold every point into the master clock. Dates within one series are
    //    already unique and ascending (guaranteed by `TimeSeries`).
    let mut clock: BTreeMap<NaiveDate, BTreeMap<String, Decimal>> = BTreeMap::new();
    for s in series {
        for point in s.points() {
            clock
                .entry(point.date)
                .or_default()
                .insert(s.name().to_string(), point.value);
        }
    }

    let rows: Vec<AlignedRow> = clock
        .into_iter()
        .map(|(date, values)| AlignedRow { date, values })
        .collect();

    tracing::debug!(series = series.len(), rows = rows.len(), "Aligned series by date");

    Ok(AlignedTable {
        series: series.iter().map(|s| s.name().to_string()).collect(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, day).unwrap()
    }

    fn series(name: &str, points: &[(u32, Decimal)]) -> TimeSeries {
        TimeSeries::from_pairs(name, points.iter().map(|(day, v)| (d(*day), *v))).unwrap()
    }

    #[test]
    fn disjoint_dates_produce_one_value_per_row() {
        let a = series("60/40", &[(1, dec!(100)), (3, dec!(102))]);
        let b = series("sp500", &[(2, dec!(200)), (4, dec!(205))]);

        let table = align_by_date(&[a, b]).unwrap();

        assert_eq!(table.series, vec!["60/40".to_string(), "sp500".to_string()]);
        let dates: Vec<_> = table.rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(1), d(2), d(3), d(4)]);
        for row in &table.rows {
            assert_eq!(row.values.len(), 1);
        }
        assert_eq!(table.rows[0].get("60/40"), Some(dec!(100)));
        assert_eq!(table.rows[0].get("sp500"), None);
        assert_eq!(table.rows[1].get("sp500"), Some(dec!(200)));
    }

    #[test]
    fn identical_dates_carry_both_values() {
        let a = series("buy & hold", &[(1, dec!(1)), (2, dec!(2))]);
        let b = series("sma 50/200", &[(1, dec!(3)), (2, dec!(4))]);

        let table = align_by_date(&[a, b]).unwrap();

        assert_eq!(table.rows.len(), 2);
        assert!(table.rows.iter().all(|r| r.values.len() == 2));
        assert_eq!(table.rows[1].get("sma 50/200"), Some(dec!(4)));
    }

    #[test]
    fn gaps_are_not_forward_filled() {
        let a = series("a", &[(1, dec!(1)), (3, dec!(3))]);
        let b = series("b", &[(1, dec!(10)), (2, dec!(20)), (3, dec!(30))]);

        let table = align_by_date(&[a, b]).unwrap();

        assert_eq!(table.rows[1].date, d(2));
        assert_eq!(table.rows[1].get("a"), None);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let a = series("same", &[(1, dec!(1))]);
        let b = series("same", &[(2, dec!(2))]);
        assert_eq!(
            align_by_date(&[a, b]).unwrap_err(),
            ComparisonError::DuplicateSeriesName("same".to_string())
        );
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = align_by_date(&[]).unwrap();
        assert!(table.series.is_empty());
        assert!(table.rows.is_empty());
    }
}
