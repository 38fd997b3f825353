//! Year-range filtering.

use crate::models::{AuthorBatch, Record, YearRange};

/// Keep the records whose year falls inside `range`.
///
/// An unbounded range returns the input untouched. Under any bound, records
/// without a parsable year are dropped. Order is preserved.
pub fn filter_by_year(records: Vec<Record>, range: &YearRange) -> Vec<Record> {
    if range.is_unbounded() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| record.year().is_some_and(|year| range.contains(year)))
        .collect()
}

/// Apply [`filter_by_year`] to a batch's records
pub fn filter_batch(batch: AuthorBatch, range: &YearRange) -> AuthorBatch {
    AuthorBatch {
        records: filter_by_year(batch.records, range),
        ..batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, year: Option<i32>) -> Record {
        match year {
            Some(y) => Record::parse(format!("misc{{{},\n  year = {{{}}},\n}}\n", key, y)),
            None => Record::parse(format!("misc{{{},\n  title = {{Undated}},\n}}\n", key)),
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record("A", Some(2018)),
            record("B", Some(2020)),
            record("C", None),
            record("D", Some(2022)),
            record("E", Some(2024)),
        ]
    }

    fn keys(records: &[Record]) -> Vec<&str> {
        records.iter().filter_map(|r| r.key()).collect()
    }

    #[test]
    fn test_unbounded_is_identity() {
        let input = sample();
        let output = filter_by_year(input.clone(), &YearRange::unbounded());
        assert_eq!(output, input);
    }

    #[test]
    fn test_both_bounds_inclusive() {
        let range = YearRange::new(Some(2020), Some(2022)).unwrap();
        let output = filter_by_year(sample(), &range);
        assert_eq!(keys(&output), vec!["B", "D"]);
    }

    #[test]
    fn test_start_only() {
        let range = YearRange::new(Some(2022), None).unwrap();
        let output = filter_by_year(sample(), &range);
        assert_eq!(keys(&output), vec!["D", "E"]);
    }

    #[test]
    fn test_end_only_drops_undated() {
        let range = YearRange::new(None, Some(2020)).unwrap();
        let output = filter_by_year(sample(), &range);
        assert_eq!(keys(&output), vec!["A", "B"]);
    }

    #[test]
    fn test_output_is_subset_within_bounds() {
        for (start, end) in [(2000, 2030), (2019, 2021), (2024, 2024), (2025, 2030)] {
            let range = YearRange::new(Some(start), Some(end)).unwrap();
            let input = sample();
            let output = filter_by_year(input.clone(), &range);

            assert!(output.iter().all(|r| input.contains(r)));
            assert!(output
                .iter()
                .all(|r| r.year().is_some_and(|y| start <= y && y <= end)));
        }
    }

    #[test]
    fn test_filter_batch_keeps_identity() {
        let batch = AuthorBatch::new("Jane Doe", Some("12/34".to_string()), sample());
        let range = YearRange::new(Some(2024), None).unwrap();
        let filtered = filter_batch(batch, &range);

        assert_eq!(filtered.display_name, "Jane Doe");
        assert_eq!(filtered.external_id.as_deref(), Some("12/34"));
        assert_eq!(keys(&filtered.records), vec!["E"]);
    }
}
