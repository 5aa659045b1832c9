use super::enrich::EnrichedRow;
use crate::domain::csv::coerce_numeric;
use crate::domain::sentiment::{PolarityBand, SentimentBucket, SubjectivityBand};
use serde::{Deserialize, Serialize};

/// Per-band counts over the polarity partition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolarityCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl PolarityCounts {
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Per-band counts over the subjectivity partition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectivityCounts {
    pub subjective: usize,
    pub objective: usize,
}

impl SubjectivityCounts {
    pub fn total(&self) -> usize {
        self.subjective + self.objective
    }
}

/// One combined bucket and the rows that landed in it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketGroup {
    pub polarity: PolarityBand,
    pub subjectivity: SubjectivityBand,
    pub label: String,
    pub count: usize,
    pub rows: Vec<EnrichedRow>,
}

/// Result of classifying one batch of enriched rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationSummary {
    /// Total rows received
    pub total_rows: usize,

    /// Rows with numerically valid polarity and subjectivity
    pub valid_rows: usize,

    /// Rows excluded because polarity or subjectivity failed numeric coercion
    pub skipped_rows: usize,

    pub polarity_counts: PolarityCounts,
    pub subjectivity_counts: SubjectivityCounts,

    /// All six cross-product buckets, in a stable order, empty ones included
    pub buckets: Vec<BucketGroup>,
}

/// Partition enriched rows into the fixed sentiment buckets.
/// Rows whose polarity or subjectivity cannot be coerced to a number are
/// excluded from every count but do not abort the batch.
pub fn classify_rows(rows: Vec<EnrichedRow>) -> ClassificationSummary {
    let total_rows = rows.len();
    let mut skipped_rows = 0usize;
    let mut polarity_counts = PolarityCounts::default();
    let mut subjectivity_counts = SubjectivityCounts::default();

    let mut buckets: Vec<BucketGroup> = Vec::with_capacity(6);
    for p in PolarityBand::ALL {
        for s in SubjectivityBand::ALL {
            buckets.push(BucketGroup {
                polarity: p,
                subjectivity: s,
                label: SentimentBucket::new(p, s).label(),
                count: 0,
                rows: Vec::new(),
            });
        }
    }

    for row in rows {
        let polarity = row.fields.get("polarity").and_then(|v| coerce_numeric(v));
        let subjectivity = row
            .fields
            .get("subjectivity")
            .and_then(|v| coerce_numeric(v));

        let (polarity, subjectivity) = match (polarity, subjectivity) {
            (Some(p), Some(s)) => (p, s),
            _ => {
                skipped_rows += 1;
                continue;
            }
        };

        let bucket = SentimentBucket::classify(polarity, subjectivity);

        match bucket.polarity {
            PolarityBand::Positive => polarity_counts.positive += 1,
            PolarityBand::Negative => polarity_counts.negative += 1,
            PolarityBand::Neutral => polarity_counts.neutral += 1,
        }
        match bucket.subjectivity {
            SubjectivityBand::Subjective => subjectivity_counts.subjective += 1,
            SubjectivityBand::Objective => subjectivity_counts.objective += 1,
        }

        let group = buckets
            .iter_mut()
            .find(|g| g.polarity == bucket.polarity && g.subjectivity == bucket.subjectivity)
            .expect("all buckets are pre-populated");
        group.count += 1;
        group.rows.push(row);
    }

    ClassificationSummary {
        total_rows,
        valid_rows: total_rows - skipped_rows,
        skipped_rows,
        polarity_counts,
        subjectivity_counts,
        buckets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn enriched(index: usize, polarity: &str, subjectivity: &str) -> EnrichedRow {
        let mut fields = HashMap::new();
        fields.insert("polarity".to_string(), polarity.to_string());
        fields.insert("subjectivity".to_string(), subjectivity.to_string());

        EnrichedRow {
            index,
            fields,
            entities: Vec::new(),
        }
    }

    fn bucket_count(summary: &ClassificationSummary, label: &str) -> usize {
        summary
            .buckets
            .iter()
            .find(|g| g.label == label)
            .map(|g| g.count)
            .unwrap_or(0)
    }

    #[test]
    fn test_example_classification() {
        let summary = classify_rows(vec![
            enriched(0, "0.5", "0.8"),
            enriched(1, "-0.3", "0.2"),
            enriched(2, "0.0", "0.6"),
        ]);

        assert_eq!(bucket_count(&summary, "Positive & Subjective"), 1);
        assert_eq!(bucket_count(&summary, "Negative & Objective"), 1);
        assert_eq!(bucket_count(&summary, "Neutral & Subjective"), 1);
        assert_eq!(summary.valid_rows, 3);
    }

    #[test]
    fn test_non_numeric_rows_excluded_but_kept_in_totals() {
        let summary = classify_rows(vec![
            enriched(0, "0.5", "0.8"),
            enriched(1, "n/a", "0.2"),
            enriched(2, "0.3", "unknown"),
        ]);

        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.valid_rows, 1);
        assert_eq!(summary.skipped_rows, 2);
        assert_eq!(summary.polarity_counts.total(), 1);
    }

    #[test]
    fn test_missing_fields_count_as_skipped() {
        let row = EnrichedRow {
            index: 0,
            fields: HashMap::new(),
            entities: Vec::new(),
        };

        let summary = classify_rows(vec![row]);
        assert_eq!(summary.skipped_rows, 1);
        assert_eq!(summary.valid_rows, 0);
    }

    #[test]
    fn test_count_sums_match_valid_rows() {
        let summary = classify_rows(vec![
            enriched(0, "0.9", "0.9"),
            enriched(1, "0.9", "0.1"),
            enriched(2, "-0.9", "0.9"),
            enriched(3, "0.05", "0.5"),
            enriched(4, "garbage", "0.5"),
        ]);

        assert_eq!(summary.valid_rows, 4);
        assert_eq!(summary.polarity_counts.total(), summary.valid_rows);
        assert_eq!(summary.subjectivity_counts.total(), summary.valid_rows);
        assert_eq!(
            summary.buckets.iter().map(|g| g.count).sum::<usize>(),
            summary.valid_rows
        );
    }

    #[test]
    fn test_all_six_buckets_always_present() {
        let summary = classify_rows(Vec::new());

        assert_eq!(summary.buckets.len(), 6);
        assert!(summary.buckets.iter().all(|g| g.count == 0));
        assert_eq!(summary.total_rows, 0);
    }

    #[test]
    fn test_bucket_rows_carry_payload() {
        let summary = classify_rows(vec![enriched(3, "0.5", "0.8")]);

        let group = summary
            .buckets
            .iter()
            .find(|g| g.label == "Positive & Subjective")
            .unwrap();
        assert_eq!(group.rows.len(), 1);
        assert_eq!(group.rows[0].index, 3);
    }
}
