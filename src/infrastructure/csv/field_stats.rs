// ============================================================
// FIELD STATISTICS
// ============================================================
// Statistical summary of CSV fields for the inspect endpoint

use crate::domain::csv::CsvRow;
use serde::{Deserialize, Serialize};

/// Statistical summary of CSV field content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldStats {
    /// Total number of rows analyzed
    pub row_count: usize,

    /// Total number of fields analyzed
    pub total_fields: usize,

    /// Average length of non-empty field values (in characters)
    pub avg_value_length: f32,

    /// Ratio of fields that contain numeric data (0.0 - 1.0)
    pub numeric_ratio: f32,

    /// Number of empty fields encountered
    pub empty_field_count: usize,

    /// Maximum value length found
    pub max_value_length: usize,

    /// Minimum value length found (excluding empty)
    pub min_value_length: usize,
}

impl FieldStats {
    /// Analyze CSV rows to determine field statistics
    pub fn analyze(rows: &[CsvRow]) -> Self {
        let mut total_length = 0usize;
        let mut numeric_count = 0usize;
        let mut empty_count = 0usize;
        let mut max_length = 0usize;
        let mut min_length = usize::MAX;

        for row in rows {
            for field in &row.fields {
                // Skip empty fields for length stats
                if field.is_empty {
                    empty_count += 1;
                    continue;
                }

                let value_len = field.value.len();
                total_length += value_len;

                if value_len > max_length {
                    max_length = value_len;
                }
                if value_len < min_length {
                    min_length = value_len;
                }

                if field.is_numeric {
                    numeric_count += 1;
                }
            }
        }

        let total_fields = rows.iter().map(|r| r.fields.len()).sum::<usize>();

        let avg_value_length = if total_fields > 0 {
            total_length as f32 / total_fields as f32
        } else {
            0.0
        };

        let numeric_ratio = if total_fields > 0 {
            numeric_count as f32 / total_fields as f32
        } else {
            0.0
        };

        FieldStats {
            row_count: rows.len(),
            total_fields,
            avg_value_length,
            numeric_ratio,
            empty_field_count: empty_count,
            max_value_length: max_length,
            min_value_length: if min_length == usize::MAX { 0 } else { min_length },
        }
    }

    /// Get human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Field Analysis ({} rows, {} fields):\n\
             - Avg length: {:.1} chars\n\
             - Numeric ratio: {:.2}\n\
             - Empty fields: {}",
            self.row_count,
            self.total_fields,
            self.avg_value_length,
            self.numeric_ratio,
            self.empty_field_count
        )
    }
}
