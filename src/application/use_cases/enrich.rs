use crate::domain::classifier_config::ClassifierConfig;
use crate::domain::csv::CsvRow;
use crate::domain::sentiment::SentimentScore;
use crate::infrastructure::llm_clients::SentimentClient;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Column names checked, in order, when extracting the snippet text
pub const TEXT_COLUMNS: [&str; 6] = ["text", "review", "comment", "content", "message", "snippet"];

/// A row with the classifier's fields merged back onto it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedRow {
    /// Row index (0-based, from the source CSV)
    pub index: usize,

    /// Cleaned-name field map, including `polarity` and `subjectivity`
    pub fields: HashMap<String, String>,

    /// Named entities returned by the classifier
    pub entities: Vec<String>,
}

/// Result of enriching one batch
#[derive(Debug)]
pub struct EnrichmentOutcome {
    pub rows: Vec<EnrichedRow>,
    pub failure_count: usize,
}

/// Sends each row's text to the external classifier and merges the
/// returned score back onto the row. Rows are processed one at a time;
/// a failed call substitutes neutral defaults instead of dropping the row.
pub struct RowEnricher {
    client: Arc<dyn SentimentClient + Send + Sync>,
}

impl RowEnricher {
    pub fn new(client: Arc<dyn SentimentClient + Send + Sync>) -> Self {
        Self { client }
    }

    /// Extract the snippet text by falling back across the candidate columns
    pub fn snippet_text(row: &CsvRow) -> Option<&str> {
        TEXT_COLUMNS.iter().find_map(|name| row.get(name))
    }

    pub async fn enrich(&self, config: &ClassifierConfig, rows: Vec<CsvRow>) -> EnrichmentOutcome {
        let mut enriched = Vec::with_capacity(rows.len());
        let mut failure_count = 0usize;

        for row in rows {
            let score = match Self::snippet_text(&row) {
                Some(text) => match self.client.score(config, text).await {
                    Ok(score) => score.clamped(),
                    Err(e) => {
                        warn!(row = row.index, error = %e, "Classifier call failed, substituting neutral defaults");
                        failure_count += 1;
                        SentimentScore::neutral()
                    }
                },
                None => {
                    debug!(row = row.index, "No text column found, substituting neutral defaults");
                    SentimentScore::neutral()
                }
            };

            enriched.push(Self::merge(row, score));
        }

        EnrichmentOutcome {
            rows: enriched,
            failure_count,
        }
    }

    /// Merge the score onto the row's field map
    fn merge(row: CsvRow, score: SentimentScore) -> EnrichedRow {
        let mut fields = row.field_map;
        fields.insert("polarity".to_string(), score.polarity.to_string());
        fields.insert("subjectivity".to_string(), score.subjectivity.to_string());

        EnrichedRow {
            index: row.index,
            fields,
            entities: score.entities,
        }
    }
}
