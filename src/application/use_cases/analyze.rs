// ============================================================
// ANALYZE USE CASE
// ============================================================
// Orchestrate CSV ingestion, row enrichment, and classification

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::application::use_cases::classify::{classify_rows, ClassificationSummary};
use crate::application::use_cases::enrich::RowEnricher;
use crate::domain::classifier_config::ClassifierConfig;
use crate::domain::csv::{CellValue, CsvRow};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::{CsvParser, FieldStats};
use crate::infrastructure::llm_clients::SentimentClient;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of analyzing one uploaded batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Unique id for this batch
    pub batch_id: String,

    /// When the analysis ran (RFC 3339)
    pub created_at: String,

    /// Original headers, in file order
    pub headers: Vec<String>,

    /// Detected delimiter
    pub delimiter: char,

    /// Number of rows parsed from the upload
    pub row_count: usize,

    /// Rows where the classifier call failed and defaults were substituted
    pub enrichment_failures: usize,

    /// Band and bucket partition of the batch
    pub summary: ClassificationSummary,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Preview of an upload: the first N rows after header normalization
/// and dynamic type coercion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvPreview {
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
    pub rows: Vec<HashMap<String, CellValue>>,
}

/// Analysis pipeline use case
pub struct AnalyzeUseCase {
    enricher: RowEnricher,
}

impl AnalyzeUseCase {
    pub fn new(client: Arc<dyn SentimentClient + Send + Sync>) -> Self {
        Self {
            enricher: RowEnricher::new(client),
        }
    }

    /// Run the full pipeline over raw CSV text
    pub async fn execute(
        &self,
        config: &ClassifierConfig,
        csv_text: &str,
    ) -> Result<AnalysisReport> {
        let start = Instant::now();

        config
            .validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid classifier config: {}", e)))?;

        let delimiter = CsvParser::detect_delimiter(csv_text);
        let parser = CsvParser::new().with_delimiter(delimiter);
        let rows = parser.parse_content(csv_text)?;

        let headers = Self::headers(&rows);
        let row_count = rows.len();

        let outcome = self.enricher.enrich(config, rows).await;
        let summary = classify_rows(outcome.rows);

        Ok(AnalysisReport {
            batch_id: Uuid::new_v4().to_string(),
            created_at: Utc::now().to_rfc3339(),
            headers,
            delimiter: delimiter as char,
            row_count,
            enrichment_failures: outcome.failure_count,
            summary,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Preview the first N normalized rows of an upload
    pub fn preview(bytes: &[u8], limit: usize) -> Result<CsvPreview> {
        let (delimiter, rows) = CsvParser::parse_bytes_auto_detect(bytes)?;

        Ok(CsvPreview {
            delimiter: delimiter as char,
            headers: Self::headers(&rows),
            row_count: rows.len(),
            rows: rows.iter().take(limit).map(|r| r.typed_values()).collect(),
        })
    }

    /// Field statistics for an upload, without calling the classifier
    pub fn inspect(bytes: &[u8]) -> Result<FieldStats> {
        let (_, rows) = CsvParser::parse_bytes_auto_detect(bytes)?;
        Ok(FieldStats::analyze(&rows))
    }

    fn headers(rows: &[CsvRow]) -> Vec<String> {
        rows.first()
            .map(|row| row.fields.iter().map(|f| f.name.clone()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::Result;
    use crate::domain::sentiment::SentimentScore;
    use async_trait::async_trait;

    struct KeywordClient;

    #[async_trait]
    impl SentimentClient for KeywordClient {
        async fn score(&self, _config: &ClassifierConfig, text: &str) -> Result<SentimentScore> {
            let polarity = if text.contains("love") {
                0.9
            } else if text.contains("hate") {
                -0.9
            } else {
                0.0
            };
            Ok(SentimentScore {
                polarity,
                subjectivity: if polarity == 0.0 { 0.1 } else { 0.9 },
                entities: Vec::new(),
            })
        }

        async fn list_models(&self, _config: &ClassifierConfig) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    const SAMPLE_CSV: &str = "\
text,source
I love this product,web
I hate waiting,web
The package arrived,web";

    #[tokio::test]
    async fn test_full_pipeline() {
        let use_case = AnalyzeUseCase::new(Arc::new(KeywordClient));
        let report = use_case
            .execute(&ClassifierConfig::default(), SAMPLE_CSV)
            .await
            .unwrap();

        assert_eq!(report.row_count, 3);
        assert_eq!(report.delimiter, ',');
        assert_eq!(report.headers, vec!["text", "source"]);
        assert_eq!(report.enrichment_failures, 0);

        let summary = &report.summary;
        assert_eq!(summary.valid_rows, 3);
        assert_eq!(summary.polarity_counts.positive, 1);
        assert_eq!(summary.polarity_counts.negative, 1);
        assert_eq!(summary.polarity_counts.neutral, 1);
        assert_eq!(summary.subjectivity_counts.subjective, 2);
        assert_eq!(summary.subjectivity_counts.objective, 1);
    }

    #[tokio::test]
    async fn test_semicolon_delimited_batch() {
        let csv = "text;source\nI love it;web\nI hate it;web";
        let use_case = AnalyzeUseCase::new(Arc::new(KeywordClient));
        let report = use_case
            .execute(&ClassifierConfig::default(), csv)
            .await
            .unwrap();

        assert_eq!(report.delimiter, ';');
        assert_eq!(report.summary.polarity_counts.positive, 1);
        assert_eq!(report.summary.polarity_counts.negative, 1);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let config = ClassifierConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        let use_case = AnalyzeUseCase::new(Arc::new(KeywordClient));

        assert!(use_case.execute(&config, SAMPLE_CSV).await.is_err());
    }

    #[test]
    fn test_preview_applies_coercion() {
        let preview = AnalyzeUseCase::preview(b"text,score\nhello,0.5\nworld,n/a", 10).unwrap();

        assert_eq!(preview.row_count, 2);
        assert_eq!(preview.rows[0]["score"], CellValue::Number(0.5));
        assert_eq!(
            preview.rows[1]["score"],
            CellValue::Text("n/a".to_string())
        );
    }

    #[test]
    fn test_preview_respects_limit() {
        let preview = AnalyzeUseCase::preview(b"text\na\nb\nc", 2).unwrap();

        assert_eq!(preview.row_count, 3);
        assert_eq!(preview.rows.len(), 2);
    }

    #[test]
    fn test_inspect_reports_stats() {
        let stats = AnalyzeUseCase::inspect(b"text,score\nhello,1\nworld,2").unwrap();

        assert_eq!(stats.row_count, 2);
        assert_eq!(stats.numeric_ratio, 0.5);
    }
}
