// ============================================================
// CSV PARSER
// ============================================================
// Parse CSV uploads with delimiter inference and encoding detection

use crate::domain::csv::{CsvField, CsvRow};
use crate::domain::error::AppError;
use csv::{ReaderBuilder, StringRecord, Trim};

/// Delimiter candidates considered during inference
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// CSV parser with delimiter inference
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from headers and values
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<Vec<CsvRow>, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        // Get headers
        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        // Parse rows
        let mut rows = Vec::new();
        let mut index = 0;

        for result in reader.records() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            let row = self.parse_row(index, &headers, &record);
            rows.push(row);
            index += 1;
        }

        Ok(rows)
    }

    /// Parse a single CSV row
    fn parse_row(&self, index: usize, headers: &StringRecord, record: &StringRecord) -> CsvRow {
        let mut fields = Vec::new();

        for (idx, header) in headers.iter().enumerate() {
            let value = record.get(idx).unwrap_or("").to_string();
            let field = CsvField::new(header.to_string(), value);
            fields.push(field);
        }

        CsvRow::new(index, fields)
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &DELIMITER_CANDIDATES {
            let sample_lines: Vec<_> = content.lines().take(10).collect();

            if sample_lines.is_empty() {
                continue;
            }

            let mut field_counts = Vec::new();

            for line in &sample_lines {
                let count = line.chars().filter(|&c| c as u8 == delimiter).count();
                field_counts.push(count);
            }

            // Score by consistency (low standard deviation) and frequency
            if !field_counts.is_empty() {
                let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
                let variance = field_counts
                    .iter()
                    .map(|&x| (x as f32 - avg).powi(2))
                    .sum::<f32>()
                    / field_counts.len() as f32;

                let score = avg / (1.0 + variance.sqrt());

                if score > best_score {
                    best_score = score;
                    best_delimiter = delimiter;
                }
            }
        }

        best_delimiter
    }

    /// Decode raw upload bytes to a string.
    /// Tries UTF-8 first, falls back to windows-1252, then lossy UTF-8.
    pub fn decode_bytes(bytes: &[u8]) -> String {
        if let Ok(content) = std::str::from_utf8(bytes) {
            return content.to_string();
        }

        let (decoded, _, had_errors) = encoding_rs::WINDOWS_1252.decode(bytes);
        if !had_errors {
            return decoded.into_owned();
        }

        String::from_utf8_lossy(bytes).to_string()
    }

    /// Decode and parse raw upload bytes with automatic delimiter detection.
    /// Returns the detected delimiter along with the rows.
    pub fn parse_bytes_auto_detect(bytes: &[u8]) -> Result<(u8, Vec<CsvRow>), AppError> {
        let content = Self::decode_bytes(bytes);
        let delimiter = Self::detect_delimiter(&content);

        let parser = Self::default().with_delimiter(delimiter);
        let rows = parser.parse_content(&content)?;
        Ok((delimiter, rows))
    }
}
