// ============================================================
// CSV ROW TYPES
// ============================================================
// Data structures representing parsed CSV content

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Coerce a cell value to a number.
/// Accepts plain integers/floats and values with thousands separators.
pub fn coerce_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(n) = trimmed.parse::<f64>() {
        return Some(n);
    }

    trimmed.replace(',', "").parse::<f64>().ok()
}

/// Typed view of a cell value after dynamic coercion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

/// A single field in a CSV row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvField {
    /// Original field name (header)
    pub name: String,

    /// Cleaned field name (for case-insensitive lookups)
    pub clean_name: String,

    /// Field value
    pub value: String,

    /// Whether the value is empty
    pub is_empty: bool,

    /// Whether the value appears to be numeric
    pub is_numeric: bool,
}

impl CsvField {
    /// Create a new CSV field
    pub fn new(name: String, value: String) -> Self {
        let is_empty = value.trim().is_empty();
        let is_numeric = coerce_numeric(&value).is_some();
        let clean_name = Self::clean_field_name(&name);

        Self {
            name,
            clean_name,
            value,
            is_empty,
            is_numeric,
        }
    }

    /// Clean field name for lookups and output formatting.
    /// Lowercase alphanumeric runs joined by underscores, so "Polarity"
    /// and " polarity " both resolve to "polarity".
    fn clean_field_name(name: &str) -> String {
        name.chars()
            .map(|c| {
                if c.is_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect::<String>()
            .split('_')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Apply dynamic type coercion to this field's value
    pub fn cell_value(&self) -> CellValue {
        if self.is_empty {
            CellValue::Empty
        } else if let Some(n) = coerce_numeric(&self.value) {
            CellValue::Number(n)
        } else {
            CellValue::Text(self.value.clone())
        }
    }
}

/// A single row in a CSV file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvRow {
    /// Row index (0-based)
    pub index: usize,

    /// All fields in this row
    pub fields: Vec<CsvField>,

    /// Cleaned-name field map for easy access
    pub field_map: HashMap<String, String>,
}

impl CsvRow {
    /// Create a new CSV row
    pub fn new(index: usize, fields: Vec<CsvField>) -> Self {
        let field_map = fields
            .iter()
            .filter(|f| !f.is_empty)
            .map(|f| (f.clean_name.clone(), f.value.clone()))
            .collect();

        Self { index, fields, field_map }
    }

    /// Look up a value by cleaned field name
    pub fn get(&self, clean_name: &str) -> Option<&str> {
        self.field_map.get(clean_name).map(|s| s.as_str())
    }

    /// Get non-empty fields only
    pub fn non_empty_fields(&self) -> Vec<&CsvField> {
        self.fields.iter().filter(|f| !f.is_empty).collect()
    }

    /// Typed view of the row after dynamic coercion
    pub fn typed_values(&self) -> HashMap<String, CellValue> {
        self.fields
            .iter()
            .map(|f| (f.clean_name.clone(), f.cell_value()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_cleaning() {
        let field = CsvField::new("First Name".to_string(), "John".to_string());
        assert_eq!(field.clean_name, "first_name");

        let field = CsvField::new("  Polarity ".to_string(), "0.3".to_string());
        assert_eq!(field.clean_name, "polarity");
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let row = CsvRow::new(
            0,
            vec![
                CsvField::new("Polarity".to_string(), "0.5".to_string()),
                CsvField::new("Subjectivity".to_string(), "0.8".to_string()),
            ],
        );

        assert_eq!(row.get("polarity"), Some("0.5"));
        assert_eq!(row.get("subjectivity"), Some("0.8"));
    }

    #[test]
    fn test_coerce_numeric() {
        assert_eq!(coerce_numeric("0.5"), Some(0.5));
        assert_eq!(coerce_numeric(" -0.3 "), Some(-0.3));
        assert_eq!(coerce_numeric("1,250"), Some(1250.0));
        assert_eq!(coerce_numeric("abc"), None);
        assert_eq!(coerce_numeric(""), None);
    }

    #[test]
    fn test_cell_value_coercion() {
        let numeric = CsvField::new("score".to_string(), "42".to_string());
        assert_eq!(numeric.cell_value(), CellValue::Number(42.0));

        let text = CsvField::new("note".to_string(), "great".to_string());
        assert_eq!(text.cell_value(), CellValue::Text("great".to_string()));

        let empty = CsvField::new("blank".to_string(), "  ".to_string());
        assert_eq!(empty.cell_value(), CellValue::Empty);
    }

    #[test]
    fn test_field_map_skips_empty() {
        let row = CsvRow::new(
            0,
            vec![
                CsvField::new("text".to_string(), "".to_string()),
                CsvField::new("review".to_string(), "good stuff".to_string()),
            ],
        );

        assert_eq!(row.get("text"), None);
        assert_eq!(row.get("review"), Some("good stuff"));
    }
}
