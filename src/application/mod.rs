pub mod use_cases;

pub use use_cases::analyze::AnalyzeUseCase;
pub use use_cases::classify::classify_rows;
pub use use_cases::enrich::RowEnricher;
