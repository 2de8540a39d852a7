//! CLI command implementations.

pub mod analyze;
pub mod history;
pub mod strategies;

pub use analyze::AnalyzeCommand;
pub use history::HistoryCommand;
pub use strategies::StrategiesCommand;
