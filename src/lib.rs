pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::GeminiClient;
pub use config::TomlConfig;
pub use crate::core::{compare::ComparisonEngine, cost::Pricing, dataset::EncodedDataset};
pub use domain::model::{ComparisonReport, ComparisonResult, Dataset, FormatKind, Record};
pub use server::{route, serve, AppState};
pub use utils::error::{AppError, LlmError, Result};
