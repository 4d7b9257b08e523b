pub mod compare;
pub mod cost;
pub mod dataset;
pub mod encoder;
pub mod prompt;
pub mod tokenizer;

pub use crate::domain::model::{
    ComparisonReport, ComparisonResult, CostBreakdown, Dataset, FormatKind, Record, Savings,
};
pub use crate::domain::ports::{DatasetEncoder, LlmClient, TokenCounter};
pub use crate::utils::error::Result;
