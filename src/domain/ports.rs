use crate::domain::model::Record;
use crate::utils::error::{LlmError, Result};
use async_trait::async_trait;

/// 將文字轉為 token 數量
pub trait TokenCounter: Send + Sync {
    fn count_tokens(&self, text: &str) -> usize;

    /// 目前使用的策略名稱，僅供日誌
    fn name(&self) -> &'static str;
}

/// 將一組欄位一致的資料列編碼為文字
pub trait DatasetEncoder: Send + Sync {
    fn encode(&self, records: &[Record]) -> Result<String>;
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, LlmError>;
}
