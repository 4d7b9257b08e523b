use crate::core::cost::{savings_ratio, Pricing};
use crate::core::prompt::build_prompt;
use crate::core::{
    ComparisonReport, ComparisonResult, FormatKind, LlmClient, Savings, TokenCounter,
};
use crate::utils::error::{AppError, Result};
use serde::Serialize;
use std::sync::Arc;

pub const QUERY_REQUIRED: &str = "Query is required";

/// 對同一個問題分別要求 JSON 與 TOON 輸出，並比較兩者的 token 與成本
#[derive(Clone)]
pub struct ComparisonEngine {
    tokenizer: Arc<dyn TokenCounter>,
    llm: Arc<dyn LlmClient>,
    pricing: Pricing,
}

#[derive(Serialize)]
struct MockJsonResponse<'a> {
    results: &'a str,
    query: &'a str,
}

/// LLM 呼叫失敗時的替代回應，內容可與真實回應區分
pub fn mock_response(format: FormatKind, query: &str) -> String {
    match format {
        FormatKind::Json => {
            let mock = MockJsonResponse {
                results: "Mock JSON response",
                query,
            };
            serde_json::to_string_pretty(&mock)
                .unwrap_or_else(|_| "{\"results\": \"Mock JSON response\"}".to_string())
        }
        FormatKind::Toon => format!("results[1]{{mock}}:\n  Mock TOON response\nquery: {}", query),
    }
}

impl ComparisonEngine {
    pub fn new(tokenizer: Arc<dyn TokenCounter>, llm: Arc<dyn LlmClient>, pricing: Pricing) -> Self {
        Self {
            tokenizer,
            llm,
            pricing,
        }
    }

    pub fn tokenizer(&self) -> &dyn TokenCounter {
        self.tokenizer.as_ref()
    }

    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    pub async fn compare(
        &self,
        dataset_text: &str,
        query: &str,
        input_format: FormatKind,
    ) -> Result<ComparisonReport> {
        if query.is_empty() {
            return Err(AppError::validation(QUERY_REQUIRED));
        }

        tracing::debug!(
            "Comparing outputs for {} input ({} chars of data)",
            input_format.label(),
            dataset_text.len()
        );

        // 兩次呼叫互不共享可變狀態，結果固定以 JSON、TOON 順序合併
        let (json, toon) = tokio::join!(
            self.run_target(dataset_text, query, input_format, FormatKind::Json),
            self.run_target(dataset_text, query, input_format, FormatKind::Toon),
        );

        let comparison = Savings {
            output_tokens_savings_pct: savings_ratio(
                json.output_tokens as f64,
                toon.output_tokens as f64,
            ),
            total_cost_savings_pct: savings_ratio(json.total_cost, toon.total_cost),
        };

        tracing::info!(
            "Comparison done: JSON {} → {} tokens, TOON {} → {} tokens, output savings {:.2}",
            json.input_tokens,
            json.output_tokens,
            toon.input_tokens,
            toon.output_tokens,
            comparison.output_tokens_savings_pct
        );

        Ok(ComparisonReport {
            input_format,
            results: vec![json, toon],
            comparison,
        })
    }

    async fn run_target(
        &self,
        dataset_text: &str,
        query: &str,
        input_format: FormatKind,
        target: FormatKind,
    ) -> ComparisonResult {
        let prompt = build_prompt(dataset_text, query, target);
        let input_tokens = self.tokenizer.count_tokens(&prompt.data_only);

        let (response_text, mocked) = match self.llm.generate(&prompt.full).await {
            Ok(text) => (text, false),
            Err(e) => {
                tracing::warn!(
                    "⚠️ LLM call for {} output failed ({}), using mock response",
                    target.label(),
                    e
                );
                (mock_response(target, query), true)
            }
        };

        let output_tokens = self.tokenizer.count_tokens(&response_text);
        let cost = self.pricing.estimate_cost(input_tokens, output_tokens);

        ComparisonResult {
            label: format!("{} → {}", input_format.label(), target.label()),
            output_format: target,
            input_tokens,
            output_tokens,
            input_cost: cost.input_cost,
            output_cost: cost.output_cost,
            total_cost: cost.total_cost,
            response_text,
            mocked,
        }
    }
}
