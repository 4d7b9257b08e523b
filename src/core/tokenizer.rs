use crate::core::TokenCounter;
use std::sync::Arc;
use tiktoken_rs::{cl100k_base, CoreBPE};

/// cl100k_base BPE，與 LLM 供應商的計價方式最接近
pub struct Cl100kCounter {
    bpe: CoreBPE,
}

impl Cl100kCounter {
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self { bpe: cl100k_base()? })
    }
}

impl TokenCounter for Cl100kCounter {
    fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    fn name(&self) -> &'static str {
        "cl100k_base"
    }
}

/// 字元比例估算，只是近似值。
///
/// 含有 `{` 或 `[` 的文字視為 JSON 類結構，以 3.5 字元 / token 計算，
/// 其餘以 4 字元 / token 計算，皆無條件捨去。
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicCounter;

impl TokenCounter for HeuristicCounter {
    fn count_tokens(&self, text: &str) -> usize {
        let char_count = text.chars().count();

        if text.contains(['{', '[']) {
            // chars / 3.5
            char_count * 2 / 7
        } else {
            char_count / 4
        }
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

/// 啟動時決定一次要使用的 tokenizer
pub fn detect_token_counter() -> Arc<dyn TokenCounter> {
    match Cl100kCounter::load() {
        Ok(counter) => {
            tracing::info!("Using cl100k_base tokenizer");
            Arc::new(counter)
        }
        Err(e) => {
            tracing::warn!(
                "⚠️ cl100k_base tokenizer unavailable ({}), falling back to character-based approximation",
                e
            );
            Arc::new(HeuristicCounter)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_zero_tokens() {
        assert_eq!(HeuristicCounter.count_tokens(""), 0);
        let counter = Cl100kCounter::load().unwrap();
        assert_eq!(counter.count_tokens(""), 0);
    }

    #[test]
    fn test_heuristic_plain_text_divides_by_four() {
        assert_eq!(HeuristicCounter.count_tokens("abcdefgh"), 2);
        assert_eq!(HeuristicCounter.count_tokens("abcdefghijk"), 2);
        assert_eq!(HeuristicCounter.count_tokens("abc"), 0);
    }

    #[test]
    fn test_heuristic_structured_text_divides_by_three_and_a_half() {
        // 7 個字元 → 2
        assert_eq!(HeuristicCounter.count_tokens("{\"a\":1}"), 2);
        // 10 個字元 → floor(2.857) = 2
        assert_eq!(HeuristicCounter.count_tokens("[1,2,3,45]"), 2);
        // 14 個字元 → 4
        assert_eq!(HeuristicCounter.count_tokens("[1]{id,title}:"), 4);
    }

    #[test]
    fn test_heuristic_counts_chars_not_bytes() {
        // 8 個字元，但超過 8 bytes
        assert_eq!(HeuristicCounter.count_tokens("éééééééé"), 2);
    }

    #[test]
    fn test_cl100k_counts_tokens() {
        let counter = Cl100kCounter::load().unwrap();
        assert!(counter.count_tokens("Hello, world!") > 0);
        assert_eq!(counter.name(), "cl100k_base");
    }

    #[test]
    fn test_detect_prefers_exact_tokenizer() {
        let counter = detect_token_counter();
        assert_eq!(counter.name(), "cl100k_base");
    }
}
