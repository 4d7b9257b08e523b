use crate::core::CostBreakdown;
use serde::{Deserialize, Serialize};

const TOKENS_PER_UNIT: f64 = 1_000_000.0;

/// 每百萬 token 的價格（美元），預設為 Gemini 2.5 Flash Lite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            input_per_million: 0.075,
            output_per_million: 0.30,
        }
    }
}

impl Pricing {
    pub fn estimate_cost(&self, input_tokens: usize, output_tokens: usize) -> CostBreakdown {
        let input_cost = input_tokens as f64 / TOKENS_PER_UNIT * self.input_per_million;
        let output_cost = output_tokens as f64 / TOKENS_PER_UNIT * self.output_per_million;

        CostBreakdown {
            input_cost: round_to(input_cost, 6),
            output_cost: round_to(output_cost, 6),
            total_cost: round_to(input_cost + output_cost, 6),
        }
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// (baseline - candidate) / baseline，分母為 0 時回傳 0
pub fn savings_ratio(baseline: f64, candidate: f64) -> f64 {
    if baseline > 0.0 {
        round_to((baseline - candidate) / baseline, 2)
    } else {
        0.0
    }
}
