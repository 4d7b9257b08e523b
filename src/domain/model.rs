use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// 單筆資料列：欄位名稱 → 字串值，保留 CSV 欄位順序
pub type Record = IndexMap<String, String>;

/// 啟動時載入一次的唯讀資料集
#[derive(Debug, Clone)]
pub struct Dataset {
    pub filename: String,
    pub path: PathBuf,
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    Json,
    Toon,
}

impl FormatKind {
    /// 依固定順序：JSON 在前，TOON 在後
    pub const ALL: [FormatKind; 2] = [FormatKind::Json, FormatKind::Toon];

    /// 解析請求參數：`json` 以外的值一律視為 TOON，未提供時為 JSON
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None => FormatKind::Json,
            Some(value) if value.eq_ignore_ascii_case("json") => FormatKind::Json,
            Some(_) => FormatKind::Toon,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::Json => "json",
            FormatKind::Toon => "toon",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormatKind::Json => "JSON",
            FormatKind::Toon => "TOON",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub label: String,
    pub output_format: FormatKind,
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
    pub response_text: String,
    #[serde(skip)]
    pub mocked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    pub output_tokens_savings_pct: f64,
    pub total_cost_savings_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub input_format: FormatKind,
    pub results: Vec<ComparisonResult>,
    pub comparison: Savings,
}

impl ComparisonReport {
    pub fn result_for(&self, format: FormatKind) -> Option<&ComparisonResult> {
        self.results.iter().find(|r| r.output_format == format)
    }
}
