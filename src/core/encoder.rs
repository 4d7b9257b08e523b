use crate::core::{DatasetEncoder, FormatKind, Record};
use crate::utils::error::Result;

/// 標準 JSON 陣列，兩格縮排
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl DatasetEncoder for JsonEncoder {
    fn encode(&self, records: &[Record]) -> Result<String> {
        Ok(serde_json::to_string_pretty(records)?)
    }
}

/// TOON 表格格式：
///
/// ```text
/// [2]{id,title}:
///   1,Engineer
///   2,Designer
/// ```
///
/// 欄位名稱取自第一筆資料，呼叫端必須保證所有資料列欄位一致。
/// 值不做任何引號處理。
#[derive(Debug, Clone, Copy, Default)]
pub struct ToonEncoder;

impl DatasetEncoder for ToonEncoder {
    fn encode(&self, records: &[Record]) -> Result<String> {
        let Some(first) = records.first() else {
            return Ok(String::new());
        };

        let keys: Vec<&str> = first.keys().map(String::as_str).collect();

        let mut lines = Vec::with_capacity(records.len() + 1);
        lines.push(format!("[{}]{{{}}}:", records.len(), keys.join(",")));

        for record in records {
            let values: Vec<&str> = keys
                .iter()
                .map(|key| record.get(*key).map(String::as_str).unwrap_or(""))
                .collect();
            lines.push(format!("  {}", values.join(",")));
        }

        Ok(lines.join("\n"))
    }
}

static JSON_ENCODER: JsonEncoder = JsonEncoder;
static TOON_ENCODER: ToonEncoder = ToonEncoder;

pub fn encoder_for(format: FormatKind) -> &'static dyn DatasetEncoder {
    match format {
        FormatKind::Json => &JSON_ENCODER,
        FormatKind::Toon => &TOON_ENCODER,
    }
}

pub fn encode(format: FormatKind, records: &[Record]) -> Result<String> {
    encoder_for(format).encode(records)
}
