use crate::core::FormatKind;

const FRAMING: &str = "You are analyzing job posting data.";

const JSON_EXAMPLE: &str = r#"
Example JSON response:
{
  "results": [
    {"id": 1, "title": "Software Engineer", "company": "TechCorp"},
    {"id": 12, "title": "Data Scientist", "company": "DataFlow"},
    {"id": 25, "title": "Frontend Engineer", "company": "NimbusCorp"}
  ],
  "count": 3
}"#;

const TOON_EXAMPLE: &str = "
Example TOON response:
results[3]{id,title,company}:
  1,Software Engineer,TechCorp
  12,Data Scientist,DataFlow
  25,Frontend Engineer,NimbusCorp
count: 3";

const JSON_INSTRUCTION: &str = "Analyze the data and Respond with VALID JSON ONLY. No markdown code blocks, no explanation, just raw JSON.only give correct answers";

const TOON_INSTRUCTION: &str = "Analyze the data and Respond with VALID TOON FORMAT ONLY. Use the tabular format [N]{fields}: for arrays of uniform objects. No markdown, no explanation, just raw TOON.only give correct answers";

/// 送給 LLM 的完整 prompt，以及只含資料與問題、用於計算輸入成本的 prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub full: String,
    pub data_only: String,
}

fn example_for(format: FormatKind) -> &'static str {
    match format {
        FormatKind::Json => JSON_EXAMPLE,
        FormatKind::Toon => TOON_EXAMPLE,
    }
}

fn instruction_for(format: FormatKind) -> &'static str {
    match format {
        FormatKind::Json => JSON_INSTRUCTION,
        FormatKind::Toon => TOON_INSTRUCTION,
    }
}

pub fn build_prompt(data_text: &str, user_query: &str, output_format: FormatKind) -> Prompt {
    let full = format!(
        "{FRAMING}\n\nDataset:\n{data_text}\n\nUser Query: {user_query}\n\n{}\n\n{}",
        example_for(output_format),
        instruction_for(output_format),
    );

    let data_only = format!("Dataset:\n{data_text}\n\nQuery: {user_query}");

    Prompt { full, data_only }
}
