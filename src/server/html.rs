use crate::core::Dataset;

const HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Job Postings Preview</title>
    <style>
        body { font-family: system-ui, -apple-system, sans-serif; padding: 20px; background: #f8fafc; }
        h1 { color: #1e293b; }
        table { width: 100%; border-collapse: collapse; background: white; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
        th, td { padding: 12px; text-align: left; border-bottom: 1px solid #e2e8f0; }
        th { background: #f1f5f9; font-weight: 600; color: #475569; position: sticky; top: 0; }
        tr:hover { background: #f8fafc; }
    </style>
</head>
<body>
"#;

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 整份資料集的 HTML 表格預覽
pub fn render_table_preview(dataset: &Dataset) -> String {
    let mut html = String::from(HEAD);
    html.push_str(&format!(
        "    <h1>Job Postings - All {} Rows</h1>\n    <table>\n        <thead>\n            <tr>",
        dataset.len()
    ));

    for column in &dataset.columns {
        html.push_str(&format!("<th>{}</th>", escape_html(column)));
    }
    html.push_str("</tr></thead><tbody>");

    for record in &dataset.records {
        html.push_str("<tr>");
        for value in record.values() {
            html.push_str(&format!("<td>{}</td>", escape_html(value)));
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table></body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("R&D <lead>"), "R&amp;D &lt;lead&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_preview_lists_columns_and_rows() {
        let dataset = Dataset::from_reader("id,title\n1,Engineer\n2,<b>QA</b>\n".as_bytes()).unwrap();
        let html = render_table_preview(&dataset);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("All 2 Rows"));
        assert!(html.contains("<th>id</th><th>title</th></tr>"));
        assert!(html.contains("<tr><td>1</td><td>Engineer</td></tr>"));
        assert!(html.contains("<td>&lt;b&gt;QA&lt;/b&gt;</td>"));
        assert!(html.ends_with("</tbody></table></body></html>"));
    }
}
