use crate::core::encoder::encode;
use crate::core::{Dataset, FormatKind, Record};
use crate::utils::error::{AppError, Result};
use std::io::Read;
use std::path::Path;

impl Dataset {
    /// 從 CSV 檔案載入資料集，第一列為欄位名稱
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| AppError::DatasetError {
                message: format!("Invalid dataset filename: {}", path.display()),
            })?;

        let mut dataset = Self::from_reader(file)?;
        dataset.filename = filename;
        dataset.path = path.to_path_buf();
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        // flexible 預設為 false，欄位數不一致的列會回傳錯誤
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let record: Record = columns
                .iter()
                .cloned()
                .zip(row.iter().map(str::to_string))
                .collect();
            records.push(record);
        }

        // 沒有資料列時欄位清單為空
        let columns = if records.is_empty() { Vec::new() } else { columns };

        Ok(Self {
            filename: String::new(),
            path: Default::default(),
            columns,
            records,
        })
    }
}

/// 資料集的 JSON 與 TOON 文字，啟動時計算一次
#[derive(Debug, Clone)]
pub struct EncodedDataset {
    json: String,
    toon: String,
}

impl EncodedDataset {
    pub fn new(dataset: &Dataset) -> Result<Self> {
        Ok(Self {
            json: encode(FormatKind::Json, &dataset.records)?,
            toon: encode(FormatKind::Toon, &dataset.records)?,
        })
    }

    pub fn text(&self, format: FormatKind) -> &str {
        match format {
            FormatKind::Json => &self.json,
            FormatKind::Toon => &self.toon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_preserves_column_order() {
        let csv = "title,id,remote\nEngineer,1,true\nDesigner,2,false\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(dataset.columns, vec!["title", "id", "remote"]);
        assert_eq!(dataset.len(), 2);
        let keys: Vec<&String> = dataset.records[0].keys().collect();
        assert_eq!(keys, vec!["title", "id", "remote"]);
        assert_eq!(dataset.records[1]["title"], "Designer");
    }

    #[test]
    fn test_ragged_rows_fail_to_load() {
        let csv = "id,title\n1,Engineer\n2\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::CsvError(_)));
    }

    #[test]
    fn test_header_only_file_is_empty_dataset() {
        let dataset = Dataset::from_reader("id,title\n".as_bytes()).unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.columns.is_empty());
    }

    #[test]
    fn test_quoted_values_are_unquoted() {
        let csv = "id,title\n1,\"Engineer, Senior\"\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.records[0]["title"], "Engineer, Senior");
    }

    #[test]
    fn test_from_csv_file_records_filename() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "id,title").unwrap();
        writeln!(file, "1,Engineer").unwrap();

        let dataset = Dataset::from_csv_file(file.path()).unwrap();
        assert!(dataset.filename.ends_with(".csv"));
        assert_eq!(dataset.path.as_path(), file.path());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Dataset::from_csv_file("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, AppError::IoError(_)));
    }

    #[test]
    fn test_bundled_dataset_loads() {
        let dataset =
            Dataset::from_csv_file(concat!(env!("CARGO_MANIFEST_DIR"), "/data/job_records.csv"))
                .unwrap();
        assert_eq!(dataset.len(), 60);
        assert_eq!(dataset.columns[0], "id");
        assert!(dataset
            .records
            .iter()
            .all(|r| r.keys().eq(dataset.columns.iter())));
    }

    #[test]
    fn test_encoded_dataset() {
        let dataset = Dataset::from_reader("id,title\n1,Engineer\n".as_bytes()).unwrap();
        let encoded = EncodedDataset::new(&dataset).unwrap();
        assert_eq!(encoded.text(FormatKind::Toon), "[1]{id,title}:\n  1,Engineer");
        assert!(encoded.text(FormatKind::Json).starts_with("[\n  {"));
    }
}
