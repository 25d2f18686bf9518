use crate::meta::PageMetaRecord;
use crate::output::OutputResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serializes the records as a pretty-printed JSON array
pub fn to_json_string(records: &[PageMetaRecord]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Writes the records verbatim as a JSON array
pub fn write_json(records: &[PageMetaRecord], output_path: &Path) -> OutputResult<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!("Wrote {} records to {}", records.len(), output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_json_round_trips_records() {
        let records = vec![
            PageMetaRecord::empty("https://example.com/"),
            PageMetaRecord::failed("https://example.com/gone", "HTTP 404"),
        ];

        let file = NamedTempFile::new().unwrap();
        write_json(&records, file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let parsed: Vec<PageMetaRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_json_string_shape() {
        let json = to_json_string(&[PageMetaRecord::failed("https://example.com/x", "boom")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["status"], "error");
        assert_eq!(value[0]["error"], "boom");
        assert_eq!(value[0]["ogImage"], "");
    }
}
