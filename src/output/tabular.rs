use crate::meta::PageMetaRecord;
use crate::output::{OutputError, OutputResult};
use std::io::Write;
use std::path::Path;

/// Column order of the CSV export
pub const CSV_HEADERS: [&str; 17] = [
    "URL",
    "Title",
    "Description",
    "Canonical",
    "OG Title",
    "OG Description",
    "OG Image",
    "OG URL",
    "OG Type",
    "OG Site Name",
    "Twitter Card",
    "Twitter Title",
    "Twitter Description",
    "Twitter Image",
    "Twitter Site",
    "Status",
    "Error",
];

fn row(record: &PageMetaRecord) -> [&str; 17] {
    [
        &record.url,
        &record.title,
        &record.description,
        &record.canonical,
        &record.og_title,
        &record.og_description,
        &record.og_image,
        &record.og_url,
        &record.og_type,
        &record.og_site_name,
        &record.twitter_card,
        &record.twitter_title,
        &record.twitter_description,
        &record.twitter_image,
        &record.twitter_site,
        record.status.as_str(),
        record.error.as_deref().unwrap_or_default(),
    ]
}

fn write_records<W: Write>(records: &[PageMetaRecord], writer: W) -> OutputResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(CSV_HEADERS)?;
    for record in records {
        csv_writer.write_record(row(record))?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Formats the records as CSV text
///
/// Values containing a comma, quote or newline are quoted, with inner quotes
/// doubled.
pub fn to_csv_string(records: &[PageMetaRecord]) -> OutputResult<String> {
    let mut buffer = Vec::new();
    write_records(records, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| OutputError::Format(e.to_string()))
}

/// Writes the records as a CSV file
pub fn write_csv(records: &[PageMetaRecord], output_path: &Path) -> OutputResult<()> {
    let file = std::fs::File::create(output_path)?;
    write_records(records, file)?;

    tracing::info!("Wrote {} rows to {}", records.len(), output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_row() {
        let text = to_csv_string(&[]).unwrap();
        assert_eq!(
            text.trim_end(),
            "URL,Title,Description,Canonical,OG Title,OG Description,OG Image,OG URL,OG Type,\
             OG Site Name,Twitter Card,Twitter Title,Twitter Description,Twitter Image,\
             Twitter Site,Status,Error"
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let mut record = PageMetaRecord::empty("https://example.com/a");
        record.title = "Hello, \"World\"".to_string();
        record.description = "line one\nline two".to_string();

        let text = to_csv_string(&[record]).unwrap();
        let data = text.lines().nth(1).unwrap();
        assert!(data.starts_with("https://example.com/a,\"Hello, \"\"World\"\"\",\"line one"));
        assert!(text.contains("line two\""));
    }

    #[test]
    fn test_error_row() {
        let record = PageMetaRecord::failed("https://example.com/gone", "HTTP 404 for https://example.com/gone");
        let text = to_csv_string(&[record]).unwrap();
        let data = text.lines().nth(1).unwrap();
        assert!(data.ends_with(",error,HTTP 404 for https://example.com/gone"));
    }

    #[test]
    fn test_write_csv_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        write_csv(&[PageMetaRecord::empty("https://example.com/")], file.path()).unwrap();

        let mut reader = csv::Reader::from_path(file.path()).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "https://example.com/");
        assert_eq!(&rows[0][15], "success");
    }
}
