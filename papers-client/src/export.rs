//! Output sinks for article records
//!
//! Records are written either as CSV with a fixed six-column header or as
//! one JSON object per line for console display. Both use [`ArticleRow`],
//! so the column names and the `"None"` sentinel are identical in either form.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::pubmed::models::{ArticleRecord, ArticleRow};

/// CSV header, in column order
pub const CSV_HEADER: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// Write records as CSV to any writer
///
/// The header row is always written, so zero records produce a header-only file.
pub fn write_csv<W: Write>(writer: W, records: &[ArticleRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for record in records {
        wtr.serialize(record.to_row())?;
    }

    wtr.flush()?;
    Ok(())
}

/// Save records to a CSV file, replacing any existing file
///
/// # Example
///
/// ```no_run
/// use papers_client::export::save_to_csv;
///
/// save_to_csv("papers.csv", &[])?;
/// # Ok::<(), papers_client::PapersError>(())
/// ```
#[instrument(skip_all, fields(path = %path.as_ref().display(), records = records.len()))]
pub fn save_to_csv<P: AsRef<Path>>(path: P, records: &[ArticleRecord]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_csv(BufWriter::new(file), records)?;
    debug!("CSV written");
    Ok(())
}

/// Write each record's dictionary form, one JSON object per line
pub fn print_records<W: Write>(mut writer: W, records: &[ArticleRecord]) -> Result<()> {
    for record in records {
        let row: ArticleRow = record.to_row();
        serde_json::to_writer(&mut writer, &row)?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}
