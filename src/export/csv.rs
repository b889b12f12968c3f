use crate::export::model::{EntryExport, get_headers};
use csv::Writer;

/// Write the history rows as CSV to the given file.
pub fn write_csv(path: &str, rows: &[EntryExport]) -> std::io::Result<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(get_headers())?;

    for row in rows {
        wtr.write_record(row.to_row())?;
    }

    wtr.flush()?;
    Ok(())
}
