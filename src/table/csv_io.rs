//! Delimited-text reading and writing.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::ledger::{FragmentRecord, ObjectRecord};
use crate::table::detection::{AnnotatedRow, DetectionRow};

/// A flat record with a fixed header row.
pub trait TableRecord: Serialize {
    fn headers() -> &'static [&'static str];
}

impl TableRecord for ObjectRecord {
    fn headers() -> &'static [&'static str] {
        &ObjectRecord::HEADERS
    }
}

impl TableRecord for FragmentRecord {
    fn headers() -> &'static [&'static str] {
        &FragmentRecord::HEADERS
    }
}

impl TableRecord for AnnotatedRow {
    fn headers() -> &'static [&'static str] {
        &AnnotatedRow::HEADERS
    }
}

/// Read detection rows from CSV with a header row.
pub fn read_detections<R: Read>(reader: R) -> Result<Vec<DetectionRow>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for row in rdr.deserialize::<DetectionRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

pub fn read_detections_from_path(path: impl AsRef<Path>) -> Result<Vec<DetectionRow>> {
    read_detections(File::open(path)?)
}

/// Write records as CSV. The header row is written even when `records` is empty.
pub fn write_records<W: Write, T: TableRecord>(writer: W, records: &[T]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(T::headers())?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_records_to_path<T: TableRecord>(path: impl AsRef<Path>, records: &[T]) -> Result<()> {
    write_records(File::create(path)?, records)
}
