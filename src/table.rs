//! Tabular input and output around the object ledger.
//!
//! Reads per-frame detection rows, groups them into tracker fragments,
//! feeds the ledger in tracker-identity order and writes the resulting
//! object, fragment and annotated-row tables as CSV.

mod csv_io;
mod detection;
mod fragment_builder;
mod pipeline;

pub use csv_io::{
    TableRecord, read_detections, read_detections_from_path, write_records, write_records_to_path,
};
pub use detection::{AnnotatedRow, DetectionRow};
pub use fragment_builder::FragmentBuilder;
pub use pipeline::{Consolidation, ConsolidationPipeline};
