//! ConsolidationPipeline for turning detection rows into object tables.

use std::collections::HashMap;

use log::{info, warn};

use crate::error::Result;
use crate::ledger::{FragmentRecord, LedgerConfig, ObjectLedger, ObjectRecord};
use crate::table::detection::{AnnotatedRow, DetectionRow};
use crate::table::fragment_builder::FragmentBuilder;

/// Everything produced by one consolidation run.
#[derive(Debug, Clone)]
pub struct Consolidation {
    /// Classified objects, in creation order.
    pub objects: Vec<ObjectRecord>,
    /// Raw fragments with the object each was merged into, in tracker-identity order.
    pub fragments: Vec<FragmentRecord>,
    /// Input rows tagged with their consolidated object, in input order.
    pub annotated_rows: Vec<AnnotatedRow>,
    /// Objects lasting longer than the configured minimum duration.
    pub counted_objects: usize,
    pub ledger: ObjectLedger,
}

/// Bundles fragment building with the object ledger.
///
/// Groups rows into fragments, feeds them to the ledger in tracker-identity
/// order and collects every output table.
pub struct ConsolidationPipeline {
    ledger: ObjectLedger,
}

impl ConsolidationPipeline {
    /// Create a new pipeline with the given ledger config.
    pub fn new(config: LedgerConfig) -> Result<Self> {
        Ok(Self {
            ledger: ObjectLedger::new(config)?,
        })
    }

    /// Create a new pipeline with the default config for a video of `video_length` frames.
    pub fn for_video(video_length: u32) -> Result<Self> {
        Self::new(LedgerConfig::for_video(video_length))
    }

    /// Consolidate every row and return the output tables.
    ///
    /// Empty input is valid and yields empty tables. Fragments are validated
    /// before any of them reach the ledger, so one malformed box or inverted
    /// frame span fails the whole run and no partial tables are produced.
    pub fn run(mut self, rows: &[DetectionRow]) -> Result<Consolidation> {
        if rows.is_empty() {
            warn!("no detection rows to consolidate");
        }

        let fragments = FragmentBuilder::new().rows(rows).build()?;

        let mut assigned = HashMap::with_capacity(fragments.len());
        let mut fragment_records = Vec::with_capacity(fragments.len());
        for fragment in &fragments {
            let unique_id = self.ledger.ingest(fragment)?;
            assigned.insert(fragment.identity(), unique_id);
            fragment_records.push(fragment.to_record(Some(unique_id)));
        }

        // Every row's identity produced a fragment above.
        let annotated_rows = rows
            .iter()
            .filter_map(|row| assigned.get(&row.object_id).map(|&id| row.annotate(id)))
            .collect();

        let counted_objects = self.ledger.counted_objects();
        info!(
            "{} rows, {} fragments consolidated into {} objects ({} longer than {} frames)",
            rows.len(),
            fragments.len(),
            self.ledger.len(),
            counted_objects,
            self.ledger.config().min_count_duration
        );

        Ok(Consolidation {
            objects: self.ledger.records(),
            fragments: fragment_records,
            annotated_rows,
            counted_objects,
            ledger: self.ledger,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{BoundaryState, Rect};

    fn row(id: u64, frame: u32, label: &str, x: f32) -> DetectionRow {
        DetectionRow::new(id, frame, label, Rect::from_tlbr(x, 0.0, x + 10.0, 10.0))
    }

    #[test]
    fn test_pipeline_merges_and_annotates() {
        let rows = vec![
            row(1, 0, "car", 0.0),
            row(2, 12, "car", 1.0),
            row(1, 10, "car", 0.0),
            row(2, 20, "car", 1.0),
            row(3, 5, "person", 200.0),
        ];
        let config = LedgerConfig::for_video(1000).with_gap_threshold(30);
        let result = ConsolidationPipeline::new(config).unwrap().run(&rows).unwrap();

        assert_eq!(result.objects.len(), 2);
        assert_eq!(result.objects[0].object_id, 1);
        assert_eq!(result.objects[0].end_frame, 20);
        assert_eq!(result.objects[0].state, BoundaryState::Outgress);

        let unique: Vec<Option<u64>> = result.fragments.iter().map(|f| f.unique_id).collect();
        assert_eq!(unique, vec![Some(1), Some(1), Some(3)]);

        let annotated: Vec<(u64, u64)> = result
            .annotated_rows
            .iter()
            .map(|r| (r.object_id, r.unique_id))
            .collect();
        assert_eq!(annotated, vec![(1, 1), (2, 1), (1, 1), (2, 1), (3, 3)]);
        assert_eq!(result.counted_objects, 0);
    }

    #[test]
    fn test_pipeline_malformed_row_fails_whole_run() {
        let rows = vec![
            row(1, 0, "car", 0.0),
            DetectionRow::new(2, 3, "car", Rect::from_tlbr(5.0, 5.0, 5.0, 15.0)),
        ];
        let err = ConsolidationPipeline::for_video(500)
            .unwrap()
            .run(&rows)
            .unwrap_err();
        assert!(matches!(err, crate::error::LedgerError::MalformedBox { .. }));
    }

    #[test]
    fn test_pipeline_empty_input() {
        let result = ConsolidationPipeline::for_video(500).unwrap().run(&[]).unwrap();
        assert!(result.objects.is_empty());
        assert!(result.fragments.is_empty());
        assert!(result.annotated_rows.is_empty());
        assert!(result.ledger.is_empty());
    }
}
