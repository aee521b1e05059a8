//! Builder that groups detection rows into tracker fragments.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::ledger::{Fragment, Rect};
use crate::table::detection::DetectionRow;

/// First and last sighting of one tracker identity.
#[derive(Debug, Clone)]
struct Span {
    label: String,
    start_frame: u32,
    start_box: Rect,
    end_frame: u32,
    end_box: Rect,
}

/// Builder for creating `Fragment`s from detection rows in any order.
///
/// Rows are grouped by tracker identity. The earliest frame gives the start
/// box and the latest frame gives the end box; on frame ties the row seen
/// first wins. The label comes from the first row seen for the identity.
#[derive(Debug, Clone, Default)]
pub struct FragmentBuilder {
    spans: BTreeMap<u64, Span>,
}

impl FragmentBuilder {
    /// Create a new, empty fragment builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single detection row.
    pub fn push(&mut self, row: &DetectionRow) {
        let bbox = row.bbox();
        self.spans
            .entry(row.object_id)
            .and_modify(|span| {
                if row.frame_number < span.start_frame {
                    span.start_frame = row.frame_number;
                    span.start_box = bbox;
                }
                if row.frame_number > span.end_frame {
                    span.end_frame = row.frame_number;
                    span.end_box = bbox;
                }
            })
            .or_insert_with(|| Span {
                label: row.object_name.clone(),
                start_frame: row.frame_number,
                start_box: bbox,
                end_frame: row.frame_number,
                end_box: bbox,
            });
    }

    /// Add every row from an iterator.
    pub fn rows<'a>(mut self, rows: impl IntoIterator<Item = &'a DetectionRow>) -> Self {
        for row in rows {
            self.push(row);
        }
        self
    }

    /// Number of distinct tracker identities seen so far.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Build the final fragments, ordered by tracker identity.
    pub fn build(self) -> Result<Vec<Fragment>> {
        self.spans
            .into_iter()
            .map(|(identity, span)| {
                Fragment::new(
                    identity,
                    span.label,
                    span.start_frame,
                    span.end_frame,
                    span.start_box,
                    span.end_box,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;

    fn row(id: u64, frame: u32, label: &str, x: f32) -> DetectionRow {
        DetectionRow::new(id, frame, label, Rect::from_tlbr(x, 0.0, x + 10.0, 10.0))
    }

    #[test]
    fn test_groups_by_identity_in_order() {
        let rows = vec![
            row(7, 5, "car", 0.0),
            row(2, 1, "person", 50.0),
            row(7, 3, "car", 1.0),
            row(7, 9, "car", 2.0),
            row(2, 4, "person", 51.0),
        ];
        let fragments = FragmentBuilder::new().rows(&rows).build().unwrap();

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].identity(), 2);
        assert_eq!(fragments[1].identity(), 7);

        let car = &fragments[1];
        assert_eq!(car.start_frame(), 3);
        assert_eq!(car.end_frame(), 9);
        assert_eq!(car.start_box().x1, 1.0);
        assert_eq!(car.end_box().x1, 2.0);
    }

    #[test]
    fn test_first_row_wins_on_frame_ties() {
        let rows = vec![row(1, 4, "car", 0.0), row(1, 4, "car", 30.0)];
        let fragments = FragmentBuilder::new().rows(&rows).build().unwrap();
        assert_eq!(fragments[0].start_box().x1, 0.0);
        assert_eq!(fragments[0].end_box().x1, 0.0);
        assert_eq!(fragments[0].duration(), 0);
    }

    #[test]
    fn test_empty_builder() {
        let builder = FragmentBuilder::new();
        assert!(builder.is_empty());
        assert!(builder.build().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_row_box_fails_build() {
        let bad = DetectionRow::new(3, 0, "car", Rect::from_tlbr(5.0, 5.0, 5.0, 9.0));
        let err = FragmentBuilder::new().rows([&bad]).build().unwrap_err();
        assert!(matches!(err, LedgerError::MalformedBox { .. }));
    }
}
