//! Per-frame detection rows as read from and written back to tables.

use serde::{Deserialize, Serialize};

use crate::ledger::Rect;

/// One tracker detection in one frame.
///
/// Extra columns in the source table are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRow {
    /// Tracker identity
    pub object_id: u64,
    pub frame_number: u32,
    /// Semantic label
    pub object_name: String,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl DetectionRow {
    pub fn new(
        object_id: u64,
        frame_number: u32,
        object_name: impl Into<String>,
        bbox: Rect,
    ) -> Self {
        Self {
            object_id,
            frame_number,
            object_name: object_name.into(),
            x1: bbox.x1,
            y1: bbox.y1,
            x2: bbox.x2,
            y2: bbox.y2,
        }
    }

    pub fn bbox(&self) -> Rect {
        Rect::from_tlbr(self.x1, self.y1, self.x2, self.y2)
    }

    /// Tag this row with the consolidated object its tracker was merged into.
    pub fn annotate(&self, unique_id: u64) -> AnnotatedRow {
        AnnotatedRow {
            object_id: self.object_id,
            frame_number: self.frame_number,
            object_name: self.object_name.clone(),
            x1: self.x1,
            y1: self.y1,
            x2: self.x2,
            y2: self.y2,
            unique_id,
        }
    }
}

/// A detection row carrying its consolidated object id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedRow {
    pub object_id: u64,
    pub frame_number: u32,
    pub object_name: String,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub unique_id: u64,
}

impl AnnotatedRow {
    pub const HEADERS: [&'static str; 8] = [
        "object_id",
        "frame_number",
        "object_name",
        "x1",
        "y1",
        "x2",
        "y2",
        "unique_id",
    ];
}
