//! One tracker's observed lifespan before consolidation.

use serde::Serialize;

use crate::error::{LedgerError, Result};
use crate::ledger::rect::Rect;

/// A tracker fragment: identity, label, first/last frame and first/last box.
///
/// Immutable once built; the constructor rejects inverted frame spans and
/// malformed boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    identity: u64,
    label: String,
    start_frame: u32,
    end_frame: u32,
    start_box: Rect,
    end_box: Rect,
}

impl Fragment {
    pub fn new(
        identity: u64,
        label: impl Into<String>,
        start_frame: u32,
        end_frame: u32,
        start_box: Rect,
        end_box: Rect,
    ) -> Result<Self> {
        if start_frame > end_frame {
            return Err(LedgerError::InvertedFrames {
                identity,
                start_frame,
                end_frame,
            });
        }
        start_box.validate()?;
        end_box.validate()?;

        Ok(Self {
            identity,
            label: label.into(),
            start_frame,
            end_frame,
            start_box,
            end_box,
        })
    }

    pub fn identity(&self) -> u64 {
        self.identity
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn start_frame(&self) -> u32 {
        self.start_frame
    }

    pub fn end_frame(&self) -> u32 {
        self.end_frame
    }

    pub fn start_box(&self) -> Rect {
        self.start_box
    }

    pub fn end_box(&self) -> Rect {
        self.end_box
    }

    pub fn duration(&self) -> u32 {
        self.end_frame - self.start_frame
    }

    /// Flat row for the raw (pre-consolidation) export.
    ///
    /// `unique_id` is the object the fragment was consolidated into, if known.
    pub fn to_record(&self, unique_id: Option<u64>) -> FragmentRecord {
        let [start_x1, start_y1, start_x2, start_y2] = self.start_box.to_tlbr();
        let [end_x1, end_y1, end_x2, end_y2] = self.end_box.to_tlbr();
        FragmentRecord {
            object_id: self.identity,
            unique_id,
            object_name: self.label.clone(),
            start_frame: self.start_frame,
            end_frame: self.end_frame,
            duration: self.duration(),
            start_x1,
            start_y1,
            start_x2,
            start_y2,
            end_x1,
            end_y1,
            end_x2,
            end_y2,
        }
    }
}

/// One row of the raw fragment table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentRecord {
    pub object_id: u64,
    pub unique_id: Option<u64>,
    pub object_name: String,
    pub start_frame: u32,
    pub end_frame: u32,
    pub duration: u32,
    pub start_x1: f32,
    pub start_y1: f32,
    pub start_x2: f32,
    pub start_y2: f32,
    pub end_x1: f32,
    pub end_y1: f32,
    pub end_x2: f32,
    pub end_y2: f32,
}

impl FragmentRecord {
    pub const HEADERS: [&'static str; 14] = [
        "object_id",
        "unique_id",
        "object_name",
        "start_frame",
        "end_frame",
        "duration",
        "start_x1",
        "start_y1",
        "start_x2",
        "start_y2",
        "end_x1",
        "end_y1",
        "end_x2",
        "end_y2",
    ];
}
