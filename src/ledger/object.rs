//! Consolidated object assembled from one or more fragments.

use serde::Serialize;

use crate::ledger::boundary_state::BoundaryState;
use crate::ledger::fragment::Fragment;
use crate::ledger::rect::Rect;

/// A persistent object spanning every fragment merged into it.
///
/// `start_frame` and `start_box` are fixed at creation. `end_frame` only
/// grows, and all mutation goes through [`Object::update_from_fragment`].
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    object_id: u64,
    label: String,
    start_frame: u32,
    end_frame: u32,
    start_box: Rect,
    end_box: Rect,
    fragment_count: usize,
}

impl Object {
    /// Create an object from the first fragment assigned to it.
    pub fn from_fragment(fragment: &Fragment) -> Self {
        Self {
            object_id: fragment.identity(),
            label: fragment.label().to_string(),
            start_frame: fragment.start_frame(),
            end_frame: fragment.end_frame(),
            start_box: fragment.start_box(),
            end_box: fragment.end_box(),
            fragment_count: 1,
        }
    }

    pub fn object_id(&self) -> u64 {
        self.object_id
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

    /// Position of the most recently absorbed fragment's last box.
    pub fn end_box(&self) -> Rect {
        self.end_box
    }

    pub fn duration(&self) -> u32 {
        self.end_frame - self.start_frame
    }

    /// Number of fragments absorbed, including the one that created the object.
    pub fn fragment_count(&self) -> usize {
        self.fragment_count
    }

    /// Absorb a matched fragment.
    ///
    /// The end frame only moves forward, but the end box is always taken
    /// from the latest fragment even when its end frame is earlier.
    pub fn update_from_fragment(&mut self, fragment: &Fragment) {
        self.end_frame = self.end_frame.max(fragment.end_frame());
        self.end_box = fragment.end_box();
        self.fragment_count += 1;
    }

    pub fn classify(&self, video_length: u32, boundary_threshold: u32) -> BoundaryState {
        BoundaryState::classify(
            self.start_frame,
            self.end_frame,
            video_length,
            boundary_threshold,
        )
    }

    /// Flat row with an explicit state. Use [`BoundaryState::Unknown`] for unclassified output.
    pub fn to_record(&self, state: BoundaryState) -> ObjectRecord {
        let [start_x1, start_y1, start_x2, start_y2] = self.start_box.to_tlbr();
        let [end_x1, end_y1, end_x2, end_y2] = self.end_box.to_tlbr();
        ObjectRecord {
            object_id: self.object_id,
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
            state,
        }
    }

    /// Classify against the video boundaries and flatten in one step.
    pub fn to_classified_record(&self, video_length: u32, boundary_threshold: u32) -> ObjectRecord {
        self.to_record(self.classify(video_length, boundary_threshold))
    }
}

/// One row of the consolidated object table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectRecord {
    pub object_id: u64,
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
    pub state: BoundaryState,
}

impl ObjectRecord {
    pub const HEADERS: [&'static str; 14] = [
        "object_id",
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
        "state",
    ];
}
