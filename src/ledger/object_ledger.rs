//! Online consolidation of tracker fragments into persistent objects.

use log::debug;

use crate::error::{LedgerError, Result};
use crate::ledger::boundary_state::BoundaryState;
use crate::ledger::fragment::Fragment;
use crate::ledger::matching::{self, AssignmentResult};
use crate::ledger::object::{Object, ObjectRecord};
use crate::ledger::rect::{Rect, iou_batch};

pub const DEFAULT_IOU_THRESHOLD: f32 = 0.3;
pub const DEFAULT_BOUNDARY_THRESHOLD: u32 = 30;
pub const DEFAULT_MIN_COUNT_DURATION: u32 = 75;

/// Configuration for the ObjectLedger.
///
/// There is no `Default`: the video length has no safe fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    /// Minimum IoU between a fragment's first box and an object's last box.
    pub iou_threshold: f32,
    /// Maximum frame distance between an object's end and a fragment's start.
    pub gap_threshold: u32,
    /// Frames from either end of the video that still count as "at the boundary".
    pub boundary_threshold: u32,
    /// Total number of frames in the video.
    pub video_length: u32,
    /// Objects must last strictly longer than this to be counted.
    pub min_count_duration: u32,
}

impl LedgerConfig {
    /// Defaults for a video of `video_length` frames; the gap threshold is 1% of it.
    ///
    /// Gaps are whole frames compared with `<`, so `gap < video_length / 100`
    /// holds exactly when `gap < ceil(video_length / 100)`.
    pub fn for_video(video_length: u32) -> Self {
        Self {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            gap_threshold: video_length.div_ceil(100),
            boundary_threshold: DEFAULT_BOUNDARY_THRESHOLD,
            video_length,
            min_count_duration: DEFAULT_MIN_COUNT_DURATION,
        }
    }

    pub fn with_iou_threshold(mut self, iou_threshold: f32) -> Self {
        self.iou_threshold = iou_threshold;
        self
    }

    pub fn with_gap_threshold(mut self, gap_threshold: u32) -> Self {
        self.gap_threshold = gap_threshold;
        self
    }

    pub fn with_boundary_threshold(mut self, boundary_threshold: u32) -> Self {
        self.boundary_threshold = boundary_threshold;
        self
    }

    pub fn with_min_count_duration(mut self, min_count_duration: u32) -> Self {
        self.min_count_duration = min_count_duration;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.video_length == 0 {
            return Err(LedgerError::config("video length must be at least one frame"));
        }
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(LedgerError::config(format!(
                "IoU threshold {} is outside [0, 1]",
                self.iou_threshold
            )));
        }
        Ok(())
    }
}

/// Holds every object seen so far and decides, fragment by fragment,
/// whether to extend an existing object or start a new one.
///
/// Match candidates are read from the objects themselves on every update,
/// so an object's end box is the only copy of its end position.
#[derive(Debug, Clone)]
pub struct ObjectLedger {
    objects: Vec<Object>,
    config: LedgerConfig,
}

impl ObjectLedger {
    pub fn new(config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            objects: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Consolidate a fragment using the configured gap threshold.
    pub fn ingest(&mut self, fragment: &Fragment) -> Result<u64> {
        self.update(fragment, self.config.gap_threshold)
    }

    /// Merge `fragment` into the best matching object or register it as a new one.
    ///
    /// Returns the id of the object that now owns the fragment. Only the
    /// assignment's chosen object is tested against the label and gap gate;
    /// if it fails, the fragment starts a new object.
    ///
    /// Object ids are taken from fragment identities, so a fragment whose
    /// identity already names an object is rejected with
    /// [`LedgerError::DuplicateIdentity`].
    pub fn update(&mut self, fragment: &Fragment, gap_threshold: u32) -> Result<u64> {
        if self.get(fragment.identity()).is_some() {
            return Err(LedgerError::DuplicateIdentity(fragment.identity()));
        }
        if self.objects.is_empty() {
            return Ok(self.add_object(fragment));
        }

        let end_boxes: Vec<Rect> = self.objects.iter().map(Object::end_box).collect();
        let scores = iou_batch(&[fragment.start_box()], &end_boxes)?;

        let AssignmentResult { matches, .. } =
            matching::linear_assignment(&scores, self.config.iou_threshold)?;

        for (_, iobject) in matches {
            let object = &mut self.objects[iobject];
            let gap = fragment.start_frame().abs_diff(object.end_frame());
            if object.label() == fragment.label() && gap < gap_threshold {
                object.update_from_fragment(fragment);
                debug!(
                    "fragment {} merged into object {} (gap {} frames, now ends at {})",
                    fragment.identity(),
                    object.object_id(),
                    gap,
                    object.end_frame()
                );
                return Ok(object.object_id());
            }
            debug!(
                "fragment {} overlaps object {} but fails the gate (label {:?} vs {:?}, gap {})",
                fragment.identity(),
                object.object_id(),
                fragment.label(),
                object.label(),
                gap
            );
        }

        Ok(self.add_object(fragment))
    }

    fn add_object(&mut self, fragment: &Fragment) -> u64 {
        let object = Object::from_fragment(fragment);
        let object_id = object.object_id();
        debug!(
            "fragment {} starts object {} ({}, frames {}-{})",
            fragment.identity(),
            object_id,
            object.label(),
            object.start_frame(),
            object.end_frame()
        );
        self.objects.push(object);
        object_id
    }

    /// Objects in creation order.
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn get(&self, object_id: u64) -> Option<&Object> {
        self.objects.iter().find(|o| o.object_id() == object_id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of objects whose duration strictly exceeds `min_duration`.
    pub fn count_longer_than(&self, min_duration: u32) -> usize {
        self.objects
            .iter()
            .filter(|o| o.duration() > min_duration)
            .count()
    }

    /// Count using the configured minimum duration.
    pub fn counted_objects(&self) -> usize {
        self.count_longer_than(self.config.min_count_duration)
    }

    pub fn classify(&self, object: &Object) -> BoundaryState {
        object.classify(self.config.video_length, self.config.boundary_threshold)
    }

    /// Classified flat records for every object, in creation order.
    pub fn records(&self) -> Vec<ObjectRecord> {
        self.objects
            .iter()
            .map(|o| o.to_record(self.classify(o)))
            .collect()
    }
}
