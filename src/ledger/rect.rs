use ndarray::Array2;

use crate::error::{LedgerError, Result};

/// Axis-aligned bounding box stored in TLBR format.
///
/// Tracker output rows carry corner coordinates `(x1, y1, x2, y2)`, so the
/// box keeps them as-is. A well-formed box has `x1 < x2` and `y1 < y2`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Top-left x coordinate
    pub x1: f32,
    /// Top-left y coordinate
    pub y1: f32,
    /// Bottom-right x coordinate
    pub x2: f32,
    /// Bottom-right y coordinate
    pub y2: f32,
}

impl Rect {
    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Check that every coordinate is finite and the box has positive width and height.
    pub fn validate(&self) -> Result<()> {
        let finite = self.to_tlbr().iter().all(|c| c.is_finite());
        if finite && self.width() > 0.0 && self.height() > 0.0 {
            Ok(())
        } else {
            Err(LedgerError::MalformedBox {
                x1: self.x1,
                y1: self.y1,
                x2: self.x2,
                y2: self.y2,
            })
        }
    }

    /// Calculate Intersection over Union (IoU) with another bounding box.
    ///
    /// Assumes both boxes are valid; use [`iou_score`] at input boundaries.
    pub fn iou(&self, other: &Rect) -> f32 {
        let x1 = self.x1.max(other.x1);
        let y1 = self.y1.max(other.y1);
        let x2 = self.x2.min(other.x2);
        let y2 = self.y2.min(other.y2);

        let inter_width = (x2 - x1).max(0.0);
        let inter_height = (y2 - y1).max(0.0);
        let inter_area = inter_width * inter_height;

        let union_area = self.area() + other.area() - inter_area;

        if union_area > 0.0 {
            (inter_area / union_area).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Overlap score between two boxes, rejecting degenerate input.
pub fn iou_score(a: &Rect, b: &Rect) -> Result<f32> {
    a.validate()?;
    b.validate()?;
    Ok(a.iou(b))
}

/// Calculate IoU matrix between two sets of bounding boxes.
///
/// Returns a matrix of shape (M, N) where M is the length of `boxes_a`
/// and N is the length of `boxes_b`. Fails on the first malformed box.
pub fn iou_batch(boxes_a: &[Rect], boxes_b: &[Rect]) -> Result<Array2<f32>> {
    for rect in boxes_a.iter().chain(boxes_b) {
        rect.validate()?;
    }

    let mut scores = Array2::zeros((boxes_a.len(), boxes_b.len()));
    for (i, a) in boxes_a.iter().enumerate() {
        for (j, b) in boxes_b.iter().enumerate() {
            scores[[i, j]] = a.iou(b);
        }
    }
    Ok(scores)
}
