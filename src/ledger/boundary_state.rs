use serde::{Serialize, Serializer};

/// How an object's observed lifespan relates to the start and end of the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum BoundaryState {
    /// Not classified yet
    #[default]
    Unknown,
    /// Visible at both the start and the end of the video
    Stay,
    /// Absent at the start, visible at the end
    Ingress,
    /// Visible at the start, gone before the end
    Outgress,
    /// Neither at the start nor at the end
    IngressAndOutgress,
}

impl BoundaryState {
    /// Classify a span of frames against the video boundaries.
    ///
    /// A frame counts as "at the start" when it is within `boundary_threshold`
    /// of frame 0, and "at the end" when it is within `boundary_threshold` of
    /// `video_length`.
    pub fn classify(
        start_frame: u32,
        end_frame: u32,
        video_length: u32,
        boundary_threshold: u32,
    ) -> Self {
        let at_start = start_frame <= boundary_threshold;
        let at_end = end_frame >= video_length.saturating_sub(boundary_threshold);

        match (at_start, at_end) {
            (true, true) => Self::Stay,
            (true, false) => Self::Outgress,
            (false, true) => Self::Ingress,
            (false, false) => Self::IngressAndOutgress,
        }
    }

    /// Numeric code used in exported tables.
    pub fn code(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Stay => 1,
            Self::Ingress => 2,
            Self::Outgress => 3,
            Self::IngressAndOutgress => 4,
        }
    }
}

impl Serialize for BoundaryState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}
