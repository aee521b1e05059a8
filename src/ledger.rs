mod boundary_state;
mod fragment;
mod matching;
mod object;
mod object_ledger;
mod rect;

pub use boundary_state::BoundaryState;
pub use fragment::{Fragment, FragmentRecord};
pub use matching::{AssignmentResult, linear_assignment};
pub use object::{Object, ObjectRecord};
pub use object_ledger::{
    DEFAULT_BOUNDARY_THRESHOLD, DEFAULT_IOU_THRESHOLD, DEFAULT_MIN_COUNT_DURATION, LedgerConfig,
    ObjectLedger,
};
pub use rect::{Rect, iou_batch, iou_score};
