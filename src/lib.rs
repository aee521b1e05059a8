//! Consolidation of short-lived tracker fragments into persistent video objects.
//!
//! A multi-object tracker hands out a fresh identity whenever it loses and
//! re-acquires a target. The [`ObjectLedger`] stitches those fragments back
//! together by matching each fragment's first box against the last box of
//! every known object, then gating the best match on label and frame gap.
//! Finished objects are classified by whether they were present at the
//! start and end of the video.

pub mod error;
pub mod ledger;
pub mod table;

pub use error::{LedgerError, Result};
pub use ledger::{BoundaryState, Fragment, LedgerConfig, Object, ObjectLedger, Rect};
pub use table::{ConsolidationPipeline, DetectionRow};
