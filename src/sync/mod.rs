/*!
 * Incremental synchronization between the two panes.
 *
 * This module contains the core machinery that keeps an edited pane and its
 * translation in step. It is split into several submodules:
 *
 * - `segment`: Paragraph and sentence unit segmentation
 * - `align`: Edit scripts between old and new unit sequences
 * - `patch`: Patch planning and application for changed units
 * - `highlight`: Word-level change markup for human review
 * - `engine`: Session state and sync orchestration
 */

// Re-export main types for easier usage
pub use self::align::{EditOp, EditTag};
pub use self::engine::{Pane, PaneStatus, SessionSnapshot, SyncEngine, SyncOutcome};
pub use self::highlight::highlight_words;
pub use self::patch::{PatchPlan, PendingUnit};

// Submodules
pub mod align;
pub mod engine;
pub mod highlight;
pub mod patch;
pub mod segment;
