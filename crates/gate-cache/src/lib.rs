//! # Gate Cache
//!
//! 決策工作階段、按需重算與門檻變更合併

pub mod coalesce;
pub mod dirty_tracking;
pub mod session;

// Re-export 主要類型
pub use coalesce::{CutoffCoalescer, Ticket};
pub use dirty_tracking::{DirtyReason, DirtyTracker};
pub use session::DecisionSession;
