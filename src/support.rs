//! Supporting utilities used by models.
//!
//! - [`constraint`]: Type-level numeric invariants such as non-negative doses.
//! - [`root`]: Hybrid single-variable root finding.

pub mod constraint;
pub mod root;
