//! Foundation module
//!
//! Math aliases, mesh placement and logging setup shared by the rest of
//! the crate.

pub mod math;
pub mod logging;
