//! Utility modules: build info, JSON persistence, display formatting.

pub mod build_info;
pub mod format;
pub mod persistence;

pub use build_info::{BUILD_COMMIT, BUILD_DATE};
pub use format::{format_number, RollTier};
