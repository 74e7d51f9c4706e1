//! Utility modules for stitchlog.
//!
//! - [`datetime`] - Date formatting for listings and upload file names

pub mod datetime;
