//! Local storage module for crochet project data
//!
//! This module provides:
//! - The SeaORM-backed SQLite database (`db`)
//! - Managed file storage for uploaded thumbnails (`files`)

pub mod db;
pub mod files;

pub use db::LocalStorage;
pub use files::{FileStorage, LocalFileStorage};
