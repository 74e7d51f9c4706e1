//! Stitchlog - a personal crochet project tracker
//!
//! This library holds everything behind the `stitchlog` web server: the
//! SQLite schema, the repositories over it, the domain service that keeps part
//! ordering and cascading deletes consistent, and the axum front end.
//!
//! # Modules
//!
//! * [`config`] - Application configuration management
//! * [`storage`] - Database connection, schema and upload directory
//! * [`repositories`] - Per-entity queries
//! * [`service`] - Domain operations used by the web layer
//! * [`web`] - HTTP routes, handlers and HTML views
//! * [`utils`] - Date formatting helpers

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Error type shared by the service and web layers
pub mod error;

/// Logger setup
pub mod logger;

/// Repository layer for database operations
pub mod repositories;

/// Domain operations over projects, parts, steps, materials and tags
pub mod service;

/// Database and uploaded file storage
pub mod storage;

/// Utility functions for date/time handling
pub mod utils;

/// HTTP server
pub mod web;

// Re-export entity models for convenient access
pub use entities::{material, material_type, part, project, project_tag, step, tag};
pub use error::{Result, TrackerError};
