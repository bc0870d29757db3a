//! Domain models for the course catalogue.
//!
//! This module contains the core domain types including course records,
//! course identifiers, the ordered index, and configuration.

/// Course record and identifier types.
pub mod course;
pub use course::{Course, CourseId, EmptyIdError};

mod config;
pub use config::{CONFIG_FILE_NAME, Config, DuplicatePolicy};

/// The ordered index of course records.
pub mod index;
pub use index::CourseIndex;
