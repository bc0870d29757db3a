//! Course Catalogue Advising
//!
//! Course records are loaded from a delimited text file into an ordered
//! index, which can then be listed alphanumerically or queried for a single
//! course and its prerequisites.

pub mod domain;
pub use domain::{Config, Course, CourseId, CourseIndex, DuplicatePolicy};

/// Loading course records from delimited text sources.
pub mod storage;
pub use storage::{LoadError, LoadReport};
