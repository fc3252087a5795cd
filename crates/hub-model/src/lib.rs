//! Core types shared by every hub-resolver crate.
//!
//! - [`Requirement`]: a named hub requirement from the configured catalog
//! - [`CourseRecord`]: one row read from a course source
//! - [`normalize`]: the canonical lookup key for course codes and names

#![deny(unsafe_code)]

pub mod error;
pub mod normalize;
pub mod record;
pub mod requirement;

pub use error::{ModelError, Result};
pub use normalize::{department_of, is_canonical, normalize};
pub use record::CourseRecord;
pub use requirement::Requirement;
