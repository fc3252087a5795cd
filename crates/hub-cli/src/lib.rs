//! Library side of the `hub-resolver` binary: logging setup and source
//! selection, kept here so they can be tested without spawning the binary.

pub mod logging;
pub mod sources;
