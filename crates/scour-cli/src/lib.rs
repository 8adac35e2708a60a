//! Library components of the scour command line.

pub mod logging;
pub mod report;
