//! Utility modules shared by the binary and the library.

pub mod guard;
pub mod logger;
