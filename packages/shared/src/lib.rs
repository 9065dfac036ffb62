//! Utilities shared by the Sketchroom server and client binaries.

pub mod logger;
pub mod time;
