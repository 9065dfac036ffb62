//! Terminal client for Sketchroom rooms.

pub mod command;
pub mod domain;
pub mod error;
pub mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
