//! Real-time collaboration hub for Sketchroom.
//!
//! Clients connect over WebSocket, join a room by code, and relay canvas
//! updates, strokes, image swaps and chat messages to the other members of
//! that room. The hub keeps no canvas state of its own.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
