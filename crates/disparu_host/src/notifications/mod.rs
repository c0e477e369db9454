//! Degraded-mode notice channel between the message log and the UI.

pub mod notice;
