//! Wayfinder CLI library.
//!
//! Command handlers, terminal styling, and output formatting for the
//! `wayfinder` binary. Kept in a library so the handlers can be unit tested
//! without spawning the executable.

#![deny(warnings)]

pub mod commands;
pub mod output;
pub mod terminal;
