//! Command-line front end for the Car Sales Analyzer.
//!
//! Plays the part of the UI: owns the session's sales table, turns user input into transform
//! calls from `carsales-model`, and renders the results as text or JSON lines.

pub mod cli;
pub mod render;
pub mod session;
