//! Core types shared across Kompare facilities
//!
//! The error and logging facilities both key their structured output off the
//! constants in [`schema`], so log lines and error reports stay greppable by
//! the same field names.

pub mod schema;
