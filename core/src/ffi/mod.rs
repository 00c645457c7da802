//! FFI boundary (PyO3)
//!
//! The presentation layer is a Python app; this module is its only way in.
//! The surface is deliberately minimal: configure a simulator from a dict,
//! run it, get the report back as plain dicts and lists.

pub mod simulator;
pub mod types;
