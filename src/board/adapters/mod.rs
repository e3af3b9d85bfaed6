//! Adapter implementations for the board ports.

pub mod http;
pub mod memory;
