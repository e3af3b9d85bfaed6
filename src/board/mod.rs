//! Kanban board client core.
//!
//! Moving a task between columns is applied to the local cache first, sent
//! to the backend, and then reconciled with the backend's answer or rolled
//! back. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
