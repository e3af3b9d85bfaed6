//! Sprintboard: client core for a gamified sprint board.
//!
//! This crate holds the client-side logic behind the Kanban board: a
//! per-project task cache, the backend task port, and the optimistic
//! task-move flow that keeps the board responsive while the backend stays
//! the final authority.
//!
//! # Architecture
//!
//! Sprintboard follows hexagonal architecture principles:
//!
//! - **Domain**: Tasks, columns and sessions with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for the cache and the backend
//! - **Adapters**: Concrete implementations of ports (in-memory cache, REST)
//!
//! # Modules
//!
//! - [`board`]: Task cache, backend port and optimistic column moves

pub mod board;
