//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the game and its storage.
//! The traits are owned by the domain and implemented by adapters.

pub mod repository;

pub use repository::RecordRepository;
