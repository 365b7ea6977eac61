//! Adapters implementing domain ports.

pub mod in_memory_repository;
pub mod text_repository;

pub use in_memory_repository::InMemoryRecordRepository;
pub use text_repository::TextRecordRepository;
