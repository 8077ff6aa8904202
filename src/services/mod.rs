// Service exports
pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::InMemoryRepository;
pub use postgres::PostgresRepository;
pub use repository::{CounsellorRepository, RepositoryError, SessionRepository};
