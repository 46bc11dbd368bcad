//! Repository implementations for data persistence.
//!
//! Both implement the application layer's `PostRepositoryPort`.

mod memory;
mod post_repository;

pub use memory::InMemoryPostRepository;
pub use post_repository::PgPostRepository;
