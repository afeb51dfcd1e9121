//! # codekeep-database
//!
//! SQLite connection management, transactional units of work, and the
//! concrete repositories for every CodeKeep entity.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod uow;

pub use connection::DatabasePool;
pub use uow::UnitOfWork;
