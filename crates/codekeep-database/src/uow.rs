//! Unit of work: one SQLite transaction spanning several repository writes.

use sqlx::{Sqlite, SqliteConnection, Transaction};

use codekeep_core::error::{AppError, ErrorKind};

/// A transaction handed to repository write methods.
///
/// Nothing is visible to other connections until [`UnitOfWork::commit`].
/// Dropping the value without committing rolls every write back.
#[derive(Debug)]
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self { tx }
    }

    /// The connection the transaction runs on.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut *self.tx
    }

    /// Make all writes durable.
    pub async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }

    /// Discard all writes explicitly.
    pub async fn rollback(self) -> Result<(), AppError> {
        self.tx.rollback().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
        })
    }
}
