//! A module containing the [`RegistryError`] enum, which contains various basic error types.

use sea_orm::TransactionError;

use crate::validation::ValidationError;

/// Represents any type of error that could happen when using this crate.
#[derive(thiserror::Error, Debug)]
#[rustfmt::skip]
pub enum RegistryError {
    // --------
    // --- Internal server errors
    // --------

    /// An error from the database.
    #[error(transparent)]
    DbError(#[from] sea_orm::DbErr),
    /// An internal error.
    #[error("internal error: {0}")]
    Internal(String),

    // --------
    // --- Logical errors
    // --------

    /// The submitted fields of a category or an event are invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The category with the provided human-ID was not found.
    #[error("category `{0}` not found")]
    CategoryNotFound(
        /// The category human-ID.
        String,
    ),
    /// The event with the provided human-ID was not found.
    #[error("event `{0}` not found")]
    EventNotFound(
        /// The event human-ID.
        String,
    ),
}

impl AsRef<RegistryError> for RegistryError {
    fn as_ref(&self) -> &RegistryError {
        self
    }
}

/// Shortcut for creating an internal error, by formatting a message.
///
/// See [`RegistryError::Internal`].
#[macro_export]
macro_rules! internal {
    ($($t:tt)*) => {{
        $crate::error::RegistryError::Internal($crate::error::__private::format!($($t)*))
    }};
}

#[doc(hidden)]
pub mod __private {
    pub use std::format;
}

impl<E> From<TransactionError<E>> for RegistryError
where
    RegistryError: From<E>,
{
    fn from(value: TransactionError<E>) -> Self {
        match value {
            TransactionError::Connection(db_err) => From::from(db_err),
            TransactionError::Transaction(e) => From::from(e),
        }
    }
}

/// Represents the result of a computation that could return a [`RegistryError`].
pub type RegistryResult<T = ()> = Result<T, RegistryError>;
