//! A tiny module to run the multi-step operations of the registry in SQL transactions.
//!
//! Removing a category, for example, also removes its events, their links and updates the counter.
//! Each of these steps is a separate statement, so they are grouped in a transaction to never
//! leave the categories and the events half-linked.

use sea_orm::{DatabaseTransaction, DbErr, TransactionTrait};

/// Wraps the call of the provided function with an SQL transaction.
///
/// The transaction is committed if the function returns `Ok`, and rolled back otherwise,
/// in which case the error of the function is returned.
pub async fn transaction<F, C, T, E>(conn: &C, f: F) -> Result<T, E>
where
    F: for<'a> AsyncFnOnce(&'a DatabaseTransaction) -> Result<T, E>,
    E: From<DbErr>,
    C: TransactionTrait,
{
    let txn = conn.begin().await?;

    match f(&txn).await {
        Ok(ret) => {
            txn.commit().await?;
            Ok(ret)
        }
        Err(e) => {
            tracing::debug!("Rolling back the transaction");
            txn.rollback().await?;
            Err(e)
        }
    }
}
