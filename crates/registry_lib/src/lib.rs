//! The main crate of the event registry.
//!
//! This crate contains the stores of the categories and the events, the maintenance of the
//! association between them, the operation counter, and the environment setup functions.
//!
//! If you wish to see the crate of the server program itself, take a look
//! at the [`registry_api`](../registry_api_lib/index.html) package.

#![warn(missing_docs)]

mod env;

pub mod association;
pub mod category;
pub mod counter;
pub mod error;
pub mod event;
pub mod human_id;
pub mod models;
pub mod must;
pub mod pool;
pub mod sync;
pub mod validation;

pub use env::*;
pub use pool::Database;
