//! The database models of the event registry.
//!
//! The categories and the events are linked with the [`category_events`] association table.
//! The [`counters`] table holds the lifetime operation counters.

mod entities;
pub use entities::*;
