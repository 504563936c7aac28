pub mod prelude;

pub mod category;
pub mod category_events;
pub mod counters;
pub mod event;
