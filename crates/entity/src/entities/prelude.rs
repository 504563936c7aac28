pub use super::category::Entity as Category;
pub use super::category_events::Entity as CategoryEvents;
pub use super::counters::Entity as Counters;
pub use super::event::Entity as Event;
