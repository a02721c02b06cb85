pub mod actions;
pub mod component;
pub mod confirm;
pub mod event_handler;

pub use actions::{Action, PendingConfirm};
pub use component::Component;
pub use confirm::{Confirmation, SharedConfirm, StaticConfirm};
pub use event_handler::{EventHandler, EventType};
