pub mod config;
pub mod events;
pub mod gesture;
pub mod menu;
pub mod sys;

pub use menu::ContextualMenu;
