pub mod app_config;
pub mod inventory;
pub mod numlist;
pub mod store;

// Re-export the primary store types
pub use inventory::Inventory;
pub use numlist::NumberList;
