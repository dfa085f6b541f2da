pub mod inventory_menu;
pub mod list_actions;
pub mod utility;
