pub mod health;
pub mod menu_scan;
pub mod profile;
pub mod server;
