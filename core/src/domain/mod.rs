pub mod authentication;
pub mod common;
pub mod health;
pub mod health_profile;
pub mod menu_scan;
pub mod user;
