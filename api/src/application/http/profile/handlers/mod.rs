pub mod get_health_profile;
