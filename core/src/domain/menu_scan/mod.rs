pub mod analysis;
pub mod entities;
pub mod ports;
pub mod prompt;
pub mod schema;
pub mod services;
pub mod validation;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;
