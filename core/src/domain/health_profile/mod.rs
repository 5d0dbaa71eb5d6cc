pub mod assembler;
pub mod entities;
pub mod limits;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use assembler::assemble_health_profile;
pub use entities::*;
pub use ports::*;
pub use value_objects::*;
