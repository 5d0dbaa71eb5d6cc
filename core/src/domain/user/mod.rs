pub mod entities;
pub mod ports;

pub use entities::UserHealthRecord;
pub use ports::UserRepository;
