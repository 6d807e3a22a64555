pub use error::RomLoadError;
pub use machine::Machine;

pub mod constants;
mod error;
mod instruction;
mod machine;
mod opcode;
mod operations;
pub mod state;
