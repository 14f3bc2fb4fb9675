pub use word::{MachineWord, WordError};

pub mod op;
pub mod word;
