mod config;
mod load;

pub mod toml_input;

pub use config::*;
pub use load::*;
