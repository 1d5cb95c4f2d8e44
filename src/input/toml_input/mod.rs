mod loads;
mod settings;

pub use loads::*;
pub use settings::*;
