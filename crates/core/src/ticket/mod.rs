mod status;
mod types;

pub use status::*;
pub use types::*;
