//! Core types shared by the flow parser and the wizard engine

mod error;
pub mod logging;
mod types;

pub use error::*;
pub use logging::*;
pub use types::*;
