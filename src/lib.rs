pub mod cli;
pub mod core;
pub mod error;
pub mod fs;
pub mod shell;
pub mod ui;

pub use crate::core::{Candidate, Picker};
pub use error::BcdError;
