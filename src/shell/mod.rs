pub mod install;
pub mod snippet;

pub use install::install;
pub use snippet::{DEFAULT_ALIAS, shell_function};
