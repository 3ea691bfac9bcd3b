//! Command implementations.
//!
//! Each command exposes an `execute` function taking its parsed arguments and
//! the resolved project directory.

pub mod build;
pub mod check;
pub mod name;
pub mod utils;

pub use build::execute as build_execute;
pub use check::execute as check_execute;
pub use name::execute as name_execute;
