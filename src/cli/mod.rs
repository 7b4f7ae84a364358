//! Console front-end: line-oriented views over the remote API.

pub mod console;
pub mod table;

pub use console::Console;
