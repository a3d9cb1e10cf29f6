//! seash - a small interactive command interpreter
//!
//! Features:
//! - Command chaining with `;`, `&&` and `||`
//! - Alias and `$`-variable substitution
//! - Builtin-vs-external dispatch with PATH resolution
//! - Persistent command history

pub mod interrupt;
pub mod shell;

pub use shell::Session;
