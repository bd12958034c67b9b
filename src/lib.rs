//! A tour of language features and library patterns, one small demo per topic.
//!
//! Every demo is a plain `fn()` registered under a PascalCase name in
//! [`registry::DEMOS`]. The `tour` binary picks one by name and runs it:
//!
//! ```text
//! cargo run --bin tour -- Pointers
//! ```

pub mod config;
pub mod demos;
pub mod dispatch;
pub mod logging;
pub mod orm;
pub mod registry;
pub mod web;

pub use dispatch::{Action, Outcome};
pub use registry::{Demo, Registry};
