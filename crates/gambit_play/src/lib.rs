//! Playing games with the gambit engine
//!
//! This crate provides:
//! - Game sessions against the engine or between two players, with takebacks
//! - A weighted opening book for the engine's first move
//! - Engine-vs-engine matches with JSON results
//! - TOML configuration shared by all of the above

mod config;
mod error;
mod eval_bar;
mod match_runner;
mod opening;
mod results;
mod session;

pub use config::*;
pub use error::*;
pub use eval_bar::*;
pub use match_runner::*;
pub use opening::*;
pub use results::*;
pub use session::*;
