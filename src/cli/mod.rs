//! Console front end.
//!
//! - `Cli` / `AppConfig`: flags and environment
//! - `Prompter`: re-prompting line input
//! - `run`: new or resumed game, turn loop, end-of-game summary

mod app;
mod config;
mod prompt;

pub use app::run;
pub use config::{AppConfig, Cli};
pub use prompt::{parse_int, parse_int_in, parse_pair, parse_yes_no, Prompter};
