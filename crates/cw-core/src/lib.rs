//! Crossword game report CLI support.
//!
//! The `cw` binary is a thin shell over these modules:
//! - `config`: report configuration resolution (CLI > file > env > XDG > defaults)
//! - `engine`: an evaluation engine replaying analysis stored in the game file
//! - `exit_codes`: stable process exit codes
//! - `logging`: tracing subscriber setup and run ids

pub mod config;
pub mod engine;
pub mod exit_codes;
pub mod logging;
