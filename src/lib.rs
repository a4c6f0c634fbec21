//! il2decomp - IL2CPP decompilation pipeline driver
//!
//! Hashes a game's IL2CPP assembly into a reusable workspace, then runs
//! Il2CppDumper and a headless Ghidra import so repeated analysis of the
//! same build picks up where it left off.

pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod pipeline;
pub mod tools;
pub mod ui;
pub mod workspace;

pub use error::{DecompError, DecompResult};
