//! Command-line interface for finsift.
//!
//! A thin shim over the library: argument parsing in [`args`], command
//! dispatch in [`commands`], result formatting in [`output`].

pub mod args;
pub mod commands;
pub mod output;
