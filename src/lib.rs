//! Simmer the Toads terminal client

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod login;
pub mod picker;
