pub mod bleed;
pub mod cli;
pub mod commands;
pub mod config;
pub mod diff;
pub mod lockfile;
pub mod pipeline;
pub mod trim;
