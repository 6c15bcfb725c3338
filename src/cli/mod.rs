//! CLI argument types and app configuration

mod args;
mod config;

pub use args::{
    Args, Command, InitArgs, RunsArgs, ScoreArgs, SimulateArgs, SnapshotArgs, UiArgs,
};
pub use config::AppConfig;
