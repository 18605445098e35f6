pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod error;
pub mod listing;
pub mod output;
pub mod runner;

pub use cli::{Cli, Command, ListArgs, OutputFormat};
pub use error::{Error, ExitCode, Result};
pub use listing::{
    Launch, LaunchRequest, ListResult, ListTestError, Lister, ProcessLauncher, TestDescriptor,
    TestPath, Worker, WorkerExit, list_tests_of_file,
};

#[cfg(test)]
pub mod test_utils;
