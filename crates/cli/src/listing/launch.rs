// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Worker process launching.
//!
//! A listing worker is started as
//! `<runtime> <interface module> <interface param> <suite file>`
//! with stdout and stderr piped back to the supervisor. The [`Launch`]
//! trait is the seam where tests substitute a fake process.

use std::ffi::OsString;
use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};

/// Runtime used when none is configured.
pub const DEFAULT_RUNTIME: &str = "node";

/// Arguments for one listing worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Interface module that loads the suite and prints its tests.
    pub interface: PathBuf,
    /// Opaque parameter forwarded to the interface module.
    pub param: String,
    /// Suite file to enumerate.
    pub suite_file: PathBuf,
}

impl LaunchRequest {
    /// Worker arguments in invocation order.
    pub fn args(&self) -> [OsString; 3] {
        [
            self.interface.clone().into_os_string(),
            OsString::from(&self.param),
            self.suite_file.clone().into_os_string(),
        ]
    }
}

/// How a worker process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerExit {
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Terminating signal, if the process was killed by one.
    pub signal: Option<i32>,
}

impl WorkerExit {
    pub fn code(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
        }
    }

    pub fn signal(signal: i32) -> Self {
        Self {
            code: None,
            signal: Some(signal),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for WorkerExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.signal) {
            (Some(code), _) => write!(f, "worker exited with code {code}"),
            (None, Some(signal)) => write!(f, "worker terminated by signal {signal}"),
            (None, None) => write!(f, "worker exited abnormally"),
        }
    }
}

impl From<ExitStatus> for WorkerExit {
    fn from(status: ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = std::os::unix::process::ExitStatusExt::signal(&status);
        #[cfg(not(unix))]
        let signal = None;

        Self {
            code: status.code(),
            signal,
        }
    }
}

/// A running listing worker.
pub trait Worker: Send {
    /// Take the stdout stream. Returns `None` once taken.
    fn take_stdout(&mut self) -> Option<Box<dyn Read + Send>>;

    /// Take the stderr stream. Returns `None` once taken.
    fn take_stderr(&mut self) -> Option<Box<dyn Read + Send>>;

    /// Poll for exit without blocking.
    fn try_wait(&mut self) -> io::Result<Option<WorkerExit>>;

    /// Forcibly terminate the worker (SIGKILL on unix).
    fn kill(&mut self) -> io::Result<()>;

    /// Block until the worker has exited and been reaped.
    fn wait(&mut self) -> io::Result<WorkerExit>;
}

/// Strategy for starting listing workers.
pub trait Launch: Send + Sync {
    fn launch(&self, request: &LaunchRequest) -> io::Result<Box<dyn Worker>>;
}

impl<F> Launch for F
where
    F: Fn(&LaunchRequest) -> io::Result<Box<dyn Worker>> + Send + Sync,
{
    fn launch(&self, request: &LaunchRequest) -> io::Result<Box<dyn Worker>> {
        self(request)
    }
}

/// Launches workers as OS child processes.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    /// Program that runs the interface module. `None` executes the
    /// interface module directly.
    runtime: Option<String>,
}

impl ProcessLauncher {
    pub fn new(runtime: Option<String>) -> Self {
        Self {
            runtime: runtime.filter(|r| !r.trim().is_empty()),
        }
    }

    /// Build the command for a request without spawning it.
    pub fn command(&self, request: &LaunchRequest) -> Command {
        let [interface, param, suite_file] = request.args();
        let mut cmd = match &self.runtime {
            Some(runtime) => {
                let mut cmd = Command::new(runtime);
                cmd.arg(interface);
                cmd
            }
            None => Command::new(interface),
        };
        cmd.arg(param)
            .arg(suite_file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Default for ProcessLauncher {
    fn default() -> Self {
        Self::new(Some(DEFAULT_RUNTIME.to_string()))
    }
}

impl Launch for ProcessLauncher {
    fn launch(&self, request: &LaunchRequest) -> io::Result<Box<dyn Worker>> {
        let child = self.command(request).spawn()?;
        Ok(Box::new(ChildWorker(child)))
    }
}

/// [`Worker`] backed by a `std::process::Child`.
struct ChildWorker(Child);

impl Worker for ChildWorker {
    fn take_stdout(&mut self) -> Option<Box<dyn Read + Send>> {
        self.0
            .stdout
            .take()
            .map(|s| Box::new(s) as Box<dyn Read + Send>)
    }

    fn take_stderr(&mut self) -> Option<Box<dyn Read + Send>> {
        self.0
            .stderr
            .take()
            .map(|s| Box::new(s) as Box<dyn Read + Send>)
    }

    fn try_wait(&mut self) -> io::Result<Option<WorkerExit>> {
        Ok(self.0.try_wait()?.map(WorkerExit::from))
    }

    fn kill(&mut self) -> io::Result<()> {
        self.0.kill()
    }

    fn wait(&mut self) -> io::Result<WorkerExit> {
        self.0.wait().map(WorkerExit::from)
    }
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
