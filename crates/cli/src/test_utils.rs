//! Shared unit test utilities.
//!
//! Provides a scripted fake worker so listing can be tested without
//! spawning real processes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::io::{self, Cursor, Read};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tempfile::TempDir;

use crate::listing::{Launch, LaunchRequest, Worker, WorkerExit};

/// Signal number reported by a fake worker after `kill`.
pub const SIGKILL: i32 = 9;

/// Scripted behavior of a fake worker.
#[derive(Debug, Clone, Default)]
pub struct FakeScript {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// `None` means the worker never exits on its own.
    pub exit: Option<WorkerExit>,
    /// How long the worker runs before `exit` is reported.
    pub runtime: Duration,
}

impl FakeScript {
    /// Worker that prints `stdout` and exits 0.
    pub fn succeeds(stdout: &str) -> Self {
        Self {
            stdout: stdout.as_bytes().to_vec(),
            stderr: Vec::new(),
            exit: Some(WorkerExit::code(0)),
            runtime: Duration::ZERO,
        }
    }

    /// Worker that prints `stderr` and exits with `code`.
    pub fn fails(code: i32, stderr: &str) -> Self {
        Self {
            stdout: Vec::new(),
            stderr: stderr.as_bytes().to_vec(),
            exit: Some(WorkerExit::code(code)),
            runtime: Duration::ZERO,
        }
    }

    /// Worker that never exits.
    pub fn hangs() -> Self {
        Self::default()
    }

    /// Delay the exit by `runtime`.
    pub fn running_for(mut self, runtime: Duration) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_stderr(mut self, stderr: &str) -> Self {
        self.stderr = stderr.as_bytes().to_vec();
        self
    }
}

/// Launcher that records requests and hands out scripted workers.
#[derive(Clone, Default)]
pub struct FakeLauncher {
    script: FakeScript,
    requests: Arc<Mutex<Vec<LaunchRequest>>>,
    kills: Arc<AtomicUsize>,
}

impl FakeLauncher {
    pub fn new(script: FakeScript) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<LaunchRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of `kill` calls across all workers.
    pub fn kills(&self) -> usize {
        self.kills.load(Ordering::SeqCst)
    }
}

impl Launch for FakeLauncher {
    fn launch(&self, request: &LaunchRequest) -> io::Result<Box<dyn Worker>> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(Box::new(FakeWorker {
            stdout: Some(self.script.stdout.clone()),
            stderr: Some(self.script.stderr.clone()),
            exit: self.script.exit,
            exits_at: Instant::now() + self.script.runtime,
            killed: false,
            kills: Arc::clone(&self.kills),
        }))
    }
}

struct FakeWorker {
    stdout: Option<Vec<u8>>,
    stderr: Option<Vec<u8>>,
    exit: Option<WorkerExit>,
    exits_at: Instant,
    killed: bool,
    kills: Arc<AtomicUsize>,
}

impl Worker for FakeWorker {
    fn take_stdout(&mut self) -> Option<Box<dyn Read + Send>> {
        self.stdout
            .take()
            .map(|b| Box::new(Cursor::new(b)) as Box<dyn Read + Send>)
    }

    fn take_stderr(&mut self) -> Option<Box<dyn Read + Send>> {
        self.stderr
            .take()
            .map(|b| Box::new(Cursor::new(b)) as Box<dyn Read + Send>)
    }

    fn try_wait(&mut self) -> io::Result<Option<WorkerExit>> {
        if self.killed {
            return Ok(Some(WorkerExit::signal(SIGKILL)));
        }
        if Instant::now() < self.exits_at {
            return Ok(None);
        }
        Ok(self.exit)
    }

    fn kill(&mut self) -> io::Result<()> {
        self.kills.fetch_add(1, Ordering::SeqCst);
        if self.exit.is_none() || Instant::now() < self.exits_at {
            self.killed = true;
        }
        Ok(())
    }

    fn wait(&mut self) -> io::Result<WorkerExit> {
        self.try_wait()?
            .ok_or_else(|| io::Error::other("fake worker never exits"))
    }
}

/// Creates a temp directory with custom config content.
pub fn temp_project_with_config(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("suitelist.toml"), config).unwrap();
    dir
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}
