// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Worker supervision and result resolution.
//!
//! Each stream gets a reader thread and the exit status gets a watcher
//! thread; all of them feed one event channel. The resolver drains that
//! channel on the calling thread and races it against the timeout timer.
//! Whichever side finishes first decides the outcome. Once the worker has
//! exited the timer no longer applies; the remaining output gets a short
//! drain window instead, since a background child of the worker may keep
//! the pipes open long after it is gone. Returning drops the receiver, so
//! anything sent afterwards is discarded.

use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, after, never, select, unbounded};

use super::descriptor::{ListResult, parse_descriptors};
use super::error::ListTestError;
use super::launch::{Worker, WorkerExit};

/// How often the exit watcher polls the worker.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// How long buffered output may keep draining after the worker exits.
const DRAIN_GRACE: Duration = Duration::from_millis(200);

const READ_CHUNK: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

enum Event {
    Output(Stream, Vec<u8>),
    Closed(Stream),
    Exited(std::io::Result<WorkerExit>),
}

type SharedWorker = Arc<Mutex<Box<dyn Worker>>>;

/// Stops the exit watcher once the outcome has been decided.
struct StopGuard(Arc<AtomicBool>);

impl Drop for StopGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Supervise a launched worker until it exits or the timeout expires.
///
/// `timeout` of `None` waits for natural completion.
pub(crate) fn supervise(
    mut worker: Box<dyn Worker>,
    suite_file: &str,
    timeout: Option<Duration>,
) -> Result<ListResult, ListTestError> {
    let (tx, rx) = unbounded();

    let mut open_streams = 0;
    for (stream, reader) in [
        (Stream::Stdout, worker.take_stdout()),
        (Stream::Stderr, worker.take_stderr()),
    ] {
        if let Some(reader) = reader {
            spawn_reader(stream, reader, tx.clone());
            open_streams += 1;
        }
    }

    let worker: SharedWorker = Arc::new(Mutex::new(worker));
    let stop = Arc::new(AtomicBool::new(false));
    let _guard = StopGuard(Arc::clone(&stop));
    spawn_exit_watcher(Arc::clone(&worker), tx, stop);

    let timer = match timeout {
        Some(t) => after(t),
        None => never(),
    };

    Resolver {
        suite_file,
        stdout: Vec::new(),
        stderr: Vec::new(),
        open_streams,
        exit: None,
    }
    .run(rx, timer, &worker)
}

fn spawn_reader(stream: Stream, mut reader: Box<dyn Read + Send>, tx: Sender<Event>) {
    thread::spawn(move || {
        let mut buf = vec![0u8; READ_CHUNK];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send(Event::Output(stream, buf[..n].to_vec())).is_err() {
                        return;
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::debug!("worker {:?} read failed: {}", stream, e);
                    break;
                }
            }
        }
        let _ = tx.send(Event::Closed(stream));
    });
}

fn spawn_exit_watcher(worker: SharedWorker, tx: Sender<Event>, stop: Arc<AtomicBool>) {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            let polled = match worker.lock() {
                Ok(mut w) => w.try_wait(),
                Err(_) => Err(std::io::Error::other("worker handle poisoned")),
            };
            match polled {
                Ok(None) => thread::sleep(EXIT_POLL_INTERVAL),
                Ok(Some(exit)) => {
                    let _ = tx.send(Event::Exited(Ok(exit)));
                    return;
                }
                Err(e) => {
                    let _ = tx.send(Event::Exited(Err(e)));
                    return;
                }
            }
        }
    });
}

struct Resolver<'a> {
    suite_file: &'a str,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    open_streams: usize,
    exit: Option<WorkerExit>,
}

impl Resolver<'_> {
    fn run(
        mut self,
        events: Receiver<Event>,
        timer: Receiver<Instant>,
        worker: &SharedWorker,
    ) -> Result<ListResult, ListTestError> {
        let mut drain: Option<Receiver<Instant>> = None;
        loop {
            let exit = self.exit;
            let deadline = match exit {
                Some(exit) if self.open_streams == 0 => return self.resolve(exit),
                Some(_) => &*drain.get_or_insert_with(|| after(DRAIN_GRACE)),
                None => &timer,
            };

            select! {
                recv(events) -> event => match event {
                    Ok(Event::Output(stream, chunk)) => {
                        tracing::trace!("worker {:?}: {} bytes", stream, chunk.len());
                        match stream {
                            Stream::Stdout => self.stdout.extend_from_slice(&chunk),
                            Stream::Stderr => self.stderr.extend_from_slice(&chunk),
                        }
                    }
                    Ok(Event::Closed(stream)) => {
                        tracing::trace!("worker {:?} closed", stream);
                        self.open_streams -= 1;
                    }
                    Ok(Event::Exited(Ok(exit))) => {
                        tracing::debug!("{}: {}", self.suite_file, exit);
                        self.exit = Some(exit);
                    }
                    Ok(Event::Exited(Err(e))) => {
                        terminate(worker);
                        return Err(self.failure(format!("failed to wait for worker: {e}")));
                    }
                    Err(_) => {
                        terminate(worker);
                        return Err(self.failure("worker event channel closed"));
                    }
                },
                recv(deadline) -> _ => {
                    if let Some(exit) = exit {
                        tracing::debug!(
                            "{}: output still open {:?} after exit, resolving with what was read",
                            self.suite_file,
                            DRAIN_GRACE
                        );
                        return self.resolve(exit);
                    }
                    tracing::warn!("timed out listing {}, killing worker", self.suite_file);
                    terminate(worker);
                    return Err(ListTestError::timed_out(self.suite_file));
                }
            }
        }
    }

    fn resolve(self, exit: WorkerExit) -> Result<ListResult, ListTestError> {
        if !exit.success() {
            return Err(self.failure(exit));
        }

        // Stray stderr on a clean exit is ignored.
        let stdout = String::from_utf8_lossy(&self.stdout);
        parse_descriptors(&stdout).map_err(|e| self.failure(e))
    }

    fn failure(&self, reason: impl std::fmt::Display) -> ListTestError {
        let stderr = String::from_utf8_lossy(&self.stderr);
        ListTestError::failed_to_process(self.suite_file, reason, &stderr)
    }
}

/// Kill the worker once and reap it.
fn terminate(worker: &SharedWorker) {
    let Ok(mut w) = worker.lock() else {
        tracing::warn!("worker handle poisoned, cannot kill");
        return;
    };
    if let Err(e) = w.kill() {
        tracing::debug!("kill failed (worker may have exited): {}", e);
    }
    if let Err(e) = w.wait() {
        tracing::warn!("failed to reap worker: {}", e);
    }
}

#[cfg(test)]
#[path = "supervise_tests.rs"]
mod tests;
