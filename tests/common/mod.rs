//! Shared utilities for integration testing the service.

#![allow(dead_code)]

use std::io::Read;
use std::net::TcpStream;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use pulsed::{ServiceConfig, ServiceState, StatusReporter};

/// Reporter that records every transition for later assertions.
#[derive(Default)]
pub struct RecordingReporter {
    states: Mutex<Vec<ServiceState>>,
}

impl RecordingReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn states(&self) -> Vec<ServiceState> {
        self.states.lock().unwrap().clone()
    }
}

impl StatusReporter for RecordingReporter {
    fn report(&self, state: ServiceState) -> std::io::Result<()> {
        self.states.lock().unwrap().push(state);
        Ok(())
    }
}

/// Config pointing at a loopback port with a test-sized heartbeat interval.
pub fn service_config(port: u16, interval_ms: u64, log_path: &Path) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = format!("127.0.0.1:{}", port);
    config.heartbeat.interval_ms = interval_ms;
    config.service_log.path = Some(log_path.to_path_buf());
    config
}

/// Connect to the service, retrying while the worker thread is still binding.
pub fn connect_with_retry(addr: &str, timeout: Duration) -> TcpStream {
    let deadline = Instant::now() + timeout;
    loop {
        match TcpStream::connect(addr) {
            Ok(stream) => return stream,
            Err(error) => {
                if Instant::now() >= deadline {
                    panic!("could not connect to {}: {}", addr, error);
                }
                std::thread::sleep(Duration::from_millis(25));
            }
        }
    }
}

/// Read exactly `len` bytes, bounded by a read timeout.
pub fn read_exact_payload(
    stream: &mut TcpStream,
    len: usize,
    timeout: Duration,
) -> std::io::Result<Vec<u8>> {
    stream.set_read_timeout(Some(timeout))?;
    let mut buffer = vec![0u8; len];
    stream.read_exact(&mut buffer)?;
    Ok(buffer)
}

/// Read until EOF or error; used to observe the server closing a session.
pub fn drain_until_eof(stream: &mut TcpStream, timeout: Duration) -> bool {
    if stream.set_read_timeout(Some(timeout)).is_err() {
        return false;
    }
    let mut buffer = [0u8; 64];
    loop {
        match stream.read(&mut buffer) {
            Ok(0) => return true,
            Ok(_) => continue,
            Err(_) => return false,
        }
    }
}

/// Count service log lines containing `needle`.
pub fn log_count(path: &Path, needle: &str) -> usize {
    std::fs::read_to_string(path)
        .map(|content| content.lines().filter(|line| line.contains(needle)).count())
        .unwrap_or(0)
}

/// Poll the service log until at least `expected` matching lines appear.
/// Returns the final count either way.
pub fn wait_for_log_count(path: &Path, needle: &str, expected: usize, timeout: Duration) -> usize {
    let deadline = Instant::now() + timeout;
    loop {
        let count = log_count(path, needle);
        if count >= expected || Instant::now() >= deadline {
            return count;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}
