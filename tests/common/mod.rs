//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which builds a config writing into a temporary
//! output directory and a full [`AppContext`]. The server constructors start
//! Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use mediaforge::config::Config;
use mediaforge::server::{create_router, AppContext};
use mediaforge_av::{Error, Result, ToolOutput, ToolRunner};
use tempfile::TempDir;

/// Test harness wrapping an [`AppContext`] whose output directory lives in a
/// temporary directory.
pub struct TestHarness {
    pub ctx: AppContext,
    pub runner: Arc<FakeRunner>,
    pub dir: TempDir,
}

impl TestHarness {
    /// Create a new harness whose ffmpeg runs always succeed.
    pub fn new() -> Self {
        Self::with_runner(FakeRunner::succeeding())
    }

    /// Create a new harness around a specific fake runner.
    pub fn with_runner(runner: FakeRunner) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut config = Config::default();
        config.media.output_dir = dir.path().join("output");

        let runner = Arc::new(runner);
        let ctx = AppContext::with_runner(config, runner.clone());

        Self { ctx, runner, dir }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::new().serve().await
    }

    /// Start an Axum server backed by a specific fake runner.
    pub async fn with_server_runner(runner: FakeRunner) -> (Self, SocketAddr) {
        Self::with_runner(runner).serve().await
    }

    async fn serve(self) -> (Self, SocketAddr) {
        let app = create_router(self.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (self, addr)
    }

    /// Write a placeholder input file into the temp directory.
    pub fn input_file(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, b"not really media").expect("failed to write input");
        path
    }

    pub fn output_dir(&self) -> &Path {
        &self.ctx.config.media.output_dir
    }
}

/// [`ToolRunner`] that records invocations instead of running ffmpeg.
pub struct FakeRunner {
    calls: Mutex<Vec<(String, Vec<String>)>>,
    failure: Option<(String, String)>,
}

impl FakeRunner {
    pub fn succeeding() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// Fails every run with the given error and captured output.
    pub fn failing(error: &str, output: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some((error.to_string(), output.to_string())),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ToolRunner for FakeRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));

        if let Some((error, output)) = &self.failure {
            return Err(Error::tool_failed(program, error.as_str(), output.as_str()));
        }

        Ok(ToolOutput::success())
    }
}

