//! Shared fixtures: scripted metrics source and recording sink.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};

use sysfeed_core::{
    error::{Result, SysfeedError},
    sample::{CpuSample, MemorySample},
};
use sysfeed_server::source::MetricsSource;
use sysfeed_server::stream::EventSink;

pub const MEM_16G: MemorySample = MemorySample {
    total: 16_000_000_000,
    used: 8_000_000_000,
    used_percent: 50.0,
};

pub const CPU_DEFAULT: CpuSample = CpuSample { user: 1.5, system: 0.25, idle: 100.0 };

/// Pops scripted results; falls back to fixed samples once a script runs dry.
#[derive(Default)]
pub struct ScriptedSource {
    mem: Mutex<VecDeque<Result<MemorySample>>>,
    cpu: Mutex<VecDeque<Result<CpuSample>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_mem(self, r: Result<MemorySample>) -> Self {
        self.mem.lock().unwrap().push_back(r);
        self
    }

    pub fn push_cpu(self, r: Result<CpuSample>) -> Self {
        self.cpu.lock().unwrap().push_back(r);
        self
    }
}

impl MetricsSource for ScriptedSource {
    fn memory(&self) -> Result<MemorySample> {
        self.mem.lock().unwrap().pop_front().unwrap_or(Ok(MEM_16G))
    }

    fn cpu_times(&self) -> Result<CpuSample> {
        self.cpu.lock().unwrap().pop_front().unwrap_or(Ok(CPU_DEFAULT))
    }
}

pub fn metrics_err(msg: &str) -> SysfeedError {
    SysfeedError::Metrics(msg.to_string())
}

/// Records every flushed chunk. Optionally fails the n-th flush (1-based).
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub flushed: Arc<Mutex<Vec<Bytes>>>,
    pending: BytesMut,
    flushes: usize,
    fail_on_flush: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on_flush(n: usize) -> Self {
        Self { fail_on_flush: Some(n), ..Self::default() }
    }

    pub fn frames(&self) -> Vec<String> {
        self.flushed
            .lock()
            .unwrap()
            .iter()
            .map(|b| String::from_utf8(b.to_vec()).unwrap())
            .collect()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn write(&mut self, frame: Bytes) -> Result<()> {
        self.pending.extend_from_slice(&frame);
        Ok(())
    }

    async fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        if self.fail_on_flush == Some(self.flushes) {
            return Err(SysfeedError::Transport("broken pipe".into()));
        }
        let chunk = self.pending.split().freeze();
        self.flushed.lock().unwrap().push(chunk);
        Ok(())
    }
}
