//! Mock source for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use livebench_core::{BenchmarkRow, DataUnavailable, RowSource};

/// A row source with scripted responses.
///
/// Each fetch pops the next scripted response; once the script is exhausted
/// the last response repeats.
pub struct MockSource {
    responses: Mutex<Vec<Result<Vec<BenchmarkRow>, String>>>,
    last: Mutex<Result<Vec<BenchmarkRow>, String>>,
    delay: Duration,
    call_count: AtomicU32,
}

impl MockSource {
    /// Always return `rows`.
    pub fn with_rows(rows: Vec<BenchmarkRow>) -> Self {
        Self::scripted(vec![Ok(rows)])
    }

    /// Always fail with a network error.
    pub fn failing(message: &str) -> Self {
        Self::scripted(vec![Err(message.to_string())])
    }

    /// Return the given responses in order. `Err` entries become network errors.
    pub fn scripted(responses: Vec<Result<Vec<BenchmarkRow>, String>>) -> Self {
        let mut queue = responses;
        queue.reverse();
        Self {
            responses: Mutex::new(queue),
            last: Mutex::new(Ok(Vec::new())),
            delay: Duration::ZERO,
            call_count: AtomicU32::new(0),
        }
    }

    /// Wait this long before answering each fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of fetches made so far.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RowSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_rows(&self) -> Result<Vec<BenchmarkRow>, DataUnavailable> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let response = {
            let next = self.responses.lock().unwrap().pop();
            let mut last = self.last.lock().unwrap();
            if let Some(next) = next {
                *last = next;
            }
            last.clone()
        };
        response.map_err(DataUnavailable::Network)
    }
}
