//! Bounded, time-spaced timestamp stream backing `GET /date`.
//!
//! Each call to [`DateStream::events`] builds an independent lazy stream:
//! nothing is read from the clock and no timer is armed until the consumer
//! polls. Dropping the stream mid-way drops the pending timer with it, so a
//! disconnected client never triggers another emission.

use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{self, BoxStream, StreamExt};
use mockable::Clock;
use tokio::time;
use tracing::debug;

/// Number of timestamps emitted per stream.
pub const DEFAULT_COUNT: usize = 5;
/// Spacing between consecutive timestamps.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

/// Producer of epoch-millisecond timestamps.
#[derive(Clone)]
pub struct DateStream {
    clock: Arc<dyn Clock>,
    count: usize,
    period: Duration,
}

impl DateStream {
    /// Five timestamps, one second apart.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            count: DEFAULT_COUNT,
            period: DEFAULT_PERIOD,
        }
    }

    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Start a fresh stream.
    ///
    /// The first timestamp is produced on the first poll. Every timestamp is
    /// followed by a full period of silence, so the stream ends one period
    /// after the last value.
    pub fn events(&self) -> BoxStream<'static, i64> {
        let clock = Arc::clone(&self.clock);
        let period = self.period;
        let progress = Progress {
            emitted: 0,
            count: self.count,
        };

        stream::unfold(progress, move |mut progress| {
            let clock = Arc::clone(&clock);
            async move {
                if progress.emitted > 0 {
                    time::sleep(period).await;
                }
                if progress.emitted >= progress.count {
                    return None;
                }
                let timestamp = clock.utc().timestamp_millis();
                progress.emitted += 1;
                Some((timestamp, progress))
            }
        })
        .boxed()
    }
}

struct Progress {
    emitted: usize,
    count: usize,
}

impl Drop for Progress {
    fn drop(&mut self) {
        if self.emitted < self.count {
            debug!(
                emitted = self.emitted,
                expected = self.count,
                "date stream cancelled before completion"
            );
        }
    }
}
