use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use lru::LruCache;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::average::MovingAverage;

/// Delay tuning for a [`DebounceScheduler`].
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
	/// Lower bound for every delay.
	pub floor: Duration,
	/// Multiplier applied to a key's average run time.
	pub growth_factor: f64,
	/// Keys whose averages are remembered. Zero is treated as one.
	pub capacity: usize,
}

impl Default for SchedulerConfig {
	fn default() -> Self {
		Self {
			floor: Duration::from_millis(350),
			growth_factor: 1.3,
			capacity: 32,
		}
	}
}

/// A timer waiting to start a key's work.
struct Pending {
	handle: JoinHandle<()>,
	token: u64,
}

struct Inner<K> {
	averages: LruCache<K, MovingAverage>,
	pending: HashMap<K, Pending>,
	seq: u64,
}

/// Runs at most one piece of work per key after an adaptive delay.
///
/// Scheduling a key again before its timer fires replaces the pending work.
/// Work that already started is never cancelled. Must be used from within a
/// tokio runtime.
pub struct DebounceScheduler<K> {
	config: SchedulerConfig,
	inner: Arc<Mutex<Inner<K>>>,
}

impl<K> DebounceScheduler<K>
where
	K: Clone + Debug + Eq + Hash + Send + 'static,
{
	pub fn new(config: SchedulerConfig) -> Self {
		let capacity = NonZeroUsize::new(config.capacity).unwrap_or(NonZeroUsize::MIN);
		Self {
			config,
			inner: Arc::new(Mutex::new(Inner {
				averages: LruCache::new(capacity),
				pending: HashMap::new(),
				seq: 0,
			})),
		}
	}

	pub fn config(&self) -> &SchedulerConfig {
		&self.config
	}

	/// Delay the next scheduling of `key` would wait.
	///
	/// `max(floor, growth_factor × average run time)`, truncated to whole
	/// milliseconds. Keys without history get the floor. A lookup marks the
	/// key as recently used.
	pub fn delay_for(&self, key: &K) -> Duration {
		let average = self
			.inner
			.lock()
			.averages
			.get(key)
			.map_or(0.0, MovingAverage::value);
		scaled_delay(&self.config, average)
	}

	/// Feeds a run time for `key` into its average.
	pub fn record(&self, key: K, elapsed: Duration) {
		record(&self.inner, key, elapsed);
	}

	/// Arms a timer for `key`, replacing any pending one, and runs `work`
	/// when it fires. The run time of `work` updates the key's average.
	pub fn schedule<F, Fut>(&self, key: K, work: F)
	where
		F: FnOnce() -> Fut + Send + 'static,
		Fut: Future<Output = ()> + Send + 'static,
	{
		let delay = self.delay_for(&key);
		let mut inner = self.inner.lock();
		inner.seq = inner.seq.wrapping_add(1);
		let token = inner.seq;
		if let Some(previous) = inner.pending.remove(&key) {
			previous.handle.abort();
			trace!(?key, "superseded pending work");
		}

		let shared = Arc::clone(&self.inner);
		let task_key = key.clone();
		// The lock is held until the entry is stored, so the task always
		// finds its own token once the timer fires.
		let handle = tokio::spawn(async move {
			tokio::time::sleep(delay).await;
			{
				let mut inner = shared.lock();
				match inner.pending.get(&task_key) {
					Some(pending) if pending.token == token => {
						inner.pending.remove(&task_key);
					}
					_ => return,
				}
			}

			let started = Instant::now();
			work().await;
			let elapsed = started.elapsed();
			debug!(key = ?task_key, elapsed_ms = elapsed.as_millis() as u64, "debounced work finished");
			record(&shared, task_key, elapsed);
		});

		debug!(?key, delay_ms = delay.as_millis() as u64, "scheduled work");
		inner.pending.insert(key, Pending { handle, token });
	}

	/// Drops the pending timer for `key`. Returns true if one existed.
	pub fn cancel(&self, key: &K) -> bool {
		match self.inner.lock().pending.remove(key) {
			Some(pending) => {
				pending.handle.abort();
				true
			}
			None => false,
		}
	}

	pub fn is_pending(&self, key: &K) -> bool {
		self.inner.lock().pending.contains_key(key)
	}

	pub fn pending_count(&self) -> usize {
		self.inner.lock().pending.len()
	}
}

impl<K> Drop for DebounceScheduler<K> {
	fn drop(&mut self) {
		for (_, pending) in self.inner.lock().pending.drain() {
			pending.handle.abort();
		}
	}
}

fn record<K: Eq + Hash>(inner: &Mutex<Inner<K>>, key: K, elapsed: Duration) {
	let millis = elapsed.as_secs_f64() * 1000.0;
	inner
		.lock()
		.averages
		.get_or_insert_mut(key, MovingAverage::new)
		.push(millis);
}

fn scaled_delay(config: &SchedulerConfig, average_ms: f64) -> Duration {
	let scaled = (config.growth_factor * average_ms).floor();
	if !scaled.is_finite() || scaled <= 0.0 {
		return config.floor;
	}
	Duration::from_millis(scaled as u64).max(config.floor)
}

#[cfg(test)]
mod tests;
