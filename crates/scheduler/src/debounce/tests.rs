use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use super::*;

fn counter() -> Arc<AtomicUsize> {
	Arc::new(AtomicUsize::new(0))
}

fn bump(count: &Arc<AtomicUsize>, by: usize) -> impl FnOnce() -> std::future::Ready<()> + Send + 'static {
	let count = Arc::clone(count);
	move || {
		count.fetch_add(by, Ordering::SeqCst);
		std::future::ready(())
	}
}

#[test]
fn unseen_keys_wait_the_floor() {
	let scheduler = DebounceScheduler::<&str>::new(SchedulerConfig::default());
	assert_eq!(scheduler.delay_for(&"pom"), Duration::from_millis(350));
}

#[test]
fn delay_scales_with_average_run_time() {
	let scheduler = DebounceScheduler::new(SchedulerConfig::default());

	scheduler.record("slow", Duration::from_millis(1000));
	assert_eq!(scheduler.delay_for(&"slow"), Duration::from_millis(1300));

	scheduler.record("fast", Duration::from_millis(100));
	assert_eq!(scheduler.delay_for(&"fast"), Duration::from_millis(350));
}

#[test]
fn least_recent_averages_are_evicted() {
	let scheduler = DebounceScheduler::new(SchedulerConfig {
		capacity: 0,
		..SchedulerConfig::default()
	});

	scheduler.record("a", Duration::from_millis(1000));
	scheduler.record("b", Duration::from_millis(1000));

	assert_eq!(scheduler.delay_for(&"a"), Duration::from_millis(350));
	assert_eq!(scheduler.delay_for(&"b"), Duration::from_millis(1300));
}

#[test]
fn looking_up_a_delay_keeps_the_key_warm() {
	let scheduler = DebounceScheduler::new(SchedulerConfig {
		capacity: 2,
		..SchedulerConfig::default()
	});

	scheduler.record("a", Duration::from_millis(1000));
	scheduler.record("b", Duration::from_millis(1000));
	assert_eq!(scheduler.delay_for(&"a"), Duration::from_millis(1300));
	scheduler.record("c", Duration::from_millis(1000));

	assert_eq!(scheduler.delay_for(&"a"), Duration::from_millis(1300));
	assert_eq!(scheduler.delay_for(&"b"), Duration::from_millis(350));
	assert_eq!(scheduler.delay_for(&"c"), Duration::from_millis(1300));
}

#[tokio::test(start_paused = true)]
async fn work_runs_once_after_the_delay() {
	let scheduler = DebounceScheduler::new(SchedulerConfig::default());
	let count = counter();

	scheduler.schedule("pom", bump(&count, 1));
	tokio::time::sleep(Duration::from_millis(349)).await;
	assert_eq!(count.load(Ordering::SeqCst), 0);
	assert!(scheduler.is_pending(&"pom"));

	tokio::time::sleep(Duration::from_millis(2)).await;
	tokio::task::yield_now().await;
	assert_eq!(count.load(Ordering::SeqCst), 1);
	assert_eq!(scheduler.pending_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn rescheduling_supersedes_pending_work() {
	let scheduler = DebounceScheduler::new(SchedulerConfig::default());
	let count = counter();

	scheduler.schedule("pom", bump(&count, 1));
	tokio::time::sleep(Duration::from_millis(200)).await;
	scheduler.schedule("pom", bump(&count, 10));
	assert_eq!(scheduler.pending_count(), 1);

	tokio::time::sleep(Duration::from_secs(1)).await;
	assert_eq!(count.load(Ordering::SeqCst), 10);
}

#[tokio::test(start_paused = true)]
async fn keys_are_independent() {
	let scheduler = DebounceScheduler::new(SchedulerConfig::default());
	let count = counter();

	scheduler.schedule("a", bump(&count, 1));
	scheduler.schedule("b", bump(&count, 10));
	assert_eq!(scheduler.pending_count(), 2);

	tokio::time::sleep(Duration::from_secs(1)).await;
	assert_eq!(count.load(Ordering::SeqCst), 11);
}

#[tokio::test(start_paused = true)]
async fn cancelled_work_never_runs() {
	let scheduler = DebounceScheduler::new(SchedulerConfig::default());
	let count = counter();

	scheduler.schedule("pom", bump(&count, 1));
	assert!(scheduler.cancel(&"pom"));
	assert!(!scheduler.cancel(&"pom"));

	tokio::time::sleep(Duration::from_secs(1)).await;
	assert_eq!(count.load(Ordering::SeqCst), 0);
	assert!(!scheduler.is_pending(&"pom"));
}

#[tokio::test(start_paused = true)]
async fn run_time_feeds_the_next_delay() {
	let scheduler = DebounceScheduler::new(SchedulerConfig::default());

	scheduler.schedule("pom", || tokio::time::sleep(Duration::from_millis(1000)));
	tokio::time::sleep(Duration::from_secs(2)).await;

	assert_eq!(scheduler.delay_for(&"pom"), Duration::from_millis(1300));
}
