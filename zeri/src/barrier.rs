use tokio::sync::watch;

/// Counting barrier: waiters are released whenever the counter is zero.
///
/// Increments and decrements go through the watch channel's lock, so the
/// decrement-and-check-zero step is atomic with respect to waiters.
#[derive(Debug)]
pub struct CountingBarrier {
	count: watch::Sender<usize>,
}

impl Default for CountingBarrier {
	fn default() -> Self {
		Self::new()
	}
}

impl CountingBarrier {
	pub fn new() -> Self {
		let (count, _) = watch::channel(0);
		Self { count }
	}

	pub fn add(&self) {
		self.count.send_modify(|count| *count += 1);
	}

	/// # Panics
	/// When called more times than `add`, like a negative wait-group counter.
	pub fn done(&self) {
		let mut underflow = false;
		self.count.send_modify(|count| match count.checked_sub(1) {
			Some(next) => *count = next,
			None => underflow = true,
		});
		if underflow {
			panic!("counting barrier: done called more times than add");
		}
	}

	pub fn count(&self) -> usize {
		*self.count.borrow()
	}

	/// Resolves once the counter is zero (immediately if it already is).
	pub async fn wait(&self) {
		let mut rx = self.count.subscribe();
		// sender lives in self, so the channel cannot close while we wait
		let _ = rx.wait_for(|count| *count == 0).await;
	}
}
