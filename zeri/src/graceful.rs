//! Graceful shutdown coordination.
//!
//! ```text
//! register_process / track ──▶ pending += 1
//! complete_process / drop  ──▶ pending -= 1
//! stop signal              ──▶ pending -= 1 (the listener's own slot)
//!
//! begin_shutdown(delay, f) ──▶ finalizers += 1
//!                               └─ task: pending == 0 → sleep(delay) → f() → finalizers -= 1
//!
//! wait_for_termination     ──▶ pending == 0 → finalizers == 0 → exit(0)
//! ```
//!
//! Registering a process after a waiter has started is allowed, but whether
//! that waiter observes the new registration is unspecified.

use {
	crate::{barrier::CountingBarrier, consts::EXIT_SUCCESS, routine, signal::StopSignal},
	std::{future::Future, sync::Arc, time::Duration},
	tokio::sync::{oneshot, watch},
	tracing::{debug, error},
};

/// Called with the exit status once every barrier has opened.
pub type ExitHandler = Arc<dyn Fn(i32) + Send + Sync>;

struct Inner {
	pending: CountingBarrier,
	finalizers: CountingBarrier,
	stop_requested: watch::Sender<bool>,
	exit: ExitHandler,
}

/// Process-wide shutdown barrier.
///
/// Construct once at startup and hand clones to whatever registers work or
/// triggers shutdown; all clones share one state.
#[derive(Clone)]
pub struct ShutdownCoordinator {
	inner: Arc<Inner>,
}

impl ShutdownCoordinator {
	/// Listens for OS stop signals and exits the process on termination.
	pub fn new() -> Self {
		Self::with_exit_handler(|code| std::process::exit(code))
	}

	/// Listens for OS stop signals; `exit` replaces `std::process::exit`.
	pub fn with_exit_handler<E>(exit: E) -> Self
	where
		E: Fn(i32) + Send + Sync + 'static,
	{
		let signal = StopSignal::register();
		Self::with_stop_signal(
			async move {
				signal.recv().await;
			},
			exit,
		)
	}

	/// Uses `stop` instead of OS signals as the trigger that releases the
	/// listener's pending slot.
	pub fn with_stop_signal<S, E>(stop: S, exit: E) -> Self
	where
		S: Future<Output = ()> + Send + 'static,
		E: Fn(i32) + Send + Sync + 'static,
	{
		let (stop_requested, _) = watch::channel(false);
		let inner = Arc::new(Inner { pending: CountingBarrier::new(), finalizers: CountingBarrier::new(), stop_requested, exit: Arc::new(exit) });

		inner.pending.add();
		let listener = inner.clone();
		tokio::spawn(async move {
			stop.await;
			debug!("Stop requested, releasing listener slot");
			listener.stop_requested.send_replace(true);
			listener.pending.done();
		});

		Self { inner }
	}

	pub fn register_process(&self) {
		self.inner.pending.add();
	}

	/// # Panics
	/// When more processes are completed than were registered.
	pub fn complete_process(&self) {
		self.inner.pending.done();
	}

	/// Registers a process that completes when the guard is dropped.
	pub fn track(&self) -> ProcessGuard {
		self.register_process();
		ProcessGuard { coordinator: self.clone() }
	}

	/// Processes not yet completed, including the stop listener's slot.
	pub fn pending(&self) -> usize {
		self.inner.pending.count()
	}

	/// In-flight finalization sequences started by `begin_shutdown`.
	pub fn finalizers(&self) -> usize {
		self.inner.finalizers.count()
	}

	pub fn is_stop_requested(&self) -> bool {
		*self.inner.stop_requested.borrow()
	}

	/// Resolves once the stop trigger has fired.
	pub async fn stop_requested(&self) {
		let mut rx = self.inner.stop_requested.subscribe();
		let _ = rx.wait_for(|stopped| *stopped).await;
	}

	/// Returns immediately. In the background: waits for every pending
	/// process, sleeps `delay`, then runs `finalizer` exactly once. A
	/// panicking finalizer is logged and still counts as finished.
	pub fn begin_shutdown<F>(&self, delay: Duration, finalizer: F)
	where
		F: FnOnce() + Send + 'static,
	{
		self.inner.finalizers.add();
		let inner = self.inner.clone();
		tokio::spawn(async move {
			inner.pending.wait().await;
			debug!("Stopping, finalizer runs in {:?}", delay);
			tokio::time::sleep(delay).await;
			if routine::recover(finalizer).is_none() {
				error!("Finalizer panicked, continuing shutdown");
			}
			inner.finalizers.done();
		});
	}

	/// Both barriers open: no pending process and no running finalizer.
	pub async fn drained(&self) {
		self.inner.pending.wait().await;
		self.inner.finalizers.wait().await;
	}

	/// Waits for `drained` and exits with status 0.
	///
	/// Does not return with the default exit handler.
	pub async fn wait_for_termination(&self) {
		self.drained().await;
		debug!("Shutdown initiated");
		(self.inner.exit)(EXIT_SUCCESS);
	}

	/// Like `wait_for_termination` with an extra `delay` before exiting.
	pub async fn wait_for_termination_with_delay(&self, delay: Duration) {
		self.drained().await;
		debug!("Shutdown initiated, exiting in {:?}", delay);
		tokio::time::sleep(delay).await;
		(self.inner.exit)(EXIT_SUCCESS);
	}

	/// Waits for every pending process through a no-op finalization, then terminates.
	pub async fn await_and_terminate(&self) {
		let (done_tx, done_rx) = oneshot::channel();
		self.begin_shutdown(Duration::ZERO, move || {
			let _ = done_tx.send(());
		});
		let _ = done_rx.await;
		self.wait_for_termination().await;
	}
}

impl Default for ShutdownCoordinator {
	fn default() -> Self {
		Self::new()
	}
}

/// A registered process; completes it on drop.
#[must_use = "dropping the guard completes the process immediately"]
pub struct ProcessGuard {
	coordinator: ShutdownCoordinator,
}

impl ProcessGuard {
	/// Completes the process now.
	pub fn complete(self) {}
}

impl Drop for ProcessGuard {
	fn drop(&mut self) {
		self.coordinator.complete_process();
	}
}
