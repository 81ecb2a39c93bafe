//! Fire-and-forget task execution.
//!
//! Every task runs behind a recover wrapper: a panic is caught, logged at
//! error level and turned into `None`, so it never tears down the caller.

use {
	futures::FutureExt,
	std::{
		any::Any,
		future::Future,
		panic::{self, AssertUnwindSafe},
	},
	tokio::task::JoinHandle,
	tracing::error,
};

/// Spawns `future` on the current runtime.
///
/// The handle can be dropped; awaiting it yields `Some(output)`, or `None`
/// when the task panicked.
pub fn run<F>(future: F) -> JoinHandle<Option<F::Output>>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tokio::spawn(async move {
		match AssertUnwindSafe(future).catch_unwind().await {
			Ok(output) => Some(output),
			Err(payload) => {
				log_panic(payload);
				None
			}
		}
	})
}

/// Runs a synchronous closure on the blocking pool with the same recovery as `run`.
pub fn run_blocking<F, T>(f: F) -> JoinHandle<Option<T>>
where
	F: FnOnce() -> T + Send + 'static,
	T: Send + 'static,
{
	tokio::task::spawn_blocking(move || recover(f))
}

/// Runs `f` in place, recovering and logging a panic.
pub fn recover<F, T>(f: F) -> Option<T>
where
	F: FnOnce() -> T,
{
	match panic::catch_unwind(AssertUnwindSafe(f)) {
		Ok(output) => Some(output),
		Err(payload) => {
			log_panic(payload);
			None
		}
	}
}

/// Renders a panic payload; `panic!` produces either `&str` or `String`.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(msg) = payload.downcast_ref::<&str>() {
		msg.to_string()
	} else if let Some(msg) = payload.downcast_ref::<String>() {
		msg.clone()
	} else {
		"unknown panic payload".to_string()
	}
}

fn log_panic(payload: Box<dyn Any + Send>) {
	error!("recovered panic: {}", panic_message(payload.as_ref()));
}
