use {
	tokio::signal,
	tracing::{error, info},
};

/// OS stop request: SIGTERM, SIGINT, SIGHUP or SIGQUIT on unix, Ctrl-C elsewhere.
///
/// Streams are registered in `register`, not lazily in `recv`, so a signal
/// raised right after registration is captured instead of hitting the
/// default disposition. Must be called inside a Tokio runtime.
pub struct StopSignal {
	#[cfg(unix)]
	streams: Option<unix::StopStreams>,
}

impl StopSignal {
	pub fn register() -> Self {
		#[cfg(unix)]
		{
			let streams = match unix::StopStreams::register() {
				Ok(streams) => Some(streams),
				Err(e) => {
					error!("Failed to register unix stop signals, falling back to Ctrl-C: {}", e);
					None
				}
			};
			Self { streams }
		}
		#[cfg(not(unix))]
		{
			Self {}
		}
	}

	/// Waits for the first stop signal and returns its name.
	pub async fn recv(self) -> &'static str {
		#[cfg(unix)]
		{
			if let Some(streams) = self.streams {
				let name = streams.recv().await;
				info!("Received {}, stop requested", name);
				return name;
			}
		}

		if let Err(e) = signal::ctrl_c().await {
			error!("Failed to listen for Ctrl-C: {}", e);
		}
		info!("Received SIGINT, stop requested");
		"SIGINT"
	}
}

#[cfg(unix)]
mod unix {
	use {
		std::io,
		tokio::signal::unix::{Signal, SignalKind, signal},
	};

	pub(super) struct StopStreams {
		terminate: Signal,
		interrupt: Signal,
		hangup: Signal,
		quit: Signal,
	}

	impl StopStreams {
		pub(super) fn register() -> io::Result<Self> {
			Ok(Self {
				terminate: signal(SignalKind::terminate())?,
				interrupt: signal(SignalKind::interrupt())?,
				hangup: signal(SignalKind::hangup())?,
				quit: signal(SignalKind::quit())?,
			})
		}

		pub(super) async fn recv(mut self) -> &'static str {
			tokio::select! {
				_ = self.terminate.recv() => "SIGTERM",
				_ = self.interrupt.recv() => "SIGINT",
				_ = self.hangup.recv() => "SIGHUP",
				_ = self.quit.recv() => "SIGQUIT",
			}
		}
	}
}
