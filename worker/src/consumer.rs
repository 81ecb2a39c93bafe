use {
	std::{
		sync::{
			Arc,
			atomic::{AtomicU64, Ordering},
		},
		time::Duration,
	},
	tracing::{Instrument, debug, info},
	zeri::{Attributes, ProcessGuard, ShutdownCoordinator},
};

/// Ticks processed by all consumers
#[derive(Debug, Default)]
pub struct Stats {
	ticks: AtomicU64,
}

impl Stats {
	pub fn ticks(&self) -> u64 {
		self.ticks.load(Ordering::Relaxed)
	}
}

/// 启动消费任务 每个任务持有一个 ProcessGuard 直到收到停机信号
pub fn start_consumer_tasks(coordinator: &ShutdownCoordinator, consumers: usize, tick: Duration, stats: Arc<Stats>) {
	for id in 0..consumers {
		let guard = coordinator.track();
		let coordinator = coordinator.clone();
		let stats = stats.clone();
		let span = Attributes::new().with("consumer", id).span();
		zeri::routine::run(run_consumer(coordinator, guard, tick, stats).instrument(span));
	}
	info!("Started {} consumer tasks", consumers);
}

async fn run_consumer(coordinator: ShutdownCoordinator, guard: ProcessGuard, tick: Duration, stats: Arc<Stats>) {
	let mut interval = tokio::time::interval(tick);
	loop {
		tokio::select! {
			_ = coordinator.stop_requested() => {
				info!("Consumer received stop signal");
				break;
			}
			_ = interval.tick() => {
				let total = stats.ticks.fetch_add(1, Ordering::Relaxed) + 1;
				debug!("tick (total {})", total);
			}
		}
	}
	guard.complete();
}
