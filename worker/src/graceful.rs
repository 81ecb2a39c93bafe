use {
	crate::consumer::Stats,
	std::{sync::Arc, time::Duration},
	tracing::info,
	zeri::ShutdownCoordinator,
};

/// 注册 finalizer 然后等待所有 consumer 退出后结束进程
pub async fn shutdown(coordinator: &ShutdownCoordinator, finalize_delay: Duration, stats: Arc<Stats>) {
	coordinator.begin_shutdown(finalize_delay, move || {
		info!("Finalizing: {} ticks processed", stats.ticks());
	});

	info!("Waiting for consumers to finish...");
	coordinator.wait_for_termination().await;
}
