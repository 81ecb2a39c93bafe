mod config;
mod consts;
mod consumer;
mod graceful;
mod init;

use {
	consumer::Stats,
	std::{sync::Arc, time::Duration},
	tracing::info,
	zeri::ShutdownCoordinator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	// 初始化所有配置和日志
	init::init_all()?;
	let config = &config::get_config().worker;

	let coordinator = ShutdownCoordinator::new();
	let stats = Arc::new(Stats::default());

	consumer::start_consumer_tasks(&coordinator, config.consumers, Duration::from_millis(config.tick_millis), stats.clone());

	info!("Worker service started");

	// 等待系统信号并执行优雅停机
	graceful::shutdown(&coordinator, Duration::from_secs(config.finalize_delay_secs), stats).await;

	Ok(())
}
