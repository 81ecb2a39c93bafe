use {
	crate::consts::{CONFIG_EXT, DEFAULT_RUN_MODE},
	serde::Deserialize,
	tokio::sync::OnceCell,
	zeri::logging::LoggingConfig,
};

static CONFIG: OnceCell<Config> = OnceCell::const_new();

#[derive(Debug, Deserialize)]
pub struct CommonEnv {
	#[serde(default = "default_run_mode")]
	pub run_mode: String,
}

fn default_run_mode() -> String {
	DEFAULT_RUN_MODE.to_string()
}

#[derive(Debug, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub logging: LoggingConfig,
	pub worker: WorkerConfig,
}

#[derive(Debug, Deserialize)]
pub struct WorkerConfig {
	pub consumers: usize,
	pub tick_millis: u64,
	pub finalize_delay_secs: u64,
}

pub fn load_config(run_mode: &str) -> anyhow::Result<()> {
	let config_file = zeri::config::config_path(run_mode, CONFIG_EXT);
	let config: Config = zeri::config::load_config(&config_file)?;

	CONFIG.set(config).map_err(|_| anyhow::anyhow!("Config already initialized"))?;
	check_config()?;
	Ok(())
}

fn check_config() -> anyhow::Result<()> {
	let config = get_config();
	config.logging.check()?;
	if config.worker.consumers == 0 {
		return Err(anyhow::anyhow!("Worker consumers must be greater than 0"));
	}
	if config.worker.tick_millis == 0 {
		return Err(anyhow::anyhow!("Worker tick_millis must be greater than 0"));
	}
	Ok(())
}

pub fn get_config() -> &'static Config {
	CONFIG.get().expect("Config not initialized")
}
