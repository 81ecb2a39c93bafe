use {
	crate::{
		config::{CommonEnv, get_config, load_config},
		consts::COMMON_ENV_PATH,
	},
	std::path::Path,
	tracing::info,
};

pub fn init_all() -> anyhow::Result<()> {
	let run_mode = init_load()?;
	init_logging()?;
	info!("Worker configuration loaded (run mode: {})", run_mode);
	Ok(())
}

fn init_load() -> anyhow::Result<String> {
	let common_env: CommonEnv = zeri::config::load_env(Some(Path::new(COMMON_ENV_PATH)), None)?;
	load_config(&common_env.run_mode)?;
	Ok(common_env.run_mode)
}

fn init_logging() -> anyhow::Result<()> {
	zeri::logging::init_logging(&get_config().logging)
}
