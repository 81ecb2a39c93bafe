use {
	crate::consts::{CONFIG_EXT_JSON, CONFIG_EXT_TOML, CONFIG_EXT_YAML, CONFIG_EXT_YML, ENV_CONFIG_DIR, RUN_MODE_LOCAL, RUN_MODE_PROD, RUN_MODE_QC, RUN_MODE_STAGING},
	config::{Config, Environment},
	serde::de::DeserializeOwned,
	std::{fmt, io, path::Path},
	thiserror::Error,
};

pub type ConfigResult<T> = Result<T, ConfigError>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("config path is required")]
	MissingPath,

	#[error("failed to read config file {path}: {source}")]
	Read { path: String, source: io::Error },

	#[error("unsupported file extension: {0:?}")]
	UnsupportedExtension(String),

	#[error("failed to unmarshal {format}: {source}")]
	Decode { format: ConfigFormat, source: BoxError },

	#[error("failed to load environment: {0}")]
	Env(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
	Json,
	Yaml,
	Toml,
}

impl ConfigFormat {
	/// Format for a file extension (without the dot).
	pub fn from_extension(ext: &str) -> Option<Self> {
		match ext {
			CONFIG_EXT_JSON => Some(Self::Json),
			CONFIG_EXT_YML | CONFIG_EXT_YAML => Some(Self::Yaml),
			CONFIG_EXT_TOML => Some(Self::Toml),
			_ => None,
		}
	}
}

impl fmt::Display for ConfigFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Json => f.write_str("JSON"),
			Self::Yaml => f.write_str("YAML"),
			Self::Toml => f.write_str("TOML"),
		}
	}
}

/// Reads a JSON, YAML or TOML file (chosen by extension) into `T`.
pub fn load_config<T: DeserializeOwned>(config_path: impl AsRef<Path>) -> ConfigResult<T> {
	let path = config_path.as_ref();
	if path.as_os_str().is_empty() {
		return Err(ConfigError::MissingPath);
	}

	let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;

	let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
	let format = ConfigFormat::from_extension(ext).ok_or_else(|| ConfigError::UnsupportedExtension(ext.to_string()))?;

	decode(&data, format)
}

/// Decodes `data` in the given format.
pub fn decode<T: DeserializeOwned>(data: &str, format: ConfigFormat) -> ConfigResult<T> {
	let decoded = match format {
		ConfigFormat::Json => serde_json::from_str(data).map_err(BoxError::from),
		ConfigFormat::Toml => toml::from_str(data).map_err(BoxError::from),
		ConfigFormat::Yaml => serde_yaml_ng::from_str(data).map_err(BoxError::from),
	};
	decoded.map_err(|source| ConfigError::Decode { format, source })
}

/// Path of the config file for `env`: `./env/env.<env>.<ext>`.
///
/// qc, staging and prod have their own file, every other env maps to local.
/// `ext` may carry a leading dot; an unknown extension falls back to yml.
pub fn config_path(env: &str, ext: &str) -> String {
	let ext = ext.trim_start_matches('.');
	let ext = match ext {
		CONFIG_EXT_JSON | CONFIG_EXT_YML | CONFIG_EXT_YAML | CONFIG_EXT_TOML => ext,
		_ => CONFIG_EXT_YML,
	};

	let env = match env {
		RUN_MODE_QC | RUN_MODE_STAGING | RUN_MODE_PROD => env,
		_ => RUN_MODE_LOCAL,
	};

	format!("{}/env.{}.{}", ENV_CONFIG_DIR, env, ext)
}

/// Deserializes the process environment into `T`.
///
/// When `dotenv_path` is given, that file is loaded into the environment
/// first; variables already set are kept. With a `prefix`, only
/// `<PREFIX>_*` variables are considered and the prefix is stripped.
/// Keys are matched lowercased.
pub fn load_env<T: DeserializeOwned>(dotenv_path: Option<&Path>, prefix: Option<&str>) -> ConfigResult<T> {
	if let Some(path) = dotenv_path {
		dotenvy::from_path(path).map_err(|e| ConfigError::Env(format!("{}: {}", path.display(), e)))?;
	}

	let source = match prefix {
		Some(prefix) => Environment::with_prefix(prefix).prefix_separator("_"),
		None => Environment::default(),
	};

	Config::builder()
		.add_source(source.try_parsing(true))
		.build()
		.and_then(|config| config.try_deserialize())
		.map_err(|e| ConfigError::Env(e.to_string()))
}
