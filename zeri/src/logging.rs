use {
	chrono::{SecondsFormat, Utc},
	serde::{Deserialize, Serialize},
	std::{collections::BTreeMap, fmt, io, path::Path, str::FromStr},
	tokio::sync::OnceCell,
	tracing::{Span, info, info_span},
	tracing_appender::{
		non_blocking::WorkerGuard,
		rolling::{RollingFileAppender, Rotation},
	},
	tracing_subscriber::{
		EnvFilter,
		fmt::{format::Writer, time::FormatTime, writer::BoxMakeWriter},
	},
};

// 保持 guard 存活，确保日志缓冲区被刷新到文件
static LOG_GUARD: OnceCell<WorkerGuard> = OnceCell::const_new();

const DEFAULT_ROTATION_MAX_FILES: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Debug,
	Info,
	Warn,
	Error,
}

impl LogLevel {
	pub fn as_str(&self) -> &'static str {
		match self {
			LogLevel::Debug => "debug",
			LogLevel::Info => "info",
			LogLevel::Warn => "warn",
			LogLevel::Error => "error",
		}
	}
}

impl FromStr for LogLevel {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"debug" => Ok(LogLevel::Debug),
			"info" => Ok(LogLevel::Info),
			"warn" => Ok(LogLevel::Warn),
			"error" => Ok(LogLevel::Error),
			other => Err(anyhow::anyhow!("Invalid log level: {}", other)),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
	Json,
	Console,
}

impl Encoding {
	pub fn as_str(&self) -> &'static str {
		match self {
			Encoding::Json => "json",
			Encoding::Console => "console",
		}
	}
}

/// 日志配置结构体（用于从配置文件反序列化）
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
	/// Console encoding, debug level and colored levels
	pub dev_mode: bool,
	/// Ignored in dev mode; info when unset
	pub level: Option<LogLevel>,
	/// Ignored in dev mode; json when unset
	pub encoding: Option<Encoding>,
	/// Omit file and line number of the call site
	pub disable_caller: bool,
	/// Daily rotated log file; stdout when unset
	pub file: Option<String>,
	pub rotation_max_files: usize,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self { dev_mode: false, level: None, encoding: None, disable_caller: false, file: None, rotation_max_files: DEFAULT_ROTATION_MAX_FILES }
	}
}

impl LoggingConfig {
	/// 检查配置是否有效
	pub fn check(&self) -> anyhow::Result<()> {
		if let Some(file) = &self.file {
			if file.is_empty() {
				return Err(anyhow::anyhow!("Logging file is empty"));
			}
			if self.rotation_max_files == 0 {
				return Err(anyhow::anyhow!("Logging rotation_max_files must be greater than 0"));
			}
		}
		Ok(())
	}

	pub fn effective_level(&self) -> LogLevel {
		if self.dev_mode { LogLevel::Debug } else { self.level.unwrap_or(LogLevel::Info) }
	}

	pub fn effective_encoding(&self) -> Encoding {
		if self.dev_mode { Encoding::Console } else { self.encoding.unwrap_or(Encoding::Json) }
	}
}

/// RFC 3339 timestamps in UTC, second precision
#[derive(Debug, Clone, Copy, Default)]
pub struct Rfc3339Timer;

impl FormatTime for Rfc3339Timer {
	fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
		write!(w, "{}", Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
	}
}

/// Installs the global subscriber. `RUST_LOG`, when set, overrides the configured level.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
	config.check()?;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.effective_level().as_str()));
	let with_caller = !config.disable_caller;
	let ansi = config.dev_mode && config.file.is_none();
	let (writer, guard) = match config.file.as_deref() {
		Some(file) => {
			let (writer, guard) = file_writer(file, config.rotation_max_files)?;
			(writer, Some(guard))
		}
		None => (BoxMakeWriter::new(io::stdout), None),
	};

	let builder = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(writer)
		.with_timer(Rfc3339Timer)
		.with_file(with_caller)
		.with_line_number(with_caller)
		.with_target(true)
		.with_ansi(ansi);
	let installed = match config.effective_encoding() {
		Encoding::Json => builder.json().try_init(),
		Encoding::Console => builder.try_init(),
	};
	// 安装失败时 guard 在此处被 drop，worker 线程随之退出
	installed.map_err(|e| anyhow::anyhow!("Failed to install logging subscriber: {}", e))?;
	if let Some(guard) = guard {
		LOG_GUARD.set(guard).map_err(|_| anyhow::anyhow!("File logging already initialized"))?;
	}

	info!(log_level = config.effective_level().as_str(), encoding = config.effective_encoding().as_str(), "Logging system initialized");
	Ok(())
}

/// Whether a file writer is installed and its flush guard held.
pub fn file_logging_active() -> bool {
	LOG_GUARD.initialized()
}

fn file_writer(file_path: &str, rotation_max_files: usize) -> anyhow::Result<(BoxMakeWriter, WorkerGuard)> {
	let path = Path::new(file_path);
	let dir = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => {
			std::fs::create_dir_all(parent)?;
			parent
		}
		_ => Path::new("."),
	};
	let file_name = path.file_name().and_then(|name| name.to_str()).ok_or_else(|| anyhow::anyhow!("Invalid log file name: {}", file_path))?;
	let file_appender = RollingFileAppender::builder().rotation(Rotation::DAILY).max_log_files(rotation_max_files).filename_prefix(file_name).build(dir)?;
	let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
	Ok((BoxMakeWriter::new(non_blocking), guard))
}

/// Key/value context attached to every event logged inside its span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
		self.insert(key, value);
		self
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl fmt::Display) {
		self.0.insert(key.into(), value.to_string());
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Info-level span carrying the attributes as its `attrs` field.
	pub fn span(&self) -> Span {
		info_span!("attributes", attrs = %self)
	}
}

impl fmt::Display for Attributes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, (key, value)) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(" ")?;
			}
			write!(f, "{}={}", key, value)?;
		}
		Ok(())
	}
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for Attributes {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut attributes = Self::new();
		for (key, value) in iter {
			attributes.insert(key, value);
		}
		attributes
	}
}
