use {
	serde::Deserialize,
	std::path::Path,
	tests::test_utils::TempFile,
	zeri::config::{ConfigError, ConfigFormat, config_path, load_config, load_env},
};

#[derive(Debug, Deserialize, PartialEq)]
struct App {
	name: String,
	version: String,
	database: Database,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Database {
	host: String,
	port: u16,
	user: String,
	password: String,
}

fn expected_app() -> App {
	App {
		name: "zeri".to_string(),
		version: "1.0.0".to_string(),
		database: Database { host: "localhost".to_string(), port: 5432, user: "admin".to_string(), password: "secret".to_string() },
	}
}

#[test]
fn test_load_json_config() {
	let file = TempFile::with_extension(
		"json",
		r#"{"name":"zeri","version":"1.0.0","database":{"host":"localhost","port":5432,"user":"admin","password":"secret"}}"#,
	);
	let app: App = load_config(file.path()).unwrap();
	assert_eq!(app, expected_app());
}

#[test]
fn test_load_yaml_config() {
	let yaml = "name: zeri\nversion: 1.0.0\ndatabase:\n  host: localhost\n  port: 5432\n  user: admin\n  password: secret\n";
	for ext in ["yml", "yaml"] {
		let file = TempFile::with_extension(ext, yaml);
		let app: App = load_config(file.path()).unwrap();
		assert_eq!(app, expected_app(), "extension {}", ext);
	}
}

#[test]
fn test_load_yaml_top_level_sequence() {
	let file = TempFile::with_extension("yaml", "- a\n- b\n");
	let items: Vec<String> = load_config(file.path()).unwrap();
	assert_eq!(items, vec!["a", "b"]);

	// same shape as the JSON equivalent
	let file = TempFile::with_extension("json", r#"["a","b"]"#);
	assert_eq!(load_config::<Vec<String>>(file.path()).unwrap(), items);

	let file = TempFile::with_extension("yml", "42\n");
	assert_eq!(load_config::<u32>(file.path()).unwrap(), 42);
}

#[test]
fn test_load_toml_config() {
	let file = TempFile::with_extension(
		"toml",
		"name = \"zeri\"\nversion = \"1.0.0\"\n\n[database]\nhost = \"localhost\"\nport = 5432\nuser = \"admin\"\npassword = \"secret\"\n",
	);
	let app: App = load_config(file.path()).unwrap();
	assert_eq!(app, expected_app());
}

#[test]
fn test_empty_path_is_rejected() {
	let err = load_config::<App>("").unwrap_err();
	assert!(matches!(err, ConfigError::MissingPath));
	assert_eq!(err.to_string(), "config path is required");
}

#[test]
fn test_missing_file_reports_read_error() {
	let err = load_config::<App>("./env/does-not-exist.json").unwrap_err();
	assert!(matches!(err, ConfigError::Read { .. }), "got {:?}", err);
}

#[test]
fn test_unsupported_extension() {
	let file = TempFile::with_extension("ini", "name = zeri");
	let err = load_config::<App>(file.path()).unwrap_err();
	match err {
		ConfigError::UnsupportedExtension(ext) => assert_eq!(ext, "ini"),
		other => panic!("unexpected error: {:?}", other),
	}
}

#[test]
fn test_malformed_content_reports_format() {
	let file = TempFile::with_extension("json", "{ not json");
	let err = load_config::<App>(file.path()).unwrap_err();
	match err {
		ConfigError::Decode { format, .. } => assert_eq!(format, ConfigFormat::Json),
		other => panic!("unexpected error: {:?}", other),
	}

	let file = TempFile::with_extension("toml", "name = \"zeri\"\n");
	let err = load_config::<App>(file.path()).unwrap_err();
	assert!(err.to_string().starts_with("failed to unmarshal TOML"), "got {}", err);
}

#[test]
fn test_config_path_per_environment() {
	assert_eq!(config_path("qc", "json"), "./env/env.qc.json");
	assert_eq!(config_path("staging", "yaml"), "./env/env.staging.yaml");
	assert_eq!(config_path("prod", "yml"), "./env/env.prod.yml");
	assert_eq!(config_path("prod", "toml"), "./env/env.prod.toml");
	assert_eq!(config_path("dev", "json"), "./env/env.local.json");
	assert_eq!(config_path("", "json"), "./env/env.local.json");
}

#[test]
fn test_config_path_extension_fallback() {
	assert_eq!(config_path("qc", ".json"), "./env/env.qc.json");
	assert_eq!(config_path("qc", "xml"), "./env/env.qc.yml");
	assert_eq!(config_path("local", ""), "./env/env.local.yml");
}

#[derive(Debug, Deserialize)]
struct ServiceEnv {
	host: String,
	port: u16,
	#[serde(default)]
	debug: bool,
}

#[test]
fn test_load_env_from_dotenv_with_prefix() {
	let prefix = format!("ZT{}", uuid::Uuid::new_v4().simple()).to_uppercase();
	let file = TempFile::with_extension("env", &format!("{p}_HOST=db.internal\n{p}_PORT=6543\n{p}_DEBUG=true\n", p = prefix));

	let env: ServiceEnv = load_env(Some(file.path()), Some(&prefix)).unwrap();
	assert_eq!(env.host, "db.internal");
	assert_eq!(env.port, 6543);
	assert!(env.debug);
}

#[test]
fn test_load_env_missing_dotenv_file() {
	let err = load_env::<ServiceEnv>(Some(Path::new("./env/missing.env")), Some("ZT_MISSING")).unwrap_err();
	assert!(matches!(err, ConfigError::Env(_)));
}

#[test]
fn test_load_env_missing_required_field() {
	let prefix = format!("ZT{}", uuid::Uuid::new_v4().simple()).to_uppercase();
	let file = TempFile::with_extension("env", &format!("{}_HOST=db.internal\n", prefix));
	let err = load_env::<ServiceEnv>(Some(file.path()), Some(&prefix)).unwrap_err();
	assert!(matches!(err, ConfigError::Env(_)));
}
