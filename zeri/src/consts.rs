/// Directory holding the per-environment configuration files
pub const ENV_CONFIG_DIR: &str = "./env";

/// Environments with a dedicated configuration file; anything else resolves to local
pub const RUN_MODE_QC: &str = "qc";
pub const RUN_MODE_STAGING: &str = "staging";
pub const RUN_MODE_PROD: &str = "prod";
pub const RUN_MODE_LOCAL: &str = "local";

/// Config file extensions accepted by `config::config_path`
pub const CONFIG_EXT_JSON: &str = "json";
pub const CONFIG_EXT_YML: &str = "yml";
pub const CONFIG_EXT_YAML: &str = "yaml";
pub const CONFIG_EXT_TOML: &str = "toml";

/// Tag key marking the primary key field
pub const PRIMARY_KEY_TAG: &str = "PRIMARYKEY";

/// Separator used by `validate::check_primary_key` when parsing field tags
pub const FIELD_TAG_SEPARATOR: &str = ";";

/// Exit status used once every barrier has opened
pub const EXIT_SUCCESS: i32 = 0;
