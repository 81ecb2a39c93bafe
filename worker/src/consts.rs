/// 公共环境变量文件
pub const COMMON_ENV_PATH: &str = "./env/common.env";

/// Config file extension resolved through `zeri::config::config_path`
pub const CONFIG_EXT: &str = "toml";

/// Run mode used when RUN_MODE is not set
pub const DEFAULT_RUN_MODE: &str = "local";
