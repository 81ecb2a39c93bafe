// zeri 库入口
// Scaffolding shared by every service: shutdown coordination, config, logging, task running, tags.

pub mod barrier;
pub mod config;
pub mod consts;
pub mod graceful;
pub mod logging;
pub mod routine;
pub mod signal;
pub mod tag;
pub mod utils;
pub mod validate;

pub use {
	graceful::{ProcessGuard, ShutdownCoordinator},
	logging::{Attributes, LoggingConfig},
};
