//! # 日志初始化模块
//!
//! 默认级别为 `warn`，可通过 `RUST_LOG` 环境变量覆盖。日志输出到标准错误，
//! 不影响标准输出上的结果报告。

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
