//! 日志系统初始化模块
//!
//! bevy 自带的 `LogPlugin` 在 [`crate::app`] 中被禁用，全局订阅者只在这里安装一次。

use tracing_subscriber::{EnvFilter, fmt};

/// 默认过滤规则：本程序 info，渲染后端只保留警告
const DEFAULT_FILTER: &str = "info,wgpu=warn,naga=warn,bevy_render=warn";

/// 初始化全局日志系统
///
/// 使用 `tracing-subscriber`，支持环境变量 `RUST_LOG` 控制日志级别
///
/// # 使用方式
///
/// ```bash
/// RUST_LOG=info cargo run          # info 及以上级别
/// RUST_LOG=spin_wheel=trace cargo run   # 查看每个节拍
/// RUST_LOG=warn cargo run          # 仅警告和错误
/// ```
pub fn init_logging() {
    // 从环境变量 RUST_LOG 读取日志级别
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = fmt()
        .with_env_filter(env_filter)
        .with_target(true) // 显示模块路径
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init();
    if let Err(e) = result {
        // 测试进程中可能已经安装过
        tracing::debug!("日志系统已初始化: {e}");
    }
}
