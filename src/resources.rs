//! 共享资源定义
//!
//! 定义所有跨插件使用的Resource类型

use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// 命令行参数
#[derive(Parser, Resource, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct ExecArgs {
    /// TOML 配置文件路径
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// 随机数种子，指定后每次运行的结果相同
    #[arg(long)]
    pub seed: Option<u64>,
}

/// 抽取目标与生成彩纸共用的随机数发生器
#[derive(Resource, Deref, DerefMut)]
pub struct WheelRng(pub StdRng);

impl WheelRng {
    /// 按种子创建，未指定时取系统熵
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self(seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64))
    }
}
