//! 配置定义与解析
//!
//! 所有字段都有默认值，没有配置文件时程序以内置的编程语言转盘启动。

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::confetti::ConfettiParams;
use crate::spin::SpinParams;

/// 默认窗口标题
const DEFAULT_TITLE: &str = "Spin the wheel to choose a programming language!";

/// 默认标签
const DEFAULT_LABELS: [&str; 8] = [
    "Java",
    "Python",
    "C++",
    "JavaScript",
    "HTML",
    "CSS",
    "React",
    "Typescript",
];

/// 运行时配置
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// 窗口标题
    pub title: String,
    /// 转盘配置
    pub wheel: WheelSection,
    /// 旋转配置
    pub spin: SpinSection,
    /// 彩纸配置
    pub confetti: ConfettiSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            wheel: WheelSection::default(),
            spin: SpinSection::default(),
            confetti: ConfettiSection::default(),
        }
    }
}

/// 转盘配置
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WheelSection {
    /// 扇区标签，按显示顺序排列
    pub labels: Vec<String>,
}

impl Default for WheelSection {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.iter().map(|&s| s.to_owned()).collect(),
        }
    }
}

/// 旋转配置
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SpinSection {
    /// 节拍间隔（毫秒）
    pub tick_ms: u64,
    /// 最小步长（度）
    pub min_step: f32,
    /// 减速比例
    pub decel_factor: f32,
    /// 额外整圈数 `[最少, 最多]`
    pub full_rotations: [u32; 2],
}

impl Default for SpinSection {
    fn default() -> Self {
        let params = SpinParams::default();
        Self {
            tick_ms: 16,
            min_step: params.min_step,
            decel_factor: params.decel_factor,
            full_rotations: [*params.full_rotations.start(), *params.full_rotations.end()],
        }
    }
}

/// 彩纸配置
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfettiSection {
    /// 每次喷出的数量
    pub count: usize,
    /// 最小初速度
    pub min_speed: f32,
    /// 最大初速度
    pub max_speed: f32,
    /// 重力
    pub gravity: f32,
    /// 阻力系数
    pub drag: f32,
    /// 角速度上限
    pub spin: f32,
    /// 寿命（节拍）
    pub lifetime: u32,
    /// 尺寸 `[最小, 最大]`
    pub size: [u32; 2],
}

impl Default for ConfettiSection {
    fn default() -> Self {
        let params = ConfettiParams::default();
        Self {
            count: params.count,
            min_speed: params.min_speed,
            max_speed: params.max_speed,
            gravity: params.gravity,
            drag: params.drag,
            spin: params.spin,
            lifetime: params.lifetime,
            size: [*params.size.start(), *params.size.end()],
        }
    }
}

impl Config {
    /// 节拍间隔
    #[must_use]
    pub const fn tick(&self) -> Duration {
        Duration::from_millis(self.spin.tick_ms)
    }

    /// 旋转参数
    #[must_use]
    pub fn spin_params(&self) -> SpinParams {
        let [min, max] = self.spin.full_rotations;
        SpinParams {
            min_step: self.spin.min_step,
            decel_factor: self.spin.decel_factor,
            full_rotations: min..=max,
        }
    }

    /// 彩纸参数
    #[must_use]
    pub fn confetti_params(&self) -> ConfettiParams {
        let c = &self.confetti;
        let [min, max] = c.size;
        ConfettiParams {
            count: c.count,
            min_speed: c.min_speed,
            max_speed: c.max_speed,
            gravity: c.gravity,
            drag: c.drag,
            spin: c.spin,
            lifetime: c.lifetime,
            size: min..=max,
        }
    }

    /// 校验配置
    ///
    /// # Errors
    ///
    /// - 标签为空
    /// - 节拍间隔为 0
    /// - 旋转或彩纸参数非法
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.wheel.labels.is_empty(), "wheel.labels must not be empty");
        ensure!(self.spin.tick_ms > 0, "spin.tick_ms must be positive");
        self.spin_params().validate().context("invalid [spin] section")?;
        self.confetti_params()
            .validate()
            .context("invalid [confetti] section")?;
        Ok(())
    }
}

/// 从 TOML 字符串解析并校验配置
///
/// # Errors
///
/// - TOML 解析失败
/// - 配置字段反序列化失败
/// - 配置校验失败
pub fn parse_config_str(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s)?;
    cfg.validate()?;
    Ok(cfg)
}

/// 从指定路径加载配置（TOML）
///
/// # Errors
///
/// - 读取文件失败
/// - TOML 解析失败
/// - 配置校验失败
pub fn load_config(path: &Path) -> Result<Config> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config_str(&s).with_context(|| format!("invalid config {}", path.display()))
}
