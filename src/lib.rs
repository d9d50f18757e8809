//! Spin Wheel：点击转盘随机抽取一个标签，停下后放彩纸庆祝。
//!
//! 纯逻辑位于 [`canvas`]、[`wheel`]、[`spin`]、[`confetti`]，不依赖窗口即可测试；
//! [`plugins`] 把它们接入 bevy 的固定节拍与渲染。

pub mod app;
pub mod canvas;
pub mod components;
pub mod confetti;
pub mod config;
pub mod logging;
pub mod plugins;
pub mod resources;
pub mod schedule;
pub mod spin;
pub mod wheel;
