//! 插件模块
//!
//! 包含所有功能插件的实现

pub mod confetti_effect;
pub mod spin_controller;
pub mod time_system;
pub mod wheel_renderer;

use bevy::prelude::Color;

pub use confetti_effect::{ConfettiEffectPlugin, ConfettiRendererPlugin};
pub use spin_controller::SpinControllerPlugin;
pub use time_system::TimeSystemPlugin;
pub use wheel_renderer::WheelRendererPlugin;

/// 调色板 RGB 转为 bevy 颜色
pub(crate) fn palette_color([r, g, b]: [u8; 3]) -> Color {
    Color::srgb_u8(r, g, b)
}
