//! 跨插件组件定义
//!
//! 定义所有跨插件使用的Component类型

use bevy::prelude::*;

/// 转盘绘制部件标记（扇区、标签、中心圆盘、指针），每次重绘整体替换
#[derive(Component)]
pub struct WheelPart;

/// 状态栏文字标记
#[derive(Component)]
pub struct StatusText;

/// 彩纸实体，记录对应的粒子编号
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfettiPiece(pub u64);
