//! 系统集合定义
//!
//! 用于分离输入、固定节拍逻辑与渲染

use bevy::prelude::*;

/// 固定节拍内的逻辑阶段（`FixedUpdate`）
///
/// 旋转先于彩纸执行，落定时喷出的粒子在同一节拍内开始运动
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum TickSet {
    /// 旋转推进
    Spin,
    /// 彩纸积分
    Confetti,
}

/// 每帧阶段（`Update`）
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum FrameSet {
    /// 指针输入
    Input,
    /// 状态到实体的同步
    Render,
}
