//! 转盘旋转控制
//!
//! 两态状态机：`Idle` 与 `Spinning`。每次点击在空闲时启动一次旋转，
//! 之后由外部固定节拍调用 [`SpinWheel::tick`] 推进，直到剩余角度耗尽。
//! 步长取剩余角度的固定比例并设有下限，从而只凭剩余角度就能得到缓出效果。

use std::fmt;
use std::ops::RangeInclusive;

use anyhow::{Result, ensure};
use bevy::prelude::Resource;
use rand::Rng;

use crate::canvas::wrap_degrees;
use crate::wheel::{INDICATOR_ANGLE, WheelState};

/// 旋转参数
#[derive(Debug, Clone, PartialEq)]
pub struct SpinParams {
    /// 接近停止时每帧的最小步长（度）
    pub min_step: f32,
    /// 每帧消耗剩余角度的比例
    pub decel_factor: f32,
    /// 额外整圈数的取值范围（闭区间）
    pub full_rotations: RangeInclusive<u32>,
}

impl Default for SpinParams {
    fn default() -> Self {
        Self {
            min_step: 2.0,
            decel_factor: 0.25,
            full_rotations: 3..=6,
        }
    }
}

impl SpinParams {
    /// 校验参数
    ///
    /// # Errors
    ///
    /// - 最小步长不为正
    /// - 减速比例不在 (0, 1] 内
    /// - 整圈数下限为 0 或区间为空
    pub fn validate(&self) -> Result<()> {
        ensure!(self.min_step > 0.0, "min_step must be positive");
        ensure!(
            self.decel_factor > 0.0 && self.decel_factor <= 1.0,
            "decel_factor must be in (0, 1], got {}",
            self.decel_factor
        );
        ensure!(
            *self.full_rotations.start() >= 1,
            "full_rotations lower bound must be at least 1"
        );
        ensure!(
            !self.full_rotations.is_empty(),
            "full_rotations range {:?} is empty",
            self.full_rotations
        );
        Ok(())
    }

    /// 根据剩余角度计算下一步步长
    #[must_use]
    pub fn step_for(&self, remaining: f32) -> f32 {
        (remaining * self.decel_factor)
            .max(self.min_step)
            .min(remaining)
    }
}

/// 状态栏文字
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    /// 等待点击
    #[default]
    Ready,
    /// 旋转中
    Spinning,
    /// 已停在某个标签上
    Landed(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("Click the wheel to spin!"),
            Self::Spinning => f.write_str("Spinning..."),
            Self::Landed(label) => write!(f, "Landed on: {label}, go make a project"),
        }
    }
}

/// 旋转阶段
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinPhase {
    /// 空闲
    Idle,
    /// 旋转中
    Spinning {
        /// 目标扇区
        target: usize,
        /// 剩余角度
        remaining: f32,
    },
}

/// 一次旋转的计划
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    /// 目标扇区
    pub target: usize,
    /// 额外整圈数
    pub extra_turns: u32,
    /// 对齐目标所需的正向角度，位于 [0, 360)
    pub delta: f32,
    /// 总旋转角度
    pub total: f32,
}

/// 单次节拍的结果
#[derive(Debug, Clone, PartialEq)]
pub enum SpinTick {
    /// 空闲，无事发生
    Idle,
    /// 转动了 `step` 度
    Advanced {
        /// 本帧步长
        step: f32,
    },
    /// 停止并落在目标上
    Landed {
        /// 目标扇区
        index: usize,
        /// 目标标签
        label: String,
    },
}

/// 转盘与其旋转状态
#[derive(Resource, Debug, Clone)]
pub struct SpinWheel {
    /// 转盘
    wheel: WheelState,
    /// 旋转参数
    params: SpinParams,
    /// 当前阶段
    phase: SpinPhase,
    /// 状态栏
    status: Status,
}

impl SpinWheel {
    /// 创建空闲的转盘
    ///
    /// # Errors
    ///
    /// - 标签列表为空
    /// - 旋转参数非法
    pub fn new(labels: Vec<String>, params: SpinParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            wheel: WheelState::new(labels)?,
            params,
            phase: SpinPhase::Idle,
            status: Status::Ready,
        })
    }

    /// 转盘状态
    #[must_use]
    pub const fn wheel(&self) -> &WheelState {
        &self.wheel
    }

    /// 当前阶段
    #[must_use]
    pub const fn phase(&self) -> SpinPhase {
        self.phase
    }

    /// 状态栏
    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// 是否正在旋转
    #[must_use]
    pub const fn is_spinning(&self) -> bool {
        matches!(self.phase, SpinPhase::Spinning { .. })
    }

    /// 剩余角度（空闲时为 0）
    #[must_use]
    pub const fn remaining(&self) -> f32 {
        match self.phase {
            SpinPhase::Idle => 0.0,
            SpinPhase::Spinning { remaining, .. } => remaining,
        }
    }

    /// 当前旋转的目标标签
    #[must_use]
    pub fn target_label(&self) -> Option<&str> {
        match self.phase {
            SpinPhase::Idle => None,
            SpinPhase::Spinning { target, .. } => self.wheel.label(target),
        }
    }

    /// 处理一次点击：空闲时随机选择目标并开始旋转，旋转中忽略
    pub fn click<R: Rng>(&mut self, rng: &mut R) -> Option<SpinPlan> {
        if self.is_spinning() {
            return None;
        }
        let target = rng.random_range(0..self.wheel.len());
        let extra_turns = rng.random_range(self.params.full_rotations.clone());
        self.start_toward(target, extra_turns)
    }

    /// 以确定的目标与整圈数开始旋转，旋转中或索引越界时返回 `None`
    pub fn start_toward(&mut self, target: usize, extra_turns: u32) -> Option<SpinPlan> {
        if self.is_spinning() || target >= self.wheel.len() {
            return None;
        }
        let plan = self.plan(target, extra_turns);
        self.phase = SpinPhase::Spinning {
            target,
            remaining: plan.total,
        };
        self.status = Status::Spinning;
        Some(plan)
    }

    /// 计算把 `target` 的中线转到指针下方所需的旋转
    #[must_use]
    pub fn plan(&self, target: usize, extra_turns: u32) -> SpinPlan {
        let target_center = self.wheel.local_center(target);
        let desired = wrap_degrees(INDICATOR_ANGLE - target_center);
        let delta = wrap_degrees(desired - self.wheel.current_angle());
        SpinPlan {
            target,
            extra_turns,
            delta,
            total: extra_turns as f32 * 360.0 + delta,
        }
    }

    /// 推进一个节拍
    pub fn tick(&mut self) -> SpinTick {
        let SpinPhase::Spinning { target, remaining } = self.phase else {
            return SpinTick::Idle;
        };
        if remaining <= 0.0 {
            self.phase = SpinPhase::Idle;
            self.wheel.snap();
            let label = self.wheel.label(target).unwrap_or_default().to_owned();
            self.status = Status::Landed(label.clone());
            return SpinTick::Landed {
                index: target,
                label,
            };
        }
        let step = self.params.step_for(remaining);
        self.wheel.rotate(step);
        self.phase = SpinPhase::Spinning {
            target,
            remaining: (remaining - step).max(0.0),
        };
        SpinTick::Advanced { step }
    }
}
