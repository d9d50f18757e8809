//! 旋转控制插件
//!
//! 指针按下时尝试开始旋转；每个固定节拍推进一次，落定后触发彩纸

use bevy::input::touch::Touches;
use bevy::prelude::*;

use crate::confetti::Confetti;
use crate::resources::WheelRng;
use crate::schedule::{FrameSet, TickSet};
use crate::spin::{SpinTick, SpinWheel};

/// 旋转控制插件
pub struct SpinControllerPlugin;

impl Plugin for SpinControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, spin_on_press.in_set(FrameSet::Input))
            .add_systems(
                FixedUpdate,
                advance_spin.run_if(spin_in_flight).in_set(TickSet::Spin),
            );
    }
}

/// 是否有旋转正在进行
fn spin_in_flight(wheel: Res<SpinWheel>) -> bool {
    wheel.is_spinning()
}

/// 鼠标左键或触摸按下时开始旋转，坐标不参与判断
fn spin_on_press(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut wheel: ResMut<SpinWheel>,
    mut rng: ResMut<WheelRng>,
) {
    if !mouse.just_pressed(MouseButton::Left) && !touches.any_just_pressed() {
        return;
    }
    if wheel.is_spinning() {
        debug!("旋转进行中，忽略点击");
        return;
    }
    let Some(plan) = wheel.click(&mut rng.0) else {
        return;
    };
    info!(
        target_index = plan.target,
        target_label = wheel.target_label().unwrap_or_default(),
        extra_turns = plan.extra_turns,
        total = plan.total,
        "开始旋转"
    );
}

/// 推进旋转一个节拍
fn advance_spin(
    mut wheel: ResMut<SpinWheel>,
    mut confetti: ResMut<Confetti>,
    mut rng: ResMut<WheelRng>,
) {
    match wheel.tick() {
        SpinTick::Advanced { step } => {
            trace!(step, remaining = wheel.remaining(), "转盘推进");
        }
        SpinTick::Landed { index, label } => {
            info!(index, label = %label, "转盘停止");
            let spawned = confetti.burst(&mut rng.0);
            debug!(spawned, live = confetti.len(), "喷出彩纸");
        }
        SpinTick::Idle => {}
    }
}
