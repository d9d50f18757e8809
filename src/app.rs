//! 应用装配
//!
//! 逻辑部分（状态资源、输入、固定节拍）与渲染部分分开装配，
//! 无窗口环境下只装配逻辑即可驱动完整的旋转与彩纸流程。

use std::time::Duration;

use anyhow::{Result, bail};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::canvas::CANVAS_SIZE;
use crate::config::Config;
use crate::confetti::Confetti;
use crate::plugins::{
    ConfettiEffectPlugin, ConfettiRendererPlugin, SpinControllerPlugin, TimeSystemPlugin,
    WheelRendererPlugin,
};
use crate::resources::{ExecArgs, WheelRng};
use crate::spin::SpinWheel;

/// 逻辑插件组：节拍、旋转控制与彩纸积分
pub struct LogicPlugins {
    /// 节拍间隔
    pub tick: Duration,
}

impl Plugin for LogicPlugins {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            TimeSystemPlugin { tick: self.tick },
            SpinControllerPlugin,
            ConfettiEffectPlugin,
        ));
    }
}

/// 根据配置创建状态资源并插入应用
///
/// # Errors
///
/// - 标签为空或旋转、彩纸参数非法
pub fn insert_wheel_state(app: &mut App, config: &Config, seed: Option<u64>) -> Result<()> {
    let wheel = SpinWheel::new(config.wheel.labels.clone(), config.spin_params())?;
    let confetti = Confetti::new(config.confetti_params())?;
    app.insert_resource(wheel)
        .insert_resource(confetti)
        .insert_resource(WheelRng::new(seed));
    Ok(())
}

/// 构建带窗口的完整应用
///
/// # Errors
///
/// - 配置校验失败
pub fn build_app(config: &Config, args: ExecArgs) -> Result<App> {
    config.validate()?;

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: config.title.clone(),
                    resolution: WindowResolution::new(CANVAS_SIZE as u32, CANVAS_SIZE as u32),
                    resizable: false,
                    ..Default::default()
                }),
                ..Default::default()
            })
            .disable::<LogPlugin>(),
    )
    .insert_resource(ClearColor(Color::WHITE));

    insert_wheel_state(&mut app, config, args.seed)?;
    app.insert_resource(args)
        .add_plugins(LogicPlugins { tick: config.tick() })
        .add_plugins((WheelRendererPlugin, ConfettiRendererPlugin));
    Ok(app)
}

/// 运行应用直到窗口关闭
///
/// # Errors
///
/// - 配置校验失败
/// - 应用以错误码退出
pub fn run(config: &Config, args: ExecArgs) -> Result<()> {
    let mut app = build_app(config, args)?;
    info!(
        labels = config.wheel.labels.len(),
        tick_ms = config.spin.tick_ms,
        "启动转盘"
    );
    if let AppExit::Error(code) = app.run() {
        bail!("application exited with code {code}");
    }
    Ok(())
}
