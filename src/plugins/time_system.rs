//! 节拍管理插件
//!
//! 把 `FixedUpdate` 的步长设为配置的节拍间隔，并固定逻辑阶段的先后顺序

use std::time::Duration;

use bevy::prelude::*;

use crate::schedule::{FrameSet, TickSet};

/// 节拍管理插件
pub struct TimeSystemPlugin {
    /// 节拍间隔
    pub tick: Duration,
}

impl Plugin for TimeSystemPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_duration(self.tick))
            .configure_sets(FixedUpdate, (TickSet::Spin, TickSet::Confetti).chain())
            .configure_sets(Update, (FrameSet::Input, FrameSet::Render).chain());
    }
}
