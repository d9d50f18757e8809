//! 彩纸效果插件
//!
//! 逻辑部分：仅在仍有粒子存活时积分。
//! 渲染部分：按粒子编号维护实体映射，新粒子生成精灵，消失的粒子连同实体一起移除。

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use crate::components::ConfettiPiece;
use crate::confetti::Confetti;
use crate::plugins::palette_color;
use crate::schedule::{FrameSet, TickSet};

/// 彩纸层级
const CONFETTI_Z: f32 = 5.0;

/// 彩纸逻辑插件
pub struct ConfettiEffectPlugin;

impl Plugin for ConfettiEffectPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            advance_confetti.run_if(confetti_live).in_set(TickSet::Confetti),
        );
    }
}

/// 彩纸渲染插件
pub struct ConfettiRendererPlugin;

impl Plugin for ConfettiRendererPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConfettiVisuals>().add_systems(
            Update,
            sync_confetti
                .run_if(resource_changed::<Confetti>)
                .in_set(FrameSet::Render),
        );
    }
}

/// 粒子编号到实体的映射
#[derive(Resource, Default)]
pub struct ConfettiVisuals {
    /// 活跃彩纸: 粒子编号 -> Entity
    active: HashMap<u64, Entity>,
}

impl ConfettiVisuals {
    /// 当前显示的彩纸数
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// 是否没有彩纸
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// 是否仍有粒子存活
fn confetti_live(confetti: Res<Confetti>) -> bool {
    !confetti.is_empty()
}

/// 积分一个节拍
fn advance_confetti(mut confetti: ResMut<Confetti>) {
    let removed = confetti.tick();
    if removed > 0 {
        trace!(removed, live = confetti.len(), "彩纸移除");
    }
    if confetti.is_empty() {
        debug!("彩纸全部消失");
    }
}

/// 同步粒子与精灵
fn sync_confetti(
    mut commands: Commands,
    confetti: Res<Confetti>,
    mut visuals: ResMut<ConfettiVisuals>,
    mut q_pieces: Query<(&mut Transform, &mut Sprite), With<ConfettiPiece>>,
) {
    let mut alive: HashSet<u64> = HashSet::with_capacity(confetti.len());

    for particle in confetti.particles() {
        let rect = particle.rect();
        let [x, y] = rect.center().to_world();
        let size = Vec2::new(rect.width(), rect.height());
        alive.insert(particle.id);

        // 已有实体只更新位置与尺寸
        if let Some(&entity) = visuals.active.get(&particle.id) {
            if let Ok((mut tf, mut sprite)) = q_pieces.get_mut(entity) {
                tf.translation.x = x;
                tf.translation.y = y;
                sprite.custom_size = Some(size);
            }
            continue;
        }

        let entity = commands
            .spawn((
                Sprite {
                    color: palette_color(particle.color),
                    custom_size: Some(size),
                    ..Default::default()
                },
                Transform::from_xyz(x, y, CONFETTI_Z),
                ConfettiPiece(particle.id),
            ))
            .id();
        visuals.active.insert(particle.id, entity);
    }

    // 移除已消失粒子的实体
    visuals.active.retain(|id, entity| {
        if alive.contains(id) {
            return true;
        }
        commands.entity(*entity).despawn();
        false
    });
}
