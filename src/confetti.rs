//! 彩纸粒子效果
//!
//! 每次旋转结束时从指针尖端喷出一批粒子，按重力与阻力逐节拍积分，
//! 寿命耗尽或离开画布的粒子被移除。集合为空后不再需要任何节拍。

use std::f32::consts::FRAC_PI_2;
use std::ops::RangeInclusive;

use anyhow::{Result, ensure};
use bevy::prelude::Resource;
use rand::Rng;

use crate::canvas::{CANVAS_SIZE, CanvasPoint, CanvasRect};
use crate::wheel::Indicator;

/// 彩纸调色板（RGB）
pub const CONFETTI_COLORS: [[u8; 3]; 7] = [
    [0xFF, 0x59, 0x5E],
    [0xFF, 0xCA, 0x3A],
    [0x8A, 0xC9, 0x26],
    [0x19, 0x82, 0xC4],
    [0x6A, 0x4C, 0x93],
    [0xFF, 0x7F, 0x50],
    [0x00, 0xC2, 0xA8],
];

/// 喷射扇面相对正下方的半角（弧度）
const FAN_HALF_ANGLE: f32 = 0.8;
/// 初速度附加的竖直分量
const DOWNWARD_KICK: f32 = 2.0;
/// 粒子可以落到画布底部以下的距离
const FALL_TOLERANCE: f32 = 50.0;
/// 出生点相对指针尖端的下移量
const SPAWN_OFFSET: f32 = 8.0;

/// 彩纸参数
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiParams {
    /// 每次喷出的粒子数
    pub count: usize,
    /// 最小初速度
    pub min_speed: f32,
    /// 最大初速度
    pub max_speed: f32,
    /// 每节拍的重力加速度
    pub gravity: f32,
    /// 每节拍的速度衰减系数
    pub drag: f32,
    /// 角速度上限（绝对值）
    pub spin: f32,
    /// 寿命（节拍数）
    pub lifetime: u32,
    /// 尺寸范围（闭区间）
    pub size: RangeInclusive<u32>,
}

impl Default for ConfettiParams {
    fn default() -> Self {
        Self {
            count: 120,
            min_speed: 4.0,
            max_speed: 10.0,
            gravity: 0.35,
            drag: 0.995,
            spin: 0.3,
            lifetime: 90,
            size: 4..=9,
        }
    }
}

impl ConfettiParams {
    /// 校验参数
    ///
    /// # Errors
    ///
    /// - 速度区间、尺寸区间为空或尺寸为 0
    /// - 阻力系数不在 (0, 1] 内
    /// - 寿命为 0 或角速度为负
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.min_speed <= self.max_speed,
            "confetti min_speed {} exceeds max_speed {}",
            self.min_speed,
            self.max_speed
        );
        ensure!(
            *self.size.start() >= 1 && !self.size.is_empty(),
            "confetti size range {:?} is invalid",
            self.size
        );
        ensure!(
            self.drag > 0.0 && self.drag <= 1.0,
            "confetti drag must be in (0, 1], got {}",
            self.drag
        );
        ensure!(self.lifetime > 0, "confetti lifetime must be positive");
        ensure!(self.spin >= 0.0, "confetti spin must not be negative");
        Ok(())
    }
}

/// 单个彩纸粒子
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// 唯一编号，供渲染端映射实体
    pub id: u64,
    /// 位置
    pub pos: CanvasPoint,
    /// 水平速度
    pub vx: f32,
    /// 竖直速度（向下为正）
    pub vy: f32,
    /// 视觉旋转角
    pub angle: f32,
    /// 角速度
    pub omega: f32,
    /// 边长
    pub size: f32,
    /// 颜色
    pub color: [u8; 3],
    /// 剩余寿命
    pub life: u32,
}

impl Particle {
    /// 仅用于绘制的水平摆动量
    #[must_use]
    pub fn wobble(&self) -> f32 {
        self.angle.sin() * 0.5 * self.size
    }

    /// 当前绘制矩形
    #[must_use]
    pub fn rect(&self) -> CanvasRect {
        let wobble = self.wobble();
        CanvasRect::from_corners(
            CanvasPoint::new(self.pos.x - wobble, self.pos.y),
            CanvasPoint::new(self.pos.x + self.size + wobble, self.pos.y + self.size),
        )
    }

    /// 按一个节拍积分
    fn integrate(&mut self, params: &ConfettiParams) {
        self.vy += params.gravity;
        self.vx *= params.drag;
        self.vy *= params.drag;
        self.pos.x += self.vx;
        self.pos.y += self.vy;
        self.angle += self.omega;
        self.life = self.life.saturating_sub(1);
    }

    /// 是否仍然存活且可见
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.life > 0
            && (0.0..=CANVAS_SIZE).contains(&self.pos.x)
            && self.pos.y <= CANVAS_SIZE + FALL_TOLERANCE
    }
}

/// 存活粒子集合
#[derive(Resource, Debug, Clone, Default)]
pub struct Confetti {
    /// 参数
    params: ConfettiParams,
    /// 存活粒子
    particles: Vec<Particle>,
    /// 下一个可用编号
    next_id: u64,
}

impl Confetti {
    /// 创建空集合
    ///
    /// # Errors
    ///
    /// - 参数非法
    pub fn new(params: ConfettiParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            particles: Vec::new(),
            next_id: 0,
        })
    }

    /// 存活粒子
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// 存活粒子数
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// 是否已全部消失
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// 喷出点：指针尖端略向下
    #[must_use]
    pub fn spawn_point() -> CanvasPoint {
        let tip = Indicator::at_top().tip;
        CanvasPoint::new(tip.x, tip.y + SPAWN_OFFSET)
    }

    /// 喷出一批粒子，返回本批数量
    pub fn burst<R: Rng>(&mut self, rng: &mut R) -> usize {
        let origin = Self::spawn_point();
        let params = &self.params;
        self.particles.reserve(params.count);
        for _ in 0..params.count {
            let direction =
                rng.random_range(-FRAC_PI_2 - FAN_HALF_ANGLE..=-FRAC_PI_2 + FAN_HALF_ANGLE);
            let speed = rng.random_range(params.min_speed..=params.max_speed);
            let omega = rng.random_range(-params.spin..=params.spin);
            let size = rng.random_range(params.size.clone()) as f32;
            let color = CONFETTI_COLORS
                .get(rng.random_range(0..CONFETTI_COLORS.len()))
                .copied()
                .unwrap_or(CONFETTI_COLORS[0]);
            self.particles.push(Particle {
                id: self.next_id,
                pos: origin,
                vx: speed * direction.cos(),
                vy: speed * direction.sin() + DOWNWARD_KICK,
                angle: 0.0,
                omega,
                size,
                color,
                life: params.lifetime,
            });
            self.next_id += 1;
        }
        params.count
    }

    /// 推进一个节拍，返回本节拍移除的粒子数
    pub fn tick(&mut self) -> usize {
        let before = self.particles.len();
        let params = &self.params;
        self.particles.retain_mut(|p| {
            p.integrate(params);
            p.is_alive()
        });
        before - self.particles.len()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn particle(x: f32, y: f32, life: u32) -> Particle {
        Particle {
            id: 0,
            pos: CanvasPoint::new(x, y),
            vx: 0.0,
            vy: 0.0,
            angle: 0.0,
            omega: 0.0,
            size: 6.0,
            color: CONFETTI_COLORS[0],
            life,
        }
    }

    #[test]
    fn burst_spawns_configured_batch_at_tip() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut confetti = Confetti::new(ConfettiParams::default()).unwrap();
        assert_eq!(confetti.burst(&mut rng), 120);
        assert_eq!(confetti.len(), 120);

        let origin = Confetti::spawn_point();
        assert_eq!(origin, CanvasPoint::new(300.0, 58.0));
        for p in confetti.particles() {
            assert_eq!(p.pos, origin);
            assert!((4.0..=9.0).contains(&p.size));
            assert!(p.omega.abs() <= 0.3);
            assert!(CONFETTI_COLORS.contains(&p.color));
            assert_eq!(p.life, 90);
            let speed = p.vx.hypot(p.vy - DOWNWARD_KICK);
            assert!((4.0 - 1e-3..=10.0 + 1e-3).contains(&speed));
            // 扇面以 -90° 为中心，水平分量受限
            assert!(p.vx.abs() <= speed * FAN_HALF_ANGLE.sin() + 1e-3);
        }
    }

    #[test]
    fn ids_are_unique_across_bursts() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut confetti = Confetti::new(ConfettiParams::default()).unwrap();
        confetti.burst(&mut rng);
        confetti.burst(&mut rng);
        let mut ids: Vec<u64> = confetti.particles().iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 240);
    }

    #[test]
    fn integration_applies_gravity_then_drag() {
        let params = ConfettiParams::default();
        let mut p = particle(100.0, 100.0, 10);
        p.vx = 2.0;
        p.vy = -1.0;
        p.omega = 0.5;
        p.integrate(&params);
        assert!((p.vy - (-1.0 + 0.35) * 0.995).abs() < 1e-6);
        assert!((p.vx - 2.0 * 0.995).abs() < 1e-6);
        assert!((p.pos.x - (100.0 + 2.0 * 0.995)).abs() < 1e-4);
        assert!((p.angle - 0.5).abs() < 1e-6);
        assert_eq!(p.life, 9);
    }

    #[test]
    fn retention_rules() {
        assert!(particle(300.0, 300.0, 1).is_alive());
        assert!(!particle(300.0, 300.0, 0).is_alive());
        assert!(!particle(-0.5, 300.0, 5).is_alive());
        assert!(!particle(600.5, 300.0, 5).is_alive());
        assert!(particle(300.0, 650.0, 5).is_alive());
        assert!(!particle(300.0, 650.5, 5).is_alive());
        // 上方不设边界
        assert!(particle(300.0, -200.0, 5).is_alive());
    }

    #[test]
    fn wobble_only_affects_drawn_rect() {
        let mut p = particle(100.0, 100.0, 5);
        p.angle = FRAC_PI_2;
        assert!((p.wobble() - 3.0).abs() < 1e-5);
        let rect = p.rect();
        assert!((rect.min.x - 97.0).abs() < 1e-4);
        assert!((rect.max.x - 109.0).abs() < 1e-4);
        assert!((rect.height() - 6.0).abs() < 1e-4);
        assert_eq!(p.pos, CanvasPoint::new(100.0, 100.0));

        // 负摆动时矩形仍然规整
        p.angle = -FRAC_PI_2;
        let rect = p.rect();
        assert!(rect.width() >= 0.0);
    }

    #[test]
    fn every_particle_expires_within_lifetime() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut confetti = Confetti::new(ConfettiParams::default()).unwrap();
        confetti.burst(&mut rng);
        let mut removed = 0;
        for _ in 0..90 {
            removed += confetti.tick();
        }
        assert!(confetti.is_empty());
        assert_eq!(removed, 120);
        assert_eq!(confetti.tick(), 0);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let slow = ConfettiParams {
            min_speed: 11.0,
            ..ConfettiParams::default()
        };
        assert!(Confetti::new(slow).is_err());
        let zero_size = ConfettiParams {
            size: 0..=3,
            ..ConfettiParams::default()
        };
        assert!(Confetti::new(zero_size).is_err());
        let no_life = ConfettiParams {
            lifetime: 0,
            ..ConfettiParams::default()
        };
        assert!(Confetti::new(no_life).is_err());
    }
}
