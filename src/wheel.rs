//! 转盘状态与布局
//!
//! [`WheelState`] 保存标签与当前角度，[`WheelFrame`] 是某一时刻转盘的完整绘制描述。
//! 布局计算是纯函数，渲染插件只负责把 [`WheelFrame`] 变成实体。

use anyhow::{Result, ensure};

use crate::canvas::{
    CENTER, CanvasPoint, POINTER_GAP, POINTER_SIZE, WHEEL_RADIUS, wrap_degrees,
};

/// 标签距圆心的距离占半径的比例
pub const LABEL_RADIUS_RATIO: f32 = 0.62;
/// 中心圆盘半径
pub const HUB_RADIUS: f32 = 10.0;
/// 指针在画布坐标系中的角度（12 点钟方向）
pub const INDICATOR_ANGLE: f32 = 90.0;
/// 扇区分隔线与指针描边的宽度
pub const OUTLINE_WIDTH: f32 = 2.0;

/// 扇区调色板（RGB）
pub const SLICE_COLORS: [[u8; 3]; 8] = [
    [0xFF, 0x6B, 0x6B],
    [0x4D, 0x96, 0xFF],
    [0x6B, 0xCB, 0x77],
    [0xFF, 0xD9, 0x3D],
    [0xFF, 0x8E, 0x3C],
    [0x84, 0x5E, 0xC2],
    [0xEF, 0x5D, 0xA8],
    [0x00, 0xC2, 0xA8],
];

/// 转盘状态
#[derive(Debug, Clone)]
pub struct WheelState {
    /// 标签（插入顺序即显示顺序）
    labels: Vec<String>,
    /// 每个扇区的角宽度
    segment_angle: f32,
    /// 当前旋转角度，始终位于 [0, 360)
    current_angle: f32,
}

impl WheelState {
    /// 创建转盘
    ///
    /// # Errors
    ///
    /// - 标签列表为空
    pub fn new(labels: Vec<String>) -> Result<Self> {
        ensure!(!labels.is_empty(), "wheel needs at least one label");
        let segment_angle = 360.0 / labels.len() as f32;
        Ok(Self {
            labels,
            segment_angle,
            current_angle: 0.0,
        })
    }

    /// 指定索引的标签
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// 扇区数量
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// 是否没有扇区（构造时已排除，仅为配合 `len`）
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// 扇区角宽度
    #[must_use]
    pub const fn segment_angle(&self) -> f32 {
        self.segment_angle
    }

    /// 当前角度
    #[must_use]
    pub const fn current_angle(&self) -> f32 {
        self.current_angle
    }

    /// 顺转 `step` 度
    pub fn rotate(&mut self, step: f32) {
        self.current_angle = wrap_degrees(self.current_angle + step);
    }

    /// 将角度规整到 [0, 360)
    pub fn snap(&mut self) {
        self.current_angle = wrap_degrees(self.current_angle);
    }

    /// 第 `index` 个扇区在转盘自身坐标系中的中点角度
    #[must_use]
    pub fn local_center(&self, index: usize) -> f32 {
        wrap_degrees(index as f32 * self.segment_angle + self.segment_angle / 2.0)
    }

    /// 第 `index` 个扇区当前的起始角度
    #[must_use]
    pub fn start_angle(&self, index: usize) -> f32 {
        wrap_degrees(self.current_angle + index as f32 * self.segment_angle)
    }

    /// 覆盖画布角度 `angle` 的扇区索引
    #[must_use]
    pub fn segment_at(&self, angle: f32) -> usize {
        let offset = wrap_degrees(angle - self.current_angle);
        let index = (offset / self.segment_angle).floor() as usize;
        index.min(self.labels.len() - 1)
    }

    /// 当前位于指针下方的扇区索引
    #[must_use]
    pub fn under_indicator(&self) -> usize {
        self.segment_at(INDICATOR_ANGLE)
    }

    /// 计算当前状态的完整绘制描述
    #[must_use]
    pub fn layout(&self) -> WheelFrame {
        let label_radius = WHEEL_RADIUS * LABEL_RADIUS_RATIO;
        let wedges = self
            .labels
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let start = self.start_angle(index);
                let mid = start + self.segment_angle / 2.0;
                Wedge {
                    start,
                    extent: self.segment_angle,
                    color: slice_color(index),
                    label: label.clone(),
                    label_pos: CENTER.polar(label_radius, mid),
                    rim_start: CENTER.polar(WHEEL_RADIUS, start),
                }
            })
            .collect();
        let indicator = Indicator::at_top();
        WheelFrame {
            wedges,
            hub_radius: HUB_RADIUS,
            indicator,
            indicator_outline: indicator.expanded(OUTLINE_WIDTH),
        }
    }
}

/// 按索引循环取扇区颜色
#[must_use]
pub fn slice_color(index: usize) -> [u8; 3] {
    SLICE_COLORS
        .get(index % SLICE_COLORS.len())
        .copied()
        .unwrap_or([0xFF, 0xFF, 0xFF])
}

/// 一个扇区的绘制参数
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    /// 起始角度（度）
    pub start: f32,
    /// 角宽度（度）
    pub extent: f32,
    /// 填充色
    pub color: [u8; 3],
    /// 标签文本
    pub label: String,
    /// 标签位置（扇区中线上）
    pub label_pos: CanvasPoint,
    /// 起始边与外圆的交点，分隔线从圆心画到这里
    pub rim_start: CanvasPoint,
}

impl Wedge {
    /// 扇区中线角度
    #[must_use]
    pub fn mid_angle(&self) -> f32 {
        self.start + self.extent / 2.0
    }
}

/// 12 点钟方向、尖端朝下的指针三角形
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    /// 尖端
    pub tip: CanvasPoint,
    /// 底边左角
    pub left: CanvasPoint,
    /// 底边右角
    pub right: CanvasPoint,
}

impl Indicator {
    /// 固定在转盘上方的指针
    #[must_use]
    pub const fn at_top() -> Self {
        let tip_y = CENTER.y - (WHEEL_RADIUS + POINTER_GAP);
        let base_y = tip_y - POINTER_SIZE;
        Self {
            tip: CanvasPoint::new(CENTER.x, tip_y),
            left: CanvasPoint::new(CENTER.x - POINTER_SIZE, base_y),
            right: CanvasPoint::new(CENTER.x + POINTER_SIZE, base_y),
        }
    }

    /// 内切圆圆心
    #[must_use]
    pub fn incenter(&self) -> CanvasPoint {
        let a = distance(self.left, self.right);
        let b = distance(self.tip, self.right);
        let c = distance(self.tip, self.left);
        let p = a + b + c;
        CanvasPoint::new(
            (a * self.tip.x + b * self.left.x + c * self.right.x) / p,
            (a * self.tip.y + b * self.left.y + c * self.right.y) / p,
        )
    }

    /// 每条边向外平移 `margin` 后的三角形，用作描边
    #[must_use]
    pub fn expanded(&self, margin: f32) -> Self {
        let center = self.incenter();
        let area = ((self.left.x - self.tip.x) * (self.right.y - self.tip.y)
            - (self.right.x - self.tip.x) * (self.left.y - self.tip.y))
            .abs()
            / 2.0;
        let perimeter = distance(self.left, self.right)
            + distance(self.tip, self.right)
            + distance(self.tip, self.left);
        let inradius = 2.0 * area / perimeter;
        let k = 1.0 + margin / inradius;
        let scale = |p: CanvasPoint| {
            CanvasPoint::new(center.x + (p.x - center.x) * k, center.y + (p.y - center.y) * k)
        };
        Self {
            tip: scale(self.tip),
            left: scale(self.left),
            right: scale(self.right),
        }
    }
}

/// 两点距离
fn distance(a: CanvasPoint, b: CanvasPoint) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// 一帧转盘绘制描述
#[derive(Debug, Clone, PartialEq)]
pub struct WheelFrame {
    /// 所有扇区
    pub wedges: Vec<Wedge>,
    /// 中心圆盘半径
    pub hub_radius: f32,
    /// 指针
    pub indicator: Indicator,
    /// 指针白色描边（画在指针下方）
    pub indicator_outline: Indicator,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("L{i}")).collect()
    }

    #[test]
    fn empty_labels_are_rejected() {
        assert!(WheelState::new(Vec::new()).is_err());
    }

    #[test]
    fn wedge_extents_cover_full_circle() {
        for n in 1..=24 {
            let wheel = WheelState::new(labels(n)).unwrap();
            assert!((wheel.segment_angle() - 360.0 / n as f32).abs() < 1e-5);
            let total: f32 = wheel.layout().wedges.iter().map(|w| w.extent).sum();
            assert!((total - 360.0).abs() < 1e-3, "n = {n}, total = {total}");
        }
    }

    #[test]
    fn wedges_start_at_rotated_offsets() {
        let mut wheel = WheelState::new(labels(8)).unwrap();
        wheel.rotate(350.0);
        let frame = wheel.layout();
        let starts: Vec<f32> = frame.wedges.iter().map(|w| w.start).collect();
        assert!((starts[0] - 350.0).abs() < 1e-4);
        assert!((starts[1] - 35.0).abs() < 1e-4);
        assert!((starts[7] - 305.0).abs() < 1e-4);
        assert_eq!(frame.wedges[3].color, SLICE_COLORS[3]);
    }

    #[test]
    fn labels_sit_on_wedge_midlines() {
        let wheel = WheelState::new(labels(4)).unwrap();
        let frame = wheel.layout();
        let radius = WHEEL_RADIUS * LABEL_RADIUS_RATIO;
        // 扇区 0 中线 45°：右上方
        let p = frame.wedges[0].label_pos;
        assert!((p.x - (300.0 + radius * 45f32.to_radians().cos())).abs() < 1e-3);
        assert!((p.y - (300.0 - radius * 45f32.to_radians().sin())).abs() < 1e-3);
        // 扇区 1 中线 135°：左上方
        let p = frame.wedges[1].label_pos;
        assert!(p.x < 300.0 && p.y < 300.0);
    }

    #[test]
    fn palette_cycles_past_eight_slices() {
        let wheel = WheelState::new(labels(10)).unwrap();
        let frame = wheel.layout();
        assert_eq!(frame.wedges[8].color, frame.wedges[0].color);
        assert_eq!(frame.wedges[9].color, frame.wedges[1].color);
    }

    #[test]
    fn indicator_is_fixed_above_the_rim() {
        let mut wheel = WheelState::new(labels(8)).unwrap();
        let before = wheel.layout().indicator;
        wheel.rotate(123.0);
        let after = wheel.layout().indicator;
        assert_eq!(before, after);
        assert_eq!(after.tip, CanvasPoint::new(300.0, 50.0));
        assert_eq!(after.left, CanvasPoint::new(282.0, 32.0));
        assert_eq!(after.right, CanvasPoint::new(318.0, 32.0));
    }

    #[test]
    fn segment_at_follows_rotation() {
        let mut wheel = WheelState::new(labels(8)).unwrap();
        assert_eq!(wheel.segment_at(0.0), 0);
        assert_eq!(wheel.segment_at(44.9), 0);
        assert_eq!(wheel.segment_at(45.0), 1);
        assert_eq!(wheel.segment_at(359.9), 7);
        wheel.rotate(292.5);
        // 扇区 3 的中线 157.5° 转到 90°
        assert_eq!(wheel.under_indicator(), 3);
    }

    #[test]
    fn separators_start_on_the_rim() {
        let mut wheel = WheelState::new(labels(4)).unwrap();
        wheel.rotate(90.0);
        let frame = wheel.layout();
        // 扇区 0 起始边指向 12 点钟
        let rim = frame.wedges[0].rim_start;
        assert!((rim.x - 300.0).abs() < 1e-3);
        assert!((rim.y - 60.0).abs() < 1e-3);
        for wedge in &frame.wedges {
            let r = (wedge.rim_start.x - 300.0).hypot(wedge.rim_start.y - 300.0);
            assert!((r - WHEEL_RADIUS).abs() < 1e-3);
        }
    }

    #[test]
    fn indicator_outline_surrounds_indicator() {
        let frame = WheelState::new(labels(8)).unwrap().layout();
        let inner = frame.indicator;
        let outer = frame.indicator_outline;
        // 尖端向下、底边向上外扩
        assert!(outer.tip.y > inner.tip.y);
        assert!(outer.left.x < inner.left.x && outer.left.y < inner.left.y);
        assert!(outer.right.x > inner.right.x && outer.right.y < inner.right.y);
        // 底边恰好外移描边宽度
        assert!((inner.left.y - outer.left.y - OUTLINE_WIDTH).abs() < 1e-3);
        let (ci, co) = (inner.incenter(), outer.incenter());
        assert!((ci.x - co.x).abs() < 1e-3 && (ci.y - co.y).abs() < 1e-3);
    }

    #[test]
    fn layout_is_idempotent() {
        let mut wheel = WheelState::new(labels(7)).unwrap();
        wheel.rotate(77.7);
        assert_eq!(wheel.layout(), wheel.layout());
    }
}
