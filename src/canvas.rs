//! 画布坐标系
//!
//! 所有几何计算都在 600×600 的画布坐标中完成：原点位于左上角，y 轴向下。
//! 角度以度为单位，0° 指向右侧，逆时针为正（屏幕上看也是逆时针）。
//! 只有 [`CanvasPoint::to_world`] 负责转换到 bevy 的 y 轴向上的世界坐标。

/// 画布边长
pub const CANVAS_SIZE: f32 = 600.0;
/// 转盘半径
pub const WHEEL_RADIUS: f32 = 240.0;
/// 转盘中心
pub const CENTER: CanvasPoint = CanvasPoint {
    x: CANVAS_SIZE / 2.0,
    y: CANVAS_SIZE / 2.0,
};
/// 指针三角形的半宽与高
pub const POINTER_SIZE: f32 = 18.0;
/// 指针尖端与转盘边缘的间距
pub const POINTER_GAP: f32 = 10.0;
/// 状态文字距画布底部的距离
pub const STATUS_MARGIN: f32 = 30.0;

/// 画布上的一个点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPoint {
    /// 水平坐标，向右增大
    pub x: f32,
    /// 垂直坐标，向下增大
    pub y: f32,
}

impl CanvasPoint {
    /// 创建画布点
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 以 `self` 为圆心，按极坐标（度）求点，y 轴取反
    #[must_use]
    pub fn polar(self, radius: f32, angle_deg: f32) -> Self {
        let theta = angle_deg.to_radians();
        Self {
            x: self.x + radius * theta.cos(),
            y: self.y - radius * theta.sin(),
        }
    }

    /// 转换为以画布中心为原点、y 轴向上的世界坐标
    #[must_use]
    pub fn to_world(self) -> [f32; 2] {
        [self.x - CENTER.x, CENTER.y - self.y]
    }
}

/// 画布上的轴对齐矩形
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    /// 左上角
    pub min: CanvasPoint,
    /// 右下角
    pub max: CanvasPoint,
}

impl CanvasRect {
    /// 由任意两个对角点创建矩形（自动规整）
    #[must_use]
    pub fn from_corners(a: CanvasPoint, b: CanvasPoint) -> Self {
        Self {
            min: CanvasPoint::new(a.x.min(b.x), a.y.min(b.y)),
            max: CanvasPoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// 矩形中心
    #[must_use]
    pub fn center(&self) -> CanvasPoint {
        CanvasPoint::new((self.min.x + self.max.x) / 2.0, (self.min.y + self.max.y) / 2.0)
    }

    /// 宽度
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// 高度
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// 将角度折叠到 [0, 360)
#[must_use]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid 对极小负数可能返回 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
