//! 转盘渲染插件
//!
//! 转盘状态变化时整体清除并重建所有部件：扇区、分隔线、标签、中心圆盘与带白边的指针。
//! 状态栏文字是常驻实体，只替换文本。

use bevy::prelude::*;

use crate::canvas::{CANVAS_SIZE, CENTER, CanvasPoint, STATUS_MARGIN, WHEEL_RADIUS};
use crate::components::{StatusText, WheelPart};
use crate::plugins::palette_color;
use crate::schedule::FrameSet;
use crate::spin::SpinWheel;
use crate::wheel::{OUTLINE_WIDTH, SLICE_COLORS, Wedge, WheelFrame};

/// 扇区层级
const WEDGE_Z: f32 = 0.0;
/// 分隔线层级
const SEPARATOR_Z: f32 = 1.0;
/// 标签层级
const LABEL_Z: f32 = 2.0;
/// 指针描边层级
const OUTLINE_Z: f32 = 2.5;
/// 中心圆盘与指针层级
const OVERLAY_Z: f32 = 3.0;
/// 状态栏层级
const STATUS_Z: f32 = 4.0;
/// 标签字号
const LABEL_FONT_SIZE: f32 = 14.0;
/// 状态栏字号
const STATUS_FONT_SIZE: f32 = 20.0;

/// 转盘渲染插件
pub struct WheelRendererPlugin;

impl Plugin for WheelRendererPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_wheel_scene).add_systems(
            Update,
            (redraw_wheel, update_status_text)
                .run_if(resource_changed::<SpinWheel>)
                .in_set(FrameSet::Render),
        );
    }
}

/// 重绘所需的网格与材质，启动时创建一次
#[derive(Resource)]
pub struct WheelAssets {
    /// 单个扇区网格（弧心朝 +Y）
    wedge: Handle<Mesh>,
    /// 扇区分隔线（长边沿 +Y）
    separator: Handle<Mesh>,
    /// 扇区材质，与调色板一一对应
    slice_materials: Vec<([u8; 3], Handle<ColorMaterial>)>,
    /// 中心圆盘
    hub: Handle<Mesh>,
    /// 指针三角形
    indicator: Handle<Mesh>,
    /// 指针描边三角形
    indicator_outline: Handle<Mesh>,
    /// 黑色材质
    black: Handle<ColorMaterial>,
    /// 白色材质
    white: Handle<ColorMaterial>,
}

impl WheelAssets {
    /// 按颜色取扇区材质
    fn slice_material(&self, color: [u8; 3]) -> Handle<ColorMaterial> {
        self.slice_materials
            .iter()
            .find(|(c, _)| *c == color)
            .map_or_else(|| self.black.clone(), |(_, handle)| handle.clone())
    }
}

/// 画布点转为世界坐标
fn world(point: CanvasPoint) -> Vec2 {
    Vec2::from_array(point.to_world())
}

/// 创建相机、共享资源与状态栏
fn setup_wheel_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    wheel: Res<SpinWheel>,
) {
    commands.spawn(Camera2d);

    let frame = wheel.wheel().layout();
    let segment = wheel.wheel().segment_angle();
    let indicator = frame.indicator;
    let outline = frame.indicator_outline;
    let assets = WheelAssets {
        wedge: meshes.add(CircularSector::from_radians(WHEEL_RADIUS, segment.to_radians())),
        separator: meshes.add(Rectangle::new(OUTLINE_WIDTH, WHEEL_RADIUS)),
        slice_materials: SLICE_COLORS
            .iter()
            .map(|&c| (c, materials.add(palette_color(c))))
            .collect(),
        hub: meshes.add(Circle::new(frame.hub_radius)),
        indicator: meshes.add(Triangle2d::new(
            world(indicator.left),
            world(indicator.right),
            world(indicator.tip),
        )),
        indicator_outline: meshes.add(Triangle2d::new(
            world(outline.left),
            world(outline.right),
            world(outline.tip),
        )),
        black: materials.add(Color::BLACK),
        white: materials.add(Color::WHITE),
    };
    commands.insert_resource(assets);

    let status_pos = world(CanvasPoint::new(CENTER.x, CANVAS_SIZE - STATUS_MARGIN));
    commands.spawn((
        Text2d::new(wheel.status().to_string()),
        TextFont {
            font_size: STATUS_FONT_SIZE,
            ..Default::default()
        },
        TextColor(Color::BLACK),
        Transform::from_translation(status_pos.extend(STATUS_Z)),
        StatusText,
    ));

    info!(
        segments = wheel.wheel().len(),
        segment_angle = segment,
        "✓ 转盘场景已创建"
    );
}

/// 清除旧部件并按当前状态重建
fn redraw_wheel(
    mut commands: Commands,
    wheel: Res<SpinWheel>,
    assets: Res<WheelAssets>,
    q_parts: Query<Entity, With<WheelPart>>,
) {
    for entity in &q_parts {
        commands.entity(entity).despawn();
    }
    spawn_frame(&mut commands, &assets, &wheel.wheel().layout());
}

/// 把一帧布局转成实体
fn spawn_frame(commands: &mut Commands, assets: &WheelAssets, frame: &WheelFrame) {
    for wedge in &frame.wedges {
        spawn_wedge(commands, assets, wedge);
    }

    commands.spawn((
        Mesh2d(assets.hub.clone()),
        MeshMaterial2d(assets.black.clone()),
        Transform::from_translation(world(CENTER).extend(OVERLAY_Z)),
        WheelPart,
    ));
    commands.spawn((
        Mesh2d(assets.indicator_outline.clone()),
        MeshMaterial2d(assets.white.clone()),
        Transform::from_xyz(0.0, 0.0, OUTLINE_Z),
        WheelPart,
    ));
    commands.spawn((
        Mesh2d(assets.indicator.clone()),
        MeshMaterial2d(assets.black.clone()),
        Transform::from_xyz(0.0, 0.0, OVERLAY_Z),
        WheelPart,
    ));
}

/// 生成一个扇区、起始边分隔线及其标签
fn spawn_wedge(commands: &mut Commands, assets: &WheelAssets, wedge: &Wedge) {
    // 扇区网格的弧心朝向 90°，旋转到扇区中线
    let rotation = Quat::from_rotation_z((wedge.mid_angle() - 90.0).to_radians());
    commands.spawn((
        Mesh2d(assets.wedge.clone()),
        MeshMaterial2d(assets.slice_material(wedge.color)),
        Transform::from_translation(world(CENTER).extend(WEDGE_Z)).with_rotation(rotation),
        WheelPart,
    ));
    let edge = (world(CENTER) + world(wedge.rim_start)) / 2.0;
    commands.spawn((
        Mesh2d(assets.separator.clone()),
        MeshMaterial2d(assets.white.clone()),
        Transform::from_translation(edge.extend(SEPARATOR_Z))
            .with_rotation(Quat::from_rotation_z((wedge.start - 90.0).to_radians())),
        WheelPart,
    ));
    commands.spawn((
        Text2d::new(wedge.label.clone()),
        TextFont {
            font_size: LABEL_FONT_SIZE,
            ..Default::default()
        },
        TextColor(Color::BLACK),
        Transform::from_translation(world(wedge.label_pos).extend(LABEL_Z)),
        WheelPart,
    ));
}

/// 同步状态栏文字
fn update_status_text(wheel: Res<SpinWheel>, mut q_status: Query<&mut Text2d, With<StatusText>>) {
    let text = wheel.status().to_string();
    for mut status in &mut q_status {
        if status.0 != text {
            status.0.clone_from(&text);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::spin::SpinParams;

    fn scene(labels: &[&str]) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<ColorMaterial>>()
            .insert_resource(
                SpinWheel::new(
                    labels.iter().map(|&s| s.to_owned()).collect(),
                    SpinParams::default(),
                )
                .unwrap(),
            )
            .add_plugins(WheelRendererPlugin);
        app.update();
        app
    }

    fn parts(app: &mut App) -> HashSet<Entity> {
        app.world_mut()
            .query_filtered::<Entity, With<WheelPart>>()
            .iter(app.world())
            .collect()
    }

    fn status(app: &mut App) -> String {
        app.world_mut()
            .query_filtered::<&Text2d, With<StatusText>>()
            .single(app.world())
            .unwrap()
            .0
            .clone()
    }

    #[test]
    fn first_frame_draws_every_part() {
        let mut app = scene(&["A", "B", "C", "D", "E"]);
        // 每个扇区：扇区、分隔线、标签；另加中心圆盘、指针描边、指针
        assert_eq!(parts(&mut app).len(), 3 * 5 + 3);
        assert_eq!(status(&mut app), "Click the wheel to spin!");
    }

    #[test]
    fn redraw_replaces_parts_without_leaking() {
        let mut app = scene(&["Java", "Python", "C++", "JavaScript"]);
        let first = parts(&mut app);
        assert_eq!(first.len(), 3 * 4 + 3);

        {
            let mut wheel = app.world_mut().resource_mut::<SpinWheel>();
            wheel.start_toward(2, 3).unwrap();
            wheel.tick();
        }
        app.update();
        let second = parts(&mut app);
        assert_eq!(second.len(), first.len());
        assert!(first.is_disjoint(&second));
        assert_eq!(status(&mut app), "Spinning...");

        app.world_mut().resource_mut::<SpinWheel>().tick();
        app.update();
        let third = parts(&mut app);
        assert_eq!(third.len(), first.len());
        assert!(second.is_disjoint(&third));
    }

    #[test]
    fn unchanged_wheel_keeps_its_parts() {
        let mut app = scene(&["Heads", "Tails"]);
        let before = parts(&mut app);
        app.update();
        app.update();
        assert_eq!(parts(&mut app), before);
    }
}
