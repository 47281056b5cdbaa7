//! Free-fly camera for the gravity simulator.
//!
//! Hold the right mouse button to look around; W/S move along the horizontal
//! view direction, A/D strafe, E/Q rise and sink, Shift boosts.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::math::DVec3;
use bevy::prelude::*;

/// Render scale: 1 render unit = 100 simulation length units.
///
/// Keeps the preset systems within a few dozen f32 render units.
pub const RENDER_SCALE: f64 = 0.01;

/// Pitch limit in degrees, short of straight up/down.
pub const MAX_PITCH: f32 = 89.0;

/// Default look sensitivity (degrees per pixel of mouse motion).
pub const DEFAULT_SENSITIVITY: f32 = 0.1;

/// Default movement speed (render units per second).
pub const DEFAULT_SPEED: f32 = 20.0;

/// Speed factor while Shift is held.
pub const BOOST_FACTOR: f32 = 4.0;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Free-fly camera state. Angles are in degrees.
///
/// Yaw 0 looks along +x, yaw -90 along -z.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct FlyCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        // Looking at the origin from the initial spawn point
        Self {
            yaw: -90.0,
            pitch: -29.0,
            speed: DEFAULT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

impl FlyCamera {
    /// Apply a mouse delta in pixels. Screen y grows downward.
    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw += delta.x * self.sensitivity;
        self.pitch = (self.pitch - delta.y * self.sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        look_direction(self.yaw, self.pitch)
    }
}

/// Plugin providing the free-fly camera.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, (fly_camera_look, fly_camera_move).chain());
    }
}

/// Convert a simulation position to render space.
pub fn to_render(pos: DVec3) -> Vec3 {
    (pos * RENDER_SCALE).as_vec3()
}

/// Convert a render-space position back to simulation units.
pub fn from_render(pos: Vec3) -> DVec3 {
    pos.as_dvec3() / RENDER_SCALE
}

/// Unit view direction for yaw/pitch in degrees.
pub fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
}

/// View direction projected on the horizontal plane, so walking forward
/// never changes height.
pub fn horizontal_front(yaw: f32) -> Vec3 {
    let yaw = yaw.to_radians();
    Vec3::new(yaw.cos(), 0.0, yaw.sin())
}

/// Movement direction from key axes.
///
/// Each axis is -1, 0 or 1: `forward` W/S, `strafe` D/A, `vertical` E/Q.
/// The result is normalized, or zero when no key is held.
pub fn movement_direction(yaw: f32, forward: f32, strafe: f32, vertical: f32) -> Vec3 {
    let front = horizontal_front(yaw);
    let right = front.cross(Vec3::Y);
    (front * forward + right * strafe + Vec3::Y * vertical).normalize_or_zero()
}

/// Spawn the main camera.
fn setup_camera(mut commands: Commands) {
    let fly = FlyCamera::default();
    let mut transform = Transform::from_xyz(0.0, 25.0, 45.0);
    transform.look_to(fly.forward(), Vec3::Y);

    commands.spawn((Camera3d::default(), transform, fly, MainCamera));
}

/// Mouse look while the right button is held.
fn fly_camera_look(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut camera_query: Query<(&mut Transform, &mut FlyCamera), With<MainCamera>>,
) {
    if !mouse_buttons.pressed(MouseButton::Right) || mouse_motion.delta == Vec2::ZERO {
        return;
    }

    let Ok((mut transform, mut fly)) = camera_query.single_mut() else {
        return;
    };

    fly.rotate(mouse_motion.delta);
    transform.look_to(fly.forward(), Vec3::Y);
}

/// Keyboard movement.
fn fly_camera_move(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut camera_query: Query<(&mut Transform, &FlyCamera), With<MainCamera>>,
) {
    let axis = |pos: KeyCode, neg: KeyCode| -> f32 {
        f32::from(u8::from(keys.pressed(pos))) - f32::from(u8::from(keys.pressed(neg)))
    };

    let forward = axis(KeyCode::KeyW, KeyCode::KeyS);
    let strafe = axis(KeyCode::KeyD, KeyCode::KeyA);
    let vertical = axis(KeyCode::KeyE, KeyCode::KeyQ);
    if forward == 0.0 && strafe == 0.0 && vertical == 0.0 {
        return;
    }

    let Ok((mut transform, fly)) = camera_query.single_mut() else {
        return;
    };

    let boost = if keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
        BOOST_FACTOR
    } else {
        1.0
    };

    let direction = movement_direction(fly.yaw, forward, strafe, vertical);
    transform.translation += direction * fly.speed * boost * time.delta_secs();
}
