use crate::{Mat4, Vec3};

const PITCH_LIMIT_DEG: f32 = 89.0;

/// Keyboard movement for the fly camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMove {
    Forward,
    Backward,
    Left,
    Right,
}

impl CameraMove {
    /// `w a s d`, case-insensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "w" => Some(Self::Forward),
            "s" => Some(Self::Backward),
            "a" => Some(Self::Left),
            "d" => Some(Self::Right),
            _ => None,
        }
    }
}

/// First-person perspective camera (right-handed) steered by yaw/pitch.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub up: Vec3,
    /// Degrees; -90 looks down -Z.
    pub yaw: f32,
    /// Degrees, clamped to ±89.
    pub pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
    pub fov_y_rad: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
    last_cursor: Option<(f32, f32)>,
}

impl Camera {
    pub fn new_perspective(
        position: Vec3,
        fov_y_rad: f32,
        z_near: f32,
        z_far: f32,
        aspect: f32,
    ) -> Self {
        Self {
            position,
            up: Vec3::Y,
            yaw: -90.0,
            pitch: 0.0,
            speed: 0.05,
            sensitivity: 0.05,
            fov_y_rad,
            z_near,
            z_far,
            aspect,
            last_cursor: None,
        }
    }

    /// Unit view direction from yaw/pitch.
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.front().cross(self.up).normalize()
    }

    pub fn apply_move(&mut self, movement: CameraMove) {
        let step = match movement {
            CameraMove::Forward => self.front(),
            CameraMove::Backward => -self.front(),
            CameraMove::Left => -self.right(),
            CameraMove::Right => self.right(),
        };
        self.position += step * self.speed;
    }

    /// Turns by the cursor delta since the previous call. The first sample
    /// only records the cursor position.
    pub fn look_at_cursor(&mut self, x: f32, y: f32) {
        let Some((last_x, last_y)) = self.last_cursor.replace((x, y)) else {
            return;
        };
        // Screen y grows downwards.
        self.yaw += (x - last_x) * self.sensitivity;
        self.pitch = (self.pitch + (last_y - y) * self.sensitivity)
            .clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), self.up)
    }

    /// OpenGL-style projection (z in [-1, 1]).
    #[inline]
    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_rad,
            self.aspect.max(1e-6),
            self.z_near,
            self.z_far,
        )
    }

    #[inline]
    pub fn proj_view(&self) -> Mat4 {
        self.proj() * self.view()
    }

    #[inline]
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }
}
