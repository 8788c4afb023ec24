//! Keyboard-driven model transform, replacing per-demo global flags.
//!
//! The window layer forwards key presses into [`InputState::press`] and the
//! frame loop calls [`InputState::update`] once per frame.

use crate::{Mat4, Vec3};

const TRANSLATE_STEP: f32 = 0.01;
const TRANSLATE_LIMIT: f32 = 1.5;
const SCALE_STEP: f32 = 0.01;
const SCALE_MAX: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformAction {
    RotateX,
    RotateY,
    RotateZ,
    TranslateLeft,
    TranslateRight,
    TranslateUp,
    TranslateDown,
    TranslateIn,
    TranslateOut,
    ScaleUp,
    ScaleDown,
}

impl TransformAction {
    /// Default bindings: `x y z` rotate, `a d w s up down` translate,
    /// `] [` scale. Key names are case-insensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        let action = match key.to_ascii_lowercase().as_str() {
            "x" => Self::RotateX,
            "y" => Self::RotateY,
            "z" => Self::RotateZ,
            "a" => Self::TranslateLeft,
            "d" => Self::TranslateRight,
            "w" => Self::TranslateIn,
            "s" => Self::TranslateOut,
            "up" => Self::TranslateUp,
            "down" => Self::TranslateDown,
            "]" => Self::ScaleUp,
            "[" => Self::ScaleDown,
            _ => return None,
        };
        Some(action)
    }
}

/// Currently selected action plus the accumulated translate/scale amounts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputState {
    active: Option<TransformAction>,
    translate_distance: f32,
    scale_factor: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            active: None,
            translate_distance: 0.0,
            scale_factor: 1.0,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A key press replaces the active action; unbound keys clear it.
    pub fn press(&mut self, key: &str) {
        self.active = TransformAction::from_key(key);
        log::debug!("Key '{}' -> {:?}", key, self.active);
    }

    pub fn set_action(&mut self, action: Option<TransformAction>) {
        self.active = action;
    }

    #[inline]
    pub fn active(&self) -> Option<TransformAction> {
        self.active
    }

    #[inline]
    pub fn translate_distance(&self) -> f32 {
        self.translate_distance
    }

    #[inline]
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Model matrix for this frame. `elapsed` is seconds since start and is
    /// used directly as the rotation angle.
    pub fn update(&mut self, elapsed: f32) -> Mat4 {
        use TransformAction::*;

        let Some(action) = self.active else {
            return Mat4::IDENTITY;
        };
        match action {
            RotateX => Mat4::from_axis_angle(Vec3::X, elapsed),
            RotateY => Mat4::from_axis_angle(Vec3::Y, elapsed),
            RotateZ => Mat4::from_axis_angle(Vec3::Z, elapsed),
            TranslateLeft => Mat4::from_translation(Vec3::X * self.step_translate(false)),
            TranslateRight => Mat4::from_translation(Vec3::X * self.step_translate(true)),
            TranslateUp => Mat4::from_translation(Vec3::Y * self.step_translate(true)),
            TranslateDown => Mat4::from_translation(Vec3::Y * self.step_translate(false)),
            TranslateIn => Mat4::from_translation(Vec3::Z * self.step_translate(true)),
            TranslateOut => Mat4::from_translation(Vec3::Z * self.step_translate(false)),
            ScaleUp => Mat4::from_scale(Vec3::splat(self.step_scale(true))),
            ScaleDown => Mat4::from_scale(Vec3::splat(self.step_scale(false))),
        }
    }

    /// Moves the shared distance one step, wrapping at ±1.5.
    fn step_translate(&mut self, increase: bool) -> f32 {
        let d = self.translate_distance;
        self.translate_distance = if increase {
            if d > TRANSLATE_LIMIT { -TRANSLATE_LIMIT } else { d + TRANSLATE_STEP }
        } else if d < -TRANSLATE_LIMIT {
            TRANSLATE_LIMIT
        } else {
            d - TRANSLATE_STEP
        };
        self.translate_distance
    }

    /// Grows or shrinks the scale factor; resets to 1.0 outside `[0, 2]`.
    fn step_scale(&mut self, increase: bool) -> f32 {
        let s = self.scale_factor;
        self.scale_factor = if increase {
            if s > SCALE_MAX { 1.0 } else { s + SCALE_STEP }
        } else if s < 0.0 {
            1.0
        } else {
            s - SCALE_STEP
        };
        self.scale_factor
    }
}
