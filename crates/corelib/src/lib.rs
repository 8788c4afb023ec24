//! Core per-frame types: math re-exports, model Transform, keyboard
//! transform controls, fly Camera, Bezier curve.

pub use glam::{Mat4, Quat, Vec3, Vec4, vec3};

pub mod camera;
pub mod controls;
pub mod curve;
pub mod transform;
