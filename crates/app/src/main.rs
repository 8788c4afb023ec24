//! Entry point for meshview.
//! Loads a model and its material library, builds the interleaved vertex
//! stream, and steps the per-frame state without opening a window.

use std::path::PathBuf;

use anyhow::Result;
use asset::{Assembler, Model, VertexLayout, control_points};
use corelib::{
    Vec3,
    controls::InputState,
    curve::{BezierCurve, CurveCursor},
    transform::Transform,
};

/// Value of the first `--name=value` argument.
fn parse_str_arg(name: &str) -> Option<String> {
    let prefix = format!("--{name}=");
    std::env::args().find_map(|arg| arg.strip_prefix(&prefix).map(str::to_owned))
}

fn parse_usize_arg(name: &str, default: usize) -> usize {
    match parse_str_arg(name) {
        Some(v) => v.parse().unwrap_or_else(|_| {
            log::warn!("Invalid --{}='{}', using {}", name, v, default);
            default
        }),
        None => default,
    }
}

fn parse_layout_arg() -> VertexLayout {
    // Accept: --layout=textured|colored
    match parse_str_arg("layout").map(|v| v.to_ascii_lowercase()).as_deref() {
        None | Some("textured") => VertexLayout::textured(),
        Some("colored") | Some("coloured") => VertexLayout::colored(),
        Some(other) => {
            log::warn!("Unknown layout '{}', falling back to textured.", other);
            VertexLayout::textured()
        }
    }
}

fn parse_seed_arg() -> Option<u64> {
    parse_str_arg("seed").and_then(|v| match v.parse() {
        Ok(seed) => Some(seed),
        Err(_) => {
            log::warn!("Invalid --seed='{}', colors will not be reproducible", v);
            None
        }
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let assets_dir = PathBuf::from(parse_str_arg("assets").unwrap_or_else(|| "./assets".into()));
    let model_file = parse_str_arg("model").unwrap_or_else(|| "cube.obj".into());
    let layout = parse_layout_arg();
    let frames = parse_usize_arg("frames", 0);
    log::info!(
        "Starting meshview. assets={}, model={}, stride={} floats, frames={}",
        assets_dir.display(),
        model_file,
        layout.stride(),
        frames
    );

    let model = Model::load(&assets_dir, &model_file)?;
    if model.obj.is_empty() {
        log::warn!("Model '{}' has no faces; nothing to draw", model_file);
    }

    let mut assembler = Assembler::new(layout);
    if let Some(seed) = parse_seed_arg() {
        assembler = assembler.with_seed(seed);
    }
    let buffer = assembler.assemble(&model.obj)?;
    log::info!(
        "Vertex stream ready: {} vertices, {} bytes, stride {} bytes",
        buffer.vertex_count(),
        buffer.as_bytes().len(),
        buffer.layout().stride_bytes()
    );
    for (slot, attribute) in buffer.layout().attributes().iter().enumerate() {
        log::info!(
            "  attribute {} {:?}: offset {} bytes",
            slot,
            attribute,
            buffer.layout().byte_offset_of(slot).unwrap_or_default()
        );
    }

    match model.material()? {
        Some(material) => log::info!(
            "Material '{}': Ka={:?} Kd={:?} Ks={:?} Ns={} texture={}",
            material.name,
            material.ambient,
            material.diffuse,
            material.specular,
            material.shininess,
            material
                .texture_path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<none>".into())
        ),
        None => log::info!("No material library declared"),
    }

    let curve = match parse_str_arg("curve") {
        Some(path) => {
            let points = control_points::load_control_points(&path)?;
            let mut curve = BezierCurve::from_arrays(&points);
            curve.generate(parse_usize_arg("points-per-segment", 100));
            log::info!("Curve {}: {} samples", path, curve.len());
            Some(curve)
        }
        None => None,
    };

    if frames > 0 {
        run_frames(frames, curve.as_ref());
    }

    log::info!("Done.");
    Ok(())
}

/// Steps the per-frame state `frames` times, as the render loop would.
fn run_frames(frames: usize, curve: Option<&BezierCurve>) {
    let mut input = InputState::new();
    if let Some(key) = parse_str_arg("press") {
        input.press(&key);
    }
    let mut object = Transform::new(Vec3::ZERO, Vec3::splat(0.5)).with_spin(true);
    let mut cursor = CurveCursor::new();
    let dt = 1.0 / 60.0;

    let mut model = corelib::Mat4::IDENTITY;
    for frame in 0..frames {
        if let Some(point) = curve.and_then(|c| cursor.advance(c)) {
            object.set_position(point);
        }
        object.advance();
        model = input.update(frame as f32 * dt) * object.matrix();
    }
    log::info!(
        "After {} frames: active={:?}, position={:?}, translation={:?}",
        frames,
        input.active(),
        object.position,
        model.w_axis.truncate()
    );
}
