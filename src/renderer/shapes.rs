//! Triangle generation for scene objects
//!
//! Output is in scene coordinates (origin top-left, y down); the pipeline
//! maps it to clip space.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::sim::{Color, Scene, SceneObject, Shape};

/// Segments used to approximate an ellipse
const OVAL_SEGMENTS: usize = 32;

/// Stroke width of unfilled shapes, in scene units
const OUTLINE_WIDTH: f32 = 1.0;

/// Segment bits for digits 0-9, bit order: top, top-right, bottom-right,
/// bottom, bottom-left, top-left, middle
const DIGIT_SEGMENTS: [u8; 10] = [
    0b011_1111, // 0
    0b000_0110, // 1
    0b101_1011, // 2
    0b100_1111, // 3
    0b110_0110, // 4
    0b110_1101, // 5
    0b111_1101, // 6
    0b000_0111, // 7
    0b111_1111, // 8
    0b110_1111, // 9
];

/// Two triangles covering `pos..pos + size`
pub fn rect(pos: Vec2, size: Vec2, color: Color) -> [Vertex; 6] {
    let far = pos + size;
    let corners = [pos, Vec2::new(far.x, pos.y), Vec2::new(pos.x, far.y), far];
    [0, 1, 2, 1, 3, 2].map(|i| Vertex::new(corners[i], color))
}

/// Border of `pos..pos + size`, drawn inside the box
pub fn rect_outline(pos: Vec2, size: Vec2, color: Color) -> Vec<Vertex> {
    let w = OUTLINE_WIDTH.min(size.x / 2.0).min(size.y / 2.0);
    let edges = [
        (pos, Vec2::new(size.x, w)),
        (pos + Vec2::new(0.0, size.y - w), Vec2::new(size.x, w)),
        (pos, Vec2::new(w, size.y)),
        (pos + Vec2::new(size.x - w, 0.0), Vec2::new(w, size.y)),
    ];
    edges
        .into_iter()
        .flat_map(|(at, extent)| rect(at, extent, color))
        .collect()
}

/// Point at `angle` on the ellipse with center `center` and radii `radii`
fn on_ellipse(center: Vec2, radii: Vec2, angle: f32) -> Vec2 {
    center + Vec2::from_angle(angle) * radii
}

fn segment_angles() -> impl Iterator<Item = (f32, f32)> {
    let step = TAU / OVAL_SEGMENTS as f32;
    (0..OVAL_SEGMENTS).map(move |i| (i as f32 * step, (i + 1) as f32 * step))
}

/// Triangle fan for the ellipse inscribed in `pos..pos + size`
pub fn oval(pos: Vec2, size: Vec2, color: Color) -> Vec<Vertex> {
    let radii = size * 0.5;
    let center = pos + radii;
    segment_angles()
        .flat_map(|(a0, a1)| {
            [center, on_ellipse(center, radii, a0), on_ellipse(center, radii, a1)]
                .map(|p| Vertex::new(p, color))
        })
        .collect()
}

/// Ring tracing the ellipse inscribed in `pos..pos + size`
pub fn oval_outline(pos: Vec2, size: Vec2, color: Color) -> Vec<Vertex> {
    let outer = size * 0.5;
    let inner = (outer - Vec2::splat(OUTLINE_WIDTH)).max(Vec2::ZERO);
    let center = pos + outer;
    segment_angles()
        .flat_map(|(a0, a1)| {
            let (o0, o1) = (on_ellipse(center, outer, a0), on_ellipse(center, outer, a1));
            let (i0, i1) = (on_ellipse(center, inner, a0), on_ellipse(center, inner, a1));
            [o0, o1, i0, o1, i1, i0].map(|p| Vertex::new(p, color))
        })
        .collect()
}

/// Seven-segment rendering of the digits in `text`, one glyph cell per character.
/// Non-digit characters leave their cell blank.
pub fn digits(text: &str, pos: Vec2, size: Vec2, color: Color) -> Vec<Vertex> {
    let count = text.chars().count();
    if count == 0 {
        return Vec::new();
    }

    let cell = Vec2::new(size.x / count as f32, size.y);
    let margin = cell * Vec2::new(0.15, 0.1);
    let thickness = (cell.x * 0.15).max(1.0);
    let glyph = cell - margin * 2.0;
    let mid = glyph.y / 2.0;

    let mut vertices = Vec::new();
    for (i, ch) in text.chars().enumerate() {
        let Some(bits) = ch.to_digit(10).map(|d| DIGIT_SEGMENTS[d as usize]) else {
            continue;
        };
        let origin = pos + Vec2::new(i as f32 * cell.x, 0.0) + margin;

        // (offset, size) per segment, in bit order
        let segments = [
            (Vec2::ZERO, Vec2::new(glyph.x, thickness)),
            (Vec2::new(glyph.x - thickness, 0.0), Vec2::new(thickness, mid)),
            (Vec2::new(glyph.x - thickness, mid), Vec2::new(thickness, mid)),
            (Vec2::new(0.0, glyph.y - thickness), Vec2::new(glyph.x, thickness)),
            (Vec2::new(0.0, mid), Vec2::new(thickness, mid)),
            (Vec2::ZERO, Vec2::new(thickness, mid)),
            (Vec2::new(0.0, mid - thickness / 2.0), Vec2::new(glyph.x, thickness)),
        ];

        for (bit, (offset, seg_size)) in segments.into_iter().enumerate() {
            if bits & (1 << bit) != 0 {
                vertices.extend_from_slice(&rect(origin + offset, seg_size, color));
            }
        }
    }

    vertices
}

/// Triangles for a single scene object
pub fn object(obj: &SceneObject) -> Vec<Vertex> {
    let (pos, size, color) = (obj.pos, obj.size, obj.color);
    match (&obj.shape, obj.filled) {
        (Shape::Rect, true) => rect(pos, size, color).to_vec(),
        (Shape::Rect, false) => rect_outline(pos, size, color),
        (Shape::Oval, true) => oval(pos, size, color),
        (Shape::Oval, false) => oval_outline(pos, size, color),
        (Shape::Label { text, .. }, _) => digits(text, pos, size, color),
    }
}

/// Triangles for the whole scene, in paint order
pub fn scene(scene: &Scene) -> Vec<Vertex> {
    scene.objects().flat_map(object).collect()
}
