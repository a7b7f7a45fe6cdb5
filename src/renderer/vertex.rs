//! Vertex format shared by the tessellator and the pipeline

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::sim::Color;

/// Position plus straight RGBA color. Positions start out in scene space
/// and are moved to clip space with [`Vertex::to_clip`] before upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn new(pos: Vec2, color: Color) -> Self {
        Self {
            position: pos.to_array(),
            color: color.to_array(),
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    /// Map from a scene of `scene_size` (origin top-left, y down) to clip space
    pub fn to_clip(self, scene_size: Vec2) -> Self {
        let unit = self.pos() / scene_size;
        Self {
            position: [unit.x * 2.0 - 1.0, 1.0 - unit.y * 2.0],
            ..self
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_clip_corners() {
        let scene = Vec2::new(400.0, 600.0);
        let clip = |x, y| Vertex::new(Vec2::new(x, y), Color::BLACK).to_clip(scene).position;
        assert_eq!(clip(0.0, 0.0), [-1.0, 1.0]);
        assert_eq!(clip(400.0, 600.0), [1.0, -1.0]);
        assert_eq!(clip(200.0, 300.0), [0.0, 0.0]);
    }

    #[test]
    fn test_to_clip_keeps_color() {
        let v = Vertex::new(Vec2::new(10.0, 10.0), Color::RED);
        assert_eq!(v.to_clip(Vec2::splat(100.0)).color, Color::RED.to_array());
    }

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[1].offset, 8);
    }
}
