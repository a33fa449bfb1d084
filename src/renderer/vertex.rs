//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const PLAYER: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const ENGINE_FLAME: [f32; 4] = [1.0, 0.65, 0.0, 1.0];
    pub const ENEMY: [f32; 4] = [1.0, 0.0, 0.33, 1.0];
    pub const ENEMY_DIVING: [f32; 4] = [0.67, 0.0, 1.0, 1.0];
    pub const ENEMY_EYES: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BOSS: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const BOSS_WING: [f32; 4] = [0.53, 0.0, 0.0, 1.0];
    pub const BOSS_FLASH: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BOSS_CORE: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const HEALTH_BACK: [f32; 4] = [0.2, 0.0, 0.0, 1.0];
    pub const HEALTH_FILL: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const PLAYER_SHOT: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const ENEMY_SHOT: [f32; 4] = [1.0, 0.33, 0.0, 1.0];
    pub const STAR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SPARK: [f32; 4] = [1.0, 0.9, 0.5, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    /// Letterbox bars around the play field
    pub const LETTERBOX: [f32; 4] = [0.04, 0.04, 0.08, 1.0];

    /// Same color with alpha scaled by `alpha`
    pub fn fade(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
    }
}
