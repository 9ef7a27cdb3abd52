//! Radial fan meshes: a unit ring in the XY plane plus one apex vertex.
//!
//! The same builder produces the cone (apex above the ring) and the flat
//! handle disc (apex height 0). Size and position come from the model matrix.

use std::f32::consts::TAU;

use crate::error::ConfigError;

/// CPU-side radial mesh. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialMesh {
    /// Ring vertices first, apex last.
    pub vertices: Vec<[f32; 3]>,
    /// Triangle triplets `(apex, i, i + 1)`, wrapping the last ring vertex to the first.
    pub indices: Vec<u32>,
}

impl RadialMesh {
    /// Builds a fan with `point_count` unit-radius ring vertices at
    /// `z = base_depth` and an apex at `z = base_depth + apex_height`.
    pub fn build(
        shape: &'static str,
        apex_height: f32,
        base_depth: f32,
        point_count: u32,
    ) -> Result<Self, ConfigError> {
        if point_count < 3 {
            return Err(ConfigError::TooFewRingPoints {
                shape,
                count: point_count,
            });
        }

        let step = TAU / point_count as f32;
        let mut vertices: Vec<[f32; 3]> = (0..point_count)
            .map(|i| {
                let angle = step * i as f32;
                [angle.cos(), angle.sin(), base_depth]
            })
            .collect();
        vertices.push([0.0, 0.0, base_depth + apex_height]);

        let apex = point_count;
        let mut indices = Vec::with_capacity(3 * point_count as usize);
        for i in 0..point_count {
            let next = (i + 1) % point_count;
            indices.extend_from_slice(&[apex, i, next]);
        }

        Ok(Self { vertices, indices })
    }

    pub fn apex(&self) -> [f32; 3] {
        self.vertices[self.vertices.len() - 1]
    }

    pub fn ring(&self) -> &[[f32; 3]] {
        &self.vertices[..self.vertices.len() - 1]
    }
}
