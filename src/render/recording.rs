use crate::{
    render::Canvas,
    types::{Rgba, SurfaceSize, Vec2},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawOp {
    Resize(SurfaceSize),
    Clear,
    Circle { center: Vec2, radius: f32, color: Rgba },
    Glow { center: Vec2, radius: f32, color: Rgba },
}

/// Canvas that remembers every call instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    size: SurfaceSize,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn circles(&self) -> Vec<(Vec2, f32, Rgba)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::Circle {
                    center,
                    radius,
                    color,
                } => Some((center, radius, color)),
                _ => None,
            })
            .collect()
    }

    pub fn glows(&self) -> Vec<(Vec2, f32, Rgba)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::Glow {
                    center,
                    radius,
                    color,
                } => Some((center, radius, color)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.ops.push(DrawOp::Resize(size));
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
        });
    }

    fn radial_glow(&mut self, center: Vec2, radius: f32, inner: Rgba) {
        self.ops.push(DrawOp::Glow {
            center,
            radius,
            color: inner,
        });
    }
}
