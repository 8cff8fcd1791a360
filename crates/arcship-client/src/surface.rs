//! A drawing surface that reports primitives through `tracing`.

use arcship_core::{Color, Surface};
use glam::Vec2;
use tracing::trace;

/// Counts and traces draw calls; the terminal host has no raster target.
#[derive(Debug, Default)]
pub struct LogSurface {
    frames: u64,
    primitives: usize,
}

impl LogSurface {
    /// Marks the start of a frame and returns the previous frame's primitive
    /// count.
    pub fn begin_frame(&mut self) -> usize {
        self.frames += 1;
        std::mem::take(&mut self.primitives)
    }

    pub const fn frames(&self) -> u64 {
        self.frames
    }

    pub const fn primitives(&self) -> usize {
        self.primitives
    }
}

impl Surface for LogSurface {
    fn fill_rect(&mut self, center: Vec2, side: f32, color: Color, opacity: f32) {
        self.primitives += 1;
        trace!(
            x = center.x,
            y = center.y,
            side,
            color = ?color.channels(),
            opacity,
            "rect"
        );
    }

    fn fill_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        color: Color,
        opacity: f32,
    ) {
        self.primitives += 1;
        trace!(
            x = center.x,
            y = center.y,
            radius,
            start,
            end,
            color = ?color.channels(),
            opacity,
            "arc"
        );
    }
}
