use crate::{
    config,
    render::Canvas,
    types::{Rgba, SurfaceSize, Vec2},
};

/// Accumulated light of one terminal cell, each channel in `[0,1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LightCell {
    pub light: [f32; 3],
}

impl LightCell {
    pub fn intensity(&self) -> f32 {
        self.light.iter().copied().fold(0.0, f32::max)
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (to_u8(self.light[0]), to_u8(self.light[1]), to_u8(self.light[2]))
    }

    // screen blend: light only ever increases
    fn screen(&mut self, color: Rgba) {
        let src = [color.rgb.r, color.rgb.g, color.rgb.b];
        for (dst, s) in self.light.iter_mut().zip(src) {
            let s = s as f32 / 255.0 * color.alpha;
            *dst = 1.0 - (1.0 - *dst) * (1.0 - s);
        }
    }
}

/// Terminal-cell raster. Each cell spans `PX_PER_COL × PX_PER_ROW` surface pixels.
#[derive(Debug)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<LightCell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut buffer = Self {
            width,
            height,
            cells: Vec::new(),
        };
        buffer.resize_cells(width, height);
        buffer
    }

    pub fn resize_cells(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = (width as usize).saturating_mul(height as usize);
        if self.cells.len() != len {
            self.cells.resize(len, LightCell::default());
        }
        self.clear_cells();
    }

    fn clear_cells(&mut self) {
        for cell in &mut self.cells {
            *cell = LightCell::default();
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> LightCell {
        debug_assert!(x < self.width && y < self.height, "get() out of bounds");
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.cells[idx]
    }

    fn blend(&mut self, x: u16, y: u16, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.cells[idx].screen(color);
    }

    /// Visits every cell within `radius` of `center` with the distance from
    /// `center` to the nearest point of that cell.
    fn for_cells_within(
        &mut self,
        center: Vec2,
        radius: f32,
        mut visit: impl FnMut(&mut Self, u16, u16, f32),
    ) {
        if self.width == 0 || self.height == 0 || !center.is_finite() || radius <= 0.0 {
            return;
        }
        let col_range = cell_span(center.x, radius, config::PX_PER_COL, self.width);
        let row_range = cell_span(center.y, radius, config::PX_PER_ROW, self.height);
        let (Some((c0, c1)), Some((r0, r1))) = (col_range, row_range) else {
            return;
        };
        for row in r0..=r1 {
            for col in c0..=c1 {
                let left = col as f32 * config::PX_PER_COL;
                let top = row as f32 * config::PX_PER_ROW;
                let nearest = Vec2::new(
                    center.x.clamp(left, left + config::PX_PER_COL),
                    center.y.clamp(top, top + config::PX_PER_ROW),
                );
                let dist = nearest.distance(center);
                if dist <= radius {
                    visit(self, col, row, dist);
                }
            }
        }
    }
}

fn cell_span(center: f32, radius: f32, px_per_cell: f32, cells: u16) -> Option<(u16, u16)> {
    let first = ((center - radius) / px_per_cell).floor().max(0.0);
    let last = ((center + radius) / px_per_cell).floor().min(cells as f32 - 1.0);
    if last < first {
        return None;
    }
    Some((first as u16, last as u16))
}

impl Canvas for FrameBuffer {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(
            self.width as f32 * config::PX_PER_COL,
            self.height as f32 * config::PX_PER_ROW,
        )
    }

    fn resize(&mut self, size: SurfaceSize) {
        let cols = (size.width / config::PX_PER_COL).round().clamp(0.0, u16::MAX as f32) as u16;
        let rows = (size.height / config::PX_PER_ROW).round().clamp(0.0, u16::MAX as f32) as u16;
        self.resize_cells(cols, rows);
    }

    fn clear(&mut self) {
        self.clear_cells();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.for_cells_within(center, radius, |buf, col, row, _| buf.blend(col, row, color));
    }

    fn radial_glow(&mut self, center: Vec2, radius: f32, inner: Rgba) {
        self.for_cells_within(center, radius, |buf, col, row, dist| {
            let falloff = 1.0 - dist / radius;
            buf.blend(
                col,
                row,
                Rgba {
                    rgb: inner.rgb,
                    alpha: inner.alpha * falloff,
                },
            );
        });
    }
}
