use crate::{
    blur::blur_rgba8,
    composite::{Rgba8, over},
    error::CourtsideResult,
    geom::IRect,
};

/// Straight-alpha RGBA8 surface, row-major, tightly packed.
///
/// Every widget, the composed frame, and the reveal overlay are all `Raster`
/// values. A raster is exclusively owned by the render that built it; blits
/// mutate in place and clip against the destination bounds.
#[derive(Clone, Debug)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    /// Surface cleared to a uniform color.
    pub fn filled(width: u32, height: u32, color: Rgba8) -> Self {
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for _ in 0..(width as usize) * (height as usize) {
            data.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    pub fn into_image(self) -> image::RgbaImage {
        image::RgbaImage::from_raw(self.width, self.height, self.data)
            .expect("raster buffer length matches dimensions")
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let idx = ((y * self.width + x) as usize) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        let idx = ((y * self.width + x) as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&color);
    }

    /// Source-over blend a pixel at possibly-out-of-bounds coordinates.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba8, opacity: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let blended = over(self.pixel(x, y), color, opacity);
        self.put_pixel(x, y, blended);
    }

    /// Alpha-blit `src` onto `self` with its top-left at `(x, y)`, clipped.
    pub fn blit_over(&mut self, src: &Raster, x: i32, y: i32) {
        self.blit_over_with_opacity(src, x, y, 1.0);
    }

    /// Alpha-blit with a global opacity factor applied to `src`.
    pub fn blit_over_with_opacity(&mut self, src: &Raster, x: i32, y: i32, opacity: f32) {
        if opacity <= 0.0 {
            return;
        }
        for sy in 0..src.height {
            let dy = y + sy as i32;
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            for sx in 0..src.width {
                let dx = x + sx as i32;
                if dx < 0 || dx >= self.width as i32 {
                    continue;
                }
                let s = src.pixel(sx, sy);
                if s[3] == 0 {
                    continue;
                }
                let d = self.pixel(dx as u32, dy as u32);
                self.put_pixel(dx as u32, dy as u32, over(d, s, opacity));
            }
        }
    }

    /// Fill an axis-aligned rounded rectangle covering the whole surface of a
    /// `w × h` region at `(x, y)`. Corner coverage is antialiased over one
    /// pixel so pill edges stay smooth at label sizes.
    pub fn fill_rounded_rect(&mut self, rect: IRect, radius: u32, color: Rgba8) {
        let r = radius.min(rect.w / 2).min(rect.h / 2) as f32;
        for py in 0..rect.h as i32 {
            for px in 0..rect.w as i32 {
                let coverage = rounded_coverage(px, py, rect.w, rect.h, r);
                if coverage <= 0.0 {
                    continue;
                }
                self.blend_pixel(rect.x + px, rect.y + py, color, coverage);
            }
        }
    }

    /// Gaussian-blur the whole surface in place.
    pub fn blur(&mut self, sigma: f32) -> CourtsideResult<()> {
        self.data = blur_rgba8(&self.data, self.width, self.height, sigma)?;
        Ok(())
    }
}

/// Coverage of the pixel centered at `(px + 0.5, py + 0.5)` by a rounded
/// rectangle of extent `w × h` with corner radius `r`.
fn rounded_coverage(px: i32, py: i32, w: u32, h: u32, r: f32) -> f32 {
    let cx = px as f32 + 0.5;
    let cy = py as f32 + 0.5;
    let (w, h) = (w as f32, h as f32);

    // Distance into the nearest corner square, zero along the straight edges.
    let dx = if cx < r {
        r - cx
    } else if cx > w - r {
        cx - (w - r)
    } else {
        0.0
    };
    let dy = if cy < r {
        r - cy
    } else if cy > h - r {
        cy - (h - r)
    } else {
        0.0
    };

    if dx == 0.0 || dy == 0.0 {
        return 1.0;
    }
    let dist = (dx * dx + dy * dy).sqrt();
    (r - dist + 0.5).clamp(0.0, 1.0)
}
