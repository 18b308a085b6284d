use std::path::PathBuf;

use ab_glyph::{Font as _, FontArc, ScaleFont as _};
use spleen_font::{FONT_12X24, PSF2Font};

use crate::{composite::Rgba8, raster::Raster};

/// Spleen 12x24 cell size, the compiled-in fallback face.
const BITMAP_W: usize = 12;
const BITMAP_H: usize = 24;

/// A sized text face. Resolution never fails: if no candidate TTF loads, the
/// compiled-in Spleen bitmap face takes over, so a missing font file degrades
/// rendering quality instead of aborting the render.
#[derive(Clone)]
pub struct Font {
    face: Face,
    size: f32,
}

#[derive(Clone)]
enum Face {
    Ttf(FontArc),
    Bitmap,
}

/// The asset-relative and system font files probed in order.
pub fn default_font_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("assets/fonts/Inter-Bold.ttf"),
        PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
        PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
    ]
}

impl Font {
    /// Load the first candidate that exists and parses as a font; fall back
    /// to the built-in bitmap face when none does.
    pub fn load(candidates: &[PathBuf], size: f32) -> Self {
        for cand in candidates {
            let Ok(bytes) = std::fs::read(cand) else {
                continue;
            };
            match FontArc::try_from_vec(bytes) {
                Ok(face) => {
                    tracing::debug!(path = %cand.display(), "loaded ttf font");
                    return Self {
                        face: Face::Ttf(face),
                        size,
                    };
                }
                Err(err) => {
                    tracing::warn!(path = %cand.display(), %err, "skipping unparseable font");
                }
            }
        }
        tracing::warn!("no candidate font found, using built-in bitmap face");
        Self::builtin(size)
    }

    /// The built-in bitmap face at the given pixel size. Deterministic and
    /// asset-free, which also makes it the face unit tests measure with.
    pub fn builtin(size: f32) -> Self {
        Self {
            face: Face::Bitmap,
            size,
        }
    }

    /// Same face at a different pixel size.
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            face: self.face.clone(),
            size,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Advance width of `text` in pixels.
    pub fn text_width(&self, text: &str) -> u32 {
        match &self.face {
            Face::Ttf(face) => {
                let scaled = face.as_scaled(self.size);
                let mut w = 0.0f32;
                for ch in text.chars() {
                    w += scaled.h_advance(face.glyph_id(ch));
                }
                w.ceil().max(0.0) as u32
            }
            Face::Bitmap => {
                let char_w = self.bitmap_char_w();
                (text.chars().count() as u32) * char_w
            }
        }
    }

    /// Ascent + descent, the vertical space one line occupies.
    pub fn line_height(&self) -> u32 {
        match &self.face {
            Face::Ttf(face) => {
                let scaled = face.as_scaled(self.size);
                (scaled.ascent() - scaled.descent()).ceil().max(1.0) as u32
            }
            Face::Bitmap => self.bitmap_char_h(),
        }
    }

    /// Draw a single line of text with its top-left at `(x, y)`.
    pub fn draw_text(&self, dst: &mut Raster, x: i32, y: i32, text: &str, color: Rgba8) {
        match &self.face {
            Face::Ttf(face) => self.draw_ttf(face, dst, x, y, text, color),
            Face::Bitmap => self.draw_bitmap(dst, x, y, text, color),
        }
    }

    fn draw_ttf(&self, face: &FontArc, dst: &mut Raster, x: i32, y: i32, text: &str, color: Rgba8) {
        let scaled = face.as_scaled(self.size);
        let baseline = y as f32 + scaled.ascent();
        let mut caret = x as f32;

        for ch in text.chars() {
            let id = face.glyph_id(ch);
            let glyph = id.with_scale_and_position(self.size, ab_glyph::point(caret, baseline));
            caret += scaled.h_advance(id);

            let Some(outlined) = face.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                if coverage <= 0.0 {
                    return;
                }
                let px = gx as i32 + bounds.min.x as i32;
                let py = gy as i32 + bounds.min.y as i32;
                dst.blend_pixel(px, py, color, coverage);
            });
        }
    }

    fn draw_bitmap(&self, dst: &mut Raster, x: i32, y: i32, text: &str, color: Rgba8) {
        let char_w = self.bitmap_char_w();
        let char_h = self.bitmap_char_h();
        let mut spleen = PSF2Font::new(FONT_12X24).expect("built-in spleen font data");

        for (i, ch) in text.chars().enumerate() {
            let mut cell = [[false; BITMAP_W]; BITMAP_H];
            let utf8 = ch.to_string();
            match spleen.glyph_for_utf8(utf8.as_bytes()) {
                Some(glyph) => {
                    for (row_y, row) in glyph.enumerate() {
                        for (col_x, on) in row.enumerate() {
                            if row_y < BITMAP_H && col_x < BITMAP_W {
                                cell[row_y][col_x] = on;
                            }
                        }
                    }
                }
                None => {
                    // Unknown glyphs render as a box, matching PSF previews.
                    for (row_y, row) in cell.iter_mut().enumerate() {
                        for (col_x, px) in row.iter_mut().enumerate() {
                            *px = row_y == 0
                                || row_y == BITMAP_H - 1
                                || col_x == 0
                                || col_x == BITMAP_W - 1;
                        }
                    }
                }
            }

            let origin_x = x + (i as i32) * char_w as i32;
            for dy in 0..char_h {
                for dx in 0..char_w {
                    // Nearest-neighbor scale from the 12x24 cell.
                    let sx = (dx as usize * BITMAP_W) / char_w as usize;
                    let sy = (dy as usize * BITMAP_H) / char_h as usize;
                    if cell[sy][sx] {
                        dst.blend_pixel(origin_x + dx as i32, y + dy as i32, color, 1.0);
                    }
                }
            }
        }
    }

    fn bitmap_char_w(&self) -> u32 {
        (BITMAP_W as f32 * self.size / BITMAP_H as f32).round().max(1.0) as u32
    }

    fn bitmap_char_h(&self) -> u32 {
        self.size.round().max(1.0) as u32
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let face = match self.face {
            Face::Ttf(_) => "ttf",
            Face::Bitmap => "bitmap",
        };
        f.debug_struct("Font")
            .field("face", &face)
            .field("size", &self.size)
            .finish()
    }
}

/// The sized faces one render uses, derived from a single loaded face.
#[derive(Clone, Debug)]
pub struct FontSet {
    /// Title badge text.
    pub title: Font,
    /// Entity label pills.
    pub label: Font,
    /// Position badges.
    pub badge: Font,
    /// Year accent pill.
    pub year: Font,
    /// Footer handle line.
    pub meta: Font,
    /// Reveal answer pill.
    pub answer: Font,
}

impl FontSet {
    pub fn load(candidates: &[PathBuf]) -> Self {
        Self::from_base(Font::load(candidates, 46.0))
    }

    /// Bitmap-only set, used by tests for asset-free determinism.
    pub fn builtin() -> Self {
        Self::from_base(Font::builtin(46.0))
    }

    fn from_base(base: Font) -> Self {
        Self {
            title: base.with_size(46.0),
            label: base.with_size(46.0),
            badge: base.with_size(34.0),
            year: base.with_size(64.0),
            meta: base.with_size(42.0),
            answer: base.with_size(72.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_candidates_fall_back_to_builtin() {
        let font = Font::load(&[PathBuf::from("/nonexistent/font.ttf")], 46.0);
        assert!(font.text_width("abc") > 0);
        assert!(font.line_height() > 0);
    }

    #[test]
    fn builtin_width_is_linear_in_char_count() {
        let font = Font::builtin(24.0);
        let one = font.text_width("a");
        assert_eq!(font.text_width("aaaa"), one * 4);
    }

    #[test]
    fn builtin_draw_produces_ink() {
        let font = Font::builtin(24.0);
        let mut r = Raster::new(64, 32);
        font.draw_text(&mut r, 0, 0, "Hi", [255, 255, 255, 255]);
        let ink = r.data().chunks_exact(4).filter(|px| px[3] != 0).count();
        assert!(ink > 0);
    }

    #[test]
    fn with_size_scales_metrics() {
        let small = Font::builtin(24.0);
        let large = small.with_size(48.0);
        assert!(large.text_width("x") > small.text_width("x"));
        assert!(large.line_height() > small.line_height());
    }
}
