use std::path::PathBuf;

use crate::{
    anchors::{Mode, anchor, full_position_name},
    assets::load_artwork,
    error::CourtsideResult,
    font::Font,
    geom::{IRect, SAFE_MARGIN},
    raster::Raster,
    theme::Palette,
    widgets::{ShadowSpec, badge, framed_artwork, pill, shadow, stack_with_logo},
};

/// Upper bound on collision-avoidance shifts per badge. The loop is a
/// heuristic: it terminates here and accepts residual overlap on dense
/// rosters rather than guaranteeing separation.
pub const MAX_AVOIDANCE_STEPS: usize = 100;
const AVOIDANCE_STEP: i32 = 16;

/// Gap between a badge and the stack it sits above.
const BADGE_GAP: i32 = 8;
/// Gap between logo artwork and the label pill inside one stack.
const STACK_LOGO_GAP: u32 = 8;

/// College logo artwork budget.
const LOGO_BUDGET: (u32, u32) = (96, 96);
/// Flag artwork budget (flags are wider than tall).
const FLAG_BUDGET: (u32, u32) = (130, 90);

/// One labeled slot ready to draw: position code, pill text, and optionally
/// resolved artwork.
#[derive(Clone, Debug)]
pub struct Entity {
    pub position_code: String,
    pub label_text: String,
    pub image_ref: Option<PathBuf>,
}

/// Shift `rect` until it clears every rectangle in `placed`, stepping upward
/// first and falling back to downward sweeps from the original position once
/// the top safe margin would be crossed. Gives up after
/// [`MAX_AVOIDANCE_STEPS`] and returns the last candidate, overlap and all.
pub fn avoid_collisions(initial: IRect, placed: &[IRect]) -> IRect {
    let mut rect = initial;
    let mut downward = false;
    for _ in 0..MAX_AVOIDANCE_STEPS {
        if !placed.iter().any(|p| p.intersects(&rect)) {
            return rect;
        }
        if !downward && rect.y - AVOIDANCE_STEP < SAFE_MARGIN {
            downward = true;
            rect = initial;
        }
        rect = if downward {
            rect.translated(0, AVOIDANCE_STEP)
        } else {
            rect.translated(0, -AVOIDANCE_STEP)
        };
    }
    rect
}

/// Places entity stacks and their position badges onto the canvas, recording
/// every drawn rectangle for collision avoidance. Entities are placed in
/// scene order; earlier entities block later ones, which is the accepted
/// asymmetry of the layout.
pub struct EntityPlacer<'a> {
    mode: Mode,
    palette: Palette,
    label_font: &'a Font,
    badge_font: &'a Font,
    placed: Vec<IRect>,
    max_bottom: i32,
}

impl<'a> EntityPlacer<'a> {
    pub fn new(mode: Mode, palette: Palette, label_font: &'a Font, badge_font: &'a Font) -> Self {
        Self {
            mode,
            palette,
            label_font,
            badge_font,
            placed: Vec::new(),
            max_bottom: 0,
        }
    }

    /// Draw one entity: shadowed stack centered on its anchor, then its
    /// position badge above, shifted clear of earlier rectangles.
    pub fn place(&mut self, canvas: &mut Raster, entity: &Entity) -> CourtsideResult<()> {
        let anchor_xy = anchor(self.mode, &entity.position_code);

        let label = pill(
            &entity.label_text,
            self.label_font,
            self.palette.background_accent,
            [255, 255, 255, 255],
            None,
        );

        let artwork = entity.image_ref.as_deref().and_then(|path| {
            match load_artwork(path) {
                Ok(art) => {
                    let (bw, bh) = match self.mode {
                        Mode::Soccer => FLAG_BUDGET,
                        Mode::Basketball | Mode::Football => LOGO_BUDGET,
                    };
                    Some(framed_artwork(art, bw, bh))
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "artwork undecodable, drawing text-only stack");
                    None
                }
            }
        });

        let (stack, (sx, sy)) = stack_with_logo(anchor_xy, label, artwork, STACK_LOGO_GAP);

        let sh = shadow(stack.width(), stack.height(), ShadowSpec::STACK)?;
        let expand = ShadowSpec::STACK.expand as i32;
        canvas.blit_over(&sh, sx - expand, sy - expand);
        canvas.blit_over(&stack, sx, sy);

        let stack_rect = IRect::new(sx, sy, stack.width(), stack.height());
        self.placed.push(stack_rect);
        self.max_bottom = self.max_bottom.max(stack_rect.bottom());

        let name = full_position_name(self.mode, &entity.position_code);
        let tag = badge(
            &name,
            self.badge_font,
            self.palette.ribbon,
            [255, 255, 255, 255],
            canvas.width(),
        );
        let initial = IRect::new(
            sx + (stack.width() as i32 - tag.width() as i32) / 2,
            sy - tag.height() as i32 - BADGE_GAP,
            tag.width(),
            tag.height(),
        );
        let settled = avoid_collisions(initial, &self.placed);

        canvas.blit_over(&tag, settled.x, settled.y);
        self.placed.push(settled);
        self.max_bottom = self.max_bottom.max(settled.bottom());

        Ok(())
    }

    /// Record a rectangle drawn outside the placer (the title badge) so
    /// later badges steer clear of it too.
    pub fn reserve(&mut self, rect: IRect) {
        self.placed.push(rect);
    }

    /// Rectangles drawn so far, in draw order.
    pub fn placed(&self) -> &[IRect] {
        &self.placed
    }

    /// Bottom edge of the lowest rectangle drawn so far.
    pub fn max_bottom(&self) -> i32 {
        self.max_bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeTable;

    #[test]
    fn clear_rect_is_returned_unchanged() {
        let r = IRect::new(100, 500, 50, 30);
        assert_eq!(avoid_collisions(r, &[]), r);
    }

    #[test]
    fn overlapping_rect_shifts_upward() {
        let blocker = IRect::new(0, 480, 1000, 80);
        let r = IRect::new(100, 500, 50, 30);
        let out = avoid_collisions(r, &[blocker]);
        assert!(!out.intersects(&blocker));
        assert!(out.y < r.y);
    }

    #[test]
    fn blocked_top_flips_to_downward_sweep() {
        // A wall covering the whole area above forces the downward path.
        let wall = IRect::new(0, 0, 1000, 600);
        let r = IRect::new(100, 500, 50, 30);
        let out = avoid_collisions(r, &[wall]);
        assert!(!out.intersects(&wall));
        assert!(out.y >= 600);
    }

    #[test]
    fn avoidance_terminates_even_when_unsatisfiable() {
        // Everything overlaps everything; the loop must still return.
        let everywhere = IRect::new(-10_000, -10_000, 40_000, 40_000);
        let r = IRect::new(100, 500, 50, 30);
        let out = avoid_collisions(r, &[everywhere]);
        assert!(out.intersects(&everywhere));
    }

    #[test]
    fn placing_full_roster_terminates_and_records_rects() {
        let font = Font::builtin(46.0);
        let badge_font = Font::builtin(34.0);
        let palette = ThemeTable::builtin().default_palette();
        let mut canvas = Raster::new(1080, 1920);

        for mode in [Mode::Basketball, Mode::Football, Mode::Soccer] {
            let mut placer = EntityPlacer::new(mode, palette, &font, &badge_font);
            for (code, _) in crate::anchors::anchor_table(mode) {
                placer
                    .place(
                        &mut canvas,
                        &Entity {
                            position_code: (*code).to_string(),
                            label_text: "State".to_string(),
                            image_ref: None,
                        },
                    )
                    .unwrap();
            }
            // One stack rect and one badge rect per entity.
            assert_eq!(
                placer.placed().len(),
                crate::anchors::anchor_table(mode).len() * 2
            );
            assert!(placer.max_bottom() > 0);
        }
    }
}
