use crate::{
    error::CourtsideResult,
    font::FontSet,
    geom::SAFE_MARGIN,
    raster::Raster,
    theme::Palette,
    widgets::{ShadowSpec, pill, shadow},
};

/// Uniform dimming wash under the answer pill.
const WASH: [u8; 4] = [0, 0, 0, 120];

/// Build the transparent reveal raster: a full-frame dimming wash plus one
/// shadowed accent pill carrying the answer, horizontally centered with its
/// centerline near the lower third. Pure function of the answer text, the
/// palette, and the overlay size; independent of the base canvas.
pub fn build_reveal_overlay(
    answer: &str,
    palette: Palette,
    fonts: &FontSet,
    width: u32,
    height: u32,
) -> CourtsideResult<Raster> {
    let mut overlay = Raster::filled(width, height, WASH);

    let max_w = width.saturating_sub(2 * SAFE_MARGIN as u32);
    let answer_pill = pill(
        answer,
        &fonts.answer,
        palette.accent2,
        [16, 18, 24, 255],
        Some(max_w),
    );

    let x = (width as i32 - answer_pill.width() as i32) / 2;
    let y = (height as i32 * 2 / 3) - answer_pill.height() as i32 / 2;

    let sh = shadow(answer_pill.width(), answer_pill.height(), ShadowSpec::ACCENT)?;
    let e = ShadowSpec::ACCENT.expand as i32;
    overlay.blit_over(&sh, x - e, y - e);
    overlay.blit_over(&answer_pill, x, y);

    Ok(overlay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeTable;

    fn overlay(answer: &str) -> Raster {
        build_reveal_overlay(
            answer,
            ThemeTable::builtin().default_palette(),
            &FontSet::builtin(),
            1080,
            1920,
        )
        .unwrap()
    }

    #[test]
    fn wash_covers_the_whole_frame() {
        let o = overlay("Duke");
        assert_eq!(o.pixel(0, 0), WASH);
        assert_eq!(o.pixel(1079, 0), WASH);
    }

    #[test]
    fn answer_pill_sits_near_the_lower_third() {
        let o = overlay("Duke");
        // The pill centerline is at 2/3 height; its fill is far more opaque
        // than the wash.
        let center = o.pixel(540, 1280);
        assert!(center[3] > WASH[3]);
    }

    #[test]
    fn long_answers_wrap_instead_of_overflowing() {
        let o = overlay("an answer long enough to need several wrapped lines on screen");
        assert!(o.width() == 1080);
        // Still builds; pill width respects the safe-margin budget by
        // construction (asserted in the widget tests).
    }
}
