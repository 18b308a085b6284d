use crate::{
    anchors::Mode,
    assets::{AssetResolver, load_background},
    error::CourtsideResult,
    font::FontSet,
    geom::{CANVAS_H, CANVAS_W, IRect, SAFE_MARGIN},
    place::{Entity, EntityPlacer},
    raster::Raster,
    scene::{Player, Scene},
    theme::{Rgb, ThemeTable},
    widgets::{ShadowSpec, badge, gradient_panel, pill, shadow},
};

/// Title badges never grow past this width.
const TITLE_MAX_W: u32 = 520;
/// Gap between the lowest entity rectangle and the year pill.
const YEAR_GAP: i32 = 40;
/// Dark anchor for the gradient background and the accent pill text.
const INK: Rgb = Rgb(16, 18, 24);

/// Render one scene into the finished base canvas.
///
/// The canvas is exclusively owned here and mutated in place through the
/// fixed sequence: background, title chrome, entity stacks, year pill,
/// footer handle. The returned raster is final; the timeline compositor
/// never mutates it again.
pub fn compose_frame(
    scene: &Scene,
    themes: &ThemeTable,
    fonts: &FontSet,
    resolver: &AssetResolver,
) -> CourtsideResult<Raster> {
    scene.validate()?;

    let mode = scene.mode();
    let palette = themes.resolve(&scene.league_key());

    let mut canvas = match scene.background.as_deref() {
        Some(path) => match load_background(path, CANVAS_W, CANVAS_H) {
            Some(bg) => bg,
            None => gradient_panel(CANVAS_W, CANVAS_H, palette.background_accent, INK)?,
        },
        None => gradient_panel(CANVAS_W, CANVAS_H, palette.background_accent, INK)?,
    };
    tracing::debug!(stage = "background_drawn", mode = mode.key());

    let mut placer = EntityPlacer::new(mode, palette, &fonts.label, &fonts.badge);

    let title = scene.title.trim();
    if !title.is_empty() {
        let ribbon = badge(
            title,
            &fonts.title,
            palette.ribbon,
            [255, 255, 255, 255],
            TITLE_MAX_W,
        );
        canvas.blit_over(&ribbon, SAFE_MARGIN, SAFE_MARGIN);
        placer.reserve(IRect::new(
            SAFE_MARGIN,
            SAFE_MARGIN,
            ribbon.width(),
            ribbon.height(),
        ));
    }

    for player in &scene.players {
        let entity = entity_for_player(mode, player, resolver);
        placer.place(&mut canvas, &entity)?;
    }
    tracing::debug!(stage = "entities_placed", count = scene.players.len());

    let year = scene.year.trim();
    if !year.is_empty() {
        let yr = pill(year, &fonts.year, palette.accent2, INK.rgba(255), None);
        let y = (placer.max_bottom() + YEAR_GAP)
            .min(CANVAS_H as i32 - SAFE_MARGIN - yr.height() as i32);
        let x = (CANVAS_W as i32 - yr.width() as i32) / 2;
        let sh = shadow(yr.width(), yr.height(), ShadowSpec::ACCENT)?;
        let e = ShadowSpec::ACCENT.expand as i32;
        canvas.blit_over(&sh, x - e, y - e);
        canvas.blit_over(&yr, x, y);
    }

    let handle = scene.handle.trim();
    if !handle.is_empty() {
        let y = CANVAS_H as i32 - SAFE_MARGIN - fonts.meta.line_height() as i32;
        fonts
            .meta
            .draw_text(&mut canvas, SAFE_MARGIN, y, handle, [245, 245, 245, 255]);
    }
    tracing::debug!(stage = "chrome_drawn");

    Ok(canvas)
}

/// Map a lineup player onto the drawable entity for the active mode:
/// basketball and football label by college and look up a college logo,
/// soccer labels by flag code (falling back to country name, then a dash)
/// and looks up a flag.
fn entity_for_player(mode: Mode, player: &Player, resolver: &AssetResolver) -> Entity {
    match mode {
        Mode::Basketball | Mode::Football => Entity {
            position_code: player.pos.clone(),
            label_text: player.college.trim().to_string(),
            image_ref: resolver.resolve_logo(&player.college),
        },
        Mode::Soccer => {
            let iso = player.flag.trim().to_ascii_uppercase();
            let country = player.country.trim();
            let label_text = if !iso.is_empty() {
                iso.clone()
            } else if !country.is_empty() {
                country.to_string()
            } else {
                "—".to_string()
            };
            Entity {
                position_code: player.pos.clone(),
                label_text,
                image_ref: resolver.resolve_flag(&iso),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(json: &str) -> Scene {
        serde_json::from_str(json).unwrap()
    }

    fn compose(json: &str) -> Raster {
        compose_frame(
            &scene(json),
            &ThemeTable::builtin(),
            &FontSet::builtin(),
            &AssetResolver::default(),
        )
        .unwrap()
    }

    #[test]
    fn composed_canvas_has_fixed_dimensions() {
        let canvas = compose(r#"{"players": [{"pos": "PG", "college": "Duke"}]}"#);
        assert_eq!((canvas.width(), canvas.height()), (CANVAS_W, CANVAS_H));
    }

    #[test]
    fn scene_without_players_fails_before_drawing() {
        let err = compose_frame(
            &scene(r#"{"mode": "basketball"}"#),
            &ThemeTable::builtin(),
            &FontSet::builtin(),
            &AssetResolver::default(),
        );
        assert!(err.is_err());
    }

    #[test]
    fn soccer_player_without_flag_or_country_gets_dash_label() {
        let p = Player {
            pos: "GK".to_string(),
            ..Player::default()
        };
        let e = entity_for_player(Mode::Soccer, &p, &AssetResolver::default());
        assert_eq!(e.label_text, "—");
        assert!(e.image_ref.is_none());
    }

    #[test]
    fn football_player_labels_by_college() {
        let p = Player {
            pos: "QB".to_string(),
            college: " Iowa ".to_string(),
            ..Player::default()
        };
        let e = entity_for_player(Mode::Football, &p, &AssetResolver::default());
        assert_eq!(e.label_text, "Iowa");
    }
}
