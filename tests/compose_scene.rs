use courtside::{
    CANVAS_H, CANVAS_W, FontSet, Mode, Scene,
    assets::AssetResolver,
    compose::compose_frame,
    font::Font,
    place::{Entity, EntityPlacer},
    theme::ThemeTable,
};

fn scene(json: &str) -> Scene {
    serde_json::from_str(json).unwrap()
}

/// Two Duke entities at the PG and SG anchors render without any rectangle
/// collisions: the anchors are further apart than the widgets are wide.
#[test]
fn basketball_duo_places_without_collisions() {
    let label_font = Font::builtin(46.0);
    let badge_font = Font::builtin(34.0);
    let palette = ThemeTable::builtin().resolve("nba");
    let mut canvas = courtside::Raster::new(CANVAS_W, CANVAS_H);

    let mut placer = EntityPlacer::new(Mode::Basketball, palette, &label_font, &badge_font);
    for pos in ["PG", "SG"] {
        placer
            .place(
                &mut canvas,
                &Entity {
                    position_code: pos.to_string(),
                    label_text: "Duke".to_string(),
                    image_ref: None,
                },
            )
            .unwrap();
    }

    let rects = placer.placed();
    assert_eq!(rects.len(), 4);

    // Stacks stay centered on their anchors: a text-only "Duke" pill floors
    // at the minimum width, so each stack straddles its anchor x.
    let (pg_stack, sg_stack) = (rects[0], rects[2]);
    assert!(pg_stack.x < 540 && pg_stack.right() > 540);
    assert!((pg_stack.y..pg_stack.bottom()).contains(&540));
    assert!(sg_stack.x < 780 && sg_stack.right() > 780);
    assert!((sg_stack.y..sg_stack.bottom()).contains(&620));

    for (i, a) in rects.iter().enumerate() {
        for b in rects.iter().skip(i + 1) {
            assert!(!a.intersects(b), "{a:?} collides with {b:?}");
        }
    }
}

/// The same duo at the composer level: the full scene renders to the fixed
/// canvas.
#[test]
fn basketball_duo_composes_to_full_canvas() {
    let s = scene(
        r#"{
            "mode": "basketball",
            "title": "Guess the college",
            "players": [
                {"pos": "PG", "college": "Duke"},
                {"pos": "SG", "college": "Duke"}
            ],
            "year": "2024",
            "reveal_on_screen": false
        }"#,
    );
    let canvas = compose_frame(
        &s,
        &ThemeTable::builtin(),
        &FontSet::builtin(),
        &AssetResolver::default(),
    )
    .unwrap();
    assert_eq!((canvas.width(), canvas.height()), (CANVAS_W, CANVAS_H));
}

/// An unknown sport mode falls back to the soccer layout and renders without
/// a fatal error.
#[test]
fn unknown_mode_renders_via_soccer_layout() {
    let s = scene(
        r#"{
            "mode": "unknown_sport",
            "players": [{"pos": "GK", "flag": "BRA"}, {"pos": "ST", "country": "Brazil"}]
        }"#,
    );
    assert_eq!(s.mode(), Mode::Soccer);

    let canvas = compose_frame(
        &s,
        &ThemeTable::builtin(),
        &FontSet::builtin(),
        &AssetResolver::default(),
    )
    .unwrap();
    assert_eq!(canvas.width(), CANVAS_W);
}

/// Missing players fail validation before any drawing happens.
#[test]
fn empty_scene_is_rejected() {
    let s = scene(r#"{"mode": "football"}"#);
    let err = compose_frame(
        &s,
        &ThemeTable::builtin(),
        &FontSet::builtin(),
        &AssetResolver::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("player"));
}

/// A dense full roster terminates collision avoidance for every badge in
/// every mode (the avoidance cap, not zero overlap, is the guarantee).
#[test]
fn full_rosters_terminate_in_every_mode() {
    for (mode_key, positions) in [
        ("basketball", vec!["PG", "SG", "SF", "PF", "C"]),
        (
            "football",
            vec!["LT", "LG", "C", "RG", "RT", "QB", "RB", "TE", "WR1", "WR2", "WR3"],
        ),
        (
            "soccer",
            vec!["GK", "LB", "LCB", "RCB", "RB", "DM", "LCM", "RCM", "LW", "ST", "RW"],
        ),
    ] {
        let players: Vec<String> = positions
            .iter()
            .map(|p| format!(r#"{{"pos": "{p}", "college": "State", "flag": "USA"}}"#))
            .collect();
        let s = scene(&format!(
            r#"{{"mode": "{mode_key}", "players": [{}]}}"#,
            players.join(",")
        ));
        let canvas = compose_frame(
            &s,
            &ThemeTable::builtin(),
            &FontSet::builtin(),
            &AssetResolver::default(),
        )
        .unwrap();
        assert_eq!(canvas.height(), CANVAS_H);
    }
}
