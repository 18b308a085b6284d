use std::path::{Path, PathBuf};

use crate::{
    assets::AssetResolver,
    compose::compose_frame,
    encode_ffmpeg::{EncodeConfig, encode_clip, probe_music},
    error::CourtsideResult,
    font::{FontSet, default_font_candidates},
    geom::{CANVAS_H, CANVAS_W},
    raster::Raster,
    reveal::build_reveal_overlay,
    scene::Scene,
    theme::ThemeTable,
    timeline::{ClipSpec, DEFAULT_DURATION_SECS, DEFAULT_FPS, MUSIC_GAIN, RevealWindow},
};

/// Everything one render invocation needs besides the scene itself. Built
/// once at startup; immutable configuration, no hidden globals.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub font_candidates: Vec<PathBuf>,
    pub themes: ThemeTable,
    pub resolver: AssetResolver,
    pub duration_secs: f64,
    pub fps: u32,
    pub music_gain: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_candidates: default_font_candidates(),
            themes: ThemeTable::builtin(),
            resolver: AssetResolver::default(),
            duration_secs: DEFAULT_DURATION_SECS,
            fps: DEFAULT_FPS,
            music_gain: MUSIC_GAIN,
        }
    }
}

/// Default output path next to the lineup file: `<stem>_guess_team.mp4`.
pub fn derive_out_path(scene_path: &Path) -> PathBuf {
    let stem = scene_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "lineup".to_string());
    scene_path.with_file_name(format!("{stem}_guess_team.mp4"))
}

/// Render a scene end to end: compose the base canvas, build the reveal
/// overlay when asked for, schedule the timeline, and encode to MP4.
///
/// `music_override` takes precedence over the scene's own music reference.
pub fn render_scene_to_mp4(
    scene: &Scene,
    out_path: &Path,
    music_override: Option<&Path>,
    cfg: &RenderConfig,
) -> CourtsideResult<()> {
    scene.validate()?;

    let fonts = FontSet::load(&cfg.font_candidates);
    let base = compose_frame(scene, &cfg.themes, &fonts, &cfg.resolver)?;

    let (overlay, reveal) = if scene.wants_reveal() {
        let palette = cfg.themes.resolve(&scene.league_key());
        let overlay =
            build_reveal_overlay(&scene.answer, palette, &fonts, CANVAS_W, CANVAS_H)?;
        let window = RevealWindow::for_clip(cfg.duration_secs, scene.reveal_seconds);
        (Some(overlay), Some(window))
    } else {
        (None, None)
    };

    let spec = ClipSpec {
        duration_secs: cfg.duration_secs,
        fps: cfg.fps,
        reveal,
    };

    let music = music_override
        .map(Path::to_path_buf)
        .or_else(|| scene.music.clone());
    let audio = music.and_then(|p| probe_music(&p, cfg.music_gain));

    let enc = EncodeConfig {
        width: CANVAS_W,
        height: CANVAS_H,
        fps: cfg.fps,
        out_path: out_path.to_path_buf(),
        overwrite: true,
        audio,
    };

    encode_clip(&base, overlay.as_ref(), &spec, enc)
}

/// Render just the composed canvas, optionally with the reveal overlay at
/// full opacity. This is the ffmpeg-free preview path.
pub fn render_frame(
    scene: &Scene,
    with_reveal: bool,
    cfg: &RenderConfig,
) -> CourtsideResult<Raster> {
    scene.validate()?;

    let fonts = FontSet::load(&cfg.font_candidates);
    let mut canvas = compose_frame(scene, &cfg.themes, &fonts, &cfg.resolver)?;

    if with_reveal && scene.wants_reveal() {
        let palette = cfg.themes.resolve(&scene.league_key());
        let overlay =
            build_reveal_overlay(&scene.answer, palette, &fonts, CANVAS_W, CANVAS_H)?;
        canvas.blit_over(&overlay, 0, 0);
    }

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_path_is_derived_from_the_scene_stem() {
        let out = derive_out_path(Path::new("out/lineup_2024-03-01.json"));
        assert_eq!(out, PathBuf::from("out/lineup_2024-03-01_guess_team.mp4"));
    }

    #[test]
    fn render_frame_validates_before_drawing() {
        let scene: Scene = serde_json::from_str(r#"{"mode": "basketball"}"#).unwrap();
        assert!(render_frame(&scene, false, &RenderConfig::default()).is_err());
    }
}
