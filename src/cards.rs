use std::path::{Path, PathBuf};

use crate::{
    error::{CourtsideError, CourtsideResult},
    font::Font,
    geom::{CANVAS_H, CANVAS_W},
    raster::Raster,
    wrap::wrap_words,
};

const PAD: i32 = 64;
const CARD_BG: [u8; 4] = [20, 22, 26, 255];

/// A daily trivia question file, as emitted by the question generator.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct QuestionFile {
    #[serde(default)]
    pub date: String,
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Question {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: String,
}

impl QuestionFile {
    pub fn from_json_file(path: &Path) -> CourtsideResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            CourtsideError::validation(format!(
                "failed to read questions '{}': {e}",
                path.display()
            ))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            CourtsideError::validation(format!(
                "failed to parse questions '{}': {e}",
                path.display()
            ))
        })
    }
}

/// Draw one static question card: title, wrapped question text, numbered
/// options, footer handle.
pub fn draw_card(question: &Question, title_font: &Font, body_font: &Font) -> Raster {
    let mut canvas = Raster::filled(CANVAS_W, CANVAS_H, CARD_BG);
    let max_width = (CANVAS_W as i32 - 2 * PAD) as u32;

    let mut y = PAD + 20;
    title_font.draw_text(&mut canvas, PAD, y, "Daily Sports Trivia", [240, 240, 240, 255]);
    y += 120;

    y = draw_multiline(
        &mut canvas,
        &question.question,
        PAD,
        y,
        body_font,
        [255, 255, 255, 255],
        max_width,
        10,
    );
    y += 40;

    for (i, opt) in question.options.iter().enumerate() {
        let bullet = format!("{}. {opt}", i + 1);
        y = draw_multiline(
            &mut canvas,
            &bullet,
            PAD,
            y,
            body_font,
            [220, 220, 220, 255],
            max_width,
            8,
        );
        y += 12;
    }

    let footer = "@trivia • #Shorts";
    body_font.draw_text(
        &mut canvas,
        PAD,
        CANVAS_H as i32 - PAD - 40,
        footer,
        [200, 200, 200, 255],
    );

    canvas
}

/// Render every question in the file as `q01.png`, `q02.png`, … under
/// `out_dir`. Returns the written paths.
pub fn render_cards(
    questions: &QuestionFile,
    out_dir: &Path,
    title_font: &Font,
    body_font: &Font,
) -> CourtsideResult<Vec<PathBuf>> {
    use anyhow::Context as _;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create card directory '{}'", out_dir.display()))?;

    let mut paths = Vec::with_capacity(questions.questions.len());
    for (i, q) in questions.questions.iter().enumerate() {
        let card = draw_card(q, title_font, body_font);
        let path = out_dir.join(format!("q{:02}.png", i + 1));
        card.into_image()
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|e| {
                CourtsideError::encode(format!("failed to write card '{}': {e}", path.display()))
            })?;
        paths.push(path);
    }
    Ok(paths)
}

/// Wrapped text block starting at `(x, y)`; returns the y just below it.
#[allow(clippy::too_many_arguments)]
fn draw_multiline(
    canvas: &mut Raster,
    text: &str,
    x: i32,
    y: i32,
    font: &Font,
    color: [u8; 4],
    max_width: u32,
    line_spacing: i32,
) -> i32 {
    let mut cursor = y;
    for line in wrap_words(text, font, max_width) {
        font.draw_text(canvas, x, cursor, &line, color);
        cursor += font.size() as i32 + line_spacing;
    }
    cursor
}
