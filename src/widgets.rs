use crate::{
    composite::Rgba8,
    error::CourtsideResult,
    font::Font,
    geom::IRect,
    raster::Raster,
    theme::Rgb,
    wrap::wrap_words,
};

/// Narrowest pill ever produced; short labels get symmetric slack.
pub const PILL_MIN_W: u32 = 160;
const PILL_PAD_X: u32 = 38;
const PILL_PAD_Y: u32 = 26;
const PILL_RADIUS: u32 = 16;
const PILL_FILL_ALPHA: u8 = 235;

const BADGE_MIN_W: u32 = 56;
const BADGE_PAD_X: u32 = 26;
const BADGE_PAD_Y: u32 = 16;
const BADGE_RADIUS: u32 = 12;
const BADGE_FILL_ALPHA: u8 = 220;

/// Soften the 8-bit banding of the vertical lerp.
const GRADIENT_BLUR_SIGMA: f32 = 24.0;

/// White backing border around logo/flag artwork.
const FRAME_BORDER: u32 = 9;
const FRAME_RADIUS: u32 = 10;
const FRAME_FILL: Rgba8 = [255, 255, 255, 230];

/// Drop shadow parameters. Cosmetic only; the shadow raster is expanded by
/// `expand` on every side and drawn at `(-expand, -expand)` relative to its
/// widget so it peeks out all around.
#[derive(Clone, Copy, Debug)]
pub struct ShadowSpec {
    pub blur_sigma: f32,
    pub alpha: u8,
    pub expand: u32,
    pub corner_radius: u32,
}

impl ShadowSpec {
    /// Shadow under an entity stack.
    pub const STACK: ShadowSpec = ShadowSpec {
        blur_sigma: 22.0,
        alpha: 110,
        expand: 24,
        corner_radius: 24,
    };

    /// Shadow under the year and answer pills.
    pub const ACCENT: ShadowSpec = ShadowSpec {
        blur_sigma: 12.0,
        alpha: 120,
        expand: 12,
        corner_radius: 20,
    };
}

/// Rounded multi-line label with a filled background.
///
/// With `max_width` the text is word-wrapped to `max_width` minus padding;
/// otherwise it stays on one line. Width never drops below [`PILL_MIN_W`] and
/// height always accommodates at least one text line.
pub fn pill(
    text: &str,
    font: &Font,
    fill: Rgb,
    text_color: Rgba8,
    max_width: Option<u32>,
) -> Raster {
    let mut lines = match max_width {
        Some(mw) => wrap_words(text, font, mw.saturating_sub(PILL_PAD_X).max(1)),
        None => vec![text.to_string()],
    };
    if lines.is_empty() {
        lines.push(String::new());
    }

    let advance = (font.size() * 1.1).round() as u32;
    let widest = lines.iter().map(|l| font.text_width(l)).max().unwrap_or(0);
    let w = (widest + PILL_PAD_X).max(PILL_MIN_W);
    let h = advance * lines.len() as u32 + PILL_PAD_Y;

    let mut out = Raster::new(w, h);
    out.fill_rounded_rect(IRect::new(0, 0, w, h), PILL_RADIUS, fill.rgba(PILL_FILL_ALPHA));

    let block_top = (h as i32 - (advance * lines.len() as u32) as i32) / 2;
    for (i, line) in lines.iter().enumerate() {
        let line_w = font.text_width(line) as i32;
        let x = (w as i32 - line_w) / 2;
        let y = block_top + i as i32 * advance as i32;
        font.draw_text(&mut out, x, y, line, text_color);
    }
    out
}

/// Small single-line tag. Text that would overflow `max_width` is truncated
/// with an ellipsis; this never fails however long the input is.
pub fn badge(text: &str, font: &Font, fill: Rgb, text_color: Rgba8, max_width: u32) -> Raster {
    let budget = max_width.saturating_sub(BADGE_PAD_X).max(1);
    let shown = ellipsize(text, font, budget);

    let tw = font.text_width(&shown);
    let inner = (font.size() * 1.05).round() as u32;
    let w = (tw + BADGE_PAD_X).max(BADGE_MIN_W).min(max_width.max(BADGE_MIN_W));
    let h = inner + BADGE_PAD_Y;

    let mut out = Raster::new(w, h);
    out.fill_rounded_rect(
        IRect::new(0, 0, w, h),
        BADGE_RADIUS,
        fill.rgba(BADGE_FILL_ALPHA),
    );
    let x = (w as i32 - tw as i32) / 2;
    let y = (h as i32 - inner as i32) / 2;
    font.draw_text(&mut out, x, y, &shown, text_color);
    out
}

/// Truncate `text` until its rendered width fits `budget` (appending "…"),
/// stopping once only 3 characters remain. Already-fitting text is returned
/// unchanged.
pub fn ellipsize(text: &str, font: &Font, budget: u32) -> String {
    if font.text_width(text) <= budget {
        return text.to_string();
    }

    let mut chars: Vec<char> = text.chars().collect();
    loop {
        if chars.len() <= 3 {
            break;
        }
        chars.pop();
        let candidate: String = chars.iter().collect::<String>().trim_end().to_string() + "…";
        if font.text_width(&candidate) <= budget {
            return candidate;
        }
    }
    chars.iter().collect::<String>().trim_end().to_string() + "…"
}

/// Blurred black rounded rectangle matching a `width × height` widget
/// footprint, expanded by `spec.expand` on every side.
pub fn shadow(width: u32, height: u32, spec: ShadowSpec) -> CourtsideResult<Raster> {
    let e = spec.expand;
    let mut sh = Raster::new(width + e * 2, height + e * 2);
    sh.fill_rounded_rect(
        IRect::new(e as i32, e as i32, width, height),
        spec.corner_radius,
        [0, 0, 0, spec.alpha],
    );
    sh.blur(spec.blur_sigma)?;
    Ok(sh)
}

/// Vertical linear gradient over the full panel, blurred to hide banding.
///
/// A vertical lerp is constant along every row, so the blur collapses to a
/// single-column pass that is then replicated across the width.
pub fn gradient_panel(width: u32, height: u32, top: Rgb, bottom: Rgb) -> CourtsideResult<Raster> {
    let mut column = Raster::new(1, height);
    let span = height.saturating_sub(1).max(1) as f32;
    for y in 0..height {
        let t = y as f32 / span;
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        column.put_pixel(0, y, [lerp(top.0, bottom.0), lerp(top.1, bottom.1), lerp(top.2, bottom.2), 255]);
    }
    column.blur(GRADIENT_BLUR_SIGMA)?;

    let mut out = Raster::new(width, height);
    for y in 0..height {
        let px = column.pixel(0, y);
        for x in 0..width {
            out.put_pixel(x, y, px);
        }
    }
    Ok(out)
}

/// Scale artwork to fit a `max_w × max_h` budget (aspect preserved, may
/// upscale) and paste it on a translucent white rounded-corner card backing.
pub fn framed_artwork(art: Raster, max_w: u32, max_h: u32) -> Raster {
    let (w, h) = (art.width().max(1), art.height().max(1));
    let r = (max_w as f32 / w as f32).min(max_h as f32 / h as f32);
    let (sw, sh) = (
        ((w as f32 * r) as u32).max(1),
        ((h as f32 * r) as u32).max(1),
    );

    let scaled = image::imageops::resize(
        &art.into_image(),
        sw,
        sh,
        image::imageops::FilterType::Triangle,
    );
    let scaled = Raster::from_image(scaled);

    let (cw, ch) = (sw + FRAME_BORDER * 2, sh + FRAME_BORDER * 2);
    let mut card = Raster::new(cw, ch);
    card.fill_rounded_rect(IRect::new(0, 0, cw, ch), FRAME_RADIUS, FRAME_FILL);
    card.blit_over(&scaled, FRAME_BORDER as i32, FRAME_BORDER as i32);
    card
}

/// Center `label` on `anchor`, or stack `logo` above it with a fixed gap and
/// center the combined box. Returns the composite raster and its canvas-space
/// top-left.
pub fn stack_with_logo(
    anchor: (i32, i32),
    label: Raster,
    logo: Option<Raster>,
    gap: u32,
) -> (Raster, (i32, i32)) {
    let Some(logo) = logo else {
        let origin = (
            anchor.0 - label.width() as i32 / 2,
            anchor.1 - label.height() as i32 / 2,
        );
        return (label, origin);
    };

    let w = label.width().max(logo.width());
    let h = logo.height() + gap + label.height();
    let mut comp = Raster::new(w, h);
    comp.blit_over(&logo, (w as i32 - logo.width() as i32) / 2, 0);
    comp.blit_over(
        &label,
        (w as i32 - label.width() as i32) / 2,
        (logo.height() + gap) as i32,
    );
    let origin = (anchor.0 - w as i32 / 2, anchor.1 - h as i32 / 2);
    (comp, origin)
}
