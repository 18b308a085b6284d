use std::path::{Path, PathBuf};

use crate::{error::CourtsideResult, raster::Raster};

/// Lowercase dash slug used for logo file lookup ("Notre Dame" → "notre-dame").
/// Empty input slugs to "x".
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_dash = false;
    for ch in s.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if out.is_empty() { "x".to_string() } else { out }
}

/// Ordered candidate directories for logo and flag artwork. First existing
/// file wins; none found is an explicit `None`, not an error.
#[derive(Clone, Debug)]
pub struct AssetResolver {
    pub logo_dirs: Vec<PathBuf>,
    pub flag_dirs: Vec<PathBuf>,
}

impl Default for AssetResolver {
    fn default() -> Self {
        Self {
            logo_dirs: vec![
                PathBuf::from("assets/college_logos"),
                PathBuf::from("assets/logos/colleges"),
            ],
            flag_dirs: vec![
                PathBuf::from("assets/flags"),
                PathBuf::from("assets/logos/flags"),
            ],
        }
    }
}

impl AssetResolver {
    /// College logo path for a college name, if any candidate dir has one.
    pub fn resolve_logo(&self, college: &str) -> Option<PathBuf> {
        if college.trim().is_empty() {
            return None;
        }
        let file = format!("{}.png", slugify(college));
        first_existing(&self.logo_dirs, &file)
    }

    /// Flag path for an ISO country code, if any candidate dir has one.
    pub fn resolve_flag(&self, iso: &str) -> Option<PathBuf> {
        if iso.trim().is_empty() {
            return None;
        }
        let file = format!("{}.png", iso.trim().to_ascii_uppercase());
        first_existing(&self.flag_dirs, &file)
    }
}

fn first_existing(dirs: &[PathBuf], file: &str) -> Option<PathBuf> {
    dirs.iter().map(|d| d.join(file)).find(|p| p.exists())
}

/// Decode an image file into a straight-alpha raster.
pub fn load_artwork(path: &Path) -> CourtsideResult<Raster> {
    let img = image::open(path)
        .map_err(|e| {
            crate::error::CourtsideError::asset(format!(
                "failed to decode '{}': {e}",
                path.display()
            ))
        })?
        .to_rgba8();
    Ok(Raster::from_image(img))
}

/// Load a background image scaled to exactly `width × height`. Any failure
/// degrades to `None` so the composer can substitute a gradient panel.
pub fn load_background(path: &Path, width: u32, height: u32) -> Option<Raster> {
    match image::open(path) {
        Ok(img) => {
            let resized = image::imageops::resize(
                &img.to_rgba8(),
                width,
                height,
                image::imageops::FilterType::Triangle,
            );
            Some(Raster::from_image(resized))
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "background unreadable, using gradient panel");
            None
        }
    }
}
