use std::{collections::BTreeMap, path::Path};

use crate::composite::Rgba8;

/// Opaque color used by the theme table. Serialized as `[r, g, b]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn rgba(self, alpha: u8) -> Rgba8 {
        [self.0, self.1, self.2, alpha]
    }
}

/// Colors one league renders with. Immutable once resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    /// Gradient base and label pill fill.
    pub background_accent: Rgb,
    /// Title ribbon and position badge fill.
    pub ribbon: Rgb,
    /// Year and answer pill fill.
    pub accent2: Rgb,
}

/// League key → palette, with a guaranteed default entry. Constructed once at
/// startup and passed explicitly into the composer.
#[derive(Clone, Debug)]
pub struct ThemeTable {
    palettes: BTreeMap<String, Palette>,
}

const DEFAULT_KEY: &str = "default";

impl ThemeTable {
    /// The compiled-in table. The default palette doubles as the basketball
    /// one, which is also the default sport mode.
    pub fn builtin() -> Self {
        let mut palettes = BTreeMap::new();
        let nba = Palette {
            background_accent: Rgb(10, 35, 70),
            ribbon: Rgb(20, 40, 85),
            accent2: Rgb(0, 160, 255),
        };
        palettes.insert(DEFAULT_KEY.to_string(), nba);
        palettes.insert("nba".to_string(), nba);
        palettes.insert(
            "nfl".to_string(),
            Palette {
                background_accent: Rgb(15, 45, 18),
                ribbon: Rgb(25, 80, 30),
                accent2: Rgb(0, 160, 255),
            },
        );
        palettes.insert(
            "mlb".to_string(),
            Palette {
                background_accent: Rgb(70, 20, 30),
                ribbon: Rgb(110, 35, 45),
                accent2: Rgb(0, 160, 255),
            },
        );
        palettes.insert(
            "fifa".to_string(),
            Palette {
                background_accent: Rgb(18, 80, 24),
                ribbon: Rgb(25, 95, 35),
                accent2: Rgb(0, 160, 255),
            },
        );
        Self { palettes }
    }

    /// Load a table from a JSON file of `{"league": {palette...}}` entries.
    /// Any read or parse failure falls back to the compiled-in table; a theme
    /// source must never be able to fail a render.
    pub fn load(path: &Path) -> Self {
        let fallback = Self::builtin();
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "theme table unreadable, using built-in");
                return fallback;
            }
        };
        let palettes: BTreeMap<String, Palette> = match serde_json::from_slice(&bytes) {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "theme table malformed, using built-in");
                return fallback;
            }
        };

        // Loaded entries overlay the built-ins so the default key always exists.
        let mut merged = fallback.palettes;
        for (k, v) in palettes {
            merged.insert(k.trim().to_ascii_lowercase(), v);
        }
        Self { palettes: merged }
    }

    /// Resolve a league key; unknown keys get the default palette.
    pub fn resolve(&self, league: &str) -> Palette {
        let key = league.trim().to_ascii_lowercase();
        if let Some(p) = self.palettes.get(&key) {
            return *p;
        }
        self.palettes[DEFAULT_KEY]
    }

    pub fn default_palette(&self) -> Palette {
        self.palettes[DEFAULT_KEY]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_resolves_to_default() {
        let table = ThemeTable::builtin();
        assert_eq!(table.resolve("curling"), table.default_palette());
        assert_eq!(table.resolve(""), table.default_palette());
    }

    #[test]
    fn known_keys_are_case_insensitive() {
        let table = ThemeTable::builtin();
        assert_eq!(table.resolve("NFL"), table.resolve("nfl"));
        assert_ne!(table.resolve("nfl"), table.default_palette());
    }

    #[test]
    fn missing_file_falls_back_to_builtin() {
        let table = ThemeTable::load(Path::new("/nonexistent/themes.json"));
        assert_eq!(table.resolve("nba"), ThemeTable::builtin().resolve("nba"));
    }

    #[test]
    fn rgba_attaches_alpha() {
        assert_eq!(Rgb(1, 2, 3).rgba(99), [1, 2, 3, 99]);
    }
}
