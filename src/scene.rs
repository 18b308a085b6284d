use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::{
    anchors::Mode,
    error::{CourtsideError, CourtsideResult},
};

/// One labeled slot to draw, keyed by position code. Basketball and football
/// players carry a college; soccer players carry a flag code and/or country.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Player {
    pub pos: String,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub country: String,
}

/// The full input description for one rendered video, deserialized from a
/// lineup JSON file. Immutable for the lifetime of one render call.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct Scene {
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub background: Option<PathBuf>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default, deserialize_with = "de_stringish")]
    pub year: String,
    #[serde(default = "default_handle")]
    pub handle: String,
    #[serde(default, deserialize_with = "de_truthy")]
    pub reveal_on_screen: bool,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub reveal_seconds: Option<f64>,
    #[serde(default)]
    pub music: Option<PathBuf>,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub leagues: Vec<String>,
}

fn default_mode() -> String {
    "basketball".to_string()
}

fn default_handle() -> String {
    "@YourHandle • #Shorts".to_string()
}

/// Upstream tooling emits years as numbers or strings; accept both.
fn de_stringish<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(de)?;
    Ok(match value {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Boolean-ish flag: true / "true" / "yes" / "1" (and 1) all count.
fn de_truthy<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    let value = serde_json::Value::deserialize(de)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => {
            matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
        }
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    })
}

impl Scene {
    /// Read and parse a lineup JSON file.
    pub fn from_json_file(path: &Path) -> CourtsideResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            CourtsideError::validation(format!("failed to read scene '{}': {e}", path.display()))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            CourtsideError::validation(format!("failed to parse scene '{}': {e}", path.display()))
        })
    }

    /// Input validation, run before any drawing begins. A scene without
    /// players is a fatal input error; an unknown mode is not (it degrades
    /// to the soccer layout).
    pub fn validate(&self) -> CourtsideResult<()> {
        if self.players.is_empty() {
            return Err(CourtsideError::validation(
                "scene must carry at least one player",
            ));
        }
        for (i, p) in self.players.iter().enumerate() {
            if p.pos.trim().is_empty() {
                return Err(CourtsideError::validation(format!(
                    "player #{i} is missing a position code"
                )));
            }
        }
        if let Some(secs) = self.reveal_seconds
            && (!secs.is_finite() || secs <= 0.0)
        {
            return Err(CourtsideError::validation(
                "reveal_seconds must be a finite positive number",
            ));
        }
        Ok(())
    }

    pub fn mode(&self) -> Mode {
        Mode::from_key(&self.mode)
    }

    /// League key feeding the theme resolver: an explicit `league`, else the
    /// first of `leagues` (cross-league scenes), else the mode's default.
    pub fn league_key(&self) -> String {
        if let Some(league) = &self.league
            && !league.trim().is_empty()
        {
            return league.clone();
        }
        if let Some(first) = self.leagues.first()
            && !first.trim().is_empty()
        {
            return first.clone();
        }
        self.mode().default_league().to_string()
    }

    /// The reveal overlay is drawn only when asked for and an answer exists.
    pub fn wants_reveal(&self) -> bool {
        self.reveal_on_screen && !self.answer.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Scene {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn minimal_scene_fills_defaults() {
        let s = parse(r#"{"players": [{"pos": "PG", "college": "Duke"}]}"#);
        assert_eq!(s.mode, "basketball");
        assert_eq!(s.handle, "@YourHandle • #Shorts");
        assert!(!s.reveal_on_screen);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn missing_players_is_a_validation_error() {
        let s = parse(r#"{"mode": "soccer"}"#);
        assert!(s.validate().is_err());
    }

    #[test]
    fn truthy_strings_enable_the_reveal_flag() {
        for v in [r#"true"#, r#""true""#, r#""yes""#, r#""1""#, r#"1"#] {
            let s = parse(&format!(
                r#"{{"players": [{{"pos": "GK"}}], "reveal_on_screen": {v}}}"#
            ));
            assert!(s.reveal_on_screen, "value {v} should be truthy");
        }
        for v in [r#"false"#, r#""no""#, r#""0""#, r#"0"#] {
            let s = parse(&format!(
                r#"{{"players": [{{"pos": "GK"}}], "reveal_on_screen": {v}}}"#
            ));
            assert!(!s.reveal_on_screen, "value {v} should be falsy");
        }
    }

    #[test]
    fn year_accepts_numbers_and_strings() {
        let s = parse(r#"{"players": [{"pos": "C"}], "year": 2024}"#);
        assert_eq!(s.year, "2024");
        let s = parse(r#"{"players": [{"pos": "C"}], "year": " 2019 "}"#);
        assert_eq!(s.year, "2019");
    }

    #[test]
    fn league_key_prefers_explicit_league_then_list_then_mode() {
        let s = parse(r#"{"players": [{"pos": "C"}], "league": "mlb"}"#);
        assert_eq!(s.league_key(), "mlb");
        let s = parse(r#"{"players": [{"pos": "C"}], "leagues": ["nfl", "nba"]}"#);
        assert_eq!(s.league_key(), "nfl");
        let s = parse(r#"{"mode": "soccer", "players": [{"pos": "GK"}]}"#);
        assert_eq!(s.league_key(), "fifa");
    }

    #[test]
    fn reveal_requires_an_answer() {
        let s = parse(r#"{"players": [{"pos": "C"}], "reveal_on_screen": true}"#);
        assert!(!s.wants_reveal());
        let s = parse(
            r#"{"players": [{"pos": "C"}], "reveal_on_screen": true, "answer": "Duke"}"#,
        );
        assert!(s.wants_reveal());
    }

    #[test]
    fn bad_reveal_seconds_is_rejected() {
        let s = parse(r#"{"players": [{"pos": "C"}], "reveal_seconds": -1.0}"#);
        assert!(s.validate().is_err());
    }
}
