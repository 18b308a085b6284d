use crate::geom::{CANVAS_H, CANVAS_W};

/// Sport layout mode. Every mode carries its own anchor table and position
/// name expansion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Basketball,
    Football,
    Soccer,
}

impl Mode {
    /// Parse a lineup mode key. Unknown keys fall back to the soccer layout;
    /// a bad mode degrades the layout, it never fails the render.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "basketball" => Self::Basketball,
            "football" => Self::Football,
            "soccer" => Self::Soccer,
            other => {
                tracing::warn!(mode = other, "unknown sport mode, using soccer layout");
                Self::Soccer
            }
        }
    }

    /// League key used for theming when the scene carries none.
    pub fn default_league(self) -> &'static str {
        match self {
            Self::Basketball => "nba",
            Self::Football => "nfl",
            Self::Soccer => "fifa",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Basketball => "basketball",
            Self::Football => "football",
            Self::Soccer => "soccer",
        }
    }
}

/// Center of the canvas, the anchor for unrecognized position codes.
pub const FALLBACK_ANCHOR: (i32, i32) = (CANVAS_W as i32 / 2, CANVAS_H as i32 / 2);

const BASKETBALL_ANCHORS: &[(&str, (i32, i32))] = &[
    ("PG", (540, 540)),
    ("SG", (780, 620)),
    ("SF", (300, 620)),
    ("PF", (360, 840)),
    ("C", (720, 840)),
];

const FOOTBALL_ANCHORS: &[(&str, (i32, i32))] = &[
    ("LT", (200, 540)),
    ("LG", (320, 540)),
    ("C", (540, 540)),
    ("RG", (760, 540)),
    ("RT", (880, 540)),
    ("QB", (540, 690)),
    ("RB", (540, 840)),
    ("TE", (870, 690)),
    ("WR1", (160, 690)),
    ("WR2", (920, 690)),
    ("WR3", (160, 900)),
];

const SOCCER_ANCHORS: &[(&str, (i32, i32))] = &[
    ("GK", (540, 1560)),
    ("LB", (200, 1320)),
    ("LCB", (420, 1320)),
    ("RCB", (660, 1320)),
    ("RB", (880, 1320)),
    ("DM", (540, 1120)),
    ("LCM", (340, 1080)),
    ("RCM", (740, 1080)),
    ("LW", (260, 840)),
    ("ST", (540, 780)),
    ("RW", (820, 840)),
];

/// The static anchor table for one mode.
pub fn anchor_table(mode: Mode) -> &'static [(&'static str, (i32, i32))] {
    match mode {
        Mode::Basketball => BASKETBALL_ANCHORS,
        Mode::Football => FOOTBALL_ANCHORS,
        Mode::Soccer => SOCCER_ANCHORS,
    }
}

/// Canvas anchor an entity stack is centered on. Unrecognized codes land on
/// the canvas center.
pub fn anchor(mode: Mode, pos: &str) -> (i32, i32) {
    let key = pos.trim().to_ascii_uppercase();
    anchor_table(mode)
        .iter()
        .find(|(code, _)| *code == key)
        .map(|(_, xy)| *xy)
        .unwrap_or(FALLBACK_ANCHOR)
}

const BASKETBALL_NAMES: &[(&str, &str)] = &[
    ("PG", "Point Guard"),
    ("SG", "Shooting Guard"),
    ("SF", "Small Forward"),
    ("PF", "Power Forward"),
    ("C", "Center"),
];

const FOOTBALL_NAMES: &[(&str, &str)] = &[
    ("LT", "Left Tackle"),
    ("LG", "Left Guard"),
    ("C", "Center"),
    ("RG", "Right Guard"),
    ("RT", "Right Tackle"),
    ("QB", "Quarterback"),
    ("RB", "Running Back"),
    ("TE", "Tight End"),
    ("WR1", "Wide Receiver 1"),
    ("WR2", "Wide Receiver 2"),
    ("WR3", "Wide Receiver 3"),
];

const SOCCER_NAMES: &[(&str, &str)] = &[
    ("GK", "Goalkeeper"),
    ("LB", "Left Back"),
    ("LCB", "Left Center Back"),
    ("RCB", "Right Center Back"),
    ("RB", "Right Back"),
    ("DM", "Defensive Midfielder"),
    ("LCM", "Left Center Midfielder"),
    ("RCM", "Right Center Midfielder"),
    ("LW", "Left Winger"),
    ("ST", "Striker"),
    ("RW", "Right Winger"),
];

/// Expand a position code to its full name for the given mode. Codes are
/// scoped per mode ("C" means Center in both basketball and football; "RB" is
/// Running Back in football but Right Back in soccer). Unknown codes pass
/// through uppercased.
pub fn full_position_name(mode: Mode, pos: &str) -> String {
    let key = pos.trim().to_ascii_uppercase();
    let names = match mode {
        Mode::Basketball => BASKETBALL_NAMES,
        Mode::Football => FOOTBALL_NAMES,
        Mode::Soccer => SOCCER_NAMES,
    };
    names
        .iter()
        .find(|(code, _)| *code == key)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or(key)
}
