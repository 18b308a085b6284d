//! Courtside renders vertical sports-trivia shorts: it lays out labeled
//! player positions on a fixed 1080x1920 canvas, synthesizes pill and badge
//! widgets with drop shadows, composites a time-delayed answer reveal, and
//! encodes a fixed-duration still clip to MP4 through the system ffmpeg.
//!
//! The public surface is scene-oriented:
//!
//! - Parse and validate a [`Scene`] from lineup JSON
//! - Compose a frame or render straight to MP4 via [`render_scene_to_mp4`]
//! - Question-card PNGs come from the [`cards`] module
#![forbid(unsafe_code)]

pub mod anchors;
pub mod assets;
pub mod blur;
pub mod cards;
pub mod compose;
pub mod composite;
pub mod encode_ffmpeg;
pub mod error;
pub mod font;
pub mod geom;
pub mod pipeline;
pub mod place;
pub mod raster;
pub mod reveal;
pub mod scene;
pub mod theme;
pub mod timeline;
pub mod widgets;
pub mod wrap;

pub use anchors::Mode;
pub use compose::compose_frame;
pub use error::{CourtsideError, CourtsideResult};
pub use font::{Font, FontSet};
pub use geom::{CANVAS_H, CANVAS_W, IRect, SAFE_MARGIN};
pub use pipeline::{RenderConfig, derive_out_path, render_frame, render_scene_to_mp4};
pub use raster::Raster;
pub use reveal::build_reveal_overlay;
pub use scene::{Player, Scene};
pub use theme::{Palette, Rgb, ThemeTable};
pub use timeline::{ClipSpec, RevealWindow};
