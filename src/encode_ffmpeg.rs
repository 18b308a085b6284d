use std::{
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::{
    composite::flatten_to_opaque_rgba8,
    error::{CourtsideError, CourtsideResult},
    raster::Raster,
    timeline::ClipSpec,
};

/// A probed, attachable music track.
#[derive(Clone, Debug)]
pub struct AudioTrack {
    pub path: PathBuf,
    /// Linear gain applied via ffmpeg's volume filter.
    pub gain: f32,
}

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
    pub audio: Option<AudioTrack>,
}

impl EncodeConfig {
    pub fn validate(&self) -> CourtsideResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CourtsideError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(CourtsideError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // The default settings target yuv420p output for maximum compatibility.
            return Err(CourtsideError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if let Some(audio) = &self.audio
            && !(audio.gain.is_finite() && audio.gain >= 0.0)
        {
            return Err(CourtsideError::validation(
                "audio gain must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

pub fn default_mp4_config(
    out_path: impl Into<PathBuf>,
    width: u32,
    height: u32,
    fps: u32,
) -> EncodeConfig {
    EncodeConfig {
        width,
        height,
        fps,
        out_path: out_path.into(),
        overwrite: true,
        audio: None,
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Probe a music file for an audio stream. Every failure mode (missing file,
/// empty file, no ffprobe, no decodable stream) degrades to `None`: the clip
/// proceeds silently rather than failing the render.
pub fn probe_music(path: &Path, gain: f32) -> Option<AudioTrack> {
    let meta = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "music file missing, rendering silent clip");
            return None;
        }
    };
    if meta.len() == 0 {
        tracing::warn!(path = %path.display(), "music file is empty, rendering silent clip");
        return None;
    }

    let probe = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "a:0",
            "-show_entries",
            "stream=codec_name",
            "-of",
            "csv=p=0",
        ])
        .arg(path)
        .output();
    match probe {
        Ok(out) if out.status.success() && !out.stdout.is_empty() => Some(AudioTrack {
            path: path.to_path_buf(),
            gain,
        }),
        Ok(_) => {
            tracing::warn!(path = %path.display(), "no decodable audio stream, rendering silent clip");
            None
        }
        Err(err) => {
            tracing::warn!(%err, "ffprobe unavailable, rendering silent clip");
            None
        }
    }
}

pub fn ensure_parent_dir(path: &Path) -> CourtsideResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streams raw RGBA frames into a spawned system `ffmpeg`, which muxes the
/// optional looped music track and writes H.264 + AAC MP4.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
}

impl FfmpegEncoder {
    pub fn new(cfg: EncodeConfig) -> CourtsideResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(CourtsideError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(CourtsideError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        // The system `ffmpeg` binary is used rather than native codec
        // bindings to avoid FFmpeg dev header/lib requirements.
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if cfg.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
        ]);

        if let Some(audio) = &cfg.audio {
            cmd.args(["-stream_loop", "-1", "-i"])
                .arg(&audio.path)
                .args(["-map", "0:v", "-map", "1:a"])
                .args(["-filter:a", &format!("volume={}", audio.gain)])
                .args(["-c:a", "aac", "-shortest"]);
        } else {
            cmd.arg("-an");
        }

        cmd.args([
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            CourtsideError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| CourtsideError::encode("failed to open ffmpeg stdin (unexpected)"))?;

        Ok(Self {
            scratch: vec![0u8; (cfg.width * cfg.height * 4) as usize],
            cfg,
            child,
            stdin: Some(stdin),
        })
    }

    pub fn encode_frame(&mut self, frame: &Raster) -> CourtsideResult<()> {
        if frame.width() != self.cfg.width || frame.height() != self.cfg.height {
            return Err(CourtsideError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                self.cfg.width,
                self.cfg.height
            )));
        }

        flatten_to_opaque_rgba8(&mut self.scratch, frame.data(), [0, 0, 0, 255])?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(CourtsideError::encode("ffmpeg encoder is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            CourtsideError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;

        Ok(())
    }

    /// Close the pipe and wait for ffmpeg. On failure the partial output file
    /// is removed so nothing half-written can be mistaken for success.
    pub fn finish(mut self) -> CourtsideResult<()> {
        drop(self.stdin.take());

        let output = self
            .child
            .wait_with_output()
            .map_err(|e| CourtsideError::encode(format!("failed to wait for ffmpeg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let _ = std::fs::remove_file(&self.cfg.out_path);
            return Err(CourtsideError::encode(format!(
                "ffmpeg exited with status {} while writing '{}': {}",
                output.status,
                self.cfg.out_path.display(),
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Encode a still clip: the base canvas for every frame, with the reveal
/// overlay composited in at the per-frame opacity the clip spec dictates.
/// Frames are recomposited only when the opacity changes.
pub fn encode_clip(
    base: &Raster,
    overlay: Option<&Raster>,
    spec: &ClipSpec,
    cfg: EncodeConfig,
) -> CourtsideResult<()> {
    spec.validate()?;
    if let Some(ov) = overlay
        && (ov.width() != base.width() || ov.height() != base.height())
    {
        return Err(CourtsideError::validation(
            "overlay dimensions must match the base canvas",
        ));
    }

    let out_path = cfg.out_path.clone();
    let mut encoder = FfmpegEncoder::new(cfg)?;

    let mut current = base.clone();
    let mut current_opacity = 0.0f32;
    for idx in 0..spec.total_frames() {
        let opacity = match overlay {
            Some(_) => spec.overlay_opacity(idx),
            None => 0.0,
        };
        if opacity != current_opacity {
            current = base.clone();
            if let Some(ov) = overlay {
                current.blit_over_with_opacity(ov, 0, 0, opacity);
            }
            current_opacity = opacity;
        }
        encoder.encode_frame(&current)?;
    }

    encoder.finish()?;
    tracing::debug!(stage = "encoded", path = %out_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation_catches_bad_values() {
        let mut cfg = default_mp4_config("out/clip.mp4", 0, 10, 30);
        assert!(cfg.validate().is_err());

        cfg = default_mp4_config("out/clip.mp4", 11, 10, 30);
        assert!(cfg.validate().is_err());

        cfg = default_mp4_config("out/clip.mp4", 10, 10, 0);
        assert!(cfg.validate().is_err());

        cfg = default_mp4_config("out/clip.mp4", 10, 10, 30);
        assert!(cfg.validate().is_ok());

        cfg.audio = Some(AudioTrack {
            path: PathBuf::from("loop.mp3"),
            gain: f32::NAN,
        });
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn probe_music_degrades_to_none_for_missing_file() {
        assert!(probe_music(Path::new("/nonexistent/loop.mp3"), 0.12).is_none());
    }

    #[test]
    fn encode_clip_rejects_mismatched_overlay() {
        let base = Raster::new(10, 10);
        let overlay = Raster::new(8, 8);
        let err = encode_clip(
            &base,
            Some(&overlay),
            &ClipSpec::standard(None),
            default_mp4_config("out/clip.mp4", 10, 10, 30),
        );
        assert!(err.is_err());
    }
}
