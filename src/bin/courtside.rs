use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use courtside::{RenderConfig, Scene, cards, derive_out_path, render_frame, render_scene_to_mp4};

#[derive(Parser, Debug)]
#[command(name = "courtside", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the composed base canvas as a PNG (no ffmpeg required).
    Frame(FrameArgs),
    /// Render an MP4 clip (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a daily question file as static card PNGs.
    Cards(CardsArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input lineup JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Composite the reveal overlay at full opacity.
    #[arg(long)]
    with_reveal: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input lineup JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path (default: `<stem>_guess_team.mp4` next to the input).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Music file overriding the scene's own reference.
    #[arg(long)]
    music: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CardsArgs {
    /// Input daily question JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory (default: `<stem>_cards` next to the input).
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Cards(args) => cmd_cards(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = Scene::from_json_file(&args.in_path)?;
    let cfg = RenderConfig::default();

    let canvas = render_frame(&scene, args.with_reveal, &cfg)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    canvas
        .into_image()
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = Scene::from_json_file(&args.in_path)?;
    let cfg = RenderConfig::default();

    let out = args.out.unwrap_or_else(|| derive_out_path(&args.in_path));
    render_scene_to_mp4(&scene, &out, args.music.as_deref(), &cfg)?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_cards(args: CardsArgs) -> anyhow::Result<()> {
    let questions = cards::QuestionFile::from_json_file(&args.in_path)?;

    let out_dir = args.out_dir.unwrap_or_else(|| {
        let stem = args
            .in_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "trivia".to_string());
        args.in_path.with_file_name(format!("{stem}_cards"))
    });

    let base = courtside::Font::load(&courtside::font::default_font_candidates(), 72.0);
    let title_font = base.with_size(72.0);
    let body_font = base.with_size(52.0);

    let paths = cards::render_cards(&questions, &out_dir, &title_font, &body_font)?;

    eprintln!("wrote {} cards to {}", paths.len(), out_dir.display());
    Ok(())
}
