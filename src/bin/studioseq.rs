use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "studioseq", version)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every frame's style at one scroll position as JSON.
    Styles(StylesArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a 0 -> 1 progress sweep to an MP4 (requires `ffmpeg`) or a PNG directory.
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Position {
    /// Normalized progress in [0, 1].
    #[arg(long)]
    progress: Option<f64>,

    /// Scroll offset in pixels, with the pinned region starting at 0.
    #[arg(long)]
    scroll_y: Option<f64>,
}

#[derive(Parser, Debug)]
struct StylesArgs {
    /// Input sequence JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    at: Position,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input sequence JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    at: Position,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Input sequence JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of output frames.
    #[arg(long)]
    frames: u64,

    /// Output `.mp4` file, or a directory for a PNG sequence.
    #[arg(long)]
    out: PathBuf,

    /// Output frame rate.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Render frames in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for parallel rendering.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per scheduling chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Render identical frames once.
    #[arg(long)]
    elide: bool,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Styles(args) => cmd_styles(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Sweep(args) => cmd_sweep(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_sequence(path: &Path) -> anyhow::Result<studioseq::SequenceDef> {
    studioseq::SequenceDef::from_path(path)
        .with_context(|| format!("load sequence '{}'", path.display()))
}

fn resolve_progress(def: &studioseq::SequenceDef, at: &Position) -> studioseq::Progress {
    match (at.progress, at.scroll_y) {
        (Some(p), _) => studioseq::Progress::new(p),
        (None, Some(y)) => def.region(0.0).progress_at(y),
        (None, None) => studioseq::Progress::ZERO,
    }
}

fn load_images(def: &studioseq::SequenceDef, in_path: &Path) -> studioseq::ImageStore {
    let root = in_path.parent().unwrap_or_else(|| Path::new("."));
    let images = studioseq::ImageStore::prepare(&def.images, root);
    tracing::debug!(
        loaded = images.loaded_count(),
        total = images.len(),
        "images prepared"
    );
    images
}

fn make_backend(
    choice: BackendChoice,
    settings: &studioseq::RenderSettings,
) -> anyhow::Result<Box<dyn studioseq::RenderBackend>> {
    let kind = match choice {
        BackendChoice::Cpu => studioseq::BackendKind::Cpu,
    };
    Ok(studioseq::create_backend(kind, settings)?)
}

fn cmd_styles(args: StylesArgs) -> anyhow::Result<()> {
    let def = read_sequence(&args.in_path)?;
    let progress = resolve_progress(&def, &args.at);
    let styles = def.styles_at(progress)?;

    let out = serde_json::json!({
        "progress": progress,
        "dominant": studioseq::dominant_frame(&styles),
        "frames": styles,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("serialize styles")?
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let def = read_sequence(&args.in_path)?;
    let progress = resolve_progress(&def, &args.at);

    let settings = studioseq::RenderSettings::for_sequence(&def);
    let mut backend = make_backend(args.backend, &settings)?;
    let images = load_images(&def, &args.in_path);

    let frame = studioseq::render_progress(&def, progress, backend.as_mut(), &images)?;

    studioseq::ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    let def = read_sequence(&args.in_path)?;
    let fps = studioseq::Fps::new(args.fps, 1)?;

    let settings = studioseq::RenderSettings::for_sequence(&def);
    let mut backend = make_backend(args.backend, &settings)?;
    let images = load_images(&def, &args.in_path);

    let opts = studioseq::SweepOpts {
        frames: args.frames,
        parallel: args.parallel,
        threads: args.threads,
        chunk_size: args.chunk_size,
        static_frame_elision: args.elide,
    };

    let is_mp4 = args
        .out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"));
    let mut sink: Box<dyn studioseq::FrameSink> = if is_mp4 {
        let mut sink_opts = studioseq::FfmpegSinkOpts::new(&args.out);
        sink_opts.bg_rgba = def.background;
        Box::new(studioseq::FfmpegSink::new(sink_opts))
    } else {
        Box::new(studioseq::PngSequenceSink::new(&args.out))
    };

    let stats =
        studioseq::render_sweep(&def, &images, backend.as_mut(), &opts, fps, sink.as_mut())?;

    eprintln!(
        "wrote {} ({} frames, {} rendered, {} elided)",
        args.out.display(),
        stats.frames_total,
        stats.frames_rendered,
        stats.frames_elided
    );
    Ok(())
}
