use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cardspin", version, about = "Spin a still image into a looping GIF")]
struct Cli {
    /// More log output on stderr (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full rotation as an animated GIF.
    Spin(SpinArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct AnimArgs {
    /// JSON file with `size`, `duration` and `fps`; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels (default 200).
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels (default 200).
    #[arg(long)]
    height: Option<u32>,

    /// Seconds per full turn (default 2).
    #[arg(long)]
    duration: Option<f64>,

    /// Frames per second (default 30).
    #[arg(long)]
    fps: Option<u32>,
}

impl AnimArgs {
    fn resolve(&self) -> anyhow::Result<cardspin::AnimationConfig> {
        let mut cfg = match &self.config {
            Some(path) => cardspin::AnimationConfig::from_path(path)?,
            None => cardspin::AnimationConfig::default(),
        };
        if let Some(w) = self.width {
            cfg.size.width = w;
        }
        if let Some(h) = self.height {
            cfg.size.height = h;
        }
        if let Some(d) = self.duration {
            cfg.duration_secs = d;
        }
        if let Some(fps) = self.fps {
            cfg.fps = fps;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
struct SpinArgs {
    /// Source image (png, jpg, jpeg or bmp).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output GIF path; `.gif` is appended when there is no extension.
    #[arg(long)]
    out: PathBuf,

    /// Fail instead of replacing an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    /// GIF quantizer speed, 1 (best palette) to 30 (fastest).
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(i32).range(1..=30))]
    speed: i32,

    #[command(flatten)]
    anim: AnimArgs,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Source image (png, jpg, jpeg or bmp).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Timestamp in seconds.
    #[arg(long, conflicts_with = "frame")]
    t: Option<f64>,

    /// Frame index (0-based) at the configured fps.
    #[arg(long)]
    frame: Option<u64>,

    #[command(flatten)]
    anim: AnimArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let res = match cli.cmd {
        Command::Spin(args) => cmd_spin(args),
        Command::Frame(args) => cmd_frame(args),
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_spin(args: SpinArgs) -> anyhow::Result<()> {
    cardspin::check_input_path(&args.in_path)?;
    let out = cardspin::resolve_output_path(&args.out)?;
    let cfg = args.anim.resolve()?;

    let opts = cardspin::GifSinkOpts {
        out_path: out.clone(),
        overwrite: !args.no_overwrite,
        speed: args.speed,
    };
    let stats = cardspin::export(&args.in_path, &cfg, opts)?;

    eprintln!("wrote {} ({} frames)", out.display(), stats.frames_total);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    cardspin::check_input_path(&args.in_path)?;
    let cfg = args.anim.resolve()?;

    let t = match (args.t, args.frame) {
        (Some(t), _) => t,
        (None, Some(f)) => cfg.timestamp_for(cardspin::FrameIndex(f)),
        (None, None) => 0.0,
    };
    let frame = cardspin::render_frame_at(&args.in_path, &cfg, t)?;

    cardspin::ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
