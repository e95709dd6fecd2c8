use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use otsu_threshold::io::BinarizeConfig;
use otsu_threshold::{files, run_config, synthetic, RoundingMode, ThresholdMode};

#[derive(Parser, Debug)]
#[command(
    name = "otsu-threshold",
    version,
    about = "Binarize images with an automatically selected global threshold (Otsu's method)"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Binarize an image.
    Run(RunArgs),
    /// Write the synthetic demo scene.
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Input image (any format the `image` crate decodes).
    input: Option<PathBuf>,
    /// JSON config; command-line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Binary output image (default: `<input stem>_binary.png`).
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Also write the grayscale intermediate image.
    #[arg(long)]
    gray: Option<PathBuf>,
    /// Write a JSON report with histogram, threshold and pixel counts.
    #[arg(long)]
    report: Option<PathBuf>,
    #[arg(long, value_enum)]
    rounding: Option<RoundingArg>,
    /// Use this threshold instead of selecting one.
    #[arg(long)]
    threshold: Option<u8>,
}

#[derive(Args, Debug)]
struct DemoArgs {
    output: PathBuf,
    #[arg(long, default_value_t = 600)]
    width: usize,
    #[arg(long, default_value_t = 400)]
    height: usize,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RoundingArg {
    Nearest,
    Truncate,
}

impl From<RoundingArg> for RoundingMode {
    fn from(value: RoundingArg) -> Self {
        match value {
            RoundingArg::Nearest => RoundingMode::Nearest,
            RoundingArg::Truncate => RoundingMode::Truncate,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Command::Run(args) => run(args),
        Command::Demo(args) => demo(args),
    };
    if let Err(err) = outcome {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: u8) {
    let level = otsu_threshold::core::level_from_verbosity(verbose);
    if let Err(err) = otsu_threshold::core::init_with_level(level) {
        eprintln!("failed to install logger: {err}");
    }
}

// The subscriber also captures `log` records through its log bridge.
#[cfg(feature = "tracing")]
fn init_logging(_verbose: u8) {
    otsu_threshold::core::init_tracing(false);
}

fn build_config(args: RunArgs) -> Result<BinarizeConfig, Box<dyn std::error::Error>> {
    let mut cfg = match &args.config {
        Some(path) => BinarizeConfig::load_json(path)?,
        None => BinarizeConfig::default(),
    };
    if let Some(input) = args.input {
        cfg.input_path = input.to_string_lossy().into_owned();
    }
    if cfg.input_path.is_empty() {
        return Err("no input image given (pass INPUT or --config)".into());
    }
    if let Some(p) = args.output {
        cfg.output_path = Some(p.to_string_lossy().into_owned());
    }
    if let Some(p) = args.gray {
        cfg.gray_path = Some(p.to_string_lossy().into_owned());
    }
    if let Some(p) = args.report {
        cfg.report_path = Some(p.to_string_lossy().into_owned());
    }
    if let Some(r) = args.rounding {
        cfg.params.grayscale.rounding = r.into();
    }
    if let Some(t) = args.threshold {
        cfg.params.threshold = ThresholdMode::Fixed(t);
    }
    Ok(cfg)
}

fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = build_config(args)?;
    let out = run_config(&cfg)?;
    let stats = out.result.stats;
    println!("threshold: {}", out.result.threshold);
    println!(
        "white: {} ({:.1}%), black: {} ({:.1}%)",
        stats.white,
        stats.white_fraction() * 100.0,
        stats.black,
        stats.black_fraction() * 100.0
    );
    println!("wrote {}", out.report.output_path);
    Ok(())
}

fn demo(args: DemoArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.width == 0 || args.height == 0 {
        return Err("demo size must be non-zero".into());
    }
    let scene = synthetic::demo_scene(args.width, args.height);
    files::save_rgb(&args.output, &scene)?;
    println!("wrote {}", args.output.display());
    Ok(())
}
