//! wakeqr command-line entrypoint

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use wakeqr::{ErrorCorrection, Result, WakeQrConfig, logging, output};

#[derive(Parser, Debug)]
#[command(
    name = "wakeqr",
    version,
    about = "Generate the QR code that switches off the wake-up alarm"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to wakeqr.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Secret to encode (must match the one the alarm app expects)
    #[arg(long, value_name = "TEXT")]
    secret: Option<String>,

    /// Output image path; the extension selects the format
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// QR version to use, or the minimum version when fitting
    #[arg(long, value_name = "N")]
    symbol_version: Option<u8>,

    /// Error correction level (L, M, Q or H)
    #[arg(long, value_name = "LEVEL")]
    ec_level: Option<ErrorCorrection>,

    /// Pixels per module
    #[arg(long, value_name = "PX")]
    box_size: Option<u32>,

    /// Quiet zone width in modules
    #[arg(long, value_name = "MODULES")]
    border: Option<u32>,

    /// Colour of dark modules (any CSS colour)
    #[arg(long, value_name = "COLOR")]
    fill_color: Option<String>,

    /// Colour of light modules and border (any CSS colour)
    #[arg(long, value_name = "COLOR")]
    back_color: Option<String>,

    /// Fail instead of growing the version when the secret does not fit
    #[arg(long)]
    no_fit: bool,

    /// Decode the written image and check it carries the secret
    #[arg(long)]
    verify: bool,

    /// Print a JSON report instead of the success message
    #[arg(long)]
    json: bool,

    /// Print symbol details below the success message
    #[arg(long)]
    details: bool,
}

impl Cli {
    fn apply(&self, config: &mut WakeQrConfig) {
        if let Some(ref secret) = self.secret {
            config.secret = secret.clone();
        }
        if let Some(ref path) = self.output {
            config.output = path.clone();
        }
        if let Some(version) = self.symbol_version {
            config.symbol.version = version;
        }
        if let Some(level) = self.ec_level {
            config.symbol.ec_level = level;
        }
        if let Some(size) = self.box_size {
            config.render.box_size = size;
        }
        if let Some(border) = self.border {
            config.render.border = border;
        }
        if let Some(ref color) = self.fill_color {
            config.render.fill_color = color.clone();
        }
        if let Some(ref color) = self.back_color {
            config.render.back_color = color.clone();
        }
        if self.no_fit {
            config.symbol.fit = false;
        }
        if self.verify {
            config.verify = true;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = WakeQrConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    logging::init(&config.logging)?;
    config.log_diagnostics();

    info!(
        output = %config.output.display(),
        symbol = ?config.symbol,
        "Generating QR code"
    );
    let report = wakeqr::generate(&config)?;

    let rendered = output::render_report(&report, cli.details);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rendered.json)?);
    } else {
        for line in &rendered.human {
            println!("{line}");
        }
    }

    Ok(())
}
