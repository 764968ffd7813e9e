use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sheet_core::{AnswerSheetGenerator, GeneratorConfig, LayoutVariant};

/// Draw an optical answer sheet and its coordinate file
#[derive(Parser, Debug)]
#[command(name = "answer-sheet")]
#[command(
    about = "Draw an answer sheet PNG plus a JSON map of its anchors and bubbles",
    long_about = None
)]
struct Args {
    /// Output image path
    #[arg(short, long, default_value = "answer_card_redrawn.png")]
    image: PathBuf,

    /// Output coordinate file path
    #[arg(short, long, default_value = "coordinates.json")]
    coordinates: PathBuf,

    /// Layout tuning (overrides the config file)
    #[arg(short, long, value_enum)]
    variant: Option<VariantArg>,

    /// Font file to try first (repeatable)
    #[arg(short, long)]
    font: Vec<PathBuf>,

    /// JSON generator config
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum VariantArg {
    Original,
    Refined,
}

impl From<VariantArg> for LayoutVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Original => LayoutVariant::Original,
            VariantArg::Refined => LayoutVariant::Refined,
        }
    }
}

fn load_config(args: &Args) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            GeneratorConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(variant) = args.variant {
        config.variant = variant.into();
    }
    let mut fonts = args.font.clone();
    fonts.append(&mut config.font_paths);
    config.font_paths = fonts;

    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    log::debug!("Config: {:?}", config);

    let generator = AnswerSheetGenerator::with_config(&config);
    let sheet = generator.generate();
    sheet
        .save(&args.image, &args.coordinates)
        .context("writing sheet outputs")?;

    println!(
        "Answer sheet redrawn: image saved to {}, coordinates saved to {}",
        args.image.display(),
        args.coordinates.display()
    );
    Ok(())
}
