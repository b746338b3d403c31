use clap::{Parser, ValueEnum};
use pictoglyph::{Outcome, SeededSource, Style, StyleParameters};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pictoglyph", about = "Photograph to minimal pictogram line drawing")]
#[command(version)]
struct Cli {
    /// Input image paths (PNG, JPEG, BMP, GIF)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for the rendered glyphs
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Edge detection low threshold (0-255)
    #[arg(long, default_value = "50")]
    low: u8,

    /// Edge detection high threshold (0-255)
    #[arg(long, default_value = "150")]
    high: u8,

    /// Simplification level (1-100). Tolerance = level / 1000 × contour perimeter.
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..=100))]
    level: u32,

    /// Line thickness in canvas pixels (1-20)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..=20))]
    thickness: u32,

    /// Rendering style
    #[arg(short, long, value_enum, default_value = "outline")]
    style: StyleArg,

    /// Side of the square output canvas in pixels
    #[arg(long, default_value = "500")]
    canvas: u32,

    /// Seed for the textured style (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Also write a side-by-side source/glyph comparison
    #[arg(long)]
    compare: bool,

    /// Also write the detected edge map
    #[arg(long)]
    save_edges: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    Outline,
    Filled,
    Textured,
}

impl From<StyleArg> for Style {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Outline => Style::Outline,
            StyleArg::Filled => Style::Filled,
            StyleArg::Textured => Style::Textured,
        }
    }
}

type CliError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let params = StyleParameters {
        low_threshold: cli.low,
        high_threshold: cli.high,
        thickness: cli.thickness,
        style: cli.style.into(),
        canvas_size: cli.canvas,
        ..StyleParameters::default()
    }
    .with_simplification_level(cli.level);
    params.validate()?;
    std::fs::create_dir_all(&cli.output_dir)?;

    // Header
    eprintln!();
    eprintln!(
        "  pictoglyph \u{00b7} {} image(s) \u{00b7} {:?}",
        cli.inputs.len(),
        params.style
    );
    eprintln!();

    // One independent pipeline run per image.
    let results: Vec<(&PathBuf, Result<PathBuf, CliError>)> = cli
        .inputs
        .par_iter()
        .enumerate()
        .map(|(index, input)| {
            let seed = cli.seed.map(|s| s.wrapping_add(index as u64));
            (input, process(input, &cli, &params, seed))
        })
        .collect();

    // Footer
    eprintln!();
    let mut failures = 0;
    for (input, result) in &results {
        match result {
            Ok(output) => eprintln!("  \u{2713} {}", output.display()),
            Err(err) => {
                failures += 1;
                eprintln!("  \u{2717} {}: {}", input.display(), err);
            }
        }
    }
    eprintln!();

    if failures > 0 {
        return Err(format!("{} of {} image(s) failed", failures, results.len()).into());
    }
    Ok(())
}

fn process(
    input: &Path,
    cli: &Cli,
    params: &StyleParameters,
    seed: Option<u64>,
) -> Result<PathBuf, CliError> {
    let raster = pictoglyph::bitmap::load(input)?;
    let mut rng = match seed {
        Some(seed) => SeededSource::new(seed),
        None => SeededSource::from_entropy(),
    };
    let pictogram = pictoglyph::render_pictogram_with(&raster, params, &mut rng)?;

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    if let Outcome::NoContour = pictogram.outcome {
        tracing::warn!("{}: no contour found, writing grayscale source", input.display());
    }

    let glyph_path = cli.output_dir.join(format!("{}_glyph.png", stem));
    pictogram.image.save(&glyph_path)?;

    if cli.save_edges {
        let edges_path = cli.output_dir.join(format!("{}_edges.png", stem));
        pictogram.edges.as_image().save(&edges_path)?;
        tracing::info!("Edges       {}", edges_path.display());
    }

    if cli.compare {
        let comparison = pictoglyph::render::render_comparison(&raster, &pictogram.image);
        let compare_path = cli.output_dir.join(format!("{}_comparison.png", stem));
        comparison.save(&compare_path)?;
        tracing::info!("Compare     {}", compare_path.display());
    }

    Ok(glyph_path)
}
