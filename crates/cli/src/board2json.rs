//! board2json - Turn whiteboard OCR detections into structured math layout
//!
//! Reads a provider payload (a detection array, or a Vision style object
//! with `textAnnotations`), groups the tokens into reading lines and
//! equations, maps boxes into canvas space and optionally locates a phrase.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use inkline_core::api::{AnalyzeOptions, OcrInput, analyze_detections};
use inkline_core::geometry::Bounds;
use inkline_core::layout::LayoutParams;
use inkline_core::mapping::CoordinateMapping;
use inkline_core::ocr::{Detection, OcrResponse};
use serde_json::json;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// What to emit.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum OutputType {
    /// Lines, classified equations and highlight (default)
    #[default]
    Analysis,
    /// Transcript, word annotations and tagged elements
    Envelope,
    /// Reading lines only, one per output line
    Lines,
}

/// Turn whiteboard OCR detections into ordered lines and classified equations.
#[derive(Parser, Debug)]
#[command(name = "board2json")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the OCR JSON payload, or "-" for stdin
    #[arg(default_value = "-")]
    input: String,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 't', long = "output-type", value_enum, default_value = "analysis")]
    output_type: OutputType,

    /// Pretty-print JSON output
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,

    // === Layout options ===
    /// JSON file with layout parameters; flags below override it
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Vertical tolerance for equation grouping, in pixels
    #[arg(short = 'E', long = "equation-tolerance", allow_negative_numbers = true)]
    equation_tolerance: Option<f64>,

    /// Vertical tolerance for reading lines, in pixels
    #[arg(short = 'L', long = "line-tolerance", allow_negative_numbers = true)]
    line_tolerance: Option<f64>,

    /// Padding reported with highlight regions
    #[arg(short = 'P', long, allow_negative_numbers = true)]
    padding: Option<f64>,

    /// The first detection is a word, not the full transcript
    #[arg(long = "no-transcript", action = ArgAction::SetTrue)]
    no_transcript: bool,

    // === Mapping options ===
    /// JSON file describing the image to canvas mapping
    #[arg(short = 'm', long, conflicts_with_all = ["image_size", "target"])]
    mapping: Option<PathBuf>,

    /// Rasterized image size as WIDTHxHEIGHT
    #[arg(long = "image-size", requires = "target")]
    image_size: Option<String>,

    /// Target canvas bounds as X,Y,WIDTH,HEIGHT
    #[arg(long, requires = "image_size", allow_hyphen_values = true)]
    target: Option<String>,

    // === Highlight ===
    /// Phrase to locate on the board
    #[arg(short = 'q', long)]
    query: Option<String>,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

/// Parse "WIDTHxHEIGHT".
fn parse_image_size(s: &str) -> Result<(f64, f64)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("image size must look like WIDTHxHEIGHT, got {s:?}"))?;
    Ok((w.trim().parse()?, h.trim().parse()?))
}

/// Parse "X,Y,WIDTH,HEIGHT".
fn parse_bounds(s: &str) -> Result<Bounds> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("invalid target bounds {s:?}"))?;
    match values.as_slice() {
        [x, y, w, h] => Ok(Bounds::new(*x, *y, *w, *h)),
        _ => bail!("target bounds need four values X,Y,WIDTH,HEIGHT, got {s:?}"),
    }
}

fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Build LayoutParams from the config file and command line flags.
fn build_params(args: &Args) -> Result<LayoutParams> {
    let mut params = match &args.config {
        Some(path) => read_json_file(path)?,
        None => LayoutParams::default(),
    };
    if let Some(t) = args.equation_tolerance {
        params.equation_tolerance = t;
    }
    if let Some(t) = args.line_tolerance {
        params.line_tolerance = t;
    }
    if let Some(p) = args.padding {
        params.highlight_padding = p;
    }
    if args.no_transcript {
        params.skip_transcript = false;
    }
    params.validate()?;
    Ok(params)
}

fn build_mapping(args: &Args) -> Result<Option<CoordinateMapping>> {
    if let Some(path) = &args.mapping {
        return Ok(Some(read_json_file(path)?));
    }
    match (&args.image_size, &args.target) {
        (Some(size), Some(target)) => {
            let (w, h) = parse_image_size(size)?;
            Ok(Some(CoordinateMapping::new(w, h, parse_bounds(target)?)))
        }
        _ => Ok(None),
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {input}"))
    }
}

fn write_json<W: Write>(out: &mut W, value: &impl serde::Serialize, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Process one payload and write the requested output.
fn process<W: Write>(detections: &[Detection], args: &Args, options: &AnalyzeOptions, out: &mut W) -> Result<()> {
    if args.output_type == OutputType::Envelope {
        let envelope = OcrResponse::from_detections(detections, options.params.skip_transcript);
        return write_json(out, &envelope, args.pretty);
    }

    match analyze_detections(detections, options) {
        Ok(analysis) => {
            debug!(equations = analysis.equations.len(), "analysis complete");
            if args.output_type == OutputType::Lines {
                for line in &analysis.lines_in_order {
                    writeln!(out, "{line}")?;
                }
                Ok(())
            } else {
                write_json(out, &analysis, args.pretty)
            }
        }
        Err(e) => {
            // Spatial analysis is optional; the flat transcript still helps.
            warn!("spatial analysis unavailable: {e}");
            let full_text = OcrResponse::from_detections(detections, options.params.skip_transcript).full_text;
            if args.output_type == OutputType::Lines {
                writeln!(out, "{full_text}")?;
                Ok(())
            } else {
                write_json(out, &json!({ "fullText": full_text, "error": e.to_string() }), args.pretty)
            }
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let options = AnalyzeOptions {
        params: build_params(args)?,
        mapping: build_mapping(args)?,
        highlight_query: args.query.clone(),
    };

    let payload = read_input(&args.input)?;
    let input: OcrInput = serde_json::from_str(&payload).context("parsing OCR payload")?;
    let detections = input.into_detections();
    debug!(detections = detections.len(), "payload loaded");

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile).with_context(|| format!("creating {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };
    process(&detections, args, &options, &mut output)?;
    output.flush()?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(&args) {
        eprintln!("board2json: {e:#}");
        std::process::exit(1);
    }
}
