use basicplay::emit::OutputFormat;
use basicplay::play::{Converter, PlayOptions};
use clap::Parser;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "basicplay")]
#[command(version = "0.1.0")]
#[command(about = "BASIC PLAY statement to WAV / IC / BASIC converter", long_about = None)]
struct Args {
    /// Output file
    output: PathBuf,

    /// PLAY statement given inline
    #[arg(short, long, conflicts_with = "input", required_unless_present = "input")]
    statement: Option<String>,

    /// File containing the PLAY statement
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output format (detected from the output suffix if not given)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// JSON file with conversion options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// WAV sample rate (Hz)
    #[arg(short, long)]
    rate: Option<u32>,

    /// Starting octave
    #[arg(short, long)]
    octave: Option<i32>,

    /// Starting tempo (quarter notes per minute)
    #[arg(short, long)]
    tempo: Option<u32>,

    /// Print pipeline details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), basicplay::Error> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    let mut options = match &args.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => PlayOptions::default(),
    };
    if let Some(rate) = args.rate {
        options.sample_rate = rate;
    }
    if let Some(octave) = args.octave {
        options.octave = octave;
    }
    if let Some(tempo) = args.tempo {
        options.tempo = tempo;
    }

    let format = match args.format {
        Some(format) => format,
        None => OutputFormat::from_path(&args.output)?,
    };

    let text = match (&args.statement, &args.input) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)?
            .trim_end_matches(['\r', '\n'])
            .to_string(),
        (None, None) => unreachable!("clap requires a statement or an input file"),
    };

    let converter = Converter::new(options);
    let conversion = converter.convert(&text);

    // Render before creating the file so a failed conversion leaves nothing behind
    let mut buffer = Vec::new();
    converter.write_output(&conversion, format, &mut buffer)?;

    let mut file = BufWriter::new(File::create(&args.output)?);
    file.write_all(&buffer)?;
    file.flush()?;

    log::info!(
        "Wrote {} ({} notes, {:.3}s, {} issues)",
        args.output.display(),
        conversion.statement.note_count,
        conversion.resolution.total_duration,
        conversion.issue_count()
    );
    Ok(())
}
