use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use edt_rust::config::ExtractorConfig;
use edt_rust::io::DocumentLoader;
use edt_rust::preprocessing::SchedulePipeline;
use edt_rust::transformations::CalendarSet;

const USAGE: &str = "Usage: edt-extract <document.json> [config.toml] [--print] [--calendars] [--detect <dir>]

Extracts the courses of a timetable page document.

Options:
   --print       print one line per course instead of JSON
   --calendars   print the courses grouped by calendar as JSON
   -d, --detect <dir>
                 save images of the detected elements of each page and week
   -h, --help    show this help

Without a config file, edt.toml is looked up in the usual locations.
Set RUST_LOG=debug for detailed logs.";

#[derive(Debug, Default)]
struct Args {
    document: PathBuf,
    config: Option<PathBuf>,
    print: bool,
    calendars: bool,
    detect: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args::default();
    let mut positional = Vec::new();
    let mut raw = std::env::args().skip(1);
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-p" | "--print" => args.print = true,
            "--calendars" => args.calendars = true,
            "-d" | "--detect" => {
                let dir = raw
                    .next()
                    .with_context(|| format!("{} needs a directory\n\n{}", arg, USAGE))?;
                args.detect = Some(PathBuf::from(dir));
            }
            flag if flag.starts_with('-') => anyhow::bail!("Unknown option: {}\n\n{}", flag, USAGE),
            _ => positional.push(PathBuf::from(&arg)),
        }
    }

    let mut positional = positional.into_iter();
    args.document = positional
        .next()
        .with_context(|| format!("Missing page document\n\n{}", USAGE))?;
    args.config = positional.next();
    if let Some(extra) = positional.next() {
        anyhow::bail!("Unexpected argument: {}\n\n{}", extra.display(), USAGE);
    }
    Ok(Some(args))
}

fn load_config(path: Option<&PathBuf>) -> Result<ExtractorConfig> {
    match path {
        Some(path) => ExtractorConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(ExtractorConfig::from_default_location().unwrap_or_else(|e| {
            info!("{}, using default settings", e);
            ExtractorConfig::default()
        })),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args()? else {
        println!("{}", USAGE);
        return Ok(());
    };
    let config = load_config(args.config.as_ref())?;
    let pipeline = SchedulePipeline::with_config(config);
    let result = match &args.detect {
        Some(dir) => {
            let document = DocumentLoader::load_from_file(&args.document)?;
            pipeline.save_detections(&document, dir)?;
            pipeline
                .process(&document)
                .with_context(|| format!("Failed to extract courses from {}", args.document.display()))?
        }
        None => pipeline.process_file(&args.document)?,
    };

    if args.print {
        for course in &result.courses {
            println!("{}", course);
        }
    } else if args.calendars {
        let calendars = CalendarSet::from_courses(&result.level, &result.courses);
        let grouped: Vec<_> = calendars
            .iter()
            .map(|(kind, entries)| {
                serde_json::json!({
                    "name": calendars.name(kind),
                    "kind": kind,
                    "events": entries,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&grouped)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    Ok(())
}
