//! Slide map piling tool
//!
//! Reads slide positions from a CSV file, piles their markers at the given
//! view, builds the compass index, and writes one row per slide.

use clap::Parser;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use rust_slidemapper::{
    Direction, LatLng, MarkerId, MercatorView, PileOptions, Slide, SlideMapper, SlideOptions,
};


const HEADER: [&str; 10] = [
    "index",
    "latitude",
    "longitude",
    "pile",
    "pile_size",
    "shown",
    "north",
    "south",
    "east",
    "west",
];

#[derive(Parser)]
#[command(name = "rust_slidemapper")]
#[command(about = "Slide map marker piling and compass navigation tool", long_about = None)]
struct Args {
    /// Input CSV file with latitude,longitude[,popup] columns
    #[arg(short, long, default_value = "slides.csv")]
    input: PathBuf,

    /// Output CSV file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Piling radius in pixels, 0 disables piling
    #[arg(short, long, default_value_t = 60.0)]
    radius: f64,

    /// Zoom level of the view
    #[arg(short, long, default_value_t = 4)]
    zoom: i32,

    /// Latitude of the initial view center
    #[arg(long, default_value_t = 40.423, allow_negative_numbers = true)]
    lat: f64,

    /// Longitude of the initial view center
    #[arg(long, default_value_t = -98.7372, allow_negative_numbers = true)]
    lng: f64,

    /// View width in pixels
    #[arg(long, default_value_t = 960.0)]
    width: f64,

    /// View height in pixels
    #[arg(long, default_value_t = 500.0)]
    height: f64,

    /// Most zoom levels a pile click may zoom in by
    #[arg(long, default_value_t = 2)]
    max_zoom_change: i32,

    /// Piling is off past this zoom level
    #[arg(long, default_value_t = 9)]
    max_cluster_zoom: i32,

    /// Keep single markers as piles
    #[arg(long)]
    single_piles: bool,

    /// Start with piling disabled
    #[arg(long)]
    no_cluster: bool,

    /// Build the compass index (north/south/east/west columns)
    #[arg(short, long)]
    explore: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    let slides = match read_slides(&args.input) {
        Ok(slides) => slides,
        Err(e) => {
            eprintln!("Error reading CSV: {}", e);
            std::process::exit(1);
        }
    };

    if slides.is_empty() {
        eprintln!("No slides found in CSV file");
        std::process::exit(1);
    }
    tracing::debug!(slides = slides.len(), input = ?args.input, "read slides");

    let mapper = match build_mapper(&args, slides) {
        Ok(mapper) => mapper,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        slides = mapper.slides().len(),
        piles = mapper.piles().piles().count(),
        piling = mapper.piles().is_enabled(),
        "piled slides"
    );

    let rows = slide_rows(&mapper);
    let result = match &args.output {
        None => write_rows(io::stdout(), &rows),
        Some(output_file) => match File::create(output_file) {
            Ok(file) => write_rows(file, &rows),
            Err(e) => Err(e.into()),
        },
    };
    if let Err(e) = result {
        eprintln!("Error writing CSV: {}", e);
        std::process::exit(1);
    }
    if let Some(output_file) = &args.output {
        tracing::debug!(output = ?output_file, "rows written");
    }
}

/// Logs to stderr, `RUST_LOG` overrides the level picked by `--debug`
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_mapper(
    args: &Args,
    slides: Vec<Slide>,
) -> Result<SlideMapper<MercatorView>, Box<dyn std::error::Error>> {
    let options = SlideOptions {
        center: LatLng::new(args.lat, args.lng),
        zoom: args.zoom,
        cluster: !args.no_cluster,
        max_cluster_zoom: args.max_cluster_zoom,
        explore: args.explore,
        piles: PileOptions {
            radius: args.radius,
            max_zoom_change: args.max_zoom_change,
            single_piles: args.single_piles,
            ..PileOptions::default()
        },
        ..SlideOptions::default()
    };
    let view = MercatorView::new(options.center, options.zoom, args.width, args.height)
        .with_zoom_limits(options.min_zoom, options.max_zoom);

    let mut mapper = SlideMapper::new(view, options)?;
    mapper.add_all(slides);
    Ok(mapper)
}

/// Reads slides from a file
///
/// Expected format: `latitude,longitude[,popup]` (header row is optional)
fn read_slides(filename: &PathBuf) -> Result<Vec<Slide>, Box<dyn std::error::Error>> {
    let file = File::open(filename)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut slides = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() < 2 {
            continue;
        }

        let lat = record[0].trim().parse::<f64>();
        let lng = record[1].trim().parse::<f64>();
        match (lat, lng) {
            (Ok(lat), Ok(lng)) => {
                let popup = record.get(2).unwrap_or_default();
                slides.push(Slide::new(lat, lng, popup, popup));
            }
            // header row
            _ if i == 0 => {}
            _ => tracing::warn!(row = i, "skipping row without a valid position"),
        }
    }

    Ok(slides)
}

/// One output row per slide, empty fields mean "none"
fn slide_rows(mapper: &SlideMapper<MercatorView>) -> Vec<Vec<String>> {
    let neighbor = |i: usize, dir: Direction| {
        mapper
            .compass()
            .and_then(|c| c.neighbor(i, dir))
            .map(|n| n.index.to_string())
            .unwrap_or_default()
    };

    mapper
        .slides()
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            let id = MarkerId(i as u64);
            let pile = mapper.piles().pile_of(id);
            let mut row = vec![
                i.to_string(),
                slide.position.lat.to_string(),
                slide.position.lng.to_string(),
                pile.map(|p| p.id().0.to_string()).unwrap_or_default(),
                pile.map(|p| p.size().to_string()).unwrap_or_default(),
                mapper.piles().is_shown(id).to_string(),
            ];
            row.extend(Direction::ALL.iter().map(|&dir| neighbor(i, dir)));
            row
        })
        .collect()
}

/// Writes the header and rows as CSV
fn write_rows<W: io::Write>(
    writer: W,
    rows: &[Vec<String>],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
