use crate::config::{Config, load_config};
use crate::dump::{PlacementDump, write_placement_dump};
use crate::position::compute_position;
use crate::request::{PlacementRequest, RequestSet, parse_requests};
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "placer", version, about = "Tooltip and popover placement calculator")]
pub struct Args {
    /// Request JSON file (one request or an array) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON5 file (allowOverlap, viewport)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Let the overlay cover the target
    #[arg(long = "allow-overlap")]
    pub allow_overlap: bool,

    /// Viewport width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Viewport height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// Vertical scroll offset
    #[arg(long = "scroll-y")]
    pub scroll_y: Option<f64>,
}

pub fn run() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let config = resolve_config(&args)?;
    let input = read_input(args.input.as_deref())?;

    match parse_requests(&input)? {
        RequestSet::Single(request) => {
            let dump = place(request, &config);
            write_placement_dump(&dump, args.output.as_deref())?;
        }
        RequestSet::Batch(requests) => {
            log::debug!("placing {} requests", requests.len());
            let dumps: Vec<PlacementDump> = requests
                .into_iter()
                .map(|request| place(request, &config))
                .collect();
            write_placement_dump(&dumps, args.output.as_deref())?;
        }
    }
    Ok(())
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;
    if args.allow_overlap {
        config.placement.allow_overlap = true;
    }
    if let Some(width) = args.width {
        config.viewport.width = width;
    }
    if let Some(height) = args.height {
        config.viewport.height = height;
    }
    if let Some(scroll_y) = args.scroll_y {
        config.viewport.scroll_y = scroll_y;
    }
    Ok(config)
}

fn place(request: PlacementRequest, config: &Config) -> PlacementDump {
    let placement = compute_position(&request.into_input(config));
    PlacementDump::from_placement(&placement)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
