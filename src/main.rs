use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use osmtile::{decode_path, render_tile, Coverage, Projection, RenderOptions, Tile};

/// Render one 256x256 map tile from an OSM PBF file
#[derive(Parser, Debug)]
#[command(name = "render_tile", version)]
struct Args {
    /// OSM PBF dataset
    input: PathBuf,
    /// Zoom level
    zoom: u32,
    /// Tile column, counted eastward from 180°W
    column: u32,
    /// Tile row, counted southward from the top of the map
    row: u32,
    /// Output PNG file
    #[arg(default_value = "output.png")]
    output: PathBuf,
    /// Linear latitude scaling instead of Web Mercator
    #[arg(long, conflicts_with = "debug_shader")]
    simple_shader: bool,
    /// Draw a fixed diagnostic pattern, ignoring the data
    #[arg(long)]
    debug_shader: bool,
}

impl Args {
    fn projection(&self) -> Projection {
        if self.simple_shader {
            Projection::Simple
        } else if self.debug_shader {
            Projection::Debug
        } else {
            Projection::Mercator
        }
    }
}

fn run(args: &Args) -> anyhow::Result<Coverage> {
    let tile = Tile::checked(args.column, args.row, args.zoom)?;
    let opts = RenderOptions::with_projection(args.projection());
    log::info!("rendering tile {} from {}", tile, args.input.display());

    let data = decode_path(&args.input)
        .with_context(|| format!("cannot load {}", args.input.display()))?;
    let canvas = render_tile(&data, &tile, &opts)?;
    canvas.to_file(&args.output)?;
    Ok(Coverage::from_canvas(&canvas))
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args = Args::parse();
    match run(&args) {
        Ok(coverage) => {
            println!("{}", coverage);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
