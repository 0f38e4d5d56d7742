use bevy::prelude::*;
use clap::Parser;
use std::collections::HashSet;
use tilenav::config::load_config;
use tilenav::config::range_types::{SpanExtent, TileSize};
use tilenav::resources::NavSettings;
use tilenav::{LevelDefinition, LevelNavigation, NavResult, TileInfo};

mod navgen {
    pub mod cli_utils;
    pub mod level_generator;
}

use navgen::cli_utils::*;
use navgen::level_generator::{LevelGenerationConfig, LevelGenerator};

#[derive(Parser, Clone)]
#[command(name = "navgen")]
#[command(about = "Build obstacle and path graphs for a tile level")]
struct Args {
    /// Level name
    #[arg(long, default_value = "generated_level")]
    name: String,

    /// Load this level from the levels directory instead of generating one
    #[arg(long, conflicts_with = "png")]
    level: Option<String>,

    /// Import a grayscale PNG tile map (pixel value 0 is open, anything else blocks)
    #[arg(long)]
    png: Option<String>,

    /// Tile map size in tiles (format: WIDTHxHEIGHT)
    #[arg(long, default_value = "64x48")]
    size: String,

    /// Tile edge length in pixels
    #[arg(long)]
    tile_size: Option<i32>,

    /// Fraction of tiles that block (0.0-1.0)
    #[arg(long, default_value = "0.15")]
    density: f32,

    /// Number of doodads to scatter
    #[arg(long, default_value = "12")]
    doodads: u32,

    /// Random seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// Agent size in pixels, anchored at its centre (format: WIDTHxHEIGHT)
    #[arg(long)]
    agent: Option<String>,

    /// Viewport size bounding each path edge (format: WIDTHxHEIGHT)
    #[arg(long)]
    viewport: Option<String>,

    /// Save the level to this file, relative to the levels directory
    #[arg(long)]
    output: Option<String>,
}

fn main() -> NavResult<()> {
    let args = Args::parse();
    let settings = apply_overrides(load_config().settings, &args)?;

    let level = load_or_generate(&args, &settings)?;

    if let Some(output) = &args.output {
        validate_output_path(output)?;
        let path = level.save_to_file(output)?;
        println!("Level saved successfully to: {}", path.display());
    }

    let context = level.to_context()?;
    let navigation =
        LevelNavigation::build(&context, settings.footprint_offset()?, settings.max_span())?;

    print_navigation_summary(&level, &navigation);
    if settings.debug {
        print_path_edges(&navigation);
    }
    Ok(())
}

fn apply_overrides(mut settings: NavSettings, args: &Args) -> NavResult<NavSettings> {
    if let Some(tile_size) = args.tile_size {
        settings.tile_size = TileSize::new(tile_size);
    }
    if let Some(agent) = &args.agent {
        let (ul, dr) = centred_footprint(parse_extent(agent)?);
        settings.agent_footprint_ul = ul;
        settings.agent_footprint_dr = dr;
    }
    if let Some(viewport) = &args.viewport {
        let viewport = parse_extent(viewport)?;
        settings.viewport_width = SpanExtent::new(viewport.x);
        settings.viewport_height = SpanExtent::new(viewport.y);
    }
    Ok(settings)
}

fn load_or_generate(args: &Args, settings: &NavSettings) -> NavResult<LevelDefinition> {
    if let Some(level) = &args.level {
        return LevelDefinition::load_from_file(level);
    }

    if let Some(png) = &args.png {
        let tile_infos = (0..=u8::MAX)
            .map(|index| match index {
                0 => TileInfo::open("floor"),
                _ => TileInfo::wall(format!("wall_{index}")),
            })
            .collect();
        return LevelDefinition::from_png(png, args.name.clone(), settings.tile_size.get(), tile_infos);
    }

    let (width, height) = parse_size(&args.size)?;
    LevelGenerator::generate(&LevelGenerationConfig {
        name: args.name.clone(),
        width,
        height,
        tile_size: settings.tile_size.get(),
        tile_density: validate_density(args.density),
        doodad_count: args.doodads,
        seed: args.seed.unwrap_or_else(rand::random),
    })
}

fn print_navigation_summary(level: &LevelDefinition, navigation: &LevelNavigation) {
    let paths = navigation.paths();
    let components = paths.components();
    let largest = components.iter().map(HashSet::len).max().unwrap_or(0);
    let isolated = components.iter().filter(|c| c.len() == 1).count();

    println!("\nNavigation summary:");
    println!("  Level: {}", level.name);
    println!(
        "  Tiles: {}x{} at {}px, {} doodads",
        level.width,
        level.height,
        level.tile_size,
        level.doodads.len()
    );
    println!(
        "  Agent fattening: ul={} dr={}",
        navigation.offset().fat_ul(),
        navigation.offset().fat_dr()
    );
    println!("  Max span: {}", navigation.max_span());
    println!("  Obstacle edges: {}", navigation.obstacles().num_edges());
    println!("  Convex vertices: {}", navigation.vertices().len());
    println!("  Path edges: {}", paths.num_edges());
    println!(
        "  Components: {} (largest {largest} vertices, {isolated} isolated)",
        components.len()
    );
}

fn print_path_edges(navigation: &LevelNavigation) {
    let mut edges: Vec<(IVec2, IVec2)> = navigation.paths().edges().collect();
    edges.sort_unstable_by_key(|(u, v)| (u.y, u.x, v.y, v.x));
    println!("\nPath edges:");
    for (u, v) in edges {
        println!("  {u} -> {v}");
    }
}
