use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use tilenav::{Doodad, LevelDefinition, NavResult, TileGrid, TileInfo};

const DOODAD_KINDS: [&str; 4] = ["tree", "rock", "barrel", "crate"];

pub struct LevelGenerationConfig {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub tile_size: i32,
    pub tile_density: f32,
    pub doodad_count: u32,
    pub seed: u64,
}

pub struct LevelGenerator;

impl LevelGenerator {
    pub fn generate(config: &LevelGenerationConfig) -> NavResult<LevelDefinition> {
        println!("Generating level: {name}", name = config.name);
        println!(
            "Tile map: {width}x{height} tiles of {size}px (seed: {seed})",
            width = config.width,
            height = config.height,
            size = config.tile_size,
            seed = config.seed
        );

        let mut rng = Pcg64::seed_from_u64(config.seed);

        let tiles: Vec<u8> = (0..config.width * config.height)
            .map(|_| u8::from(rng.gen_bool(config.tile_density as f64)))
            .collect();
        let grid = TileGrid::new(
            config.width,
            config.height,
            config.tile_size,
            tiles,
            vec![TileInfo::open("grass"), TileInfo::wall("rock")],
        )?;
        println!("Blocked {} of {} tiles", grid.blocked_count(), grid.tiles().len());

        let doodads = Self::scatter_doodads(&mut rng, grid.world_size(), config.doodad_count);
        println!("Placed {} doodads", doodads.len());

        LevelDefinition::new(config.name.clone(), &grid, doodads)
    }

    /// Sprites anchored at their bottom centre, blocking a strip along their base
    fn scatter_doodads(rng: &mut Pcg64, world_size: IVec2, count: u32) -> Vec<Doodad> {
        (0..count)
            .map(|_| {
                let kind = DOODAD_KINDS.choose(rng).copied().unwrap_or("rock");
                let size = IVec2::new(rng.gen_range(8..=24), rng.gen_range(8..=32));
                let depth = rng.gen_range(4..=size.y.min(12));
                let position = IVec2::new(
                    rng.gen_range(0..world_size.x.max(1)),
                    rng.gen_range(0..world_size.y.max(1)),
                );
                Doodad::new(
                    kind.to_string(),
                    position,
                    IVec2::new(size.x / 2, size.y),
                    IVec2::new(0, size.y - depth),
                    size,
                )
            })
            .collect()
    }
}
