//! Common test utilities for building recipe tables and sprites.
use gousei::prelude::*;
use image::{Rgba, RgbaImage};

/// A small table with shared components and multi-parent items.
///
/// `Bonebreaker` is used by both `Tukohama's Touch` and `Magma Barrier`, and `Juggernaut`
/// by both `Invulnerable` and `Empowering Minions`.
#[allow(dead_code)]
pub fn create_small_table() -> RecipeTable {
    let rows: &[(&str, &[&str])] = &[
        (
            "Tukohama's Touch",
            &["Bonebreaker", "Executioner", "Magma Barrier"],
        ),
        (
            "Solaris Touched",
            &["Invulnerable", "Magma Barrier", "Empowering Minions"],
        ),
        ("Executioner", &["Frenzied", "Berserker"]),
        ("Magma Barrier", &["Incendiary", "Bonebreaker"]),
        ("Invulnerable", &["Sentinel", "Juggernaut", "Consecrator"]),
        (
            "Empowering Minions",
            &["Necromancer", "Executioner", "Juggernaut"],
        ),
        ("Necromancer", &["Bombardier", "Overcharged"]),
        ("Bonebreaker", &[]),
        ("Frenzied", &[]),
        ("Berserker", &[]),
        ("Incendiary", &[]),
        ("Sentinel", &[]),
        ("Juggernaut", &[]),
        ("Consecrator", &[]),
        ("Bombardier", &[]),
        ("Overcharged", &[]),
    ];
    rows.into_recipe_table().expect("static rows always convert")
}

#[allow(dead_code)]
pub fn create_small_graph() -> RecipeGraph {
    RecipeGraph::new(create_small_table()).expect("small table is valid")
}

/// A sprite filled with a single colour.
#[allow(dead_code)]
pub fn solid_sprite(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// A sprite with a transparent one-pixel border and an opaque, position-dependent interior.
#[allow(dead_code)]
pub fn patterned_sprite(width: u32, height: u32, seed: u8) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([
                (x as u8).wrapping_mul(3).wrapping_add(seed),
                (y as u8).wrapping_mul(5),
                seed,
                if (x + y) % 2 == 0 { 255 } else { 160 },
            ])
        }
    })
}

/// One distinct sprite of the given size for every item of the graph.
#[allow(dead_code)]
pub fn memory_assets_for(graph: &RecipeGraph, width: u32, height: u32) -> MemoryAssets {
    graph
        .items()
        .enumerate()
        .fold(MemoryAssets::new(), |assets, (index, item)| {
            assets.with(item, patterned_sprite(width, height, index as u8 * 7))
        })
}
