use clap::Parser;
use gousei::recipe::{RecipeEntry, RecipeTable};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fs;

/// A CLI tool to generate random acyclic recipe tables for stress-testing expansion
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_table.json")]
    output: String,

    /// Number of base items
    #[arg(long, default_value_t = 30)]
    bases: usize,

    /// Number of crafted tiers stacked on top of the base items
    #[arg(long, default_value_t = 4)]
    tiers: usize,

    /// Number of crafted items per tier
    #[arg(long, default_value_t = 10)]
    per_tier: usize,

    /// The maximum number of components in one recipe
    #[arg(long, default_value_t = 4)]
    max_components: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.bases == 0 || cli.max_components < 2 {
        eprintln!("Error: --bases must be at least 1 and --max-components at least 2");
        std::process::exit(1);
    }

    println!(
        "Generating recipe table ({} base items, {} tiers of {})...",
        cli.bases, cli.tiers, cli.per_tier
    );

    let table = generate_table(&mut rng, &cli);
    fs::write(&cli.output, table.to_json_pretty()?)?;

    println!(
        "Successfully generated {} items and saved them to '{}'",
        table.len(),
        cli.output
    );

    Ok(())
}

/// Builds the table tier by tier; every recipe only draws from lower tiers, so the result
/// is acyclic. Crafted items come first so the output reads top-down, like a real table.
fn generate_table<R: Rng>(rng: &mut R, cli: &Cli) -> RecipeTable {
    let mut available: Vec<String> = (0..cli.bases).map(|i| format!("base-{}", i)).collect();
    let mut crafted: Vec<RecipeEntry> = Vec::new();

    for tier in 1..=cli.tiers {
        let mut tier_items = Vec::with_capacity(cli.per_tier);
        for index in 0..cli.per_tier {
            let name = format!("tier{}-{}", tier, index);
            let count = rng.random_range(2..=cli.max_components).min(available.len());
            let components: Vec<String> = available.choose_multiple(rng, count).cloned().collect();
            crafted.push(RecipeEntry {
                name: name.clone(),
                components,
            });
            tier_items.push(name);
        }
        available.extend(tier_items);
        println!("-> Generated tier {}.", tier);
    }

    crafted.reverse();
    let bases = (0..cli.bases).map(|i| RecipeEntry {
        name: format!("base-{}", i),
        components: Vec::new(),
    });
    RecipeTable::new(crafted.into_iter().chain(bases).collect())
}
