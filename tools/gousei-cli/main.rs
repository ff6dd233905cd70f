use clap::{Parser, Subcommand};
use gousei::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Query a recipe table and render item templates
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Recipe table JSON file; the built-in Archnemesis table is used when omitted
    #[arg(short, long, global = true)]
    table: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every item in display order
    Items,
    /// List every item that has a recipe, with its components
    Recipes,
    /// Show the recipe of one item
    Components { item: String },
    /// Show every item whose recipe uses the given item
    Producers { item: String },
    /// Expand an item down to base items
    Expand {
        item: String,
        /// Print the tree on a single line
        #[arg(long)]
        inline: bool,
    },
    /// Render scan templates and display images for every item
    Templates {
        /// Directory containing one `<item>.png` per item
        #[arg(short, long, default_value = "pictures")]
        assets: PathBuf,
        /// Directory to write the rendered images to
        #[arg(short, long, default_value = "tmp/templates")]
        out: PathBuf,
        /// Scale factor applied to every sprite
        #[arg(short, long, default_value_t = 1.0)]
        scale: f64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let graph = load_graph(cli.table.as_deref());

    let outcome = match cli.command {
        Command::Items => {
            graph.items().for_each(|item| println!("{}", item));
            Ok(())
        }
        Command::Recipes => {
            for (item, recipe) in graph.recipes_with_components() {
                println!("{} <- {}", item, recipe.join(" + "));
            }
            Ok(())
        }
        Command::Components { item } => graph.components_of(&item).map(|components| {
            if components.is_empty() {
                println!("'{}' is a base item", item);
            }
            components.iter().for_each(|c| println!("{}", c));
        }),
        Command::Producers { item } => graph.producers_of(&item).map(|producers| {
            if producers.is_empty() {
                println!("Nothing is made from '{}'", item);
            }
            producers.iter().for_each(|p| println!("{}", p));
        }),
        Command::Expand { item, inline } => graph.expand(&item).map(|tree| {
            if inline {
                println!("{}", TreeFormatter::format_inline(&tree));
            } else {
                println!("{}", tree);
            }
            println!(
                "\n{} nodes, depth {}: {}",
                tree.node_count(),
                tree.depth(),
                TreeFormatter::format_leaf_counts(&tree)
            );
        }),
        Command::Templates { assets, out, scale } => {
            run_templates(graph, assets, &out, scale);
            Ok(())
        }
    };

    if let Err(e) = outcome {
        exit_with_error(&e.to_string());
    }
}

fn load_graph(table_path: Option<&str>) -> RecipeGraph {
    let table = match table_path {
        Some(path) => RecipeTable::from_file(path),
        None => RecipeTable::archnemesis(),
    }
    .unwrap_or_else(|e| exit_with_error(&format!("Failed to load recipe table: {}", e)));

    RecipeGraph::new(table)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid recipe table: {}", e)))
}

fn run_templates(graph: RecipeGraph, assets: PathBuf, out: &Path, scale: f64) {
    let render_start = Instant::now();
    let catalog = ItemCatalog::new(graph, DirectoryAssets::new(assets), scale)
        .unwrap_or_else(|e| exit_with_error(&format!("Rendering failed: {}", e)));
    let render_duration = render_start.elapsed();

    if let Err(e) = fs::create_dir_all(out) {
        exit_with_error(&format!(
            "Failed to create output directory '{}': {}",
            out.display(),
            e
        ));
    }

    let write_start = Instant::now();
    for item in catalog.items() {
        if let Err(e) = write_item(&catalog, item, out) {
            exit_with_error(&format!("Failed to write images for '{}': {}", item, e));
        }
    }
    let write_duration = write_start.elapsed();

    let (width, height) = catalog.image_size();
    println!("\n--- Render Summary ---");
    println!("Items:                {}", catalog.graph().len());
    println!("Scale:                {}", catalog.scale());
    println!("Display Size:         {}x{}", width, height);
    println!("Small Icon Size:      {}", catalog.small_icon_size());
    println!("Rendering:            {:?}", render_duration);
    println!("Writing:              {:?}", write_duration);
    println!("Output:               {}", out.display());
}

fn write_item(catalog: &ItemCatalog<DirectoryAssets>, item: &str, out: &Path) -> Result<()> {
    let asset = catalog.asset(item)?;
    asset
        .scan_template
        .to_rgb_image()
        .save(out.join(format!("{}.scan.png", item)))?;
    asset
        .display_image
        .save(out.join(format!("{}.display.png", item)))?;
    asset
        .small_display_image
        .save(out.join(format!("{}.small.png", item)))?;
    Ok(())
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
