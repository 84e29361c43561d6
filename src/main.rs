use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::Level;

use fabric_layout::config::{DEFAULT_FABRIC_LENGTH, DEFAULT_FABRIC_WIDTHS, DEFAULT_GAP};
use fabric_layout::{LayoutConfig, Material, Order, ingest, render};

#[derive(Parser)]
#[command(
    name = "fabric_layout",
    about = "Lay out cut orders on fixed-width fabric rolls with minimal waste"
)]
struct Cli {
    /// Text file with one seller remark per line, or a CSV export with --column
    #[arg(long)]
    orders_file: Option<PathBuf>,

    /// Read --orders-file as CSV and take remarks from this column
    /// (exported order sheets use "卖家备注")
    #[arg(long)]
    column: Option<String>,

    /// Seller remark containing a size (e.g. "PVC 35*120")
    #[arg(long = "order", num_args = 1..)]
    orders: Vec<String>,

    /// Stock widths, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_FABRIC_WIDTHS)]
    widths: Vec<f64>,

    /// Nominal roll length
    #[arg(long, default_value_t = DEFAULT_FABRIC_LENGTH)]
    length: f64,

    /// Clearance between cuts
    #[arg(long, default_value_t = DEFAULT_GAP)]
    gap: f64,

    /// Material to lay out: pvc, leather, fleece, unknown or all
    #[arg(long, default_value = "pvc", value_parser = parse_material_filter)]
    material: MaterialFilter,

    /// Print the layout as JSON
    #[arg(long)]
    json: bool,

    /// Show ASCII layout of each roll
    #[arg(long)]
    layout: bool,

    /// Log each width ordering tried
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy)]
struct MaterialFilter(Option<Material>);

fn parse_material_filter(s: &str) -> Result<MaterialFilter, String> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(MaterialFilter(None));
    }
    s.parse().map(|m| MaterialFilter(Some(m)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let config = LayoutConfig {
        fabric_widths: cli.widths.clone(),
        fabric_length: cli.length,
        gap: cli.gap,
    };
    config.validate()?;

    let filter = cli.material.0;
    let mut orders: Vec<Order> = match &cli.orders_file {
        Some(path) => ingest::read_orders(path, cli.column.as_deref(), filter)
            .with_context(|| format!("failed to read orders from {}", path.display()))?,
        None => Vec::new(),
    };
    orders.extend(ingest::parse_orders(cli.orders.iter().map(String::as_str), filter));

    if orders.is_empty() {
        bail!("no orders with a recognizable size; pass --order or --orders-file");
    }

    let result = config.find_best_layout(&orders);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    for (material, rolls) in &result.materials {
        for roll in rolls {
            println!(
                "{} roll {} ({} wide): {:.1}% used, waste {:.1}",
                material,
                roll.fabric_index,
                roll.fabric_width,
                roll.usage_rate * 100.0,
                roll.waste_area,
            );
            for p in &roll.placed_orders {
                println!("  {}x{} @ ({}, {})  {}", p.order.width, p.order.length, p.x, p.y, p.order.remark);
            }
            if cli.layout {
                let consumed = roll.total_area / roll.fabric_width;
                print!("{}", render::render_roll(roll.fabric_width, consumed, &roll.placed_orders));
            }
            println!();
        }
    }

    let summary = &result.summary;
    println!(
        "Summary: {} of {} orders placed on {} roll{}, {:.1}% used, waste {:.1}",
        result.placed_count(),
        orders.len(),
        result.roll_count(),
        if result.roll_count() == 1 { "" } else { "s" },
        summary.overall_rate * 100.0,
        summary.total_waste_area,
    );

    Ok(())
}
