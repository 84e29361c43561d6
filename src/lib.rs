//! Lays out rectangular cut orders on rolls of fixed-width fabric.
//!
//! Orders are bucketed by material and stock width, packed roll by roll with
//! a guillotine best-area-fit heuristic, and every ordering of the stock
//! widths is tried to find the layout that wastes the least material.

pub mod bucket;
pub mod config;
pub mod error;
pub mod guillotine;
pub mod ingest;
pub mod layout;
pub mod packer;
pub mod render;
pub mod search;
pub mod types;

pub use config::LayoutConfig;
pub use error::{LayoutError, Result};
pub use search::find_best_layout;
pub use types::{FabricStats, GlobalStats, LayoutResult, Material, Order, PlacedOrder};
