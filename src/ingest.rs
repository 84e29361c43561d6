//! Turns free-text seller remarks into orders.
//!
//! A remark names the material somewhere in its text and carries one size
//! such as `35*120`, `35-124.5`, `35×120` or `34 x 120cm`. Remarks come either
//! one per line or from a named column of a sheet exported as CSV.

use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{LayoutError, Result};
use crate::types::{Material, Order};

/// Header of the remark column in exported order sheets.
pub const DEFAULT_REMARK_COLUMN: &str = "卖家备注";

// ASCII digits only: full-width digits would match `\d` but not parse.
static SIZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*[×xX*-]\s*([0-9]+(?:\.[0-9]+)?)")
        .expect("size pattern is valid")
});

pub fn classify_material(remark: &str) -> Material {
    if remark.to_lowercase().contains("pvc") {
        Material::Pvc
    } else if remark.contains('皮') {
        Material::Leather
    } else if remark.contains('绒') {
        Material::Fleece
    } else {
        Material::Unknown
    }
}

/// First `W×L` pair in the text, as written (not normalized).
pub fn extract_size(remark: &str) -> Option<(f64, f64)> {
    let caps = SIZE_PATTERN.captures(remark)?;
    let width = caps[1].parse().ok()?;
    let length = caps[2].parse().ok()?;
    Some((width, length))
}

/// Builds an order from one remark, turning it so that `width <= length`.
pub fn parse_order(remark: &str) -> Result<Order> {
    let (width, length) = extract_size(remark).ok_or_else(|| LayoutError::InvalidSize {
        text: remark.to_string(),
    })?;
    normalized_order(classify_material(remark), remark, width, length)
}

/// Checks dimensions and puts the shorter side first.
pub fn normalized_order(material: Material, remark: &str, width: f64, length: f64) -> Result<Order> {
    if !(width > 0.0 && length > 0.0 && width.is_finite() && length.is_finite()) {
        return Err(LayoutError::NonPositiveDimension { width, length });
    }
    let (width, length) = if width > length {
        (length, width)
    } else {
        (width, length)
    };
    Ok(Order::new(material, remark, width, length))
}

/// Parses remarks line by line, keeping only `filter` material when given.
/// Blank lines and lines without a usable size are skipped.
pub fn parse_orders<'a, I>(lines: I, filter: Option<Material>) -> Vec<Order>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match parse_order(line) {
            Ok(order) => Some(order),
            Err(e) => {
                debug!(line, error = %e, "skipping remark");
                None
            }
        })
        .filter(|order| filter.is_none_or(|m| order.material == m))
        .collect()
}

/// Pulls the cells of the column headed `column` out of CSV data.
/// Rows too short to reach the column are skipped.
pub fn remarks_from_csv<R: Read>(reader: R, column: &str) -> Result<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let idx = rdr
        .headers()?
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
        .ok_or_else(|| LayoutError::MissingColumn {
            column: column.to_string(),
        })?;

    let mut remarks = Vec::new();
    for record in rdr.records() {
        if let Some(cell) = record?.get(idx) {
            remarks.push(cell.to_string());
        }
    }
    Ok(remarks)
}

/// Reads orders from a file. With `column`, the file is a CSV export and
/// only that column is read; otherwise each line is one remark.
pub fn read_orders(path: &Path, column: Option<&str>, filter: Option<Material>) -> Result<Vec<Order>> {
    match column {
        Some(column) => {
            let file = std::fs::File::open(path)?;
            let remarks = remarks_from_csv(file, column)?;
            Ok(parse_orders(remarks.iter().map(String::as_str), filter))
        }
        None => {
            let text = std::fs::read_to_string(path)?;
            Ok(parse_orders(text.lines(), filter))
        }
    }
}
