use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Stock material an order is cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Material {
    #[serde(rename = "PVC")]
    Pvc,
    #[serde(rename = "leather")]
    Leather,
    #[serde(rename = "fleece")]
    Fleece,
    #[serde(rename = "unknown")]
    Unknown,
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Material::Pvc => "PVC",
            Material::Leather => "leather",
            Material::Fleece => "fleece",
            Material::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Material {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pvc" => Ok(Material::Pvc),
            "leather" => Ok(Material::Leather),
            "fleece" => Ok(Material::Fleece),
            "unknown" => Ok(Material::Unknown),
            _ => Err(format!(
                "invalid material '{}', expected: pvc, leather, fleece, or unknown",
                s
            )),
        }
    }
}

/// A single cut order. The packer assumes `0 < width <= length`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub material: Material,
    #[serde(default)]
    pub remark: String,
    pub width: f64,
    pub length: f64,
}

impl Order {
    pub fn new(material: Material, remark: impl Into<String>, width: f64, length: f64) -> Self {
        Self {
            material,
            remark: remark.into(),
            width,
            length,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.length
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether a `w` x `h` extent fits inside this rectangle.
    pub fn fits(&self, w: f64, h: f64) -> bool {
        w <= self.width && h <= self.height
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} @ ({}, {})", self.width, self.height, self.x, self.y)
    }
}

/// An order fixed on a roll. `fabric_index` is 1-based within its group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    #[serde(flatten)]
    pub order: Order,
    pub fabric_index: usize,
    pub x: f64,
    pub y: f64,
}

impl PlacedOrder {
    pub fn footprint(&self) -> Rect {
        Rect::new(self.x, self.y, self.order.width, self.order.length)
    }
}

/// Per-roll utilization. `total_area` covers only the consumed length of the roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricStats {
    pub fabric_index: usize,
    pub material: Material,
    pub fabric_width: f64,
    pub used_area: f64,
    pub total_area: f64,
    pub waste_area: f64,
    pub usage_rate: f64,
    pub placed_orders: Vec<PlacedOrder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_used_area: f64,
    pub total_area: f64,
    pub total_waste_area: f64,
    pub overall_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub materials: BTreeMap<Material, Vec<FabricStats>>,
    pub summary: GlobalStats,
}

impl LayoutResult {
    pub fn roll_count(&self) -> usize {
        self.materials.values().map(Vec::len).sum()
    }

    pub fn placed_count(&self) -> usize {
        self.rolls().map(|s| s.placed_orders.len()).sum()
    }

    pub fn rolls(&self) -> impl Iterator<Item = &FabricStats> {
        self.materials.values().flatten()
    }
}

/// `used / total`, or 0 when nothing was consumed.
pub fn usage_rate(used: f64, total: f64) -> f64 {
    if total > 0.0 { used / total } else { 0.0 }
}
