use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::search::find_best_layout;
use crate::types::{LayoutResult, Order};

/// Stock widths the shop keeps on hand.
pub const DEFAULT_FABRIC_WIDTHS: [f64; 3] = [140.0, 160.0, 180.0];

/// Nominal length of one roll.
pub const DEFAULT_FABRIC_LENGTH: f64 = 3000.0;

/// Clearance left between neighbouring cuts.
pub const DEFAULT_GAP: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub fabric_widths: Vec<f64>,
    pub fabric_length: f64,
    pub gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            fabric_widths: DEFAULT_FABRIC_WIDTHS.to_vec(),
            fabric_length: DEFAULT_FABRIC_LENGTH,
            gap: DEFAULT_GAP,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(w) = self.fabric_widths.iter().find(|w| !(**w > 0.0 && w.is_finite())) {
            return Err(LayoutError::InvalidConfig(format!(
                "fabric width must be positive, got {w}"
            )));
        }
        if !(self.fabric_length > 0.0 && self.fabric_length.is_finite()) {
            return Err(LayoutError::InvalidConfig(format!(
                "fabric length must be positive, got {}",
                self.fabric_length
            )));
        }
        if !(self.gap >= 0.0 && self.gap.is_finite()) {
            return Err(LayoutError::InvalidConfig(format!(
                "gap must be non-negative, got {}",
                self.gap
            )));
        }
        Ok(())
    }

    pub fn find_best_layout(&self, orders: &[Order]) -> LayoutResult {
        find_best_layout(orders, &self.fabric_widths, self.fabric_length, self.gap)
    }
}
