use tracing::{debug, warn};

use crate::guillotine::RollBin;
use crate::types::Order;

/// Packs one (material, width) group into as many rolls as it needs.
///
/// Orders go longest first; each one lands in the first roll that accepts it,
/// otherwise a new roll is opened. Placed orders are never moved.
pub fn pack_group(orders: &[Order], fabric_width: f64, fabric_length: f64, gap: f64) -> Vec<RollBin> {
    let mut sorted = orders.to_vec();
    sorted.sort_by(|a, b| b.length.total_cmp(&a.length));

    let mut bins = vec![RollBin::new(fabric_width, fabric_length, gap, 1)];

    for order in sorted {
        if bins.iter_mut().find_map(|bin| bin.insert(order.clone())).is_some() {
            continue;
        }

        let mut bin = RollBin::new(fabric_width, fabric_length, gap, bins.len() + 1);
        if bin.insert(order.clone()).is_none() {
            warn!(
                width = order.width,
                length = order.length,
                fabric_width,
                "order does not fit an empty roll, skipping"
            );
            continue;
        }
        debug!(fabric_width, index = bin.fabric_index(), "opened new roll");
        bins.push(bin);
    }

    bins
}
