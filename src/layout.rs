use std::collections::BTreeMap;

use crate::bucket::{GroupKey, assign_buckets};
use crate::guillotine::RollBin;
use crate::packer::pack_group;
use crate::types::{FabricStats, GlobalStats, LayoutResult, Order, usage_rate};

/// Arranges all orders for one fixed ordering of the stock widths.
pub fn arrange(orders: &[Order], width_order: &[f64], fabric_length: f64, gap: f64) -> LayoutResult {
    let mut materials: BTreeMap<_, Vec<FabricStats>> = BTreeMap::new();
    let mut total_used = 0.0;
    let mut total_area = 0.0;

    for bucket in assign_buckets(orders, width_order, fabric_length) {
        for bin in pack_group(&bucket.orders, bucket.key.width, fabric_length, gap) {
            let stats = fabric_stats(bucket.key, bin);
            total_used += stats.used_area;
            total_area += stats.total_area;
            materials.entry(bucket.key.material).or_default().push(stats);
        }
    }

    LayoutResult {
        materials,
        summary: GlobalStats {
            total_used_area: total_used,
            total_area,
            total_waste_area: total_area - total_used,
            overall_rate: usage_rate(total_used, total_area),
        },
    }
}

fn fabric_stats(key: GroupKey, bin: RollBin) -> FabricStats {
    let used = bin.used_area();
    let total = bin.width() * bin.consumed_length();
    FabricStats {
        fabric_index: bin.fabric_index(),
        material: key.material,
        fabric_width: key.width,
        used_area: used,
        total_area: total,
        waste_area: total - used,
        usage_rate: usage_rate(used, total),
        placed_orders: bin.into_placed(),
    }
}
