use tracing::debug;

use crate::types::{Material, Order};

/// Identifies a group: orders of one material cut from one stock width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupKey {
    pub material: Material,
    pub width: f64,
}

#[derive(Debug, Clone)]
pub struct Bucket {
    pub key: GroupKey,
    pub orders: Vec<Order>,
}

/// Splits orders into groups for one ordering of the stock widths.
///
/// Each order goes to the first width in `width_order` that can hold it.
/// Orders longer than the roll or wider than every width are left out.
/// Buckets come back in the order they were first seen.
pub fn assign_buckets(orders: &[Order], width_order: &[f64], fabric_length: f64) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();

    for order in orders {
        if order.length > fabric_length {
            debug!(remark = %order.remark, length = order.length, "order longer than roll, dropped");
            continue;
        }
        let Some(&width) = width_order.iter().find(|&&w| order.width <= w) else {
            debug!(remark = %order.remark, width = order.width, "order wider than every stock width, dropped");
            continue;
        };

        let key = GroupKey {
            material: order.material,
            width,
        };
        match buckets.iter_mut().find(|b| b.key == key) {
            Some(bucket) => bucket.orders.push(order.clone()),
            None => buckets.push(Bucket {
                key,
                orders: vec![order.clone()],
            }),
        }
    }

    buckets
}
