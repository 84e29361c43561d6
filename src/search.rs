use tracing::{debug, info};

use crate::layout::arrange;
use crate::types::{LayoutResult, Order};

/// All orderings of `widths`, each as its own vector.
///
/// Generated by swapping on a scratch copy; every swap is undone before the
/// next branch so the sequence is deterministic. An empty catalog yields a
/// single empty ordering.
pub fn permutations(widths: &[f64]) -> Vec<Vec<f64>> {
    fn helper(scratch: &mut [f64], n: usize, out: &mut Vec<Vec<f64>>) {
        if n <= 1 {
            out.push(scratch.to_vec());
            return;
        }
        for i in 0..n {
            scratch.swap(i, n - 1);
            helper(scratch, n - 1, out);
            scratch.swap(i, n - 1);
        }
    }

    let mut scratch = widths.to_vec();
    let mut out = Vec::new();
    helper(&mut scratch, widths.len(), &mut out);
    out
}

struct Best {
    width_order: Vec<f64>,
    result: LayoutResult,
}

/// Tries every ordering of the stock widths and keeps the layout with the
/// least total waste. Ties keep the ordering found first.
pub fn find_best_layout(orders: &[Order], widths: &[f64], fabric_length: f64, gap: f64) -> LayoutResult {
    let best = permutations(widths)
        .into_iter()
        .map(|width_order| {
            let result = arrange(orders, &width_order, fabric_length, gap);
            debug!(
                ?width_order,
                waste = result.summary.total_waste_area,
                rolls = result.roll_count(),
                "arranged width ordering"
            );
            Best {
                width_order,
                result,
            }
        })
        .fold(None::<Best>, |best, candidate| match best {
            Some(best)
                if best.result.summary.total_waste_area
                    <= candidate.result.summary.total_waste_area =>
            {
                Some(best)
            }
            _ => Some(candidate),
        });

    match best {
        Some(best) => {
            info!(
                width_order = ?best.width_order,
                waste = best.result.summary.total_waste_area,
                rate = best.result.summary.overall_rate,
                "selected width ordering"
            );
            best.result
        }
        None => LayoutResult::default(),
    }
}
