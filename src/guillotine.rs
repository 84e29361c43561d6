use crate::types::{Order, PlacedOrder, Rect};

/// One roll of stock: a free-space list and the orders already cut from it.
#[derive(Debug, Clone)]
pub struct RollBin {
    width: f64,
    length: f64,
    gap: f64,
    fabric_index: usize,
    free_rects: Vec<Rect>,
    placed: Vec<PlacedOrder>,
}

impl RollBin {
    pub fn new(width: f64, length: f64, gap: f64, fabric_index: usize) -> Self {
        Self {
            width,
            length,
            gap,
            fabric_index,
            free_rects: vec![Rect::new(0.0, 0.0, width, length)],
            placed: Vec::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn fabric_index(&self) -> usize {
        self.fabric_index
    }

    pub fn free_rects(&self) -> &[Rect] {
        &self.free_rects
    }

    pub fn placed(&self) -> &[PlacedOrder] {
        &self.placed
    }

    pub fn into_placed(self) -> Vec<PlacedOrder> {
        self.placed
    }

    pub fn used_area(&self) -> f64 {
        self.placed.iter().map(|p| p.order.area()).sum()
    }

    /// Furthest point along the roll reached by any placed order.
    pub fn consumed_length(&self) -> f64 {
        self.placed
            .iter()
            .map(|p| p.y + p.order.length)
            .fold(0.0, f64::max)
    }

    /// Best-area-fit over the free list. Ties keep the earliest free rect.
    pub fn find_best(&self, order: &Order) -> Option<usize> {
        let need_w = order.width + self.gap;
        let need_h = order.length + self.gap;
        let mut best: Option<(usize, f64)> = None;

        for (idx, free) in self.free_rects.iter().enumerate() {
            if !free.fits(need_w, need_h) {
                continue;
            }
            let score = free.area() - order.area();
            if best.is_none_or(|(_, s)| score < s) {
                best = Some((idx, score));
            }
        }

        best.map(|(idx, _)| idx)
    }

    /// Places `order` into the best free rect. `None` leaves the bin untouched.
    pub fn insert(&mut self, order: Order) -> Option<PlacedOrder> {
        let free_idx = self.find_best(&order)?;

        // Order-preserving removal keeps later tie-breaks in discovery order.
        let free = self.free_rects.remove(free_idx);
        self.split(free, &order);

        let placed = PlacedOrder {
            order,
            fabric_index: self.fabric_index,
            x: free.x,
            y: free.y,
        };
        self.placed.push(placed.clone());
        Some(placed)
    }

    fn split(&mut self, free: Rect, order: &Order) {
        let right = Rect::new(
            free.x + order.width + self.gap,
            free.y,
            free.width - order.width - self.gap,
            order.length,
        );
        let bottom = Rect::new(
            free.x,
            free.y + order.length + self.gap,
            free.width,
            free.height - order.length - self.gap,
        );

        for remainder in [right, bottom] {
            if remainder.width > 0.0 && remainder.height > 0.0 {
                self.free_rects.push(remainder);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Material;

    fn order(width: f64, length: f64) -> Order {
        Order::new(Material::Pvc, "", width, length)
    }

    #[test]
    fn test_place_single_order() {
        let mut bin = RollBin::new(100.0, 1000.0, 0.0, 1);
        let p = bin.insert(order(50.0, 200.0)).unwrap();
        assert_eq!((p.x, p.y), (0.0, 0.0));
        assert_eq!(p.fabric_index, 1);
        assert_eq!(bin.placed().len(), 1);
        assert_eq!(
            bin.free_rects(),
            &[
                Rect::new(50.0, 0.0, 50.0, 200.0),
                Rect::new(0.0, 200.0, 100.0, 800.0),
            ]
        );
    }

    #[test]
    fn test_order_too_large_leaves_bin_untouched() {
        let mut bin = RollBin::new(100.0, 1000.0, 0.0, 1);
        assert!(bin.insert(order(120.0, 200.0)).is_none());
        assert!(bin.insert(order(50.0, 1200.0)).is_none());
        assert!(bin.placed().is_empty());
        assert_eq!(bin.free_rects(), &[Rect::new(0.0, 0.0, 100.0, 1000.0)]);
    }

    #[test]
    fn test_gap_is_required_on_both_axes() {
        let mut bin = RollBin::new(100.0, 1000.0, 5.0, 1);
        // 100 + 5 > 100
        assert!(bin.insert(order(100.0, 200.0)).is_none());
        bin.insert(order(50.0, 200.0)).unwrap();
        let right = bin.free_rects()[0];
        assert_eq!(right, Rect::new(55.0, 0.0, 45.0, 200.0));
        let bottom = bin.free_rects()[1];
        assert_eq!(bottom, Rect::new(0.0, 205.0, 100.0, 795.0));
    }

    #[test]
    fn test_exact_fill_drops_empty_remainders() {
        let mut bin = RollBin::new(100.0, 1000.0, 0.0, 1);
        bin.insert(order(100.0, 1000.0)).unwrap();
        assert!(bin.free_rects().is_empty());
        assert!(bin.insert(order(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_best_area_fit_prefers_tighter_rect() {
        let mut bin = RollBin::new(100.0, 1000.0, 0.0, 1);
        bin.insert(order(60.0, 300.0)).unwrap();
        // Free: right 40x300 (area 12000), bottom 100x700 (area 70000).
        let p = bin.insert(order(40.0, 100.0)).unwrap();
        assert_eq!((p.x, p.y), (60.0, 0.0));
    }

    #[test]
    fn test_equal_score_keeps_earliest_free_rect() {
        let mut bin = RollBin::new(100.0, 300.0, 0.0, 1);
        bin.insert(order(50.0, 200.0)).unwrap();
        // Right 50x200 and bottom 100x100 both have area 10000.
        assert_eq!(
            bin.free_rects(),
            &[
                Rect::new(50.0, 0.0, 50.0, 200.0),
                Rect::new(0.0, 200.0, 100.0, 100.0),
            ]
        );
        assert_eq!(bin.find_best(&order(50.0, 100.0)), Some(0));
        let p = bin.insert(order(50.0, 100.0)).unwrap();
        assert_eq!((p.x, p.y), (50.0, 0.0));
    }

    #[test]
    fn test_second_equal_order_goes_below_first() {
        let mut bin = RollBin::new(100.0, 1000.0, 0.0, 1);
        bin.insert(order(60.0, 300.0)).unwrap();
        let p = bin.insert(order(60.0, 300.0)).unwrap();
        assert_eq!((p.x, p.y), (0.0, 300.0));
        assert!((bin.consumed_length() - 600.0).abs() < 1e-9);
        assert!((bin.used_area() - 36000.0).abs() < 1e-9);
    }

    #[test]
    fn test_placements_never_overlap() {
        let mut bin = RollBin::new(140.0, 3000.0, 0.4, 1);
        let sizes = [
            (35.0, 120.0),
            (70.0, 70.0),
            (40.0, 900.0),
            (60.0, 120.5),
            (20.0, 30.0),
            (100.0, 250.0),
            (33.3, 44.4),
        ];
        for _ in 0..4 {
            for &(w, l) in &sizes {
                bin.insert(order(w, l));
            }
        }
        let placed = bin.placed();
        assert!(!placed.is_empty());
        for (i, a) in placed.iter().enumerate() {
            let fa = a.footprint();
            assert!(fa.x >= 0.0 && fa.x + fa.width <= 140.0);
            assert!(fa.y >= 0.0 && fa.y + fa.height <= 3000.0);
            for b in &placed[i + 1..] {
                assert!(!fa.overlaps(&b.footprint()), "{fa} overlaps {}", b.footprint());
            }
        }
    }

    #[test]
    fn test_consumed_length_of_empty_bin() {
        let bin = RollBin::new(100.0, 1000.0, 0.0, 3);
        assert_eq!(bin.consumed_length(), 0.0);
        assert_eq!(bin.used_area(), 0.0);
        assert_eq!(bin.fabric_index(), 3);
    }
}
