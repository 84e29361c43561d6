use crate::types::PlacedOrder;

const MAX_WIDTH: f64 = 80.0;
const MAX_HEIGHT: f64 = 40.0;

/// ASCII preview of the consumed part of a roll. The roll's width runs
/// across the screen and its length runs down.
pub fn render_roll(fabric_width: f64, consumed_length: f64, placed: &[PlacedOrder]) -> String {
    if fabric_width <= 0.0 || consumed_length <= 0.0 {
        return String::new();
    }
    let scale = f64::min(MAX_WIDTH / fabric_width, MAX_HEIGHT / consumed_length);
    let grid_w = (fabric_width * scale).round() as usize;
    let grid_h = (consumed_length * scale).round() as usize;

    if grid_w == 0 || grid_h == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; grid_w + 1]; grid_h + 1];

    draw_rect(&mut grid, 0, 0, grid_w, grid_h);

    for p in placed {
        let sx = (p.x * scale).round() as usize;
        let sy = (p.y * scale).round() as usize;
        let sw = (p.order.width * scale).round() as usize;
        let sh = (p.order.length * scale).round() as usize;

        if sw == 0 || sh == 0 {
            continue;
        }

        draw_rect(&mut grid, sx, sy, sw, sh);

        let label: Vec<char> = format!("{}x{}", p.order.width, p.order.length)
            .chars()
            .collect();
        if sw > 2 {
            let cx = sx + sw / 2;
            let cy = sy + sh / 2;
            let start_x = cx.saturating_sub(label.len() / 2);

            for (i, &ch) in label.iter().enumerate() {
                let x = start_x + i;
                if x > sx && x < sx + sw && cy > sy && cy < sy + sh {
                    grid[cy][x] = ch;
                }
            }
        }
    }

    let mut result = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

fn edge(current: char, line: char) -> char {
    let crossing = if line == '-' { '|' } else { '-' };
    if current == crossing || current == '+' { '+' } else { line }
}

fn draw_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    let rows = grid.len();
    let Some(cols) = grid.first().map(Vec::len) else {
        return;
    };

    for i in (x..=x + w).filter(|&i| i < cols) {
        for j in [y, y + h].into_iter().filter(|&j| j < rows) {
            grid[j][i] = edge(grid[j][i], '-');
        }
    }

    for j in (y..=y + h).filter(|&j| j < rows) {
        for i in [x, x + w].into_iter().filter(|&i| i < cols) {
            grid[j][i] = edge(grid[j][i], '|');
        }
    }

    for cx in [x, x + w] {
        for cy in [y, y + h] {
            if cy < rows && cx < cols {
                grid[cy][cx] = '+';
            }
        }
    }
}
