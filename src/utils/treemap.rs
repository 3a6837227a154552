//! Squarified treemap layout (Bruls, Huizing & van Wijk).

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Rect {
    pub fn area(&self) -> f64 {
        self.dx * self.dy
    }

    fn aspect(&self) -> f64 {
        (self.dx / self.dy).max(self.dy / self.dx)
    }
}

/// Lay out `values` inside a `width` x `height` box.
///
/// Returns the index of each positive value with its rectangle, largest
/// first. Non-positive values are left out.
pub fn treemap(values: &[f64], width: f64, height: f64) -> Vec<(usize, Rect)> {
    let mut order: Vec<usize> = (0..values.len()).filter(|&i| values[i] > 0.0).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let total: f64 = order.iter().map(|&i| values[i]).sum();
    if order.is_empty() || total <= 0.0 || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }

    let scale = width * height / total;
    let sizes: Vec<f64> = order.iter().map(|&i| values[i] * scale).collect();
    let bounds = Rect {
        x: 0.0,
        y: 0.0,
        dx: width,
        dy: height,
    };

    order.into_iter().zip(squarify(&sizes, bounds)).collect()
}

fn squarify(sizes: &[f64], bounds: Rect) -> Vec<Rect> {
    if sizes.is_empty() {
        return Vec::new();
    }
    if sizes.len() == 1 {
        return layout(sizes, bounds);
    }

    let mut split = 1;
    while split < sizes.len() && worst_ratio(&sizes[..split], bounds) >= worst_ratio(&sizes[..=split], bounds) {
        split += 1;
    }

    let (current, remaining) = sizes.split_at(split);
    let mut rects = layout(current, bounds);
    rects.extend(squarify(remaining, leftover(current, bounds)));
    rects
}

fn worst_ratio(sizes: &[f64], bounds: Rect) -> f64 {
    layout(sizes, bounds)
        .iter()
        .map(Rect::aspect)
        .fold(0.0, f64::max)
}

/// Place `sizes` along the shorter side of `bounds`.
fn layout(sizes: &[f64], bounds: Rect) -> Vec<Rect> {
    let covered: f64 = sizes.iter().sum();
    let mut rects = Vec::with_capacity(sizes.len());

    if bounds.dx >= bounds.dy {
        let width = covered / bounds.dy;
        let mut y = bounds.y;
        for size in sizes {
            let dy = size / width;
            rects.push(Rect {
                x: bounds.x,
                y,
                dx: width,
                dy,
            });
            y += dy;
        }
    } else {
        let height = covered / bounds.dx;
        let mut x = bounds.x;
        for size in sizes {
            let dx = size / height;
            rects.push(Rect {
                x,
                y: bounds.y,
                dx,
                dy: height,
            });
            x += dx;
        }
    }
    rects
}

fn leftover(sizes: &[f64], bounds: Rect) -> Rect {
    let covered: f64 = sizes.iter().sum();
    if bounds.dx >= bounds.dy {
        let width = covered / bounds.dy;
        Rect {
            x: bounds.x + width,
            y: bounds.y,
            dx: bounds.dx - width,
            dy: bounds.dy,
        }
    } else {
        let height = covered / bounds.dx;
        Rect {
            x: bounds.x,
            y: bounds.y + height,
            dx: bounds.dx,
            dy: bounds.dy - height,
        }
    }
}
