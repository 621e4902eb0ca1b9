//! SVG layout for the dashboard charts. Pure functions over plain numbers.

use std::f64::consts::{PI, TAU};

pub const PALETTE: [&str; 8] = [
    "#ff7a45", "#36cfc9", "#9254de", "#ffc53d", "#4096ff", "#73d13d", "#f759ab", "#8c8c8c",
];

pub fn color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub index: usize,
    pub path: String,
    pub fraction: f64,
}

/// Slices of a pie centred at (`cx`, `cy`). Zero counts produce no slice.
pub fn pie_slices(values: &[u64], cx: f64, cy: f64, radius: f64) -> Vec<Slice> {
    let total: u64 = values.iter().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut start = -PI / 2.0;
    let mut slices = Vec::new();
    for (index, &value) in values.iter().enumerate() {
        if value == 0 {
            continue;
        }
        let fraction = value as f64 / total as f64;
        let sweep = fraction * TAU;
        let path = if fraction >= 1.0 {
            // A lone full slice cannot be drawn as a single arc.
            format!(
                "M {x0:.2} {y0:.2} A {radius} {radius} 0 1 1 {x1:.2} {y1:.2} A {radius} {radius} 0 1 1 {x0:.2} {y0:.2} Z",
                x0 = cx,
                y0 = cy - radius,
                x1 = cx,
                y1 = cy + radius,
            )
        } else {
            let (x0, y0) = polar(cx, cy, radius, start);
            let (x1, y1) = polar(cx, cy, radius, start + sweep);
            let large = if sweep > PI { 1 } else { 0 };
            format!(
                "M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {radius} {radius} 0 {large} 1 {x1:.2} {y1:.2} Z"
            )
        };
        slices.push(Slice {
            index,
            path,
            fraction,
        });
        start += sweep;
    }
    slices
}

fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Vertical bars filling `width` x `height`, tallest bar reaching the top.
pub fn bars(values: &[u64], width: f64, height: f64, gap: f64) -> Vec<Bar> {
    if values.is_empty() {
        return Vec::new();
    }
    let peak = values.iter().copied().max().unwrap_or(0).max(1) as f64;
    let slot = width / values.len() as f64;
    let bar_width = (slot - gap).max(1.0);

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let bar_height = value as f64 / peak * height;
            Bar {
                x: i as f64 * slot + (slot - bar_width) / 2.0,
                y: height - bar_height,
                width: bar_width,
                height: bar_height,
            }
        })
        .collect()
}

/// Closed numeric range used for a scatter axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// Span of `values`, widened by one unit when degenerate.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut iter = values.into_iter().filter(|v| v.is_finite());
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if min == max {
            Some(Self {
                min: min - 1.0,
                max: max + 1.0,
            })
        } else {
            Some(Self { min, max })
        }
    }

    /// Map `value` onto `0..=length`.
    pub fn scale(&self, value: f64, length: f64) -> f64 {
        (value - self.min) / (self.max - self.min) * length
    }
}

/// Scatter points projected into a `width` x `height` plot, y growing upward.
pub fn scatter(points: &[(f64, f64)], width: f64, height: f64) -> Vec<(f64, f64)> {
    let (Some(xs), Some(ys)) = (
        Extent::of(points.iter().map(|p| p.0)),
        Extent::of(points.iter().map(|p| p.1)),
    ) else {
        return Vec::new();
    };
    points
        .iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|&(x, y)| (xs.scale(x, width), height - ys.scale(y, height)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pie_fractions_cover_the_whole() {
        let slices = pie_slices(&[10, 5, 0, 5], 50.0, 50.0, 40.0);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices.iter().map(|s| s.index).collect::<Vec<_>>(), [0, 1, 3]);
        let sum: f64 = slices.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(slices[0].fraction, 0.5);
    }

    #[test]
    fn pie_of_nothing_is_empty() {
        assert!(pie_slices(&[], 0.0, 0.0, 1.0).is_empty());
        assert!(pie_slices(&[0, 0], 0.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn single_slice_is_full_circle() {
        let slices = pie_slices(&[7], 50.0, 50.0, 40.0);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].path.matches(" A ").count(), 2);
    }

    #[test]
    fn large_slice_sets_arc_flag() {
        let slices = pie_slices(&[3, 1], 0.0, 0.0, 10.0);
        assert!(slices[0].path.contains(" 0 1 1 "));
        assert!(slices[1].path.contains(" 0 0 1 "));
    }

    #[test]
    fn bars_scale_to_peak() {
        let laid = bars(&[30, 15, 0], 300.0, 100.0, 10.0);
        assert_eq!(laid.len(), 3);
        assert_eq!(laid[0].height, 100.0);
        assert_eq!(laid[0].y, 0.0);
        assert_eq!(laid[1].height, 50.0);
        assert_eq!(laid[2].height, 0.0);
        assert_eq!(laid[1].x, 105.0);
        assert_eq!(laid[1].width, 90.0);
    }

    #[test]
    fn all_zero_bars_are_flat() {
        let laid = bars(&[0, 0], 100.0, 50.0, 0.0);
        assert!(laid.iter().all(|b| b.height == 0.0 && b.y == 50.0));
    }

    #[test]
    fn scatter_flips_y_and_fits_box() {
        let projected = scatter(&[(20.0, 50.0), (40.0, 70.0)], 200.0, 100.0);
        assert_eq!(projected, [(0.0, 100.0), (200.0, 0.0)]);
    }

    #[test]
    fn degenerate_extent_is_widened() {
        let extent = Extent::of([30.0, 30.0]).unwrap();
        assert_eq!((extent.min, extent.max), (29.0, 31.0));
        assert!(Extent::of([f64::NAN]).is_none());
    }
}
