//! Data-dependent 2D binning for position density.
//!
//! Each axis is split into equal-width, right-closed bins `(lo, hi]` spanning
//! the sample's own min..max. The lowest edge is pushed down by 0.1% of the
//! range so the minimum falls in the first bin. A zero-width range is widened
//! by 0.1% of |value| on both sides (0.001 when the value is 0).

use serde::{Deserialize, Serialize};

/// Bins per axis.
pub const HEATMAP_BINS: usize = 10;

const EDGE_ADJUST: f64 = 0.001;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinEdges {
    edges: Vec<f64>,
}

impl BinEdges {
    /// `bins + 1` edges over [min, max].
    pub fn from_range(min: f64, max: f64, bins: usize) -> Self {
        let bins = bins.max(1);
        let (lo, hi, widen_first) = if min == max {
            let adj = if min != 0.0 { EDGE_ADJUST * min.abs() } else { EDGE_ADJUST };
            (min - adj, max + adj, false)
        } else {
            (min, max, true)
        };

        let step = (hi - lo) / bins as f64;
        let mut edges: Vec<f64> = (0..=bins).map(|i| lo + step * i as f64).collect();
        edges[bins] = hi;
        if widen_first {
            edges[0] -= (max - min) * EDGE_ADJUST;
        }
        Self { edges }
    }

    pub fn bins(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Bin holding `v`, or `None` outside (first edge, last edge].
    pub fn bin_of(&self, v: f64) -> Option<usize> {
        let i = self.edges.partition_point(|e| *e < v);
        if i == 0 || i == self.edges.len() {
            None
        } else {
            Some(i - 1)
        }
    }

    /// Like [`bin_of`](Self::bin_of) for values known to lie in the sample
    /// range: rounding at the outer edges folds into the first/last bin.
    fn bin_of_sample(&self, v: f64) -> usize {
        let i = self.edges.partition_point(|e| *e < v);
        i.clamp(1, self.edges.len() - 1) - 1
    }
}

/// Counts per (x-bin, y-bin) cell. Every cell exists; empty cells read 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    x_edges: BinEdges,
    y_edges: BinEdges,
    /// Row-major by x-bin: `counts[x_bin * y_bins + y_bin]`.
    counts: Vec<u32>,
}

impl HeatmapGrid {
    /// Bin `points` into `bins` x `bins` cells. `None` when there are no
    /// finite points.
    pub fn from_points<I>(points: I, bins: usize) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let points: Vec<(f64, f64)> =
            points.into_iter().filter(|(x, y)| x.is_finite() && y.is_finite()).collect();
        if points.is_empty() {
            return None;
        }

        let (min_x, max_x) = min_max(points.iter().map(|p| p.0));
        let (min_y, max_y) = min_max(points.iter().map(|p| p.1));
        let x_edges = BinEdges::from_range(min_x, max_x, bins);
        let y_edges = BinEdges::from_range(min_y, max_y, bins);

        let mut grid = Self {
            counts: vec![0; x_edges.bins() * y_edges.bins()],
            x_edges,
            y_edges,
        };
        for (x, y) in points {
            let i = grid.idx(grid.x_edges.bin_of_sample(x), grid.y_edges.bin_of_sample(y));
            grid.counts[i] += 1;
        }
        Some(grid)
    }

    #[inline]
    fn idx(&self, x_bin: usize, y_bin: usize) -> usize {
        x_bin * self.y_edges.bins() + y_bin
    }

    /// Count in cell (x_bin, y_bin); 0 for empty or out-of-range cells.
    pub fn get(&self, x_bin: usize, y_bin: usize) -> u32 {
        if x_bin >= self.x_edges.bins() || y_bin >= self.y_edges.bins() {
            return 0;
        }
        self.counts[self.idx(x_bin, y_bin)]
    }

    pub fn x_edges(&self) -> &BinEdges {
        &self.x_edges
    }

    pub fn y_edges(&self) -> &BinEdges {
        &self.y_edges
    }

    /// (x bins, y bins)
    pub fn shape(&self) -> (usize, usize) {
        (self.x_edges.bins(), self.y_edges.bins())
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| *c as u64).sum()
    }

    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Non-empty cells as ((x_bin, y_bin), count).
    pub fn occupied_cells(&self) -> impl Iterator<Item = ((usize, usize), u32)> + '_ {
        let y_bins = self.y_edges.bins();
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(move |(i, c)| ((i / y_bins, i % y_bins), *c))
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}
