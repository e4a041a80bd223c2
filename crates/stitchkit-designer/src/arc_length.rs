//! Arc-length parameterization of sampled paths.
//!
//! An [`ArcTable`] stores cumulative distance at every sample. Closed paths
//! get one extra entry repeating the first point, so the last entry's
//! distance is the full perimeter and index 0 and the last index name the
//! same geometric point.

use stitchkit_core::{Point, SampledPoint};

/// One entry of an arc table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcEntry {
    pub x: f64,
    pub y: f64,
    /// Cumulative distance from the start of the table
    pub d: f64,
}

impl ArcEntry {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Cumulative-distance index over a path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArcTable {
    entries: Vec<ArcEntry>,
    closed: bool,
}

/// Closest point on a path together with its distance along the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub point: Point,
    pub distance: f64,
    /// Index of the table entry that starts the segment containing `point`
    pub entry: usize,
}

impl ArcTable {
    pub fn build(points: &[Point], closed: bool) -> Self {
        let mut entries = Vec::with_capacity(points.len() + usize::from(closed));
        let mut d = 0.0;
        let mut prev: Option<Point> = None;

        let wrap = if closed && points.len() > 1 {
            points.first().copied()
        } else {
            None
        };
        for p in points.iter().copied().chain(wrap) {
            if let Some(q) = prev {
                d += q.distance_to(&p);
            }
            entries.push(ArcEntry { x: p.x, y: p.y, d });
            prev = Some(p);
        }

        Self { entries, closed }
    }

    pub fn from_samples(samples: &[SampledPoint], closed: bool) -> Self {
        let points: Vec<Point> = samples.iter().map(SampledPoint::point).collect();
        Self::build(&points, closed)
    }

    pub fn entries(&self) -> &[ArcEntry] {
        &self.entries
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total length, or perimeter for closed tables.
    pub fn total(&self) -> f64 {
        self.entries.last().map_or(0.0, |e| e.d)
    }

    /// Whether queries can produce meaningful answers.
    pub fn is_usable(&self) -> bool {
        self.entries.len() >= 2 && self.total() > 0.0
    }

    /// Index of the entry that starts the segment containing distance `d`.
    ///
    /// `d` is clamped into `[0, total]`. `None` for unusable tables.
    pub fn index_at_distance(&self, d: f64) -> Option<usize> {
        if !self.is_usable() {
            return None;
        }
        let d = d.clamp(0.0, self.total());
        // First entry strictly past d, minus one, kept inside the last segment.
        let upper = self.entries.partition_point(|e| e.d <= d);
        Some(upper.saturating_sub(1).min(self.entries.len() - 2))
    }

    /// Position at distance `d` along the path, clamped into `[0, total]`.
    pub fn point_at_distance(&self, d: f64) -> Option<Point> {
        let i = self.index_at_distance(d)?;
        let d = d.clamp(0.0, self.total());
        let a = self.entries[i];
        let b = self.entries[i + 1];
        let span = b.d - a.d;
        if span <= 0.0 {
            return Some(a.point());
        }
        Some(a.point().lerp(&b.point(), (d - a.d) / span))
    }

    pub fn point_at_fraction(&self, fraction: f64) -> Option<Point> {
        self.point_at_distance(fraction * self.total())
    }

    /// Closest point on the path to `target`.
    ///
    /// Every segment is tested and the target is projected onto the nearest
    /// one, so the reported distance varies continuously as the target moves
    /// along the path. Ties keep the earliest segment.
    pub fn project(&self, target: Point) -> Option<Projection> {
        if !self.is_usable() {
            return None;
        }

        let mut best: Option<(f64, Projection)> = None;
        for (i, pair) in self.entries.windows(2).enumerate() {
            let a = pair[0].point();
            let b = pair[1].point();
            let ab = b - a;
            let len_sq = ab.dot(&ab);
            let t = if len_sq > 0.0 {
                ((target - a).dot(&ab) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let point = a.lerp(&b, t);
            let dist_sq = point.distance_squared_to(&target);
            if best.as_ref().is_none_or(|(d, _)| dist_sq < *d) {
                best = Some((
                    dist_sq,
                    Projection {
                        point,
                        distance: pair[0].d + (pair[1].d - pair[0].d) * t,
                        entry: i,
                    },
                ));
            }
        }
        best.map(|(_, p)| p)
    }

    /// Fraction of the total length at which the path passes closest to
    /// `target`.
    pub fn project_to_fraction(&self, target: Point) -> Option<f64> {
        let projection = self.project(target)?;
        Some(projection.distance / self.total())
    }

    /// Portion of the path between two distances, endpoints included.
    pub fn slice(&self, start: f64, end: f64) -> Vec<Point> {
        if end < start {
            return Vec::new();
        }
        let (Some(i), Some(j)) = (self.index_at_distance(start), self.index_at_distance(end)) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(j.saturating_sub(i) + 2);
        out.extend(self.point_at_distance(start));
        out.extend(
            self.entries[(i + 1)..=j]
                .iter()
                .filter(|e| e.d > start && e.d < end)
                .map(ArcEntry::point),
        );
        out.extend(self.point_at_distance(end));
        out
    }
}
