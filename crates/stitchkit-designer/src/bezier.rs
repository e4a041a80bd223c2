//! Bezier outline sampling.
//!
//! Turns an ordered node list into a dense point sequence. Each consecutive
//! node pair `(c, next)` is one cubic segment with control points
//! `c`, `c + h2`, `next + h1`, `next`, evaluated at `k / steps` for
//! `k in 0..steps`. Every sample remembers the segment that produced it so
//! distances along the sampled path can be mapped back to editable segments.

use serde::{Deserialize, Serialize};
use stitchkit_core::{DocumentError, Node, Point, SampledPoint};

/// Samples evaluated per bezier segment.
pub const SAMPLES_PER_SEGMENT: usize = 20;

/// Target spacing (mm) of the synthetic fold stub samples.
pub const FOLD_STUB_SPACING: f64 = 5.0;

const STUB_EPS: f64 = 1e-9;

/// How a node list is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlineMode {
    /// Right half of a symmetric outline. The path is open and is joined to
    /// the fold axis (`x = 0`) by straight stubs at both ends.
    #[default]
    HalfOpen,
    /// The nodes describe the whole perimeter; the last segment wraps back
    /// to the first node.
    Closed,
}

impl OutlineMode {
    /// Fewest nodes that still describe an outline in this mode.
    pub fn min_nodes(&self) -> usize {
        match self {
            OutlineMode::HalfOpen => 2,
            OutlineMode::Closed => 3,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, OutlineMode::Closed)
    }
}

/// Sampling density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingOptions {
    pub steps: usize,
    pub stub_spacing: f64,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            steps: SAMPLES_PER_SEGMENT,
            stub_spacing: FOLD_STUB_SPACING,
        }
    }
}

/// Evaluates a cubic bezier at `t`.
pub fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// The four control points of the segment running from `c` to `next`.
pub fn segment_controls(c: &Node, next: &Node) -> [Point; 4] {
    [c.anchor(), c.out_control(), next.in_control(), next.anchor()]
}

/// Number of bezier segments a node list forms in the given mode.
pub fn segment_count(node_count: usize, mode: OutlineMode) -> usize {
    match mode {
        OutlineMode::HalfOpen => node_count.saturating_sub(1),
        OutlineMode::Closed => node_count,
    }
}

/// Samples a node list into an ordered point sequence.
///
/// In [`OutlineMode::HalfOpen`] two straight stub runs are added: one from
/// the fold axis to the first node, one from the last node back to the
/// axis. Stub points carry no segment index. Degenerate segments simply
/// produce duplicate points.
pub fn sample_outline(
    nodes: &[Node],
    mode: OutlineMode,
    options: &SamplingOptions,
) -> Vec<SampledPoint> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let steps = options.steps.max(1);
    let segments = segment_count(nodes.len(), mode);
    let mut samples = Vec::with_capacity(segments * steps + 2);

    if mode == OutlineMode::HalfOpen {
        let first = nodes[0].anchor();
        let foot = Point::new(0.0, first.y);
        push_stub(&mut samples, foot, first, options.stub_spacing, false);
    }

    for i in 0..segments {
        let c = &nodes[i];
        let next = &nodes[(i + 1) % nodes.len()];
        let [p0, p1, p2, p3] = segment_controls(c, next);
        for k in 0..steps {
            let t = k as f64 / steps as f64;
            samples.push(SampledPoint::on_segment(cubic_point(p0, p1, p2, p3, t), i));
        }
    }

    if mode == OutlineMode::HalfOpen {
        // The segment loop stops short of the final anchor.
        let last = nodes[nodes.len() - 1].anchor();
        let last_seg = segments.checked_sub(1);
        samples.push(SampledPoint::new(last.x, last.y, last_seg));
        let foot = Point::new(0.0, last.y);
        push_stub(&mut samples, last, foot, options.stub_spacing, true);
    }

    samples
}

/// Samples a closed node loop (extension shapes, custom holes) into plain
/// points.
pub fn sample_closed(nodes: &[Node], options: &SamplingOptions) -> Vec<Point> {
    sample_outline(nodes, OutlineMode::Closed, options)
        .iter()
        .map(SampledPoint::point)
        .collect()
}

/// Appends evenly spaced synthetic points from `from` towards `to`.
///
/// With `skip_start` the run covers `(from, to]`, otherwise `[from, to)`,
/// so a stub never duplicates the anchor it attaches to.
fn push_stub(out: &mut Vec<SampledPoint>, from: Point, to: Point, spacing: f64, skip_start: bool) {
    let len = from.distance_to(&to);
    if len <= STUB_EPS {
        return;
    }
    let spacing = if spacing > 0.0 { spacing } else { FOLD_STUB_SPACING };
    let runs = ((len / spacing).ceil() as usize).max(1);
    let (first, last) = if skip_start { (1, runs) } else { (0, runs - 1) };
    for j in first..=last {
        let t = j as f64 / runs as f64;
        out.push(SampledPoint::synthetic(from.lerp(&to, t)));
    }
}

/// Splits the cubic defined by `controls` at `t` (de Casteljau).
pub fn split_cubic(controls: [Point; 4], t: f64) -> ([Point; 4], [Point; 4]) {
    let [p0, p1, p2, p3] = controls;
    let p01 = p0.lerp(&p1, t);
    let p12 = p1.lerp(&p2, t);
    let p23 = p2.lerp(&p3, t);
    let p012 = p01.lerp(&p12, t);
    let p123 = p12.lerp(&p23, t);
    let mid = p012.lerp(&p123, t);
    ([p0, p01, p012, mid], [mid, p123, p23, p3])
}

/// Inserts a node on `segment` at parameter `t` without changing the curve.
///
/// Returns the index of the new node.
pub fn insert_node_on_segment(
    nodes: &mut Vec<Node>,
    mode: OutlineMode,
    segment: usize,
    t: f64,
) -> Result<usize, DocumentError> {
    let segments = segment_count(nodes.len(), mode);
    if segment >= segments {
        return Err(DocumentError::NodeIndexOutOfRange {
            index: segment,
            count: nodes.len(),
        });
    }
    if !(t > 0.0 && t < 1.0) {
        return Err(DocumentError::InvalidSplitParameter { t });
    }

    let next_idx = (segment + 1) % nodes.len();
    let controls = segment_controls(&nodes[segment], &nodes[next_idx]);
    let (left, right) = split_cubic(controls, t);
    let mid = left[3];

    nodes[segment].h2 = left[1] - left[0];
    nodes[next_idx].h1 = right[2] - right[3];
    let node = Node::with_handles(mid.x, mid.y, left[2] - mid, right[1] - mid);

    let insert_at = segment + 1;
    nodes.insert(insert_at, node);
    Ok(insert_at)
}
