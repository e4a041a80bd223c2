//! The pattern document: every user-edited entity in one place.
//!
//! Edits go through methods that validate their input and bump
//! [`PatternDocument::geometry_version`], which is what derived geometry
//! caches key on.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use stitchkit_core::{DocumentError, Node, Point, Result};
use tracing::debug;

use crate::bezier::{insert_node_on_segment, OutlineMode};
use crate::shapes::PatternShape;
use crate::stitching::EdgeRange;
use crate::transform::{snap_to_fold, HolsterTransform, Transform2D};

/// Fold snapping applied when a node is moved in half-outline mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldSnap {
    /// Distance from the fold within which a node lands on it, `None` to
    /// disable snapping
    pub threshold: Option<f64>,
    /// Flatten the handles of a node sitting on the fold so the mirrored
    /// outline meets the axis without a kink
    pub perpendicular_handles: bool,
}

impl FoldSnap {
    pub const OFF: FoldSnap = FoldSnap {
        threshold: None,
        perpendicular_handles: false,
    };
}

impl Default for FoldSnap {
    fn default() -> Self {
        Self {
            threshold: Some(2.0),
            perpendicular_handles: true,
        }
    }
}

/// A leather pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDocument {
    pub name: String,
    #[serde(default)]
    mode: OutlineMode,
    nodes: Vec<Node>,
    #[serde(default)]
    holster: HolsterTransform,
    #[serde(default)]
    shapes: Vec<PatternShape>,
    #[serde(default)]
    ranges: Vec<EdgeRange>,
    #[serde(skip)]
    geometry_version: u64,
}

impl Default for PatternDocument {
    fn default() -> Self {
        Self::new("Untitled", OutlineMode::HalfOpen)
    }
}

impl PatternDocument {
    pub fn new(name: impl Into<String>, mode: OutlineMode) -> Self {
        Self {
            name: name.into(),
            mode,
            nodes: Vec::new(),
            holster: HolsterTransform::default(),
            shapes: Vec::new(),
            ranges: Vec::new(),
            geometry_version: 0,
        }
    }

    pub fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_holster(mut self, transform: Transform2D) -> Self {
        self.holster = HolsterTransform::new(transform);
        self
    }

    pub fn mode(&self) -> OutlineMode {
        self.mode
    }

    /// Switches between the mirrored half outline and a full perimeter.
    /// Nodes are kept as they are.
    pub fn set_mode(&mut self, mode: OutlineMode) {
        if self.mode != mode {
            self.mode = mode;
            self.touch();
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn holster(&self) -> &HolsterTransform {
        &self.holster
    }

    pub fn shapes(&self) -> &[PatternShape] {
        &self.shapes
    }

    pub fn ranges(&self) -> &[EdgeRange] {
        &self.ranges
    }

    /// Counter bumped by every geometry-affecting edit.
    pub fn geometry_version(&self) -> u64 {
        self.geometry_version
    }

    /// Marks derived geometry stale.
    pub fn touch(&mut self) {
        self.geometry_version = self.geometry_version.wrapping_add(1);
    }

    pub fn is_symmetric(&self) -> bool {
        self.mode == OutlineMode::HalfOpen
    }

    // ---- nodes ----

    pub fn set_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
        self.touch();
    }

    fn check_node(&self, index: usize) -> std::result::Result<(), DocumentError> {
        if index < self.nodes.len() {
            Ok(())
        } else {
            Err(DocumentError::NodeIndexOutOfRange {
                index,
                count: self.nodes.len(),
            })
        }
    }

    /// Moves a node anchor to `local`, applying fold snapping in
    /// half-outline mode. Returns the position the node ended up at.
    pub fn move_node(
        &mut self,
        index: usize,
        local: Point,
        snap: FoldSnap,
    ) -> std::result::Result<Point, DocumentError> {
        self.check_node(index)?;
        let target = match (self.mode, snap.threshold) {
            (OutlineMode::HalfOpen, Some(threshold)) => snap_to_fold(local, threshold),
            _ => local,
        };

        let node = &mut self.nodes[index];
        node.x = target.x;
        node.y = target.y;
        if self.mode == OutlineMode::HalfOpen && snap.perpendicular_handles && target.x == 0.0 {
            node.h1.y = 0.0;
            node.h2.y = 0.0;
        }
        self.touch();
        Ok(target)
    }

    /// Replaces both handle offsets of a node.
    pub fn set_node_handles(
        &mut self,
        index: usize,
        h1: Point,
        h2: Point,
    ) -> std::result::Result<(), DocumentError> {
        self.check_node(index)?;
        self.nodes[index].h1 = h1;
        self.nodes[index].h2 = h2;
        self.touch();
        Ok(())
    }

    /// Splits `segment` at `t`, keeping the curve shape. Returns the index
    /// of the new node.
    pub fn insert_node(&mut self, segment: usize, t: f64) -> std::result::Result<usize, DocumentError> {
        let index = insert_node_on_segment(&mut self.nodes, self.mode, segment, t)?;
        self.touch();
        Ok(index)
    }

    pub fn remove_node(&mut self, index: usize) -> std::result::Result<Node, DocumentError> {
        self.check_node(index)?;
        let required = self.mode.min_nodes();
        if self.nodes.len() <= required {
            return Err(DocumentError::NotEnoughNodes { required });
        }
        let node = self.nodes.remove(index);
        self.touch();
        Ok(node)
    }

    // ---- holster ----

    /// Replaces the holster placement. Rejected while the holster is locked.
    pub fn set_holster_transform(
        &mut self,
        transform: Transform2D,
    ) -> std::result::Result<(), DocumentError> {
        if self.holster.locked {
            return Err(DocumentError::TransformLocked);
        }
        self.holster.transform = transform;
        self.touch();
        Ok(())
    }

    pub fn set_holster_locked(&mut self, locked: bool) {
        self.holster.locked = locked;
    }

    // ---- shapes ----

    pub fn add_shape(&mut self, shape: PatternShape) -> usize {
        self.shapes.push(shape);
        self.touch();
        self.shapes.len() - 1
    }

    pub fn update_shape(
        &mut self,
        index: usize,
        shape: PatternShape,
    ) -> std::result::Result<(), DocumentError> {
        let count = self.shapes.len();
        let slot = self
            .shapes
            .get_mut(index)
            .ok_or(DocumentError::ShapeIndexOutOfRange { index, count })?;
        *slot = shape;
        self.touch();
        Ok(())
    }

    pub fn remove_shape(&mut self, index: usize) -> std::result::Result<PatternShape, DocumentError> {
        if index >= self.shapes.len() {
            return Err(DocumentError::ShapeIndexOutOfRange {
                index,
                count: self.shapes.len(),
            });
        }
        let shape = self.shapes.remove(index);
        self.touch();
        Ok(shape)
    }

    // ---- ranges ----

    pub fn add_range(&mut self, range: EdgeRange) -> std::result::Result<usize, DocumentError> {
        range.validate()?;
        self.ranges.push(range);
        self.touch();
        Ok(self.ranges.len() - 1)
    }

    pub fn set_range(
        &mut self,
        index: usize,
        range: EdgeRange,
    ) -> std::result::Result<(), DocumentError> {
        range.validate()?;
        let count = self.ranges.len();
        let slot = self
            .ranges
            .get_mut(index)
            .ok_or(DocumentError::RangeIndexOutOfRange { index, count })?;
        *slot = range;
        self.touch();
        Ok(())
    }

    /// Removes a range. Linked circles and joined ranges that point at it
    /// are left alone; a reference past the end is reported as missing when
    /// geometry is derived.
    pub fn remove_range(&mut self, index: usize) -> std::result::Result<EdgeRange, DocumentError> {
        if index >= self.ranges.len() {
            return Err(DocumentError::RangeIndexOutOfRange {
                index,
                count: self.ranges.len(),
            });
        }
        let range = self.ranges.remove(index);
        self.touch();
        Ok(range)
    }

    // ---- persistence ----

    /// Load a document from a JSON file
    ///
    /// Edge ranges are checked the same way `add_range` checks them; a file
    /// holding an inverted or out-of-bounds range is rejected.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let doc: PatternDocument = serde_json::from_str(&content)?;
        for range in &doc.ranges {
            range.validate()?;
        }
        debug!(
            "Loaded pattern '{}' ({} nodes, {} shapes, {} ranges)",
            doc.name,
            doc.nodes.len(),
            doc.shapes.len(),
            doc.ranges.len()
        );
        Ok(doc)
    }

    /// Save the document as pretty-printed JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
