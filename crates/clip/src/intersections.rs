//! Finding the intersections between the segments of a `PathSegments` collection.
//!
//! Candidate pairs are found with a binary space partition of the segments'
//! bounding boxes (the "segment tree"). Each pair is considered exactly once, when
//! visiting the segment with the highest index.

use crate::geom::Box2D;
use crate::segments::PathSegments;

use alloc::vec::Vec;
use core::ops::Range;

#[derive(Copy, Clone, Debug)]
enum TreeNode {
    Leaf {
        first: usize,
        last: usize,
    },
    Split {
        // Upper bound of the segments on the left side along the split axis.
        split_left: f64,
        // Lower bound of the segments on the right side along the split axis.
        split_right: f64,
        lowest_left_index: usize,
        lowest_right_index: usize,
        // The right child directly follows the left one.
        left_child: usize,
    },
}

#[inline]
fn axis_min(b: &Box2D<f64>, axis: usize) -> f64 {
    if axis == 0 {
        b.min.x
    } else {
        b.min.y
    }
}

#[inline]
fn axis_max(b: &Box2D<f64>, axis: usize) -> f64 {
    if axis == 0 {
        b.max.x
    } else {
        b.max.y
    }
}

/// Returns true if the boxes overlap or touch.
#[inline]
pub(crate) fn boxes_touch<S: PartialOrd>(a: &Box2D<S>, b: &Box2D<S>) -> bool {
    a.min.x <= b.max.x && b.min.x <= a.max.x && a.min.y <= b.max.y && b.min.y <= a.max.y
}

/// A bounding volume hierarchy over the segments of a `PathSegments` collection.
pub struct SegmentTree {
    index: Vec<usize>,
    nodes: Vec<TreeNode>,
    max_depth: u32,
    leaf_size: usize,
}

impl SegmentTree {
    /// Builds the tree.
    ///
    /// Nodes are split at the center of their bounds along alternating axes until they
    /// hold at most `leaf_size` segments or reach `max_depth`.
    pub fn new(segments: &PathSegments, max_depth: u32, leaf_size: usize) -> Self {
        let count = segments.num_segments();
        let mut tree = SegmentTree {
            index: (0..count).collect(),
            nodes: Vec::with_capacity(count / 4 + 1),
            max_depth,
            leaf_size,
        };

        let mut bounds = Box2D::new(
            crate::geom::point(f64::INFINITY, f64::INFINITY),
            crate::geom::point(-f64::INFINITY, -f64::INFINITY),
        );
        for i in 0..count {
            let b = segments.bounds(i);
            bounds.min = bounds.min.min(b.min);
            bounds.max = bounds.max.max(b.max);
        }

        // Placeholder for the root, children are appended after it.
        tree.nodes.push(TreeNode::Leaf { first: 0, last: 0 });
        let root = tree.build(segments, 0, count, 0, bounds);
        tree.nodes[0] = root;

        tree
    }

    fn build(
        &mut self,
        segments: &PathSegments,
        first: usize,
        last: usize,
        depth: u32,
        bounds: Box2D<f64>,
    ) -> TreeNode {
        if depth >= self.max_depth || last - first <= self.leaf_size {
            return TreeNode::Leaf { first, last };
        }

        let axis = (depth & 1) as usize;
        let split = 0.5 * (axis_min(&bounds, axis) + axis_max(&bounds, axis));

        let mut split_left = axis_min(&bounds, axis);
        let mut split_right = axis_max(&bounds, axis);
        let mut lowest_left_index = usize::MAX;
        let mut lowest_right_index = usize::MAX;

        // Partition the range in place: segments centered before the split go left.
        let mut l = first;
        let mut r = last;
        while l < r {
            let index = self.index[l];
            let segment_bounds = segments.bounds(index);
            let low = axis_min(&segment_bounds, axis);
            let high = axis_max(&segment_bounds, axis);

            if 0.5 * (low + high) < split {
                l += 1;
                split_left = split_left.max(high);
                lowest_left_index = lowest_left_index.min(index);
            } else {
                r -= 1;
                self.index.swap(l, r);
                split_right = split_right.min(low);
                lowest_right_index = lowest_right_index.min(index);
            }
        }

        let mut left_bounds = bounds;
        let mut right_bounds = bounds;
        if axis == 0 {
            left_bounds.max.x = split_left;
            right_bounds.min.x = split_right;
        } else {
            left_bounds.max.y = split_left;
            right_bounds.min.y = split_right;
        }

        let left = self.build(segments, first, l, depth + 1, left_bounds);
        let right = self.build(segments, l, last, depth + 1, right_bounds);

        let left_child = self.nodes.len();
        self.nodes.push(left);
        self.nodes.push(right);

        TreeNode::Split {
            split_left,
            split_right,
            lowest_left_index,
            lowest_right_index,
            left_child,
        }
    }

    /// Computes the intersections between `segment` and all segments of lower index,
    /// recording them in `segments`.
    pub fn produce_intersections(&self, segments: &mut PathSegments, segment: usize) {
        let bounds = segments.bounds(segment);
        self.visit(segments, 0, segment, &bounds, 0);
    }

    fn visit(
        &self,
        segments: &mut PathSegments,
        node: usize,
        segment: usize,
        segment_bounds: &Box2D<f64>,
        axis: usize,
    ) {
        match self.nodes[node] {
            TreeNode::Leaf { first, last } => {
                self.visit_leaf(segments, first..last, segment, segment_bounds);
            }
            TreeNode::Split {
                split_left,
                split_right,
                lowest_left_index,
                lowest_right_index,
                left_child,
            } => {
                if segment > lowest_left_index && axis_min(segment_bounds, axis) <= split_left {
                    self.visit(segments, left_child, segment, segment_bounds, 1 - axis);
                }
                if segment > lowest_right_index && axis_max(segment_bounds, axis) >= split_right {
                    self.visit(segments, left_child + 1, segment, segment_bounds, 1 - axis);
                }
            }
        }
    }

    fn visit_leaf(
        &self,
        segments: &mut PathSegments,
        range: Range<usize>,
        segment: usize,
        segment_bounds: &Box2D<f64>,
    ) {
        let epsilon = segments.epsilon();
        let line = segments.line(segment);

        for &other in &self.index[range] {
            if other >= segment {
                continue;
            }

            if !boxes_touch(segment_bounds, &segments.bounds(other)) {
                continue;
            }

            let other_line = segments.line(other);
            for intersection in line.fuzzy_intersections(&other_line, epsilon) {
                let vertex = segments.add_point(intersection.position);
                segments.add_intersection(segment, intersection.t_self, vertex);
                segments.add_intersection(other, intersection.t_other, vertex);
            }
        }
    }
}

/// Records all pairwise intersections between the segments of the collection.
///
/// Intersection points are appended to the point pool without deduplication, see
/// `PathSegments::merge_points`.
pub fn produce_intersections(segments: &mut PathSegments, max_depth: u32, leaf_size: usize) {
    let tree = SegmentTree::new(segments, max_depth, leaf_size);
    for segment in 0..segments.num_segments() {
        tree.produce_intersections(segments, segment);
    }
}

/// Returns true if any segment of `a` intersects or touches any segment of `b`.
///
/// Crossings, shared endpoints of non-parallel segments, identical segments and
/// overlapping collinear segments all count. Collinear segments that only share
/// an endpoint and degenerate segments do not.
pub fn has_intersections(a: &PathSegments, b: &PathSegments) -> bool {
    if a.num_segments() == 0 || b.num_segments() == 0 {
        return false;
    }

    let epsilon = a.epsilon();

    let mut b_bounds = b.bounds(0);
    for j in 1..b.num_segments() {
        let bounds = b.bounds(j);
        b_bounds.min = b_bounds.min.min(bounds.min);
        b_bounds.max = b_bounds.max.max(bounds.max);
    }

    for i in 0..a.num_segments() {
        let a_segment_bounds = a.bounds(i);
        if !boxes_touch(&a_segment_bounds, &b_bounds) {
            continue;
        }

        let a_line = a.line(i);
        for j in 0..b.num_segments() {
            if !boxes_touch(&a_segment_bounds, &b.bounds(j)) {
                continue;
            }

            if a_line.fuzzy_intersects(&b.line(j), epsilon) {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
use crate::path::{math::point, Path};

#[cfg(test)]
fn square(x: f32, y: f32, size: f32) -> Path {
    let mut builder = Path::builder();
    builder.begin(point(x, y));
    builder.line_to(point(x + size, y));
    builder.line_to(point(x + size, y + size));
    builder.line_to(point(x, y + size));
    builder.close();
    builder.build()
}

#[cfg(test)]
fn count_intersections(segments: &PathSegments) -> usize {
    (0..segments.num_segments())
        .map(|i| segments.intersections(i).count())
        .sum()
}

#[test]
fn two_overlapping_squares() {
    let mut segments = PathSegments::new(1e-12);
    segments.add_path(&square(0.0, 0.0, 1.0));
    segments.add_path(&square(0.5, 0.5, 1.0));

    produce_intersections(&mut segments, 24, 10);

    // Two crossings, each recorded on both segments.
    assert_eq!(count_intersections(&segments), 4);
    let mut positions: std::vec::Vec<(f64, f64)> = segments.points()[8..]
        .iter()
        .map(|p| (p.x, p.y))
        .collect();
    positions.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(positions, std::vec![(0.5, 1.0), (1.0, 0.5)]);
}

#[test]
fn adjacent_segments_share_endpoints() {
    let mut segments = PathSegments::new(1e-12);
    segments.add_path(&square(0.0, 0.0, 1.0));

    produce_intersections(&mut segments, 24, 10);

    // Consecutive segments only share an endpoint, nothing needs to be split.
    assert_eq!(count_intersections(&segments), 0);
    assert_eq!(segments.num_points(), 4);
}

#[test]
fn deep_tree_matches_flat_search() {
    // Many small crossing segments, enough to force splits.
    let mut builder = Path::builder();
    for i in 0..40 {
        let x = i as f32 * 0.25;
        builder.begin(point(x, 0.0));
        builder.line_to(point(x + 3.0, 3.0));
        builder.end(false);
        builder.begin(point(x + 3.0, 0.0));
        builder.line_to(point(x, 3.0));
        builder.end(false);
    }
    let path = builder.build();

    let mut deep = PathSegments::new(1e-12);
    deep.add_path(&path);
    produce_intersections(&mut deep, 24, 2);

    let mut flat = PathSegments::new(1e-12);
    flat.add_path(&path);
    produce_intersections(&mut flat, 0, 10);

    assert_eq!(count_intersections(&deep), count_intersections(&flat));
    assert!(count_intersections(&flat) > 0);
}

#[test]
fn has_intersections_between_paths() {
    let mut a = PathSegments::new(1e-12);
    a.add_path(&square(0.0, 0.0, 1.0));

    let mut b = PathSegments::new(1e-12);
    b.add_path(&square(0.5, 0.5, 1.0));
    assert!(has_intersections(&a, &b));

    let mut nested = PathSegments::new(1e-12);
    nested.add_path(&square(0.25, 0.25, 0.5));
    assert!(!has_intersections(&a, &nested));

    let mut far = PathSegments::new(1e-12);
    far.add_path(&square(5.0, 5.0, 1.0));
    assert!(!has_intersections(&a, &far));

    let mut touching = PathSegments::new(1e-12);
    touching.add_path(&square(1.0, 0.0, 1.0));
    assert!(has_intersections(&a, &touching));

    assert!(!has_intersections(&a, &PathSegments::new(1e-12)));
}
