//! Merging of fuzzy-equal points.

use crate::geom::{fuzzy_is_null, Point};
use crate::segments::PathSegments;

use alloc::vec::Vec;

#[derive(Copy, Clone, Debug)]
struct KdNode {
    point: usize,
    id: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

#[inline]
fn coord(p: Point<f64>, axis: usize) -> f64 {
    if axis == 0 {
        p.x
    } else {
        p.y
    }
}

/// A 2-D tree over a point pool, splitting along x and y alternately.
///
/// Queries hand out canonical ids: the first query matching a node assigns it the
/// next free id, later queries within epsilon of the same node get the same id.
struct KdPointTree<'l> {
    points: &'l [Point<f64>],
    nodes: Vec<KdNode>,
    root: Option<usize>,
    next_id: usize,
    epsilon: f64,
}

impl<'l> KdPointTree<'l> {
    fn new(points: &'l [Point<f64>], epsilon: f64) -> Self {
        let mut tree = KdPointTree {
            points,
            nodes: (0..points.len())
                .map(|point| KdNode {
                    point,
                    id: None,
                    left: None,
                    right: None,
                })
                .collect(),
            root: None,
            next_id: 0,
            epsilon,
        };

        if !points.is_empty() {
            tree.root = Some(tree.build(0, points.len(), 0));
        }

        tree
    }

    // Median split, so that nodes before the pivot have a coordinate lower or
    // equal to it and nodes after it greater or equal.
    fn build(&mut self, begin: usize, end: usize, depth: usize) -> usize {
        let axis = depth & 1;
        let mid = begin + (end - begin) / 2;
        let points = self.points;

        self.nodes[begin..end].select_nth_unstable_by(mid - begin, |a, b| {
            coord(points[a.point], axis).total_cmp(&coord(points[b.point], axis))
        });

        self.nodes[mid].left = if mid > begin {
            Some(self.build(begin, mid, depth + 1))
        } else {
            None
        };
        self.nodes[mid].right = if mid + 1 < end {
            Some(self.build(mid + 1, end, depth + 1))
        } else {
            None
        };

        mid
    }

    /// Returns the canonical id of the point at `query`.
    fn canonical_id(&mut self, query: Point<f64>) -> usize {
        let found = match self.root {
            Some(root) => self.find(root, 0, query),
            None => None,
        };

        // Only non-finite coordinates can fail to match at least themselves.
        found.unwrap_or_else(|| self.allocate_id())
    }

    fn allocate_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn find(&mut self, node: usize, depth: usize, query: Point<f64>) -> Option<usize> {
        let axis = depth & 1;
        let KdNode {
            point, left, right, ..
        } = self.nodes[node];
        let pivot_point = self.points[point];

        let pivot = coord(pivot_point, axis);
        let value = coord(query, axis);

        if fuzzy_is_null(pivot - value, self.epsilon) {
            let other_axis = 1 - axis;
            if fuzzy_is_null(
                coord(pivot_point, other_axis) - coord(query, other_axis),
                self.epsilon,
            ) {
                let id = match self.nodes[node].id {
                    Some(id) => id,
                    None => {
                        let id = self.allocate_id();
                        self.nodes[node].id = Some(id);
                        id
                    }
                };
                return Some(id);
            }

            if let Some(left) = left {
                if let Some(id) = self.find(left, depth + 1, query) {
                    return Some(id);
                }
            }
            if let Some(right) = right {
                return self.find(right, depth + 1, query);
            }

            None
        } else if value < pivot {
            left.and_then(|left| self.find(left, depth + 1, query))
        } else {
            right.and_then(|right| self.find(right, depth + 1, query))
        }
    }
}

impl PathSegments {
    /// Collapses fuzzy-equal points into one and rewrites the point indices of
    /// segments and intersections accordingly.
    ///
    /// Canonical points are numbered in order of first appearance in the pool.
    pub fn merge_points(&mut self) {
        if self.points.is_empty() {
            return;
        }

        let mut merged = Vec::with_capacity(self.points.len());
        let mut remap = Vec::with_capacity(self.points.len());

        let mut tree = KdPointTree::new(&self.points, self.epsilon());
        for point in &self.points {
            let id = tree.canonical_id(*point);
            if id >= merged.len() {
                merged.push(*point);
            }
            remap.push(id);
        }

        for segment in &mut self.segments {
            segment.from = remap[segment.from];
            segment.to = remap[segment.to];
        }

        for intersection in &mut self.intersections {
            intersection.vertex = remap[intersection.vertex];
        }

        log::trace!(
            "merged {} points into {}",
            self.points.len(),
            merged.len()
        );

        self.points = merged;
    }
}

#[cfg(test)]
use crate::geom::point;

#[test]
fn merge_duplicates() {
    let mut segments = PathSegments::new(1e-12);
    let a = segments.add_point(point(0.0, 0.0));
    let b = segments.add_point(point(1.0, 0.5));
    let c = segments.add_point(point(1.0, 0.5 + 1e-14));
    let d = segments.add_point(point(3.0, 0.0));
    let e = segments.add_point(point(1e-13, -1e-13));

    segments.push_segment(0, a, b);
    segments.push_segment(0, c, d);
    segments.push_segment(0, d, e);

    segments.merge_points();

    assert_eq!(segments.num_points(), 3);
    assert_eq!(segments.point(0), point(0.0, 0.0));
    assert_eq!(segments.point(1), point(1.0, 0.5));
    assert_eq!(segments.point(2), point(3.0, 0.0));

    assert_eq!((segments.segment(0).from, segments.segment(0).to), (0, 1));
    assert_eq!((segments.segment(1).from, segments.segment(1).to), (1, 2));
    assert_eq!((segments.segment(2).from, segments.segment(2).to), (2, 0));
}

#[test]
fn merge_many_points() {
    let mut segments = PathSegments::new(1e-12);
    // A grid where each point is added twice, the second time slightly off.
    for pass in 0..2 {
        let offset = if pass == 0 { 0.0 } else { 1e-13 };
        for y in 0..10 {
            for x in 0..10 {
                segments.add_point(point(x as f64 + offset, y as f64 - offset));
            }
        }
    }

    segments.merge_points();

    assert_eq!(segments.num_points(), 100);
    for y in 0..10 {
        for x in 0..10 {
            assert_eq!(segments.point(y * 10 + x), point(x as f64, y as f64));
        }
    }
}

#[test]
fn intersections_are_remapped() {
    let mut segments = PathSegments::new(1e-12);
    let a = segments.add_point(point(0.0, 0.0));
    let b = segments.add_point(point(2.0, 0.0));
    segments.push_segment(0, a, b);
    let v1 = segments.add_point(point(1.0, 0.0));
    let v2 = segments.add_point(point(1.0, 0.0));
    segments.add_intersection(0, 0.5, v1);
    segments.add_intersection(0, 0.5, v2);

    segments.merge_points();

    assert_eq!(segments.num_points(), 3);
    assert!(segments.intersections(0).all(|i| i.vertex == 2));
}
