//! Flattening of input paths into indexed line segments.

use crate::geom::{fuzzy_eq_point, Box2D, LineSegment, Point};
use crate::path::{Path, PathEvent};

use alloc::vec::Vec;

/// A line segment between two points of a `PathSegments` collection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    /// Index of the start point.
    pub from: usize,
    /// Index of the end point.
    pub to: usize,
    /// Which input path the segment comes from, in the order the paths were added.
    pub path_id: u32,
    pub bounds: Box2D<f64>,
    first_intersection: Option<usize>,
}

/// A point where a segment meets another one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection {
    /// Parameter along the segment, in `[0, 1]`.
    pub t: f64,
    /// Index of the intersection point.
    pub vertex: usize,
    next: Option<usize>,
}

/// The segments of one or two paths along with their shared point pool and
/// the intersections found between them.
///
/// Segment and point indices stay valid for the whole lifetime of the collection.
/// Merging points (see `merge_points`) rewrites the indices stored in segments and
/// intersections but never reorders segments.
#[derive(Clone, Debug, Default)]
pub struct PathSegments {
    pub(crate) points: Vec<Point<f64>>,
    pub(crate) segments: Vec<Segment>,
    pub(crate) intersections: Vec<Intersection>,
    path_count: u32,
    epsilon: f64,
}

impl PathSegments {
    pub fn new(epsilon: f64) -> Self {
        PathSegments {
            points: Vec::new(),
            segments: Vec::new(),
            intersections: Vec::new(),
            path_count: 0,
            epsilon,
        }
    }

    pub fn with_capacity(points: usize, epsilon: f64) -> Self {
        PathSegments {
            points: Vec::with_capacity(points),
            segments: Vec::with_capacity(points),
            intersections: Vec::new(),
            path_count: 0,
            epsilon,
        }
    }

    /// Appends the segments of a path.
    ///
    /// Each path added receives the next path id, starting at zero. Sub-paths are
    /// implicitly closed. Points fuzzy-equal to the start of the current sub-path
    /// reuse its index and closing segments of zero length are skipped.
    pub fn add_path(&mut self, path: &Path) {
        let path_id = self.path_count;
        self.path_count += 1;

        let mut started = false;
        let mut first_event = true;
        let mut last_move_to = 0;
        let mut last = 0;

        for event in path.iter() {
            let (position, is_move_to) = match event {
                PathEvent::Begin { at } => (at, true),
                PathEvent::Line { to, .. } => (to, false),
                PathEvent::End { .. } => continue,
            };
            let position = position.to_f64();

            let current = if !first_event
                && fuzzy_eq_point(self.points[last_move_to], position, self.epsilon)
            {
                last_move_to
            } else {
                self.add_point(position)
            };
            first_event = false;

            if is_move_to {
                if started {
                    self.close_sub_path(path_id, last, last_move_to);
                }
                started = true;
                last = current;
                last_move_to = current;
            } else {
                self.push_segment(path_id, last, current);
                last = current;
            }
        }

        if started {
            self.close_sub_path(path_id, last, last_move_to);
        }
    }

    fn close_sub_path(&mut self, path_id: u32, last: usize, last_move_to: usize) {
        if last != last_move_to
            && !fuzzy_eq_point(self.points[last], self.points[last_move_to], self.epsilon)
        {
            self.push_segment(path_id, last, last_move_to);
        }
    }

    pub(crate) fn push_segment(&mut self, path_id: u32, from: usize, to: usize) {
        let bounds = LineSegment {
            from: self.points[from],
            to: self.points[to],
        }
        .bounding_box();

        self.segments.push(Segment {
            from,
            to,
            path_id,
            bounds,
            first_intersection: None,
        });
    }

    /// Adds a point to the pool and returns its index.
    pub fn add_point(&mut self, position: Point<f64>) -> usize {
        self.points.push(position);
        self.points.len() - 1
    }

    /// Records that `segment` is crossed at parameter `t` by the point `vertex`.
    ///
    /// Intersections of a segment are kept in insertion order.
    pub fn add_intersection(&mut self, segment: usize, t: f64, vertex: usize) {
        let idx = self.intersections.len();
        self.intersections.push(Intersection {
            t,
            vertex,
            next: None,
        });

        match self.segments[segment].first_intersection {
            None => {
                self.segments[segment].first_intersection = Some(idx);
            }
            Some(mut current) => {
                while let Some(next) = self.intersections[current].next {
                    current = next;
                }
                self.intersections[current].next = Some(idx);
            }
        }
    }

    /// Iterates over the intersections recorded for a segment.
    pub fn intersections(&self, segment: usize) -> Intersections {
        Intersections {
            intersections: &self.intersections,
            next: self.segments[segment].first_intersection,
        }
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn points(&self) -> &[Point<f64>] {
        &self.points
    }

    #[inline]
    pub fn point(&self, idx: usize) -> Point<f64> {
        self.points[idx]
    }

    #[inline]
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn segment(&self, idx: usize) -> &Segment {
        &self.segments[idx]
    }

    #[inline]
    pub fn bounds(&self, idx: usize) -> Box2D<f64> {
        self.segments[idx].bounds
    }

    /// The geometry of a segment.
    #[inline]
    pub fn line(&self, idx: usize) -> LineSegment<f64> {
        let segment = &self.segments[idx];
        LineSegment {
            from: self.points[segment.from],
            to: self.points[segment.to],
        }
    }

    /// Number of paths added so far.
    #[inline]
    pub fn num_paths(&self) -> u32 {
        self.path_count
    }

    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

/// Iterator over the intersections of a segment.
///
/// See `PathSegments::intersections`.
#[derive(Clone)]
pub struct Intersections<'l> {
    intersections: &'l [Intersection],
    next: Option<usize>,
}

impl<'l> Iterator for Intersections<'l> {
    type Item = &'l Intersection;

    fn next(&mut self) -> Option<&'l Intersection> {
        let current = &self.intersections[self.next?];
        self.next = current.next;
        Some(current)
    }
}

#[cfg(test)]
use crate::path::math::point;

#[test]
fn closed_square() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(1.0, 0.0));
    builder.line_to(point(1.0, 1.0));
    builder.line_to(point(0.0, 1.0));
    builder.close();
    let path = builder.build();

    let mut segments = PathSegments::new(1e-12);
    segments.add_path(&path);

    assert_eq!(segments.num_points(), 4);
    assert_eq!(segments.num_segments(), 4);
    assert_eq!(segments.num_paths(), 1);

    let pairs: std::vec::Vec<(usize, usize)> = segments
        .segments
        .iter()
        .map(|s| (s.from, s.to))
        .collect();
    assert_eq!(pairs, std::vec![(0, 1), (1, 2), (2, 3), (3, 0)]);

    let bounds = segments.bounds(1);
    assert_eq!(bounds.min.x, 1.0);
    assert_eq!(bounds.max.y, 1.0);
}

#[test]
fn open_sub_paths_are_closed() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(2.0, 0.0));
    builder.line_to(point(0.0, 2.0));
    builder.end(false);
    builder.begin(point(5.0, 5.0));
    builder.line_to(point(6.0, 5.0));
    builder.line_to(point(5.0, 5.0));
    builder.end(false);
    let path = builder.build();

    let mut segments = PathSegments::new(1e-12);
    segments.add_path(&path);

    // The first triangle gets an implicit closing segment. The second sub-path
    // comes back to its start explicitly and reuses the start point.
    assert_eq!(segments.num_segments(), 5);
    assert_eq!(segments.segment(2).to, 0);
    assert_eq!(segments.segment(4).to, segments.segment(3).from);
    assert_eq!(segments.num_points(), 5);
}

#[test]
fn path_ids() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(1.0, 0.0));
    builder.line_to(point(1.0, 1.0));
    builder.close();
    let path = builder.build();

    let mut segments = PathSegments::new(1e-12);
    segments.add_path(&path);
    segments.add_path(&path);

    assert_eq!(segments.num_paths(), 2);
    assert_eq!(segments.num_segments(), 6);
    assert!(segments.segments[..3].iter().all(|s| s.path_id == 0));
    assert!(segments.segments[3..].iter().all(|s| s.path_id == 1));
}

#[test]
fn empty_path() {
    let mut segments = PathSegments::new(1e-12);
    segments.add_path(&Path::new());
    assert_eq!(segments.num_segments(), 0);
    assert_eq!(segments.num_points(), 0);
    assert_eq!(segments.num_paths(), 1);
}

#[test]
fn intersection_lists() {
    let mut segments = PathSegments::new(1e-12);
    let a = segments.add_point(crate::geom::point(0.0, 0.0));
    let b = segments.add_point(crate::geom::point(4.0, 0.0));
    segments.push_segment(0, a, b);

    let v1 = segments.add_point(crate::geom::point(3.0, 0.0));
    let v2 = segments.add_point(crate::geom::point(1.0, 0.0));
    segments.add_intersection(0, 0.75, v1);
    segments.add_intersection(0, 0.25, v2);

    let recorded: std::vec::Vec<(f64, usize)> =
        segments.intersections(0).map(|i| (i.t, i.vertex)).collect();
    assert_eq!(recorded, std::vec![(0.75, v1), (0.25, v2)]);
}
