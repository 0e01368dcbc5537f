//! A borrowed polygon view.

use crate::math::Point;
use crate::{Event, PathEvent};

/// A view over a sequence of endpoints forming a polygon.
///
/// ## Example
///
/// ```
/// use boolpath_path::polygon::Polygon;
/// use boolpath_path::math::point;
///
/// let path = Polygon {
///     points: &[
///         point(0.0, 0.0),
///         point(10.0, 10.0),
///         point(0.0, 10.0),
///     ],
///     closed: true,
/// };
///
/// for event in path.path_events() {
///     // same as iterating a regular `Path` object.
/// }
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Polygon<'l> {
    pub points: &'l [Point],
    pub closed: bool,
}

impl<'l> Polygon<'l> {
    /// Returns an iterator of `PathEvent`.
    pub fn path_events(&self) -> PathEvents<'l> {
        PathEvents {
            points: self.points.iter(),
            first: None,
            prev: None,
            closed: self.closed,
        }
    }
}

/// An iterator of `PathEvent`.
#[derive(Clone)]
pub struct PathEvents<'l> {
    points: core::slice::Iter<'l, Point>,
    prev: Option<Point>,
    first: Option<Point>,
    closed: bool,
}

impl<'l> Iterator for PathEvents<'l> {
    type Item = PathEvent;
    fn next(&mut self) -> Option<PathEvent> {
        match (self.prev, self.first, self.points.next()) {
            (Some(from), _, Some(to)) => {
                self.prev = Some(*to);
                Some(Event::Line { from, to: *to })
            }
            (None, None, Some(at)) => {
                self.prev = Some(*at);
                self.first = Some(*at);
                Some(Event::Begin { at: *at })
            }
            (Some(last), Some(first), None) => {
                self.prev = None;
                Some(Event::End {
                    last,
                    first,
                    close: self.closed,
                })
            }
            _ => None,
        }
    }
}

#[test]
fn polygon_events() {
    use crate::math::point;

    let points = &[point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)];
    let polygon = Polygon {
        points,
        closed: true,
    };

    let mut it = polygon.path_events();
    assert_eq!(it.next(), Some(PathEvent::Begin { at: points[0] }));
    assert_eq!(
        it.next(),
        Some(PathEvent::Line {
            from: points[0],
            to: points[1]
        })
    );
    assert_eq!(
        it.next(),
        Some(PathEvent::Line {
            from: points[1],
            to: points[2]
        })
    );
    assert_eq!(
        it.next(),
        Some(PathEvent::End {
            last: points[2],
            first: points[0],
            close: true
        })
    );
    assert_eq!(it.next(), None);
    assert_eq!(it.next(), None);
}

#[test]
fn empty_polygon() {
    let polygon = Polygon {
        points: &[],
        closed: true,
    };
    assert_eq!(polygon.path_events().next(), None);
}
