//! The default path data structure.
//!

use crate::math::*;
use crate::polygon::Polygon;
use crate::private::DebugValidator;
use crate::{EndpointId, Event, FillRule, PathEvent, Winding};

use core::fmt;
use core::iter::{FromIterator, IntoIterator};

use alloc::boxed::Box;
use alloc::vec::Vec;

/// Enumeration corresponding to the [Event](enum.Event.html) enum
/// without the parameters.
///
/// This is used by the [Path](struct.Path.html) data structure to store path events a tad
/// more efficiently.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub(crate) enum Verb {
    LineTo,
    Begin,
    Close,
    End,
}

/// A simple polyline path data structure.
///
/// # Representation
///
/// Paths contain two buffers:
/// - a buffer of commands (Begin, Line, Close or End),
/// - and a buffer of endpoints.
///
/// Every command except `End` consumes one endpoint. `Close` stores a copy of
/// the sub-path's first endpoint so that the closing edge has an explicit
/// destination.
///
/// ```ascii
///  ________________________________
/// |       |      |      |       |
/// | Begin | Line | Line | Close | ...
/// |_______|______|______|_______|_
///  ________________________________________
/// |         |         |         |         |
/// |start x,y| to x, y | to x, y |start x,y| ...
/// |_________|_________|_________|_________|_
/// ```
///
/// Each path carries the [FillRule](../enum.FillRule.html) that decides which
/// regions its sub-paths enclose.
///
/// Two paths compare equal if they have the same commands, the exact same
/// endpoints and the same fill rule.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Path {
    points: Box<[Point]>,
    verbs: Box<[Verb]>,
    fill_rule: FillRule,
}

impl Path {
    /// Creates a [Builder](struct.Builder.html) to build a path.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Creates an Empty `Path`.
    #[inline]
    pub fn new() -> Path {
        Path {
            points: Box::new([]),
            verbs: Box::new([]),
            fill_rule: FillRule::EvenOdd,
        }
    }

    /// Iterates over the events of the path.
    pub fn iter(&self) -> Iter {
        Iter::new(&self.points, &self.verbs)
    }

    /// The endpoints of the path, in storage order.
    ///
    /// Closed sub-paths repeat their first endpoint at the end.
    #[inline]
    pub fn endpoints(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    /// Returns the same path with a different fill rule.
    #[inline]
    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    pub fn num_sub_paths(&self) -> usize {
        self.verbs.iter().filter(|verb| **verb == Verb::Begin).count()
    }

    pub fn first_endpoint(&self) -> Option<Point> {
        self.points.first().cloned()
    }

    pub fn last_endpoint(&self) -> Option<Point> {
        self.points.last().cloned()
    }

    /// Returns a path containing the sub-paths of `self` followed by those of `other`.
    ///
    /// The result keeps the fill rule of `self`.
    pub fn concatenated(&self, other: &Path) -> Path {
        let mut builder = Builder::with_capacity(
            self.points.len() + other.points.len(),
            self.verbs.len() + other.verbs.len(),
        )
        .with_fill_rule(self.fill_rule);
        builder.extend_from_path(self);
        builder.extend_from_path(other);

        builder.build()
    }
}

impl FromIterator<PathEvent> for Path {
    fn from_iter<T: IntoIterator<Item = PathEvent>>(iter: T) -> Path {
        let mut builder = Path::builder();
        for event in iter.into_iter() {
            builder.path_event(event);
        }

        builder.build()
    }
}

impl<'l> IntoIterator for &'l Path {
    type Item = PathEvent;
    type IntoIter = Iter<'l>;

    fn into_iter(self) -> Iter<'l> {
        self.iter()
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        fn write_point(formatter: &mut fmt::Formatter, point: Point) -> fmt::Result {
            write!(formatter, " ")?;
            fmt::Debug::fmt(&point.x, formatter)?;
            write!(formatter, " ")?;
            fmt::Debug::fmt(&point.y, formatter)
        }

        if self.fill_rule == FillRule::NonZero {
            write!(formatter, "nonzero ")?;
        }

        write!(formatter, "\"")?;

        for evt in self.iter() {
            match evt {
                Event::Begin { at } => {
                    write!(formatter, " M")?;
                    write_point(formatter, at)?;
                }
                Event::End { close, .. } => {
                    if close {
                        write!(formatter, " Z")?;
                    }
                }
                Event::Line { to, .. } => {
                    write!(formatter, " L")?;
                    write_point(formatter, to)?;
                }
            }
        }

        write!(formatter, "\"")
    }
}

/// The builder for `Path`.
#[derive(Clone)]
pub struct Builder {
    points: Vec<Point>,
    verbs: Vec<Verb>,
    first: Point,
    fill_rule: FillRule,
    validator: DebugValidator,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            points: Vec::new(),
            verbs: Vec::new(),
            first: point(0.0, 0.0),
            fill_rule: FillRule::EvenOdd,
            validator: DebugValidator::new(),
        }
    }

    pub fn with_capacity(points: usize, edges: usize) -> Self {
        Builder {
            points: Vec::with_capacity(points),
            verbs: Vec::with_capacity(edges),
            first: point(0.0, 0.0),
            fill_rule: FillRule::EvenOdd,
            validator: DebugValidator::new(),
        }
    }

    /// Sets the fill rule of the path to build.
    #[inline]
    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    #[inline]
    pub fn set_fill_rule(&mut self, fill_rule: FillRule) {
        self.fill_rule = fill_rule;
    }

    /// Starts a new sub-path at a given position.
    ///
    /// There must be no sub-path in progress when this method is called.
    /// `at` becomes the current position of the sub-path.
    ///
    /// Coordinates are not validated here. Consumers that need finite
    /// coordinates (such as the clipper) check them on entry.
    pub fn begin(&mut self, at: Point) -> EndpointId {
        self.validator.begin();

        let id = EndpointId(self.points.len() as u32);

        self.first = at;
        self.points.push(at);
        self.verbs.push(Verb::Begin);

        id
    }

    /// Ends the current sub path.
    ///
    /// A sub-path must be in progress when this method is called.
    /// After this method is called, there is no sub-path in progress until
    /// `begin` is called again.
    pub fn end(&mut self, close: bool) {
        self.validator.end();

        if close {
            self.points.push(self.first);
        }

        self.verbs.push(if close { Verb::Close } else { Verb::End });
    }

    /// Closes the current sub path.
    ///
    /// Shorthand for `builder.end(true)`.
    #[inline]
    pub fn close(&mut self) {
        self.end(true)
    }

    /// Adds a line segment to the current sub-path.
    ///
    /// A sub-path must be in progress when this method is called.
    pub fn line_to(&mut self, to: Point) -> EndpointId {
        self.validator.edge();

        let id = EndpointId(self.points.len() as u32);
        self.points.push(to);
        self.verbs.push(Verb::LineTo);

        id
    }

    /// Applies the provided path event.
    ///
    /// By default this calls one of `begin`, `end` or `line_to`
    /// depending on the path event.
    pub fn path_event(&mut self, event: PathEvent) {
        match event {
            PathEvent::Begin { at } => {
                self.begin(at);
            }
            PathEvent::Line { to, .. } => {
                self.line_to(to);
            }
            PathEvent::End { close, .. } => {
                self.end(close);
            }
        }
    }

    /// Adds a sub-path from a polygon.
    ///
    /// There must be no sub-path in progress when this method is called.
    /// No sub-path is in progress after the method is called.
    pub fn add_polygon(&mut self, polygon: Polygon) {
        if polygon.points.is_empty() {
            return;
        }

        self.reserve(polygon.points.len() + 1, polygon.points.len() + 1);

        self.begin(polygon.points[0]);
        for p in &polygon.points[1..] {
            self.line_to(*p);
        }

        self.end(polygon.closed);
    }

    /// Adds a sub-path containing a rectangle.
    ///
    /// There must be no sub-path in progress when this method is called.
    /// No sub-path is in progress after the method is called.
    pub fn add_rectangle(&mut self, rect: &Box2D, winding: Winding) {
        match winding {
            Winding::Positive => self.add_polygon(Polygon {
                points: &[
                    rect.min,
                    point(rect.max.x, rect.min.y),
                    rect.max,
                    point(rect.min.x, rect.max.y),
                ],
                closed: true,
            }),
            Winding::Negative => self.add_polygon(Polygon {
                points: &[
                    rect.min,
                    point(rect.min.x, rect.max.y),
                    rect.max,
                    point(rect.max.x, rect.min.y),
                ],
                closed: true,
            }),
        };
    }

    /// Appends all sub-paths of another path.
    ///
    /// There must be no sub-path in progress when this method is called.
    /// The fill rule of `path` is ignored.
    pub fn extend_from_path(&mut self, path: &Path) {
        self.validator.extend();
        self.points.extend_from_slice(&path.points);
        self.verbs.extend_from_slice(&path.verbs);
    }

    pub fn reserve(&mut self, endpoints: usize, edges: usize) {
        self.points.reserve(endpoints);
        self.verbs.reserve(edges);
    }

    pub fn build(self) -> Path {
        self.validator.build();
        Path {
            points: self.points.into_boxed_slice(),
            verbs: self.verbs.into_boxed_slice(),
            fill_rule: self.fill_rule,
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}

/// An iterator for `Path`.
#[derive(Clone)]
pub struct Iter<'l> {
    points: core::slice::Iter<'l, Point>,
    verbs: core::slice::Iter<'l, Verb>,
    current: Point,
    first: Point,
}

impl<'l> Iter<'l> {
    fn new(points: &'l [Point], verbs: &'l [Verb]) -> Self {
        Iter {
            points: points.iter(),
            verbs: verbs.iter(),
            current: point(0.0, 0.0),
            first: point(0.0, 0.0),
        }
    }

    #[inline]
    fn next_point(&mut self) -> Point {
        self.points.next().cloned().unwrap_or(self.current)
    }
}

impl<'l> Iterator for Iter<'l> {
    type Item = PathEvent;
    #[inline]
    fn next(&mut self) -> Option<PathEvent> {
        match self.verbs.next() {
            Some(&Verb::Begin) => {
                self.current = self.next_point();
                self.first = self.current;
                Some(PathEvent::Begin { at: self.current })
            }
            Some(&Verb::LineTo) => {
                let from = self.current;
                self.current = self.next_point();
                Some(PathEvent::Line {
                    from,
                    to: self.current,
                })
            }
            Some(&Verb::Close) => {
                let last = self.current;
                let _ = self.points.next();
                self.current = self.first;
                Some(PathEvent::End {
                    last,
                    first: self.first,
                    close: true,
                })
            }
            Some(&Verb::End) => {
                let last = self.current;
                self.current = self.first;
                Some(PathEvent::End {
                    last,
                    first: self.first,
                    close: false,
                })
            }
            None => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.verbs.size_hint()
    }
}

#[test]
fn test_path_builder_1() {
    let mut p = Path::builder();
    p.begin(point(0.0, 0.0));
    p.line_to(point(1.0, 0.0));
    p.line_to(point(2.0, 0.0));
    p.line_to(point(3.0, 0.0));
    p.end(false);

    p.begin(point(10.0, 0.0));
    p.line_to(point(11.0, 0.0));
    p.line_to(point(12.0, 0.0));
    p.close();

    let path = p.build();

    let mut it = path.iter();
    assert_eq!(it.next(), Some(PathEvent::Begin { at: point(0.0, 0.0) }));
    assert_eq!(
        it.next(),
        Some(PathEvent::Line {
            from: point(0.0, 0.0),
            to: point(1.0, 0.0)
        })
    );
    assert_eq!(
        it.next(),
        Some(PathEvent::Line {
            from: point(1.0, 0.0),
            to: point(2.0, 0.0)
        })
    );
    assert_eq!(
        it.next(),
        Some(PathEvent::Line {
            from: point(2.0, 0.0),
            to: point(3.0, 0.0)
        })
    );
    assert_eq!(
        it.next(),
        Some(PathEvent::End {
            last: point(3.0, 0.0),
            first: point(0.0, 0.0),
            close: false
        })
    );

    assert_eq!(it.next(), Some(PathEvent::Begin { at: point(10.0, 0.0) }));
    assert_eq!(
        it.next(),
        Some(PathEvent::Line {
            from: point(10.0, 0.0),
            to: point(11.0, 0.0)
        })
    );
    assert_eq!(
        it.next(),
        Some(PathEvent::Line {
            from: point(11.0, 0.0),
            to: point(12.0, 0.0)
        })
    );
    assert_eq!(
        it.next(),
        Some(PathEvent::End {
            last: point(12.0, 0.0),
            first: point(10.0, 0.0),
            close: true
        })
    );
    assert_eq!(it.next(), None);
    assert_eq!(it.next(), None);

    assert_eq!(path.num_sub_paths(), 2);
    assert_eq!(path.endpoints().len(), 8);
    assert_eq!(path.last_endpoint(), Some(point(10.0, 0.0)));
}

#[test]
fn test_path_builder_empty() {
    let path = Path::builder().build();
    let mut it = path.iter();
    assert_eq!(it.next(), None);
    assert_eq!(it.next(), None);
    assert!(path.is_empty());
    assert_eq!(path.num_sub_paths(), 0);
    assert_eq!(path, Path::new());
}

#[test]
fn test_rectangle() {
    let mut builder = Path::builder().with_fill_rule(FillRule::NonZero);
    builder.add_rectangle(&rect(0.0, 0.0, 2.0, 1.0), Winding::Positive);
    let path = builder.build();

    assert_eq!(path.fill_rule(), FillRule::NonZero);
    assert_eq!(
        path.endpoints(),
        &[
            point(0.0, 0.0),
            point(2.0, 0.0),
            point(2.0, 1.0),
            point(0.0, 1.0),
            point(0.0, 0.0),
        ]
    );

    let mut builder = Path::builder();
    builder.add_rectangle(&rect(0.0, 0.0, 2.0, 1.0), Winding::Negative);
    let negative = builder.build();
    assert_eq!(negative.endpoints()[1], point(0.0, 1.0));
}

#[test]
fn test_concatenated() {
    let mut a = Path::builder().with_fill_rule(FillRule::NonZero);
    a.add_rectangle(&rect(0.0, 0.0, 1.0, 1.0), Winding::Positive);
    let a = a.build();

    let mut b = Path::builder();
    b.begin(point(5.0, 5.0));
    b.line_to(point(6.0, 5.0));
    b.line_to(point(6.0, 6.0));
    b.end(true);
    let b = b.build();

    let ab = a.concatenated(&b);
    assert_eq!(ab.fill_rule(), FillRule::NonZero);
    assert_eq!(ab.num_sub_paths(), 2);
    assert_eq!(
        ab.endpoints().len(),
        a.endpoints().len() + b.endpoints().len()
    );
    assert_eq!(ab.iter().count(), a.iter().count() + b.iter().count());
}

#[test]
fn test_equality() {
    let build = |fill_rule, x| {
        let mut builder = Path::builder().with_fill_rule(fill_rule);
        builder.add_polygon(Polygon {
            points: &[point(0.0, 0.0), point(x, 0.0), point(x, 1.0)],
            closed: true,
        });
        builder.build()
    };

    assert_eq!(build(FillRule::EvenOdd, 1.0), build(FillRule::EvenOdd, 1.0));
    assert!(build(FillRule::EvenOdd, 1.0) != build(FillRule::NonZero, 1.0));
    assert!(build(FillRule::EvenOdd, 1.0) != build(FillRule::EvenOdd, 1.5));
}

#[test]
fn test_from_iter() {
    let mut builder = Path::builder();
    builder.add_polygon(Polygon {
        points: &[point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)],
        closed: true,
    });
    builder.add_polygon(Polygon {
        points: &[point(3.0, 0.0), point(4.0, 0.0)],
        closed: false,
    });
    let path = builder.build();

    let copy: Path = path.iter().collect();
    assert_eq!(copy, path);
}

#[test]
fn test_debug_format() {
    use std::format;

    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(1.0, 0.0));
    builder.close();
    let path = builder.build();

    assert_eq!(format!("{:?}", path), "\" M 0.0 0.0 L 1.0 0.0 Z\"");
}
