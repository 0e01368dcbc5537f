//! Determine whether a path has the shape of an axis-aligned rectangle.

use crate::math::{point, Box2D, Point};
use crate::path::PathEvent;

/// If the input path is exactly an axis-aligned rectangle, return it.
///
/// The path must consist of a single sub-path with four corners, optionally
/// followed by an explicit edge back to the first corner, where consecutive
/// edges alternate between horizontal and vertical. Coordinates are compared
/// exactly. Rectangles with no area are rejected.
pub fn to_axis_aligned_rectangle<P: IntoIterator<Item = PathEvent>>(path: P) -> Option<Box2D> {
    let mut corners = [point(0.0, 0.0); 5];
    let mut count = 0;
    let mut sub_paths = 0;

    for event in path.into_iter() {
        let p = match event {
            PathEvent::Begin { at } => {
                sub_paths += 1;
                if sub_paths > 1 {
                    return None;
                }
                at
            }
            PathEvent::Line { to, .. } => to,
            PathEvent::End { .. } => {
                continue;
            }
        };

        if count == corners.len() {
            return None;
        }
        corners[count] = p;
        count += 1;
    }

    match count {
        4 => {}
        5 if corners[4] == corners[0] => {}
        _ => {
            return None;
        }
    }

    rectangle_from_corners(&corners[..4])
}

fn rectangle_from_corners(c: &[Point]) -> Option<Box2D> {
    let (x1, y1) = (c[0].x, c[0].y);
    let (x2, y2) = (c[2].x, c[2].y);

    if x1 == x2 || y1 == y2 {
        return None;
    }

    let vertical_first = c[1].x == x1 && c[1].y == y2 && c[3].x == x2 && c[3].y == y1;
    let horizontal_first = c[1].x == x2 && c[1].y == y1 && c[3].x == x1 && c[3].y == y2;

    if !vertical_first && !horizontal_first {
        return None;
    }

    Some(Box2D {
        min: point(x1.min(x2), y1.min(y2)),
        max: point(x1.max(x2), y1.max(y2)),
    })
}

#[test]
fn test_to_axis_aligned_rectangle() {
    use crate::path::Path;

    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(10.0, 5.0));
    builder.line_to(point(0.0, 5.0));
    builder.end(true);
    let path = builder.build();

    assert_eq!(
        to_axis_aligned_rectangle(&path),
        Some(Box2D {
            min: point(0.0, 0.0),
            max: point(10.0, 5.0)
        })
    );

    // Opposite orientation, explicit return to the first corner, open.
    let mut builder = Path::builder();
    builder.begin(point(10.0, 5.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(0.0, 0.0));
    builder.line_to(point(0.0, 5.0));
    builder.line_to(point(10.0, 5.0));
    builder.end(false);
    let path = builder.build();

    assert_eq!(
        to_axis_aligned_rectangle(&path),
        Some(Box2D {
            min: point(0.0, 0.0),
            max: point(10.0, 5.0)
        })
    );
}

#[test]
fn test_not_a_rectangle() {
    use crate::path::Path;
    use crate::path::Winding;

    // Diamond.
    let mut builder = Path::builder();
    builder.begin(point(0.0, 5.0));
    builder.line_to(point(5.0, 0.0));
    builder.line_to(point(10.0, 5.0));
    builder.line_to(point(5.0, 10.0));
    builder.close();
    assert_eq!(to_axis_aligned_rectangle(&builder.build()), None);

    // Extra collinear point.
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(5.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(10.0, 5.0));
    builder.line_to(point(0.0, 5.0));
    builder.close();
    assert_eq!(to_axis_aligned_rectangle(&builder.build()), None);

    // Two rectangles.
    let mut builder = Path::builder();
    builder.add_rectangle(&crate::math::rect(0.0, 0.0, 1.0, 1.0), Winding::Positive);
    builder.add_rectangle(&crate::math::rect(2.0, 0.0, 3.0, 1.0), Winding::Positive);
    assert_eq!(to_axis_aligned_rectangle(&builder.build()), None);

    // Flat.
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(0.0, 0.0));
    builder.close();
    assert_eq!(to_axis_aligned_rectangle(&builder.build()), None);

    // Almost.
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(10.0, 5.0));
    builder.line_to(point(0.0, 5.001));
    builder.close();
    assert_eq!(to_axis_aligned_rectangle(&builder.build()), None);

    assert_eq!(to_axis_aligned_rectangle(&Path::new()), None);
}
