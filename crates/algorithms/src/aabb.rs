//! Bounding rectangle computation for paths.

use crate::math::{point, Box2D, Point};
use crate::path::PathEvent;

/// Computes the smallest axis-aligned rectangle that contains the path.
///
/// Returns a zero-sized rectangle at the origin if the path has no event.
pub fn bounding_box<Iter>(path: Iter) -> Box2D
where
    Iter: IntoIterator<Item = PathEvent>,
{
    let mut min = point(f32::MAX, f32::MAX);
    let mut max = point(f32::MIN, f32::MIN);

    for evt in path {
        match evt {
            PathEvent::Begin { at } => {
                min = Point::min(min, at);
                max = Point::max(max, at);
            }
            PathEvent::Line { to, .. } => {
                min = Point::min(min, to);
                max = Point::max(max, to);
            }
            PathEvent::End { .. } => {}
        }
    }

    // Return an empty rectangle by default if there was no event in the path.
    if min == point(f32::MAX, f32::MAX) {
        return Box2D::zero();
    }

    Box2D { min, max }
}

#[test]
fn simple_bounding_box() {
    use crate::path::Path;

    let mut builder = Path::builder();
    builder.begin(point(-10.0, -3.0));
    builder.line_to(point(0.0, -12.0));
    builder.line_to(point(5.0, 3.0));
    builder.end(true);
    let path = builder.build();

    assert_eq!(
        bounding_box(&path),
        Box2D {
            min: point(-10.0, -12.0),
            max: point(5.0, 3.0)
        },
    );

    assert_eq!(bounding_box(&Path::new()), Box2D::zero());

    let mut builder = Path::builder();
    builder.begin(point(2.0, 1.0));
    builder.end(false);
    let path = builder.build();

    assert_eq!(
        bounding_box(path.iter()),
        Box2D {
            min: point(2.0, 1.0),
            max: point(2.0, 1.0)
        },
    );
}
