//! Signed area of polyline paths.

use crate::geom::vector;
use crate::path::PathEvent;

/// Compute the signed area of a path by summing the signed areas of its sub-paths.
///
/// With y pointing down, clockwise sub-paths have a positive area.
pub fn signed_area<Iter>(path: Iter) -> f32
where
    Iter: IntoIterator<Item = PathEvent>,
{
    SignedAreas(path.into_iter()).sum()
}

/// Compute the signed area of the next sub-path.
///
/// The iterator is advanced so that `sub_path_signed_area` can be called multiple times
/// to process the successive sub-paths of a path. Open sub-paths are implicitly closed.
///
/// Returns `None` if there is no more sub-path or if the the iterator is malformed.
pub fn sub_path_signed_area<Iter>(path: &mut Iter) -> Option<f32>
where
    Iter: Iterator<Item = PathEvent>,
{
    let first = if let Some(PathEvent::Begin { at }) = path.next() {
        at
    } else {
        return None;
    };
    let mut double_area = 0.0;
    let mut v0 = vector(0.0, 0.0);

    for evt in path {
        match evt {
            PathEvent::Begin { .. } => {
                return None;
            }
            PathEvent::End { last, first, .. } => {
                let v1 = last - first;
                double_area += v0.cross(v1);

                return Some(double_area * 0.5);
            }
            PathEvent::Line { to, .. } => {
                let v1 = to - first;
                double_area += v0.cross(v1);
                v0 = v1;
            }
        };
    }

    None
}

/// Iterator over the sub-path areas of a path.
pub struct SignedAreas<Iter>(pub Iter);

impl<Iter: Iterator<Item = PathEvent>> Iterator for SignedAreas<Iter> {
    type Item = f32;
    fn next(&mut self) -> Option<f32> {
        sub_path_signed_area(&mut self.0)
    }
}

#[test]
fn sub_path_area() {
    use crate::geom::point;
    let mut path = crate::path::Path::builder();

    path.begin(point(0.0, 0.0));
    path.line_to(point(1.0, 0.0));
    path.line_to(point(1.0, 1.0));
    path.line_to(point(0.0, 1.0));
    path.close();

    path.begin(point(0.0, 0.0));
    path.line_to(point(0.0, 1.0));
    path.line_to(point(1.0, 1.0));
    path.line_to(point(1.0, 0.0));
    path.close();

    let path = path.build();

    let mut iter = path.iter();

    assert_eq!(sub_path_signed_area(&mut iter), Some(1.0));
    assert_eq!(sub_path_signed_area(&mut iter), Some(-1.0));
    assert_eq!(sub_path_signed_area(&mut iter), None);

    assert_eq!(signed_area(&path), 0.0);

    let areas: std::vec::Vec<f32> = SignedAreas(path.iter()).collect();
    assert_eq!(areas, &[1.0, -1.0]);

    let mut path = crate::path::Path::builder();

    path.begin(point(0.0, 1.0));
    path.line_to(point(1.0, 1.0));
    path.line_to(point(1.0, 0.0));
    path.line_to(point(2.0, 0.0));
    path.line_to(point(2.0, 1.0));
    path.line_to(point(3.0, 1.0));
    path.line_to(point(3.0, 2.0));
    path.line_to(point(2.0, 2.0));
    path.line_to(point(2.0, 3.0));
    path.line_to(point(1.0, 3.0));
    path.line_to(point(1.0, 2.0));
    path.line_to(point(0.0, 2.0));
    path.close();

    assert_eq!(signed_area(path.build().iter()), 5.0);
}
