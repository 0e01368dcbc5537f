use crate::algorithms::aabb::bounding_box;
use crate::algorithms::rect::to_axis_aligned_rectangle;
use crate::error::{ClipError, ClipResult};
use crate::geom::fuzzy_compare;
use crate::intersections::{boxes_touch, has_intersections};
use crate::math::Box2D;
use crate::mesh::{Crossing, EdgeId, Traversal, WingedEdge};
use crate::path::{FillRule, Path, Winding};
use crate::segments::PathSegments;
use crate::{ClipOp, ClipOptions};

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use num_traits::Float;

macro_rules! clip_log {
    ($obj:ident, $fmt:expr) => (
        if $obj.log {
            log::debug!($fmt);
        }
    );
    ($obj:ident, $fmt:expr, $($arg:tt)*) => (
        if $obj.log {
            log::debug!($fmt, $($arg)*);
        }
    );
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    // Build the output.
    Clip,
    // Stop as soon as the output is known to be non-empty.
    Check,
}

#[derive(Copy, Clone, Debug)]
struct Rules {
    op: ClipOp,
    mask_a: i32,
    mask_b: i32,
}

impl Rules {
    fn new(op: ClipOp, subject: FillRule, clip: FillRule) -> Self {
        Rules {
            op,
            mask_a: winding_mask(subject),
            mask_b: winding_mask(clip),
        }
    }
}

// Applied to accumulated windings: any bit set means inside.
fn winding_mask(fill_rule: FillRule) -> i32 {
    match fill_rule {
        FillRule::NonZero => !0,
        FillRule::EvenOdd => 1,
    }
}

/// Computes boolean operations between paths.
///
/// The clipper only holds scratch buffers, reusing it across operations avoids
/// some allocations.
///
/// ## Example
///
/// ```
/// use boolpath_clip::{PathClipper, ClipOp, ClipOptions};
/// use boolpath_clip::path::{Path, Winding};
/// use boolpath_clip::math::rect;
///
/// let mut builder = Path::builder();
/// builder.add_rectangle(&rect(0.0, 0.0, 4.0, 4.0), Winding::Positive);
/// let outer = builder.build();
///
/// let mut builder = Path::builder();
/// builder.add_rectangle(&rect(1.0, 1.0, 2.0, 2.0), Winding::Positive);
/// let inner = builder.build();
///
/// let mut clipper = PathClipper::new();
/// let options = ClipOptions::DEFAULT;
///
/// assert!(clipper.contains(&outer, &inner, &options).unwrap());
/// assert!(clipper.intersects(&outer, &inner, &options).unwrap());
///
/// let frame = clipper.clip(&outer, &inner, ClipOp::Sub, &options).unwrap();
/// assert_eq!(frame.num_sub_paths(), 2);
/// ```
pub struct PathClipper {
    y_coords: Vec<f64>,
    crossings: Vec<Crossing>,
    log: bool,
}

impl PathClipper {
    /// Constructor.
    pub fn new() -> Self {
        PathClipper {
            y_coords: Vec::new(),
            crossings: Vec::new(),
            log: Self::forced_logging(),
        }
    }

    #[cfg(all(debug_assertions, feature = "std"))]
    fn forced_logging() -> bool {
        std::env::var("BOOLPATH_FORCE_LOGGING").is_ok()
    }

    #[cfg(not(all(debug_assertions, feature = "std")))]
    fn forced_logging() -> bool {
        false
    }

    /// Enable/disable some verbose logging during the clipping, for
    /// debugging purposes.
    ///
    /// Logging can also be forced in debug builds by setting the
    /// `BOOLPATH_FORCE_LOGGING` environment variable.
    pub fn set_logging(&mut self, is_enabled: bool) {
        self.log = is_enabled || Self::forced_logging();
    }

    /// Computes `op` between the subject and the clip path.
    ///
    /// The fill rule of each input is taken into account. Unless it is returned by one
    /// of the fast paths (see `ClipOptions::fast_paths`), the output uses the `EvenOdd`
    /// fill rule.
    pub fn clip(
        &mut self,
        subject: &Path,
        clip: &Path,
        op: ClipOp,
        options: &ClipOptions,
    ) -> ClipResult<Path> {
        validate(subject)?;
        validate(clip)?;

        if op != ClipOp::Simplify && options.fast_paths {
            if let Some(result) = self.fast_path(subject, clip, op, options)? {
                return Ok(result);
            }
        }

        let clip = if op == ClipOp::Simplify {
            None
        } else {
            Some(clip)
        };

        let mut mesh = build_mesh(subject, clip, options)?;
        let rules = Rules::new(
            op,
            subject.fill_rule(),
            clip.map(Path::fill_rule).unwrap_or_default(),
        );

        self.sweep(&mut mesh, &rules, Mode::Clip)?;

        let result = mesh.to_path()?;
        clip_log!(self, "{:?} -> {} sub-paths", op, result.num_sub_paths());

        Ok(result)
    }

    /// Returns an equivalent path without self-intersections and with the `EvenOdd`
    /// fill rule.
    pub fn simplify(&mut self, path: &Path, options: &ClipOptions) -> ClipResult<Path> {
        self.clip(path, &Path::new(), ClipOp::Simplify, options)
    }

    /// Returns true if the filled areas of both paths overlap or touch.
    pub fn intersects(
        &mut self,
        subject: &Path,
        clip: &Path,
        options: &ClipOptions,
    ) -> ClipResult<bool> {
        validate(subject)?;
        validate(clip)?;

        if subject.is_empty() || clip.is_empty() {
            return Ok(false);
        }

        if subject == clip {
            return Ok(true);
        }

        if !boxes_touch(&bounding_box(subject), &bounding_box(clip)) {
            return Ok(false);
        }

        if options.fast_paths && is_rectangle(subject) && is_rectangle(clip) {
            return Ok(true);
        }

        let a = segments_of(subject, options);
        let b = segments_of(clip, options);
        if has_intersections(&a, &b) {
            clip_log!(self, "intersects: the boundaries intersect");
            return Ok(true);
        }

        // One path may be fully inside of the other.
        let mut mesh = build_mesh(subject, Some(clip), options)?;
        let rules = Rules::new(ClipOp::And, subject.fill_rule(), clip.fill_rule());

        self.sweep(&mut mesh, &rules, Mode::Check)
    }

    /// Returns true if the filled area of `clip` is entirely inside of the filled area
    /// of `subject` without touching its boundary.
    pub fn contains(
        &mut self,
        subject: &Path,
        clip: &Path,
        options: &ClipOptions,
    ) -> ClipResult<bool> {
        validate(subject)?;
        validate(clip)?;

        if subject.is_empty() || clip.is_empty() {
            return Ok(false);
        }

        if subject == clip {
            return Ok(true);
        }

        if !box_contains(&bounding_box(subject), &bounding_box(clip)) {
            return Ok(false);
        }

        let a = segments_of(subject, options);
        let b = segments_of(clip, options);
        if has_intersections(&a, &b) {
            clip_log!(self, "contains: the boundaries intersect");
            return Ok(false);
        }

        // Contained if nothing is left of the clip path after removing the subject.
        let mut mesh = build_mesh(clip, Some(subject), options)?;
        let rules = Rules::new(ClipOp::Sub, clip.fill_rule(), subject.fill_rule());

        Ok(!self.sweep(&mut mesh, &rules, Mode::Check)?)
    }

    fn fast_path(
        &mut self,
        subject: &Path,
        clip: &Path,
        op: ClipOp,
        options: &ClipOptions,
    ) -> ClipResult<Option<Path>> {
        if subject == clip {
            clip_log!(self, "fast path: identical operands");
            return Ok(Some(match op {
                ClipOp::Sub => Path::new(),
                _ => subject.clone(),
            }));
        }

        let subject_bounds = bounding_box(subject);
        let clip_bounds = bounding_box(clip);

        if subject.is_empty() || clip.is_empty() || !subject_bounds.intersects(&clip_bounds) {
            clip_log!(self, "fast path: disjoint operands");
            return match op {
                ClipOp::Sub => Ok(Some(subject.clone())),
                ClipOp::And => Ok(Some(Path::new())),
                ClipOp::Or => self.disjoint_union(subject, clip, options).map(Some),
                ClipOp::Simplify => Ok(None),
            };
        }

        let subject_rect = to_axis_aligned_rectangle(subject);
        let clip_rect = to_axis_aligned_rectangle(clip);

        if box_contains(&clip_bounds, &subject_bounds) {
            if clip_rect.is_some() {
                clip_log!(self, "fast path: subject inside of a rectangle");
                match op {
                    ClipOp::Sub => return Ok(Some(Path::new())),
                    ClipOp::And => return Ok(Some(subject.clone())),
                    ClipOp::Or => return Ok(Some(clip.clone())),
                    ClipOp::Simplify => {}
                }
            }
        } else if box_contains(&subject_bounds, &clip_bounds) {
            if let Some(rect) = subject_rect {
                clip_log!(self, "fast path: clip path inside of a rectangle");
                match op {
                    ClipOp::Sub => {
                        // The clip path inside of the rectangle punches a hole into it.
                        let clip = self.to_even_odd(clip, options)?;
                        let mut builder = Path::builder();
                        builder.extend_from_path(&clip);
                        builder.add_rectangle(&rect, Winding::Positive);
                        return Ok(Some(builder.build()));
                    }
                    ClipOp::And => return Ok(Some(clip.clone())),
                    ClipOp::Or => return Ok(Some(subject.clone())),
                    ClipOp::Simplify => {}
                }
            }
        }

        if op == ClipOp::And {
            if let (Some(a), Some(b)) = (subject_rect, clip_rect) {
                clip_log!(self, "fast path: intersection of two rectangles");
                let rect = Box2D {
                    min: a.min.max(b.min),
                    max: a.max.min(b.max),
                };
                let mut builder = Path::builder();
                if rect.min.x < rect.max.x && rect.min.y < rect.max.y {
                    builder.add_rectangle(&rect, Winding::Positive);
                }
                return Ok(Some(builder.build()));
            }
        }

        Ok(None)
    }

    // The union of paths that don't overlap is their concatenation, provided that
    // they use the same fill rule.
    fn disjoint_union(
        &mut self,
        subject: &Path,
        clip: &Path,
        options: &ClipOptions,
    ) -> ClipResult<Path> {
        if clip.is_empty() {
            return Ok(subject.clone());
        }
        if subject.is_empty() {
            return Ok(clip.clone());
        }
        if subject.fill_rule() == clip.fill_rule() {
            return Ok(subject.concatenated(clip));
        }

        let subject = self.to_even_odd(subject, options)?;
        let clip = self.to_even_odd(clip, options)?;

        Ok(subject.concatenated(&clip))
    }

    fn to_even_odd(&mut self, path: &Path, options: &ClipOptions) -> ClipResult<Path> {
        match path.fill_rule() {
            FillRule::EvenOdd => Ok(path.clone()),
            FillRule::NonZero => self.simplify(path, options),
        }
    }

    // Classifies the faces of the mesh with horizontal sweep lines.
    //
    // Each iteration places a line across the tallest edge that is not classified yet,
    // in the middle of the largest gap between vertex ordinates along that edge, and
    // decides all the faces this line goes through.
    fn sweep(&mut self, mesh: &mut WingedEdge, rules: &Rules, mode: Mode) -> ClipResult<bool> {
        self.y_coords.clear();
        self.y_coords
            .extend(mesh.vertices().iter().map(|v| v.position.y));
        self.y_coords.sort_by(|a, b| a.total_cmp(b));
        self.y_coords.dedup_by(|a, b| fuzzy_compare(*a, *b));

        loop {
            let mut chosen = None;
            let mut max_height = 0.0;
            for (i, edge) in mesh.edges().iter().enumerate() {
                if edge.is_classified() {
                    continue;
                }

                let a = mesh.position(edge.first).y;
                let b = mesh.position(edge.second).y;
                if fuzzy_compare(a, b) {
                    continue;
                }

                let height = (a - b).abs();
                if chosen.is_none() || height > max_height {
                    chosen = Some((i, a.min(b), a.max(b)));
                    max_height = height;
                }
            }

            let (index, min_y, max_y) = match chosen {
                Some(chosen) => chosen,
                None => {
                    break;
                }
            };

            let y = self.sweep_line(min_y, max_y);
            clip_log!(self, "sweep line at y = {} for edge #{}", y, index);

            if self.handle_crossing_edges(mesh, y, rules, mode)? {
                return Ok(true);
            }

            mesh.edge_mut(EdgeId(index as u32)).set_classified();
        }

        if mode == Mode::Clip {
            mesh.simplify();
        }

        Ok(false)
    }

    // The middle of the largest gap between consecutive vertex ordinates
    // within [min_y, max_y].
    fn sweep_line(&self, min_y: f64, max_y: f64) -> f64 {
        let ys = &self.y_coords;
        let first = ys.iter().position(|&y| fuzzy_compare(y, min_y));
        let last = first.and_then(|first| {
            ys[first..]
                .iter()
                .position(|&y| fuzzy_compare(y, max_y))
                .map(|idx| idx + first)
        });

        match (first, last) {
            (Some(first), Some(last)) if first < last => {
                let mut best = first;
                let mut biggest_gap = ys[first + 1] - ys[first];
                for i in first + 1..last {
                    let gap = ys[i + 1] - ys[i];
                    if gap > biggest_gap {
                        best = i;
                        biggest_gap = gap;
                    }
                }

                0.5 * (ys[best] + ys[best + 1])
            }
            _ => 0.5 * (min_y + max_y),
        }
    }

    // Walks the crossings of the sweep line from left to right, accumulating the
    // windings of both paths, and decides the faces on each side of every crossed edge.
    //
    // Returns true in check mode if a face of the output was found.
    fn handle_crossing_edges(
        &mut self,
        mesh: &mut WingedEdge,
        y: f64,
        rules: &Rules,
        mode: Mode,
    ) -> ClipResult<bool> {
        self.crossings.clear();
        mesh.find_crossings(y, &mut self.crossings);
        self.crossings.sort_by(|a, b| a.x.total_cmp(&b.x));

        let mut winding_a = 0;
        let mut winding_b = 0;
        // Parity of the number of output boundaries crossed so far.
        let mut winding_d = 0;

        // The face to the right of the last crossing is unbounded.
        for i in 0..self.crossings.len().saturating_sub(1) {
            let edge_id = self.crossings[i].edge;
            let edge = mesh.edge(edge_id);

            winding_a += edge.winding_a;
            winding_b += edge.winding_b;

            let left = edge.side(Traversal::Left);
            let right = edge.side(Traversal::Right);
            winding_d += (left.retained ^ right.retained) as i32;

            let in_a = winding_a & rules.mask_a != 0;
            let in_b = winding_b & rules.mask_b != 0;
            let in_d = winding_d & 1 != 0;

            let inside = rules.op.combine(in_a, in_b);
            let add = in_d ^ inside;

            clip_log!(
                self,
                "  crossing {:?} at x = {}: windings ({}, {}, {}), add: {}",
                edge_id,
                self.crossings[i].x,
                winding_a,
                winding_b,
                winding_d,
                add
            );

            if add && mode == Mode::Check {
                return Ok(true);
            }

            let retained_side = if add {
                let y0 = mesh.position(edge.first).y;
                let y1 = mesh.position(edge.second).y;
                if y0 < y1 {
                    Some(Traversal::Left)
                } else {
                    Some(Traversal::Right)
                }
            } else {
                None
            };

            for &traversal in &[Traversal::Left, Traversal::Right] {
                // The previous walk may have classified this side already.
                if mesh.edge(edge_id).side(traversal).classified {
                    continue;
                }

                mesh.mark_face(edge_id, traversal, retained_side == Some(traversal))?;
            }

            if add {
                winding_d += 1;
            }
        }

        Ok(false)
    }
}

impl Default for PathClipper {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn validate(path: &Path) -> ClipResult<()> {
    if path
        .endpoints()
        .iter()
        .all(|p| p.x.is_finite() && p.y.is_finite())
    {
        Ok(())
    } else {
        Err(ClipError::NonFiniteCoordinate)
    }
}

fn segments_of(path: &Path, options: &ClipOptions) -> PathSegments {
    let mut segments = PathSegments::with_capacity(path.endpoints().len(), options.epsilon);
    segments.add_path(path);

    segments
}

fn build_mesh(
    subject: &Path,
    clip: Option<&Path>,
    options: &ClipOptions,
) -> ClipResult<WingedEdge> {
    let capacity = subject.endpoints().len() + clip.map_or(0, |clip| clip.endpoints().len());
    let mut segments = PathSegments::with_capacity(capacity, options.epsilon);
    segments.add_path(subject);
    if let Some(clip) = clip {
        segments.add_path(clip);
    }

    Ok(WingedEdge::from_segments(&mut segments, options)?)
}

fn is_rectangle(path: &Path) -> bool {
    to_axis_aligned_rectangle(path).is_some()
}

// Inclusive on all sides.
fn box_contains(outer: &Box2D, inner: &Box2D) -> bool {
    outer.min.x <= inner.min.x
        && outer.min.y <= inner.min.y
        && outer.max.x >= inner.max.x
        && outer.max.y >= inner.max.y
}
