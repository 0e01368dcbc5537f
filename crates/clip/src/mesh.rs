//! A planar winged-edge graph built from the split segments of the input paths.
//!
//! Every edge stores, for each of its two sides and each of its two endpoints, the
//! next edge to follow when walking around the face on that side. The edges meeting
//! at a vertex are kept sorted by angle, which makes it possible to insert edges one
//! at a time and to walk the boundary of any face.
//!
//! Terminology:
//!
//! - The *direction* of a walk along an edge tells which endpoint the walk is
//!   heading to: `Forward` moves towards `second`, `Backward` towards `first`.
//! - The *traversal* selects which side of the edge the walked face is on.
//!
//! A walk is described by a `TraversalStatus`. `WingedEdge::next` moves it to the
//! following edge around the face.

use crate::error::InternalError;
use crate::geom::{fuzzy_is_null, pseudo_angle, vector, Point};
use crate::intersections::produce_intersections;
use crate::path::Path;
use crate::segments::{Intersection, PathSegments};
use crate::ClipOptions;

use alloc::vec::Vec;
use core::fmt;

/// Index of an edge in a `WingedEdge` mesh.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

impl EdgeId {
    #[inline]
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a vertex in a `WingedEdge` mesh.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

impl VertexId {
    #[inline]
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Which side of an edge a walk follows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Traversal {
    Right = 0,
    Left = 1,
}

impl Traversal {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Traversal::Right => Traversal::Left,
            Traversal::Left => Traversal::Right,
        }
    }
}

/// Which endpoint of an edge a walk is heading to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward = 0,
    Backward = 1,
}

impl Direction {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// The state of a walk around a face.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TraversalStatus {
    pub edge: EdgeId,
    pub traversal: Traversal,
    pub direction: Direction,
}

impl TraversalStatus {
    #[inline]
    pub fn flip_direction(&mut self) {
        self.direction = self.direction.opposite();
    }

    #[inline]
    pub fn flip_traversal(&mut self) {
        self.traversal = self.traversal.opposite();
    }

    #[inline]
    pub fn flip(&mut self) {
        self.flip_direction();
        self.flip_traversal();
    }
}

/// Classification state of one side of an edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SideState {
    /// The face on this side has been decided.
    pub classified: bool,
    /// The face on this side belongs to the result.
    pub retained: bool,
}

/// An edge of the mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub first: VertexId,
    pub second: VertexId,
    /// Sum of the signed crossings contributed by the subject path.
    pub winding_a: i32,
    /// Sum of the signed crossings contributed by the clip path.
    pub winding_b: i32,
    angle: f64,
    inv_angle: f64,
    sides: [SideState; 2],
    next: [[EdgeId; 2]; 2],
}

impl Edge {
    /// The endpoint a walk in `direction` leads to.
    #[inline]
    pub fn vertex(&self, direction: Direction) -> VertexId {
        match direction {
            Direction::Backward => self.first,
            Direction::Forward => self.second,
        }
    }

    /// The direction in which to walk this edge to reach `vertex`.
    #[inline]
    pub fn direction_to(&self, vertex: VertexId) -> Direction {
        if self.first == vertex {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    #[inline]
    pub fn next(&self, traversal: Traversal, direction: Direction) -> EdgeId {
        self.next[traversal as usize][direction as usize]
    }

    #[inline]
    fn set_next(&mut self, traversal: Traversal, direction: Direction, edge: EdgeId) {
        self.next[traversal as usize][direction as usize] = edge;
    }

    #[inline]
    fn set_next_both_sides(&mut self, direction: Direction, edge: EdgeId) {
        self.next[0][direction as usize] = edge;
        self.next[1][direction as usize] = edge;
    }

    #[inline]
    pub fn side(&self, traversal: Traversal) -> SideState {
        self.sides[traversal as usize]
    }

    #[inline]
    pub(crate) fn side_mut(&mut self, traversal: Traversal) -> &mut SideState {
        &mut self.sides[traversal as usize]
    }

    /// True once both sides are classified.
    #[inline]
    pub fn is_classified(&self) -> bool {
        self.sides[0].classified && self.sides[1].classified
    }

    #[inline]
    pub(crate) fn set_classified(&mut self) {
        self.sides[0].classified = true;
        self.sides[1].classified = true;
    }
}

/// A vertex of the mesh and one of its incident edges, if any.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub position: Point<f64>,
    pub edge: Option<EdgeId>,
}

/// An edge crossing a horizontal sweep line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Crossing {
    pub edge: EdgeId,
    pub x: f64,
}

/// The winged-edge mesh.
#[derive(Clone, Debug, Default)]
pub struct WingedEdge {
    edges: Vec<Edge>,
    vertices: Vec<Vertex>,
    epsilon: f64,
}

impl WingedEdge {
    pub fn new(epsilon: f64) -> Self {
        WingedEdge {
            edges: Vec::new(),
            vertices: Vec::new(),
            epsilon,
        }
    }

    /// Builds the mesh of the segments of up to two paths.
    ///
    /// The segments are split at their intersections, fuzzy-equal points are merged,
    /// then each piece is inserted as an edge. Pieces shared by several segments are
    /// inserted once and accumulate the windings of all of them.
    pub fn from_segments(
        segments: &mut PathSegments,
        options: &ClipOptions,
    ) -> Result<Self, InternalError> {
        produce_intersections(
            segments,
            options.segment_tree_max_depth,
            options.segment_tree_leaf_size,
        );
        segments.merge_points();

        let mut mesh = WingedEdge {
            edges: Vec::with_capacity(segments.num_segments() * 2),
            vertices: Vec::with_capacity(segments.num_points()),
            epsilon: segments.epsilon(),
        };

        for point in segments.points() {
            mesh.add_vertex(*point);
        }

        let mut intersections: Vec<Intersection> = Vec::new();
        for i in 0..segments.num_segments() {
            intersections.clear();
            intersections.extend(segments.intersections(i).cloned());
            intersections.sort_by(|a, b| a.t.total_cmp(&b.t));

            let segment = segments.segment(i);
            let path_id = segment.path_id;

            let mut last = VertexId(segment.from as u32);
            for intersection in &intersections {
                let vertex = VertexId(intersection.vertex as u32);
                mesh.add_piece(last, vertex, path_id)?;
                last = vertex;
            }

            mesh.add_piece(last, VertexId(segment.to as u32), path_id)?;
        }

        log::trace!(
            "mesh: {} vertices, {} edges",
            mesh.vertices.len(),
            mesh.edges.len()
        );

        Ok(mesh)
    }

    fn add_piece(
        &mut self,
        from: VertexId,
        to: VertexId,
        path_id: u32,
    ) -> Result<(), InternalError> {
        if let Some(edge) = self.add_edge(from, to)? {
            let winding = if self.position(from).y < self.position(to).y {
                1
            } else {
                -1
            };

            let edge = &mut self.edges[edge.to_usize()];
            if path_id == 0 {
                edge.winding_a += winding;
            } else {
                edge.winding_b += winding;
            }
        }

        Ok(())
    }

    pub fn add_vertex(&mut self, position: Point<f64>) -> VertexId {
        self.vertices.push(Vertex {
            position,
            edge: None,
        });

        VertexId(self.vertices.len() as u32 - 1)
    }

    /// Connects two vertices.
    ///
    /// Returns `None` if both vertices are the same, and the existing edge if they are
    /// already connected.
    pub fn add_edge(
        &mut self,
        first: VertexId,
        second: VertexId,
    ) -> Result<Option<EdgeId>, InternalError> {
        if first == second {
            return Ok(None);
        }

        if let Some(common) = self.common_edge(first, second)? {
            return Ok(Some(common));
        }

        let ei = EdgeId(self.edges.len() as u32);

        let angle = pseudo_angle(self.position(second) - self.position(first));
        let mut inv_angle = angle + 64.0;
        if inv_angle >= 128.0 {
            inv_angle -= 128.0;
        }

        self.edges.push(Edge {
            first,
            second,
            winding_a: 0,
            winding_b: 0,
            angle,
            inv_angle,
            sides: [SideState::default(); 2],
            next: [[ei; 2]; 2],
        });

        for &(vi, direction) in &[(first, Direction::Backward), (second, Direction::Forward)] {
            let start = match self.vertices[vi.to_usize()].edge {
                Some(edge) => edge,
                None => {
                    self.vertices[vi.to_usize()].edge = Some(ei);
                    self.edge_mut(ei).set_next_both_sides(direction, ei);
                    continue;
                }
            };

            // Splice the new edge between its two neighbors in the fan around vi.
            let os = self.find_insert_status(vi, ei, start)?;
            let mut ns = self.next(os);
            ns.flip_direction();

            let oe = os.edge;
            let ne = ns.edge;

            self.edge_mut(os.edge)
                .set_next(os.traversal, os.direction, ei);
            self.edge_mut(ns.edge)
                .set_next(ns.traversal, ns.direction, ei);

            let mut os = self.next(os);
            os.flip_direction();
            let mut ns = self.next(ns);
            ns.flip_direction();

            debug_assert_eq!(os.edge, ei);
            debug_assert_eq!(ns.edge, ei);

            self.edge_mut(ei).set_next(os.traversal, os.direction, oe);
            self.edge_mut(ei).set_next(ns.traversal, ns.direction, ne);
        }

        log::trace!(
            "edge {:?}: {:?} -> {:?}, angle {}",
            ei,
            first,
            second,
            angle
        );

        Ok(Some(ei))
    }

    /// Moves a walk to the next edge around its face.
    pub fn next(&self, status: TraversalStatus) -> TraversalStatus {
        let sp = self.edge(status.edge);

        let mut result = TraversalStatus {
            edge: sp.next(status.traversal, status.direction),
            ..status
        };

        let rp = self.edge(result.edge);
        if sp.vertex(status.direction) == rp.vertex(status.direction) {
            result.flip();
        }

        result
    }

    /// Angle from edge `a` to edge `b` around their shared vertex, in `[0, 128)`.
    fn delta(&self, vertex: VertexId, a: EdgeId, b: EdgeId) -> f64 {
        let ap = self.edge(a);
        let bp = self.edge(b);

        let a_angle = if vertex == ap.second {
            ap.inv_angle
        } else {
            ap.angle
        };
        let b_angle = if vertex == bp.second {
            bp.inv_angle
        } else {
            bp.angle
        };

        let result = b_angle - a_angle;
        if result >= 128.0 {
            result - 128.0
        } else if result < 0.0 {
            result + 128.0
        } else {
            result
        }
    }

    // Finds the edge after which `ei` has to be inserted in the fan around `vi`.
    fn find_insert_status(
        &self,
        vi: VertexId,
        ei: EdgeId,
        start: EdgeId,
    ) -> Result<TraversalStatus, InternalError> {
        let mut position = start;
        let mut best = 128.0;

        let mut status = TraversalStatus {
            edge: start,
            traversal: Traversal::Right,
            direction: self.edge(start).direction_to(vi),
        };

        let guard = self.walk_guard();
        let mut steps = 0;
        loop {
            // Rotate to the next edge around vi.
            status = self.next(status);
            status.flip();
            debug_assert_eq!(self.edge(status.edge).vertex(status.direction), vi);

            let d = self.delta(vi, ei, status.edge);
            if d < best {
                position = status.edge;
                best = d;
            }

            if status.edge == start {
                break;
            }

            steps += 1;
            if steps > guard {
                return Err(InternalError::UnterminatedVertexWalk { vertex: vi.0 });
            }
        }

        let mut status = TraversalStatus {
            edge: position,
            traversal: Traversal::Left,
            direction: Direction::Forward,
        };

        if self.edge(position).vertex(status.direction) != vi {
            status.flip();
        }

        Ok(status)
    }

    /// Returns the edge connecting two vertices, if any.
    pub fn common_edge(&self, a: VertexId, b: VertexId) -> Result<Option<EdgeId>, InternalError> {
        let start = match (self.vertex(a).edge, self.vertex(b).edge) {
            (Some(start), Some(_)) => start,
            _ => {
                return Ok(None);
            }
        };

        let mut status = TraversalStatus {
            edge: start,
            traversal: Traversal::Right,
            direction: self.edge(start).direction_to(a),
        };

        let guard = self.walk_guard();
        let mut steps = 0;
        loop {
            let edge = self.edge(status.edge);
            if (edge.first == a && edge.second == b) || (edge.first == b && edge.second == a) {
                return Ok(Some(status.edge));
            }

            status = self.next(status);
            status.flip();

            if status.edge == start {
                return Ok(None);
            }

            steps += 1;
            if steps > guard {
                return Err(InternalError::UnterminatedVertexWalk { vertex: a.0 });
            }
        }
    }

    /// Unlinks an edge from the mesh.
    ///
    /// The faces on both sides of the edge are merged. The edge keeps its slot but
    /// only links to itself afterwards.
    pub fn remove_edge(&mut self, ei: EdgeId) {
        let mut status = TraversalStatus {
            edge: ei,
            traversal: Traversal::Right,
            direction: Direction::Forward,
        };

        let mut forward_right = self.next(status);
        forward_right.flip_direction();

        status.traversal = Traversal::Left;
        let mut forward_left = self.next(status);
        forward_left.flip_direction();

        status.direction = Direction::Backward;
        let mut backward_left = self.next(status);
        backward_left.flip_direction();

        status.traversal = Traversal::Right;
        let mut backward_right = self.next(status);
        backward_right.flip_direction();

        self.edge_mut(forward_right.edge).set_next(
            forward_right.traversal,
            forward_right.direction,
            forward_left.edge,
        );
        self.edge_mut(forward_left.edge).set_next(
            forward_left.traversal,
            forward_left.direction,
            forward_right.edge,
        );
        self.edge_mut(backward_right.edge).set_next(
            backward_right.traversal,
            backward_right.direction,
            backward_left.edge,
        );
        self.edge_mut(backward_left.edge).set_next(
            backward_left.traversal,
            backward_left.direction,
            backward_right.edge,
        );

        let edge = self.edge_mut(ei);
        edge.set_next_both_sides(Direction::Forward, ei);
        edge.set_next_both_sides(Direction::Backward, ei);
        let (first, second) = (edge.first, edge.second);

        for &(vertex, replacement) in &[
            (first, backward_right.edge),
            (second, forward_right.edge),
        ] {
            let vertex = &mut self.vertices[vertex.to_usize()];
            if vertex.edge == Some(ei) {
                vertex.edge = if replacement == ei {
                    None
                } else {
                    Some(replacement)
                };
            }
        }

        log::trace!("removed edge {:?}", ei);
    }

    /// Removes the edges that have retained faces on both sides.
    ///
    /// Such edges are interior to the result and would otherwise show up in its
    /// boundary twice.
    pub fn simplify(&mut self) {
        for i in 0..self.edges.len() {
            let edge = &self.edges[i];
            if edge.side(Traversal::Left).retained && edge.side(Traversal::Right).retained {
                self.remove_edge(EdgeId(i as u32));

                let edge = &mut self.edges[i];
                edge.side_mut(Traversal::Left).retained = false;
                edge.side_mut(Traversal::Right).retained = false;
            }
        }
    }

    /// Walks the face on the `traversal` side of `edge`, marking the side of every
    /// edge facing it as classified, and as retained if `retain` is true.
    pub fn mark_face(
        &mut self,
        edge: EdgeId,
        traversal: Traversal,
        retain: bool,
    ) -> Result<(), InternalError> {
        let mut status = TraversalStatus {
            edge,
            traversal,
            direction: Direction::Forward,
        };

        let guard = self.walk_guard();
        let mut steps = 0;
        loop {
            let side = self.edge_mut(status.edge).side_mut(status.traversal);
            side.classified = true;
            if retain {
                side.retained = true;
            }

            status = self.next(status);
            if status.edge == edge {
                return Ok(());
            }

            steps += 1;
            if steps > guard {
                return Err(InternalError::UnterminatedFaceWalk { edge: edge.0 });
            }
        }
    }

    /// Collects the edges crossing the horizontal line at `y`, excluding edges that
    /// merely touch it, along with the abscissa of each crossing.
    pub fn find_crossings(&self, y: f64, output: &mut Vec<Crossing>) {
        for (i, edge) in self.edges.iter().enumerate() {
            let a = self.position(edge.first);
            let b = self.position(edge.second);

            if (a.y < y && b.y > y) || (a.y > y && b.y < y) {
                output.push(Crossing {
                    edge: EdgeId(i as u32),
                    x: a.x + (b.x - a.x) * (y - a.y) / (b.y - a.y),
                });
            }
        }
    }

    /// Emits the boundary of the retained faces.
    ///
    /// Each retained side produces one closed sub-path. Collinear consecutive edges are
    /// joined. The retained flags are consumed in the process.
    pub fn to_path(&mut self) -> Result<Path, InternalError> {
        let mut builder = Path::builder();
        let mut points = Vec::new();

        for i in 0..self.edges.len() {
            for &traversal in &[Traversal::Left, Traversal::Right] {
                if !self.edges[i].side(traversal).retained {
                    continue;
                }

                self.collect_boundary(EdgeId(i as u32), traversal, &mut points)?;

                // Zero-area loops do not contribute to the fill.
                if points.len() < 3 {
                    continue;
                }

                builder.begin(points[0].to_f32());
                for point in &points[1..] {
                    builder.line_to(point.to_f32());
                }
                builder.close();
            }
        }

        Ok(builder.build())
    }

    fn collect_boundary(
        &mut self,
        edge: EdgeId,
        traversal: Traversal,
        points: &mut Vec<Point<f64>>,
    ) -> Result<(), InternalError> {
        points.clear();
        points.push(self.position(self.edge(edge).first));

        let mut status = TraversalStatus {
            edge,
            traversal,
            direction: Direction::Forward,
        };

        let guard = self.walk_guard();
        let mut steps = 0;
        loop {
            let to = self.edge(status.edge).vertex(status.direction);
            self.push_boundary_point(points, self.position(to));
            self.edge_mut(status.edge).side_mut(status.traversal).retained = false;

            status = self.next(status);
            if status.edge == edge {
                break;
            }

            steps += 1;
            if steps > guard {
                return Err(InternalError::UnterminatedFaceWalk { edge: edge.0 });
            }
        }

        // The walk ends where it started.
        if points.len() > 1 && points.last() == points.first() {
            points.pop();
        }

        Ok(())
    }

    fn push_boundary_point(&self, points: &mut Vec<Point<f64>>, point: Point<f64>) {
        let n = points.len();
        if n >= 2 {
            let first = points[n - 2];
            let middle = points[n - 1];
            let d1 = point - first;
            let d2 = middle - first;

            if fuzzy_is_null(vector(-d1.y, d1.x).dot(d2), self.epsilon) {
                points[n - 1] = point;
                return;
            }
        }

        points.push(point);
    }

    // A walk visits each side of each edge at most once.
    fn walk_guard(&self) -> usize {
        self.edges.len() * 2 + 1
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.to_usize()]
    }

    #[inline]
    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.to_usize()]
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.to_usize()]
    }

    #[inline]
    pub fn position(&self, id: VertexId) -> Point<f64> {
        self.vertices[id.to_usize()].position
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }
}

#[cfg(test)]
use crate::geom::point;

#[cfg(test)]
fn unit_square_mesh() -> (WingedEdge, [VertexId; 4], [EdgeId; 4]) {
    let mut mesh = WingedEdge::new(1e-12);
    let v = [
        mesh.add_vertex(point(0.0, 0.0)),
        mesh.add_vertex(point(1.0, 0.0)),
        mesh.add_vertex(point(1.0, 1.0)),
        mesh.add_vertex(point(0.0, 1.0)),
    ];

    let mut e = [EdgeId(0); 4];
    for i in 0..4 {
        e[i] = mesh.add_edge(v[i], v[(i + 1) % 4]).unwrap().unwrap();
    }

    (mesh, v, e)
}

#[cfg(test)]
fn face(mesh: &WingedEdge, edge: EdgeId, traversal: Traversal) -> std::vec::Vec<EdgeId> {
    let start = TraversalStatus {
        edge,
        traversal,
        direction: Direction::Forward,
    };
    let mut status = start;
    let mut edges = std::vec::Vec::new();
    loop {
        edges.push(status.edge);
        status = mesh.next(status);
        if status.edge == edge || edges.len() > 100 {
            return edges;
        }
    }
}

#[test]
fn square_faces() {
    let (mesh, _, e) = unit_square_mesh();

    assert_eq!(mesh.num_edges(), 4);
    assert_eq!(face(&mesh, e[0], Traversal::Left), e.to_vec());
    assert_eq!(face(&mesh, e[0], Traversal::Right), e.to_vec());
}

#[test]
fn duplicate_and_degenerate_edges() {
    let (mut mesh, v, e) = unit_square_mesh();

    assert_eq!(mesh.add_edge(v[1], v[0]), Ok(Some(e[0])));
    assert_eq!(mesh.add_edge(v[2], v[2]), Ok(None));
    assert_eq!(mesh.common_edge(v[3], v[0]), Ok(Some(e[3])));
    assert_eq!(mesh.common_edge(v[0], v[2]), Ok(None));
    assert_eq!(mesh.num_edges(), 4);
}

#[test]
fn diagonal_splits_square() {
    let (mut mesh, v, e) = unit_square_mesh();
    let diagonal = mesh.add_edge(v[0], v[2]).unwrap().unwrap();

    // The diagonal separates two triangles, one on each of its sides.
    let left = face(&mesh, diagonal, Traversal::Left);
    let right = face(&mesh, diagonal, Traversal::Right);
    assert_eq!(left.len(), 3);
    assert_eq!(right.len(), 3);

    let mut all: std::vec::Vec<EdgeId> = left.iter().chain(right.iter()).cloned().collect();
    all.sort();
    assert_eq!(all, std::vec![e[0], e[1], e[2], e[3], diagonal, diagonal]);

    // Removing it merges them back.
    mesh.remove_edge(diagonal);
    assert_eq!(face(&mesh, e[0], Traversal::Left), e.to_vec());
    assert_eq!(face(&mesh, e[0], Traversal::Right), e.to_vec());
    assert_eq!(face(&mesh, diagonal, Traversal::Left), std::vec![diagonal]);
    assert!(mesh.vertex(v[0]).edge.is_some());
    assert_ne!(mesh.vertex(v[0]).edge, Some(diagonal));
    assert_ne!(mesh.vertex(v[2]).edge, Some(diagonal));
}

#[test]
fn removing_a_dangling_edge() {
    let mut mesh = WingedEdge::new(1e-12);
    let a = mesh.add_vertex(point(0.0, 0.0));
    let b = mesh.add_vertex(point(1.0, 0.0));
    let c = mesh.add_vertex(point(2.0, 1.0));
    let ab = mesh.add_edge(a, b).unwrap().unwrap();
    let bc = mesh.add_edge(b, c).unwrap().unwrap();

    mesh.remove_edge(ab);

    assert_eq!(mesh.vertex(a).edge, None);
    assert_eq!(mesh.vertex(b).edge, Some(bc));
    assert_eq!(mesh.vertex(c).edge, Some(bc));
}

#[test]
fn marking_faces() {
    let (mut mesh, _, e) = unit_square_mesh();

    mesh.mark_face(e[2], Traversal::Right, true).unwrap();
    mesh.mark_face(e[2], Traversal::Left, false).unwrap();

    for edge in mesh.edges() {
        assert!(edge.is_classified());
        assert!(edge.side(Traversal::Right).retained);
        assert!(!edge.side(Traversal::Left).retained);
    }

    let path = mesh.to_path().unwrap();
    assert_eq!(path.num_sub_paths(), 1);
    assert_eq!(
        path.endpoints(),
        &[
            crate::path::math::point(0.0, 0.0),
            crate::path::math::point(1.0, 0.0),
            crate::path::math::point(1.0, 1.0),
            crate::path::math::point(0.0, 1.0),
            crate::path::math::point(0.0, 0.0),
        ]
    );

    // Flags are consumed by the output.
    assert!(mesh.edges().iter().all(|e| !e.side(Traversal::Right).retained));
}

#[test]
fn collinear_edges_are_joined() {
    let mut mesh = WingedEdge::new(1e-12);
    let v = [
        mesh.add_vertex(point(0.0, 0.0)),
        mesh.add_vertex(point(1.0, 0.0)),
        mesh.add_vertex(point(2.0, 0.0)),
        mesh.add_vertex(point(2.0, 2.0)),
        mesh.add_vertex(point(0.0, 2.0)),
    ];
    let mut first = None;
    for i in 0..5 {
        let edge = mesh.add_edge(v[i], v[(i + 1) % 5]).unwrap().unwrap();
        first.get_or_insert(edge);
    }

    mesh.mark_face(first.unwrap(), Traversal::Left, true).unwrap();
    let path = mesh.to_path().unwrap();

    assert_eq!(path.endpoints().len(), 5);
    assert_eq!(path.endpoints()[1], crate::path::math::point(2.0, 0.0));
}

#[test]
fn crossings() {
    let (mesh, _, e) = unit_square_mesh();

    let mut crossings = std::vec::Vec::new();
    mesh.find_crossings(0.25, &mut crossings);
    crossings.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
    assert_eq!(
        crossings,
        std::vec![
            Crossing { edge: e[3], x: 0.0 },
            Crossing { edge: e[1], x: 1.0 },
        ]
    );

    crossings.clear();
    mesh.find_crossings(0.0, &mut crossings);
    assert!(crossings.is_empty());
}

#[test]
fn from_segments_windings() {
    let mut builder = Path::builder();
    builder.begin(crate::path::math::point(0.0, 0.0));
    builder.line_to(crate::path::math::point(1.0, 0.0));
    builder.line_to(crate::path::math::point(1.0, 1.0));
    builder.line_to(crate::path::math::point(0.0, 1.0));
    builder.close();
    let square = builder.build();

    let mut segments = PathSegments::new(1e-12);
    segments.add_path(&square);
    segments.add_path(&square);

    let mesh = WingedEdge::from_segments(&mut segments, &ClipOptions::DEFAULT).unwrap();

    // Both paths share the same four edges.
    assert_eq!(mesh.num_vertices(), 4);
    assert_eq!(mesh.num_edges(), 4);
    let windings: std::vec::Vec<(i32, i32)> = mesh
        .edges()
        .iter()
        .map(|e| (e.winding_a, e.winding_b))
        .collect();
    assert_eq!(windings, std::vec![(-1, -1), (1, 1), (-1, -1), (-1, -1)]);
}

#[cfg(test)]
fn fan(mesh: &WingedEdge, vertex: VertexId) -> std::vec::Vec<EdgeId> {
    let start = mesh.vertex(vertex).edge.unwrap();
    let mut status = TraversalStatus {
        edge: start,
        traversal: Traversal::Right,
        direction: mesh.edge(start).direction_to(vertex),
    };
    let mut edges = std::vec![start];
    loop {
        status = mesh.next(status);
        status.flip();
        if status.edge == start || edges.len() > 100 {
            return edges;
        }
        edges.push(status.edge);
    }
}

#[test]
fn edges_around_a_vertex_are_sorted_by_angle() {
    let mut mesh = WingedEdge::new(1e-12);
    let center = mesh.add_vertex(point(1.0, 1.0));
    // Inserted out of angular order.
    let corners = [
        mesh.add_vertex(point(2.0, 2.0)),
        mesh.add_vertex(point(0.0, 0.0)),
        mesh.add_vertex(point(2.0, 0.0)),
        mesh.add_vertex(point(0.0, 2.0)),
    ];
    let spokes: std::vec::Vec<EdgeId> = corners
        .iter()
        .map(|&corner| mesh.add_edge(center, corner).unwrap().unwrap())
        .collect();

    let mut by_angle: std::vec::Vec<usize> = (0..4).collect();
    by_angle.sort_by(|&a, &b| {
        let angle = |i: usize| pseudo_angle(mesh.position(corners[i]) - mesh.position(center));
        angle(a).total_cmp(&angle(b))
    });

    let check_fan = |mesh: &WingedEdge| {
        let fan = fan(mesh, center);
        assert_eq!(fan.len(), 4, "{:?}", fan);
        let rank: std::vec::Vec<usize> = fan
            .iter()
            .map(|edge| {
                let spoke = spokes.iter().position(|s| s == edge).unwrap();
                by_angle.iter().position(|&i| i == spoke).unwrap()
            })
            .collect();
        let step = (rank[1] + 4 - rank[0]) % 4;
        assert!(step == 1 || step == 3, "{:?}", rank);
        for i in 0..4 {
            assert_eq!((rank[(i + 1) % 4] + 4 - rank[i]) % 4, step, "{:?}", rank);
        }
    };

    check_fan(&mesh);

    // Close the fan into four triangles.
    let mut triangles = std::vec::Vec::new();
    for i in 0..4 {
        let a = by_angle[i];
        let b = by_angle[(i + 1) % 4];
        let outer = mesh.add_edge(corners[a], corners[b]).unwrap().unwrap();
        let mut triangle = std::vec![spokes[a], spokes[b], outer];
        triangle.sort();
        triangles.push(triangle);
    }

    check_fan(&mesh);

    for &spoke in &spokes {
        let mut left = face(&mesh, spoke, Traversal::Left);
        let mut right = face(&mesh, spoke, Traversal::Right);
        left.sort();
        right.sort();
        assert!(triangles.contains(&left), "{:?} not in {:?}", left, triangles);
        assert!(triangles.contains(&right), "{:?} not in {:?}", right, triangles);
        assert_ne!(left, right);
    }
}
