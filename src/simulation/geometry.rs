use std::ops::Sub;

const HORIZONTAL_EDGE_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn cross(self, w: Vec2) -> f64 {
        self.x * w.y - self.y * w.x
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, w: Vec2) -> Vec2 {
        Vec2::new(self.x - w.x, self.y - w.y)
    }
}

/// Closed polygon, the last vertex connects back to the first one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    /// Axis aligned square with its top-left corner at `(x, y)`.
    pub fn square(x: f64, y: f64, size: f64) -> Self {
        Self::new(vec![
            Vec2::new(x, y),
            Vec2::new(x + size, y),
            Vec2::new(x + size, y + size),
            Vec2::new(x, y + size),
        ])
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point_in_polygon(point, self)
    }
}

/// Tests whether segments `(p1, p2)` and `(p3, p4)` cross, endpoints included.
///
/// Parallel and collinear segments are always reported as disjoint, even when
/// they overlap.
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let r = p2 - p1;
    let s = p4 - p3;

    let denominator = r.cross(s);
    if denominator == 0f64 {
        return false;
    }

    let p3_p1 = p3 - p1;
    let t = p3_p1.cross(s) / denominator;
    let u = p3_p1.cross(r) / denominator;

    (0f64..=1f64).contains(&t) && (0f64..=1f64).contains(&u)
}

/// Even-odd ray casting test.
///
/// Horizontal edges are handled by a tiny epsilon added to the denominator, so
/// points lying exactly on an edge may land on either side.
pub fn point_in_polygon(point: Vec2, polygon: &Polygon) -> bool {
    let Vec2 { x, y } = point;
    polygon.edges().fold(false, |inside, (vi, vj)| {
        let straddles = (vi.y > y) != (vj.y > y);
        if straddles
            && x < (vj.x - vi.x) * (y - vi.y) / (vj.y - vi.y + HORIZONTAL_EDGE_EPSILON) + vi.x
        {
            !inside
        } else {
            inside
        }
    })
}

#[cfg(test)]
mod segment_tests {
    use super::*;

    fn check(
        ((a00, a01), (a10, a11)): ((f64, f64), (f64, f64)),
        ((b00, b01), (b10, b11)): ((f64, f64), (f64, f64)),
    ) -> bool {
        segments_intersect(
            Vec2::new(a00, a01),
            Vec2::new(a10, a11),
            Vec2::new(b00, b01),
            Vec2::new(b10, b11),
        )
    }

    #[test]
    fn not_parallel_disjoint() {
        assert!(!check(((-1., -3.), (-5., -4.)), ((1., 1.), (5., 1.))));
    }

    #[test]
    fn parallel_disjoint() {
        assert!(!check(((1., 3.), (6., 3.)), ((1., 1.), (5., 1.))));
    }

    #[test]
    fn collinear_overlapping_is_not_reported() {
        assert!(!check(((-2., 1.), (2., 1.)), ((1., 1.), (3., 1.))));
    }

    #[test]
    fn touching_not_parallel() {
        assert!(check(((1., 5.), (2., 2.)), ((0., 0.), (3., 3.))));
        assert!(check(((2., 2.), (1., 5.)), ((0., 0.), (3., 3.))));
    }

    #[test]
    fn shared_endpoint() {
        assert!(check(((0., 0.), (1., 1.)), ((1., 1.), (2., 0.))));
    }

    #[test]
    fn crossing() {
        assert!(check(((2., 5.), (2., -2.)), ((0., 0.), (3., 3.))));
    }

    #[test]
    fn direction_independent() {
        assert!(check(((2., 5.), (2., -2.)), ((3., 3.), (0., 0.))));
        assert!(check(((2., -2.), (2., 5.)), ((0., 0.), (3., 3.))));
        assert!(check(((0., 0.), (3., 3.)), ((2., 5.), (2., -2.))));
    }

    #[test]
    fn lines_cross_outside_segments() {
        assert!(!check(((0., 0.), (1., 1.)), ((3., 0.), (2., 1.))));
    }
}
