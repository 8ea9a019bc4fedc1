use crate::geometry::{RAY_PARALLEL_EPSILON, SWEEP_FACING_EPSILON};
use crate::math::Vector3;
use std::ops::{Index, IndexMut};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Result of a successful swept-sphere cast against a triangle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SweepHit {
    /// Contact point on the triangle, in the same space as the query
    pub point: Vector3,

    /// Travel distance along the sweep direction before contact; zero when
    /// the sphere already overlaps the triangle's plane at the start
    pub distance: f32,
}

/// A triangle in 3D space.
///
/// The vertex ordering determines the normal direction by the right-hand
/// rule over `vertices[1] - vertices[0]` and `vertices[2] - vertices[0]`.
/// Coincident or collinear vertices make the triangle degenerate; queries
/// on a degenerate triangle report no intersection rather than panicking.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Triangle3 {
    /// The vertices of the triangle
    pub vertices: [Vector3; 3],
}

impl Triangle3 {
    /// Creates a new triangle from three vertices
    #[inline]
    pub fn new(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self { vertices: [a, b, c] }
    }

    /// Returns the unit normal of the triangle.
    ///
    /// A degenerate triangle has no meaningful normal direction and yields
    /// the zero vector.
    pub fn normal(&self) -> Vector3 {
        let edge1 = self.vertices[1] - self.vertices[0];
        let edge2 = self.vertices[2] - self.vertices[0];
        edge1.cross(&edge2).normalize()
    }

    /// Returns the area of the triangle
    pub fn area(&self) -> f32 {
        let edge1 = self.vertices[1] - self.vertices[0];
        let edge2 = self.vertices[2] - self.vertices[0];
        edge1.cross(&edge2).length() * 0.5
    }

    /// Returns the centroid of the triangle
    pub fn centroid(&self) -> Vector3 {
        (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0
    }

    /// Tests whether a point lies within the triangle's bounds.
    ///
    /// The point must already lie on the triangle's plane; calling this with
    /// an off-plane point produces meaningless results. The sphere-cast path
    /// projects its candidate onto the plane before testing.
    pub fn contains_point(&self, p: Vector3) -> bool {
        let a = self.vertices[0];
        let b = self.vertices[1];
        let c = self.vertices[2];

        let u = b - a;
        let v = c - a;
        let w = p - a;

        let v_cross_w = v.cross(&w);
        let v_cross_u = v.cross(&u);

        // r and t must lie on the same side as their basis edge
        if v_cross_w.dot(&v_cross_u) < 0.0 {
            return false;
        }

        let u_cross_w = u.cross(&w);
        let u_cross_v = u.cross(&v);

        if u_cross_w.dot(&u_cross_v) < 0.0 {
            return false;
        }

        // Both weights are non-negative here, so each is within bounds as
        // long as their sum is
        let denom = u_cross_v.length();
        let r = v_cross_w.length() / denom;
        let t = u_cross_w.length() / denom;

        r + t <= 1.0
    }

    /// Returns the point on the triangle's perimeter closest to `p`.
    ///
    /// Candidates are the clamped projections of `p` onto the three edge
    /// segments; ties go to the lowest-indexed edge (AB, then BC, then CA).
    pub fn closest_point(&self, p: Vector3) -> Vector3 {
        let a = self.vertices[0];
        let b = self.vertices[1];
        let c = self.vertices[2];

        let mut best = closest_point_on_segment(a, b, p);
        let mut best_dist = (p - best).length_squared();

        let on_bc = closest_point_on_segment(b, c, p);
        let dist_bc = (p - on_bc).length_squared();
        if dist_bc < best_dist {
            best = on_bc;
            best_dist = dist_bc;
        }

        let on_ca = closest_point_on_segment(c, a, p);
        let dist_ca = (p - on_ca).length_squared();
        if dist_ca < best_dist {
            best = on_ca;
        }

        best
    }

    /// Casts a ray against the triangle, returning the intersection point on
    /// the triangle's plane if the ray hits within its bounds.
    ///
    /// The ray is unbounded above: any non-negative parametric distance
    /// counts. Rays parallel to the plane miss, whether they lie in the
    /// plane or not, as do rays whose intersection lies behind `start`.
    /// Degenerate triangles never report a hit.
    pub fn ray_cast(&self, start: Vector3, dir: Vector3) -> Option<Vector3> {
        // Dan Sunday's parametric ray/triangle test
        let u = self.vertices[1] - self.vertices[0];
        let v = self.vertices[2] - self.vertices[0];
        let n = u.cross(&v);
        if n == Vector3::ZERO {
            return None;
        }

        let w0 = start - self.vertices[0];
        let a = -n.dot(&w0);
        let b = n.dot(&dir);
        if b.abs() < RAY_PARALLEL_EPSILON {
            // Parallel to the plane; in-plane rays also land here
            return None;
        }

        let r = a / b;
        if r < 0.0 {
            // Triangle is behind the ray
            return None;
        }

        let plane_hit_point = start + dir * r;

        // Solve for the parametric coordinates of the hit point
        let uu = u.dot(&u);
        let uv = u.dot(&v);
        let vv = v.dot(&v);
        let w = plane_hit_point - self.vertices[0];
        let wu = w.dot(&u);
        let wv = w.dot(&v);
        let d = uv * uv - uu * vv;

        let s = (uv * wv - vv * wu) / d;
        if s < 0.0 || s > 1.0 {
            return None;
        }
        let t = (uv * wu - uu * wv) / d;
        if t < 0.0 || s + t > 1.0 {
            return None;
        }

        Some(plane_hit_point)
    }

    /// Sweeps a sphere of the given radius along `dir`, returning the first
    /// contact with the triangle.
    ///
    /// `dir` must be normalized. Sweeps that do not approach the triangle's
    /// front face miss. A sphere already overlapping the plane at `start`
    /// reports its contact at zero distance. When the plane contact point
    /// falls outside the triangle, the sphere may still clip an edge or
    /// vertex; that case is resolved by casting a ray from the closest
    /// perimeter point back onto the sphere.
    pub fn sphere_cast(&self, start: Vector3, dir: Vector3, radius: f32) -> Option<SweepHit> {
        let tri_normal = self.normal();

        let d = tri_normal.dot(&self.vertices[0]);
        let e = tri_normal.dot(&start) - radius;
        let cotangent_distance = e - d;

        let denom = tri_normal.dot(&dir);
        if denom > -SWEEP_FACING_EPSILON {
            // Receding, co-planar, or degenerate (zero normal)
            return None;
        }

        let plane_intersect;
        let plane_intersect_distance;
        if cotangent_distance <= 0.0 && cotangent_distance >= -radius * 2.0 {
            // Embedded: the sphere already overlaps the plane; contact is
            // directly beneath the sphere center at zero travel
            plane_intersect = start - tri_normal * (cotangent_distance + radius);
            plane_intersect_distance = 0.0;
        } else {
            plane_intersect_distance = -(cotangent_distance / denom);
            plane_intersect = start + dir * plane_intersect_distance - tri_normal * radius;
        }

        if plane_intersect_distance < 0.0 {
            return None;
        }

        if self.contains_point(plane_intersect) {
            return Some(SweepHit {
                point: plane_intersect,
                distance: plane_intersect_distance,
            });
        }

        // The plane contact is outside the triangle, but the sphere may
        // still clip an edge or vertex
        let closest = self.closest_point(plane_intersect);
        intersect_sphere(closest, -dir, start, radius).map(|distance| SweepHit {
            point: closest,
            distance,
        })
    }
}

impl From<[Vector3; 3]> for Triangle3 {
    #[inline]
    fn from(vertices: [Vector3; 3]) -> Self {
        Self { vertices }
    }
}

impl Index<usize> for Triangle3 {
    type Output = Vector3;

    /// Indexed vertex access; panics when the index is out of range
    #[inline]
    fn index(&self, index: usize) -> &Vector3 {
        &self.vertices[index]
    }
}

impl IndexMut<usize> for Triangle3 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Vector3 {
        &mut self.vertices[index]
    }
}

/// Returns the point on the segment from `a` to `b` closest to `p`.
///
/// A zero-length segment collapses to `a`.
fn closest_point_on_segment(a: Vector3, b: Vector3, p: Vector3) -> Vector3 {
    let to_point = p - a;
    let axis = (b - a).normalize();
    let len = (b - a).length();
    let t = axis.dot(&to_point);

    if t <= 0.0 {
        return a;
    }
    if t >= len {
        return b;
    }

    a + axis * t
}

/// Casts a ray against a sphere, returning the distance to the first
/// intersection along `dir` (which must be normalized)
fn intersect_sphere(origin: Vector3, dir: Vector3, center: Vector3, radius: f32) -> Option<f32> {
    let q = center - origin;
    let c = q.length();
    let v = q.dot(&dir);
    let d = radius * radius - (c * c - v * v);

    if d < 0.0 {
        return None;
    }

    let distance = v - d.sqrt();
    if distance < 0.0 {
        return None;
    }
    Some(distance)
}
