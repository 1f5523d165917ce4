//! Pairwise AABB collision tests. No broad phase and no contact response.

use crate::body::Body;

/// True when the bounds of `a` and `b` overlap or share an edge.
pub fn intersects<A, B>(a: &A, b: &B) -> bool
where
    A: Body + ?Sized,
    B: Body + ?Sized,
{
    a.bounds().intersects(&b.bounds())
}

/// Index pairs `(i, j)` with `i < j` of every intersecting pair in `bodies`.
pub fn colliding_pairs(bodies: &[&dyn Body]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            if intersects(bodies[i], bodies[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
