use serde::{Deserialize, Serialize};
use simplengine_common::DrawContext;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::body::Body;

/// Unique identifier for a body in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub Uuid);

impl BodyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BodyId {
    fn default() -> Self {
        Self::new()
    }
}

/// A collection of bodies advanced together.
///
/// Game logic owns the scene and typically steps it from the scheduler's
/// update callback. Uses BTreeMap so stepping, drawing and collision queries
/// visit bodies in a stable order.
#[derive(Debug, Default)]
pub struct Scene {
    bodies: BTreeMap<BodyId, Box<dyn Body>>,
    tick: u64,
    /// Total simulated seconds.
    elapsed: f64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed `step` calls.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Add a body. Returns its id.
    pub fn spawn(&mut self, body: impl Body + 'static) -> BodyId {
        let id = BodyId::new();
        self.bodies.insert(id, Box::new(body));
        id
    }

    /// Remove a body. Returns it if it existed.
    pub fn despawn(&mut self, id: BodyId) -> Option<Box<dyn Body>> {
        self.bodies.remove(&id)
    }

    pub fn get(&self, id: BodyId) -> Option<&dyn Body> {
        self.bodies.get(&id).map(|b| b.as_ref())
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut (dyn Body + 'static)> {
        self.bodies.get_mut(&id).map(|b| b.as_mut())
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &dyn Body)> {
        self.bodies.iter().map(|(id, b)| (*id, b.as_ref()))
    }

    /// Integrate every body by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        for body in self.bodies.values_mut() {
            body.update(dt);
        }
        self.tick += 1;
        self.elapsed += dt;
        tracing::trace!(tick = self.tick, dt, bodies = self.bodies.len(), "scene stepped");
    }

    /// Every intersecting pair of bodies, each pair reported once.
    pub fn colliding_pairs(&self) -> Vec<(BodyId, BodyId)> {
        let entries: Vec<(BodyId, &dyn Body)> = self.iter().collect();
        let bodies: Vec<&dyn Body> = entries.iter().map(|(_, b)| *b).collect();
        crate::collision::colliding_pairs(&bodies)
            .into_iter()
            .map(|(i, j)| (entries[i].0, entries[j].0))
            .collect()
    }

    /// Bodies intersecting `id`, excluding itself.
    pub fn collisions_with(&self, id: BodyId) -> Vec<BodyId> {
        let Some(target) = self.get(id) else {
            return Vec::new();
        };
        self.iter()
            .filter(|(other, body)| *other != id && target.intersects(*body))
            .map(|(other, _)| other)
            .collect()
    }

    /// Submit draw commands for every body in world space.
    pub fn draw(&self, ctx: &mut dyn DrawContext) {
        for body in self.bodies.values() {
            body.draw(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::RectBody;
    use simplengine_common::Vector2;

    #[test]
    fn scene_starts_empty() {
        let s = Scene::new();
        assert_eq!(s.tick(), 0);
        assert!(s.is_empty());
    }

    #[test]
    fn spawn_and_despawn() {
        let mut s = Scene::new();
        let id = s.spawn(RectBody::new(10.0, 10.0, 0.0, 0.0));
        assert_eq!(s.len(), 1);
        assert!(s.get(id).is_some());

        let body = s.despawn(id);
        assert!(body.is_some());
        assert!(s.is_empty());
        assert!(s.despawn(id).is_none());
    }

    #[test]
    fn step_integrates_all_bodies() {
        let mut s = Scene::new();
        let mut moving = RectBody::new(10.0, 10.0, 0.0, 0.0);
        moving.set_velocity(Vector2::new(60.0, 0.0));
        let a = s.spawn(moving);
        let mut falling = RectBody::new(10.0, 10.0, 0.0, 0.0);
        falling.set_gravity(true);
        let b = s.spawn(falling);

        s.step(0.5);
        s.step(0.5);

        assert_eq!(s.tick(), 2);
        assert!((s.elapsed() - 1.0).abs() < 1e-12);
        assert!((s.get(a).unwrap().position().x() - 60.0).abs() < 1e-9);
        assert!(s.get(b).unwrap().position().y() > 0.0);
    }

    #[test]
    fn get_mut_allows_steering() {
        let mut s = Scene::new();
        let id = s.spawn(RectBody::new(10.0, 10.0, 0.0, 0.0));
        s.get_mut(id).unwrap().set_velocity(Vector2::new(0.0, -10.0));
        s.step(1.0);
        assert_eq!(s.get(id).unwrap().position(), Vector2::new(0.0, -10.0));
    }

    #[test]
    fn colliding_pairs_reports_touching_bodies() {
        let mut s = Scene::new();
        let a = s.spawn(RectBody::new(100.0, 50.0, 0.0, 0.0));
        let b = s.spawn(RectBody::new(50.0, 50.0, 100.0, 0.0));
        let c = s.spawn(RectBody::new(50.0, 50.0, 151.0, 100.0));

        let pairs = s.colliding_pairs();
        assert_eq!(pairs.len(), 1);
        let (x, y) = pairs[0];
        assert!((x == a && y == b) || (x == b && y == a));

        assert_eq!(s.collisions_with(a), vec![b]);
        assert!(s.collisions_with(c).is_empty());
        assert!(s.collisions_with(BodyId::new()).is_empty());
    }

    #[test]
    fn iteration_is_ordered_by_id() {
        let mut s = Scene::new();
        for i in 0..50 {
            s.spawn(RectBody::new(1.0, 1.0, i as f64, 0.0));
        }
        let ids: Vec<BodyId> = s.iter().map(|(id, _)| id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }
}
