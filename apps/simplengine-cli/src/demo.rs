//! Headless demo game: a row of falling crates and a jumping player above a
//! static floor. Landing is handled here in game logic; the kernel only
//! reports overlaps.

use simplengine_common::Vector2;
use simplengine_input::{InputState, Key};
use simplengine_kernel::{Body, BodyId, RectBody, Scene};
use simplengine_render::SharedCamera;

const FLOOR_Y: f64 = 400.0;
const CRATE_SIZE: f64 = 32.0;
const JUMP_SPEED: f64 = -600.0;
const RUN_SPEED: f64 = 150.0;

pub struct Demo {
    pub scene: Scene,
    pub player: BodyId,
    floor: BodyId,
    landings: u64,
}

impl Demo {
    pub fn new(crates: usize) -> Self {
        let mut scene = Scene::new();
        let floor = scene.spawn(RectBody::new(4000.0, 40.0, -2000.0, FLOOR_Y));

        let mut player = RectBody::new(CRATE_SIZE, CRATE_SIZE * 1.5, 0.0, 0.0);
        player.set_gravity(true);
        player.set_velocity(Vector2::new(RUN_SPEED, 0.0));
        let player = scene.spawn(player);

        for i in 0..crates {
            let x = 80.0 * (i as f64 + 1.0);
            let y = -50.0 * i as f64;
            let mut body = RectBody::new(CRATE_SIZE, CRATE_SIZE, x, y);
            body.set_gravity(true);
            scene.spawn(body);
        }

        Self {
            scene,
            player,
            floor,
            landings: 0,
        }
    }

    /// Number of times any body came to rest on the floor.
    pub fn landings(&self) -> u64 {
        self.landings
    }

    /// One frame of game logic.
    pub fn update(&mut self, dt: f64, input: &InputState, camera: &SharedCamera) {
        if input.is_key_pressed(Key::Space) {
            if let Some(player) = self.scene.get_mut(self.player) {
                let v = player.velocity();
                player.set_velocity(v.with_y(JUMP_SPEED));
                player.set_gravity(true);
                tracing::debug!("player jumped");
            }
        }

        self.scene.step(dt);
        self.settle_on_floor();

        if let Some(player) = self.scene.get(self.player) {
            let target = player.bounds();
            camera.with_mut(|c| {
                c.follow(
                    target.x + target.width / 2.0,
                    target.y + target.height / 2.0,
                    dt,
                )
            });
        }
    }

    /// Rest every body touching the floor on top of it.
    fn settle_on_floor(&mut self) {
        for id in self.scene.collisions_with(self.floor) {
            let Some(body) = self.scene.get_mut(id) else {
                continue;
            };
            if body.velocity().y() < 0.0 {
                // Moving up through the floor edge; leave it alone.
                continue;
            }
            let height = body.bounds().height;
            let falling = body.has_gravity();
            body.set_position(body.position().with_y(FLOOR_Y - height));
            body.set_velocity(body.velocity().with_y(0.0));
            body.set_gravity(false);
            if falling {
                self.landings += 1;
            }
        }
    }
}
