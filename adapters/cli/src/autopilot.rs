//! Scripted player and stand-in broad-phase for headless runs.

use std::time::Duration;

use polygon_survivor_core::{
    Aim, BossAttack, BossAttackPayload, Collision, Event, SessionState, Vec2,
};
use polygon_survivor_session::Session;
use polygon_survivor_world::query;
use tracing::debug;

use crate::report::RunReport;

/// Boss projectile simulated by the host, which owns bullet emission.
#[derive(Clone, Debug, PartialEq)]
struct HostProjectile {
    position: Vec2,
    velocity: Vec2,
    damage: u32,
    remaining: Duration,
}

/// Drives a session with evasive motion, constant auto-fire and naive overlap checks.
#[derive(Debug)]
pub(crate) struct Autopilot {
    session: Session,
    projectiles: Vec<HostProjectile>,
}

impl Autopilot {
    pub(crate) fn new(session: Session) -> Self {
        Self {
            session,
            projectiles: Vec::new(),
        }
    }

    /// Plays until `seconds` of session time pass or the player falls.
    pub(crate) fn run(&mut self, seconds: u64, fps: u32, seed: u64) -> RunReport {
        let fps = fps.max(1);
        let dt = 1.0 / fps as f32;
        let frame = Duration::from_secs(1) / fps;
        let _ = self.session.drain_events();

        for _ in 0..seconds.saturating_mul(u64::from(fps)) {
            self.steer();
            self.fire();
            self.collect_pickups();
            self.report_collisions(frame);
            self.session.tick(dt);
            if self.absorb_events() {
                break;
            }
        }

        RunReport::capture(&self.session, seed)
    }

    fn steer(&mut self) {
        let world = self.session.world();
        let player = query::player(world).position;
        let arena = query::arena(world);
        let nearest = query::enemy_view(world)
            .iter()
            .map(|enemy| enemy.position)
            .chain(query::boss_view(world).iter().map(|boss| boss.position))
            .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)));

        let away = nearest
            .map(|threat| (player - threat).normalize_or_zero())
            .unwrap_or(Vec2::ZERO);
        let home = (arena.center() - player) / arena.width.max(arena.height);
        self.session.set_player_motion(away + home);
    }

    fn fire(&mut self) {
        let origin = query::player(self.session.world()).position;
        self.session.request_fire(origin, Aim::AutoTarget);
    }

    fn collect_pickups(&mut self) {
        let world = self.session.world();
        let player = query::player(world);
        let reach = player.radius + query::tuning(world).pickups.radius;
        let in_reach: Vec<_> = query::pickups(world)
            .into_iter()
            .filter(|pickup| pickup.position.distance(player.position) <= reach)
            .map(|pickup| pickup.id)
            .collect();
        for pickup in in_reach {
            self.session.collect_buff(pickup);
        }
    }

    fn report_collisions(&mut self, frame: Duration) {
        let world = self.session.world();
        let player = query::player(world);
        let bullet_radius = query::tuning(world).player.bullet_radius;
        let enemies = query::enemy_view(world).into_vec();
        let bosses = query::boss_view(world).into_vec();
        let mut collisions = Vec::new();

        for bullet in query::bullets(world) {
            let touches = |position: Vec2, radius: f32| {
                position.distance(bullet.position) <= radius + bullet_radius
            };
            let enemy = enemies.iter().find(|enemy| touches(enemy.position, enemy.radius));
            let boss = bosses.iter().find(|boss| touches(boss.position, boss.radius));
            match (enemy, boss) {
                (Some(enemy), _) => collisions.push(Collision::BulletEnemy {
                    bullet: bullet.id,
                    enemy: enemy.id,
                }),
                (None, Some(boss)) => collisions.push(Collision::BulletBoss {
                    bullet: bullet.id,
                    boss: boss.id,
                }),
                (None, None) => {}
            }
        }

        let touches_player = |position: Vec2, radius: f32| {
            position.distance(player.position) <= radius + player.radius
        };
        collisions.extend(
            enemies
                .iter()
                .filter(|enemy| touches_player(enemy.position, enemy.radius))
                .map(|enemy| Collision::PlayerEnemy { enemy: enemy.id }),
        );
        collisions.extend(
            bosses
                .iter()
                .filter(|boss| touches_player(boss.position, boss.radius))
                .map(|boss| Collision::PlayerBoss { boss: boss.id }),
        );

        let seconds = frame.as_secs_f32();
        let mut live = Vec::with_capacity(self.projectiles.len());
        for mut projectile in self.projectiles.drain(..) {
            projectile.position += projectile.velocity * seconds;
            projectile.remaining = projectile.remaining.saturating_sub(frame);
            if touches_player(projectile.position, bullet_radius) {
                collisions.push(Collision::BossAttackPlayer {
                    payload: BossAttackPayload::Projectile {
                        damage: projectile.damage,
                    },
                });
            } else if !projectile.remaining.is_zero() {
                live.push(projectile);
            }
        }
        self.projectiles = live;

        for collision in collisions {
            self.session.notify_collision(collision);
        }
    }

    /// Returns `true` once the run is over.
    fn absorb_events(&mut self) -> bool {
        let lifetime = query::tuning(self.session.world()).player.bullet_lifetime();
        for event in self.session.drain_events() {
            match event {
                Event::BossAttackRequested { boss, attack } => {
                    let BossAttack::RadialBurst { origin, damage, .. } = attack else {
                        continue;
                    };
                    let velocities = attack.projectile_velocities();
                    debug!(?boss, count = velocities.len(), "boss burst");
                    self.projectiles
                        .extend(velocities.into_iter().map(|velocity| HostProjectile {
                            position: origin,
                            velocity,
                            damage,
                            remaining: lifetime,
                        }));
                }
                Event::SessionStarted { .. } => self.projectiles.clear(),
                _ => {}
            }
        }
        self.session.state() == SessionState::Defeated
    }
}
