#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Polygon Survivor.

mod buffs;
mod clock;
mod combat;
mod entities;
mod ledger;

use std::{collections::BTreeMap, time::Duration};

use polygon_survivor_core::{
    Aim, Arena, BossAttack, BossId, BossMotion, BulletId, Catalog, Command, EnemyId, EntityId, Event,
    PickupId, PlayerStats, SessionState, ShapeTier, Tuning, Vec2,
};
use tracing::{debug, info, trace};

pub use clock::Clock;
pub use ledger::ScoreLedger;

use buffs::BuffEngine;
use entities::{Boss, Bullet, Enemy, Lcg, Pickup, Player, RotationState};

const ROTATION_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Represents the authoritative Polygon Survivor world state.
#[derive(Debug)]
pub struct World {
    tuning: Tuning,
    arena: Arena,
    catalog: Catalog,
    clock: Clock,
    paused: bool,
    state: SessionState,
    ledger: ScoreLedger,
    player: Player,
    buffs: BuffEngine,
    enemies: BTreeMap<EnemyId, Enemy>,
    bosses: BTreeMap<BossId, Boss>,
    bullets: BTreeMap<BulletId, Bullet>,
    pickups: BTreeMap<PickupId, Pickup>,
    next_enemy_id: u32,
    next_boss_id: u32,
    next_bullet_id: u32,
    next_pickup_id: u32,
    rotation_rng: Lcg,
    tick_index: u64,
}

impl World {
    /// Creates a running world for a player of the provided tier.
    ///
    /// The tuning is assumed to be validated by the caller.
    #[must_use]
    pub fn new(tuning: Tuning, player_tier: ShapeTier) -> Self {
        let arena = Arena::new(tuning.arena.width, tuning.arena.height);
        let stats = PlayerStats::for_tier(player_tier, &tuning.player);
        Self {
            catalog: Catalog::for_player(player_tier),
            player: Player::new(player_tier, stats, arena.center()),
            arena,
            tuning,
            clock: Clock::new(),
            paused: false,
            state: SessionState::Running,
            ledger: ScoreLedger::default(),
            buffs: BuffEngine::default(),
            enemies: BTreeMap::new(),
            bosses: BTreeMap::new(),
            bullets: BTreeMap::new(),
            pickups: BTreeMap::new(),
            next_enemy_id: 0,
            next_boss_id: 0,
            next_bullet_id: 0,
            next_pickup_id: 0,
            rotation_rng: Lcg::new(ROTATION_SEED),
            tick_index: 0,
        }
    }

    fn restart(&mut self, player_tier: ShapeTier, out_events: &mut Vec<Event>) {
        self.buffs.revert_all(&mut self.player, out_events);
        debug_assert_eq!(self.player.bullet_damage, self.player.stats.bullet_damage);

        self.enemies.clear();
        self.bosses.clear();
        self.bullets.clear();
        self.pickups.clear();
        self.clock.reset();
        if self.paused {
            self.paused = false;
            out_events.push(Event::PauseChanged { paused: false });
        }
        self.ledger.reset();
        self.state = SessionState::Running;
        self.catalog = Catalog::for_player(player_tier);
        let stats = PlayerStats::for_tier(player_tier, &self.tuning.player);
        self.player = Player::new(player_tier, stats, self.arena.center());
        self.rotation_rng = Lcg::new(ROTATION_SEED);

        info!(player_tier = player_tier.sides(), "session started");
        out_events.push(Event::SessionStarted { player_tier });
    }

    fn sync_clock(&mut self) {
        let running = !self.paused && self.state == SessionState::Running;
        self.clock.set_running(running);
    }

    pub(crate) fn defeat_player(&mut self, out_events: &mut Vec<Event>) {
        if self.state == SessionState::Defeated {
            return;
        }
        self.state = SessionState::Defeated;
        self.sync_clock();
        let score = self.ledger.score();
        let survived_seconds = self.clock.elapsed_seconds();
        info!(score, survived_seconds, "player defeated");
        out_events.push(Event::PlayerDefeated {
            score,
            survived_seconds,
        });
    }

    fn step_entities(&mut self, dt: Duration) {
        let now = self.clock.elapsed();
        let seconds = dt.as_secs_f32();

        let player = &mut self.player;
        let travel = player.direction * player.speed * seconds;
        player.position = self
            .arena
            .clamp_inset(player.position + travel, player.stats.radius);
        let target = player.position;

        for enemy in self.enemies.values_mut() {
            let heading = (target - enemy.position).normalize_or_zero();
            enemy.position += heading * enemy.archetype.speed * seconds;
            enemy
                .rotation
                .advance(enemy.archetype.rotation, now, dt, &mut self.rotation_rng);
        }

        for boss in self.bosses.values_mut() {
            let speed = boss.phase_speed();
            match boss.motion {
                BossMotion::Chase { speed_multiplier } => {
                    let heading = (target - boss.position).normalize_or_zero();
                    boss.position += heading * speed * speed_multiplier * seconds;
                }
                BossMotion::Hold => {}
                BossMotion::Dash {
                    heading,
                    speed_multiplier,
                } => {
                    boss.position += heading * speed * speed_multiplier * seconds;
                }
            }
        }

        for bullet in self.bullets.values_mut() {
            bullet.position += bullet.velocity * seconds;
        }
    }

    fn fire_bullet(&mut self, origin: Vec2, aim: Aim, out_events: &mut Vec<Event>) {
        let now = self.clock.elapsed();
        if !self.player.can_fire(now) {
            trace!("fire request ignored during fire interval");
            return;
        }

        let heading = match aim {
            Aim::Angle(angle) => Vec2::from_angle(angle),
            Aim::AutoTarget => self
                .nearest_target(origin)
                .map(|target| (target - origin).normalize_or_zero())
                .filter(|heading| *heading != Vec2::ZERO)
                .unwrap_or(Vec2::X),
        };
        let velocity = heading * self.player.stats.bullet_speed;
        let damage = self.player.bullet_damage;
        let bullet = BulletId::new(self.next_bullet_id);
        self.next_bullet_id = self.next_bullet_id.wrapping_add(1);
        let _ = self.bullets.insert(
            bullet,
            Bullet {
                id: bullet,
                position: origin,
                velocity,
                damage,
                expires_at: now.saturating_add(self.tuning.player.bullet_lifetime()),
            },
        );
        self.player.last_fired = Some(now);
        out_events.push(Event::BulletFired {
            bullet,
            origin,
            velocity,
            damage,
        });
    }

    fn nearest_target(&self, origin: Vec2) -> Option<Vec2> {
        self.enemies
            .values()
            .map(|enemy| enemy.position)
            .chain(self.bosses.values().map(|boss| boss.position))
            .min_by(|a, b| {
                a.distance_squared(origin)
                    .total_cmp(&b.distance_squared(origin))
            })
    }

    fn spawn_enemy(&mut self, tier: ShapeTier, position: Vec2, out_events: &mut Vec<Event>) {
        let Some(archetype) = self.catalog.enemy(tier).copied() else {
            debug!(tier = tier.sides(), "no enemy archetype for tier");
            return;
        };
        if self.enemies.len() >= self.tuning.spawning.max_enemies {
            debug!(
                tier = tier.sides(),
                cap = self.tuning.spawning.max_enemies,
                "enemy spawn dropped at cap"
            );
            return;
        }

        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
        let rotation =
            RotationState::new(archetype.rotation, self.clock.elapsed(), &mut self.rotation_rng);
        let _ = self.enemies.insert(
            id,
            Enemy {
                id,
                archetype,
                position,
                health: archetype.health,
                rotation,
            },
        );
        out_events.push(Event::EntitySpawned {
            entity: EntityId::Enemy(id),
            tier,
            position,
        });
    }

    fn spawn_boss(&mut self, tier: ShapeTier, position: Vec2, out_events: &mut Vec<Event>) {
        let Some(archetype) = self.catalog.boss(tier).copied() else {
            debug!(tier = tier.sides(), "no boss archetype for tier");
            return;
        };
        let id = BossId::new(self.next_boss_id);
        self.next_boss_id = self.next_boss_id.wrapping_add(1);
        let _ = self.bosses.insert(id, Boss::new(id, archetype, position));
        info!(?id, tier = tier.sides(), rank = archetype.rank.get(), "boss spawned");
        out_events.push(Event::EntitySpawned {
            entity: EntityId::Boss(id),
            tier,
            position,
        });
    }

    fn expire_timers(&mut self, out_events: &mut Vec<Event>) {
        let now = self.clock.elapsed();

        let lapsed_bullets: Vec<BulletId> = self
            .bullets
            .values()
            .filter(|bullet| bullet.expires_at <= now)
            .map(|bullet| bullet.id)
            .collect();
        for bullet in lapsed_bullets {
            let _ = self.bullets.remove(&bullet);
            out_events.push(Event::BulletExpired { bullet });
        }

        self.buffs.expire(&mut self.player, now, out_events);

        let lapsed_pickups: Vec<PickupId> = self
            .pickups
            .values()
            .filter(|pickup| pickup.expires_at <= now)
            .map(|pickup| pickup.id)
            .collect();
        for pickup in lapsed_pickups {
            let _ = self.pickups.remove(&pickup);
            out_events.push(Event::PickupExpired { pickup });
        }

        for boss in self.bosses.values_mut() {
            if boss.guard_until.is_some_and(|until| until <= now) {
                boss.guard_until = None;
            }
        }
    }

    fn is_live(&self) -> bool {
        self.state == SessionState::Running
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartSession { player_tier } => world.restart(player_tier, out_events),
        Command::SetPaused { paused } => {
            if world.paused == paused {
                return;
            }
            world.paused = paused;
            world.sync_clock();
            out_events.push(Event::PauseChanged { paused });
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            if let Some(dt) = world.clock.advance(dt) {
                out_events.push(Event::TimeAdvanced { dt });
            }
        }
        Command::SetPlayerMotion { direction } => {
            world.player.direction = direction.normalize_or_zero();
        }
        Command::StepEntities { dt } => {
            if world.clock.is_running() {
                world.step_entities(dt);
            }
        }
        Command::FireBullet { origin, aim } => {
            if world.clock.is_running() {
                world.fire_bullet(origin, aim, out_events);
            }
        }
        Command::ResolveCollision { collision } => combat::resolve(world, collision, out_events),
        Command::CollectPickup { pickup } => {
            if !world.clock.is_running() {
                return;
            }
            let Some(collected) = world.pickups.remove(&pickup) else {
                debug!(?pickup, "unknown pickup ignored");
                return;
            };
            out_events.push(Event::PickupCollected {
                pickup,
                kind: collected.kind,
            });
            let now = world.clock.elapsed();
            world.buffs.collect(
                collected.kind,
                &mut world.player,
                now,
                &world.tuning.buffs,
                out_events,
            );
        }
        Command::SpawnEnemy { tier, position } => {
            if world.is_live() {
                world.spawn_enemy(tier, position, out_events);
            }
        }
        Command::SpawnBoss { tier, position } => {
            if world.is_live() {
                world.spawn_boss(tier, position, out_events);
            }
        }
        Command::SpawnPickup { kind, position } => {
            if !world.is_live() {
                return;
            }
            let pickup = PickupId::new(world.next_pickup_id);
            world.next_pickup_id = world.next_pickup_id.wrapping_add(1);
            let expires_at = world
                .clock
                .elapsed()
                .saturating_add(world.tuning.pickups.despawn_after());
            let _ = world.pickups.insert(
                pickup,
                Pickup {
                    id: pickup,
                    kind,
                    position,
                    expires_at,
                },
            );
            out_events.push(Event::PickupSpawned {
                pickup,
                kind,
                position,
            });
        }
        Command::SetBossMotion { boss, motion } => match world.bosses.get_mut(&boss) {
            Some(target) => target.motion = motion,
            None => debug!(?boss, "motion for unknown boss ignored"),
        },
        Command::SetBossInvulnerable { boss, invulnerable } => {
            match world.bosses.get_mut(&boss) {
                Some(target) if target.invulnerable != invulnerable => {
                    target.invulnerable = invulnerable;
                    out_events.push(Event::BossInvulnerabilityChanged { boss, invulnerable });
                }
                Some(_) => {}
                None => debug!(?boss, "invulnerability for unknown boss ignored"),
            }
        }
        Command::SetBossPhase {
            boss,
            phase,
            speed_factor,
        } => match world.bosses.get_mut(&boss) {
            Some(target) if phase > target.phase => {
                target.phase = phase;
                target.speed_factor = speed_factor;
                info!(?boss, phase, "boss phase escalated");
                out_events.push(Event::BossPhaseChanged { boss, phase });
            }
            Some(_) => trace!(?boss, phase, "backward phase change ignored"),
            None => debug!(?boss, "phase for unknown boss ignored"),
        },
        Command::RequestBossAttack { boss, attack } => {
            let Some(tier) = world.bosses.get(&boss).map(|target| target.archetype.tier) else {
                debug!(?boss, "attack for unknown boss ignored");
                return;
            };
            if let BossAttack::SummonMinions { positions } = &attack {
                out_events.push(Event::MinionSpawnRequested {
                    boss,
                    tier,
                    positions: positions.clone(),
                });
            }
            out_events.push(Event::BossAttackRequested { boss, attack });
        }
        Command::ExpireTimers => world.expire_timers(out_events),
    }
}

/// Query helpers that expose read-only world state.
pub mod query {
    use polygon_survivor_core::{
        ActiveBuffSnapshot, Arena, BossSnapshot, BossView, BulletSnapshot, Catalog,
        EnemySnapshot, EnemyView, PickupSnapshot, PlayerSnapshot, SessionState, Tuning,
    };

    use super::{Clock, ScoreLedger, World};

    /// Provides read-only access to the session clock.
    #[must_use]
    pub fn clock(world: &World) -> &Clock {
        &world.clock
    }

    /// Lifecycle of the current run.
    #[must_use]
    pub fn session_state(world: &World) -> SessionState {
        world.state
    }

    /// Reports whether the host paused the clock.
    #[must_use]
    pub fn is_paused(world: &World) -> bool {
        world.paused
    }

    /// Playable area currently in use.
    #[must_use]
    pub fn arena(world: &World) -> Arena {
        world.arena
    }

    /// Tuning the world was created with.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// Enemy and boss archetypes of the current session.
    #[must_use]
    pub fn catalog(world: &World) -> &Catalog {
        &world.catalog
    }

    /// Score and kill tallies of the current run.
    #[must_use]
    pub fn ledger(world: &World) -> &ScoreLedger {
        &world.ledger
    }

    /// Number of ticks submitted since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures the player's current effective stats.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        PlayerSnapshot {
            tier: player.tier,
            position: player.position,
            health: player.health,
            max_health: player.stats.max_health,
            speed: player.speed,
            fire_interval: player.fire_interval,
            bullet_damage: player.bullet_damage,
            bullet_speed: player.stats.bullet_speed,
            radius: player.stats.radius,
            invincible: player.invincible,
        }
    }

    /// Number of live enemies.
    #[must_use]
    pub fn enemy_count(world: &World) -> usize {
        world.enemies.len()
    }

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots = world
            .enemies
            .values()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                tier: enemy.archetype.tier,
                rank: enemy.archetype.rank,
                position: enemy.position,
                health: enemy.health,
                rotation: enemy.rotation.angle,
                radius: enemy.archetype.radius,
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of the live bosses.
    #[must_use]
    pub fn boss_view(world: &World) -> BossView {
        let now = world.clock.elapsed();
        let snapshots = world
            .bosses
            .values()
            .map(|boss| BossSnapshot {
                id: boss.id,
                tier: boss.archetype.tier,
                rank: boss.archetype.rank,
                position: boss.position,
                health: boss.health,
                max_health: boss.archetype.health,
                invulnerable: boss.shielded(now),
                phase: boss.phase,
                special: boss.archetype.special,
                motion: boss.motion,
                radius: boss.archetype.radius,
            })
            .collect();
        BossView::from_snapshots(snapshots)
    }

    /// Captures the live player bullets in identifier order.
    #[must_use]
    pub fn bullets(world: &World) -> Vec<BulletSnapshot> {
        world
            .bullets
            .values()
            .map(|bullet| BulletSnapshot {
                id: bullet.id,
                position: bullet.position,
                velocity: bullet.velocity,
                damage: bullet.damage,
            })
            .collect()
    }

    /// Captures the uncollected pickups in identifier order.
    #[must_use]
    pub fn pickups(world: &World) -> Vec<PickupSnapshot> {
        world
            .pickups
            .values()
            .map(|pickup| PickupSnapshot {
                id: pickup.id,
                kind: pickup.kind,
                position: pickup.position,
                expires_at: pickup.expires_at,
            })
            .collect()
    }

    /// Captures the active buffs in kind order.
    #[must_use]
    pub fn active_buffs(world: &World) -> Vec<ActiveBuffSnapshot> {
        world.buffs.snapshots()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polygon_survivor_core::{BuffKind, Collision};

    fn tier(sides: u8) -> ShapeTier {
        ShapeTier::new(sides).expect("valid tier")
    }

    fn tick(world: &mut World, millis: u64) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::Tick {
                dt: Duration::from_millis(millis),
            },
            &mut events,
        );
        events
    }

    #[test]
    fn paused_ticks_do_not_advance_time() {
        let mut world = World::new(Tuning::default(), tier(3));
        let mut events = Vec::new();
        apply(&mut world, Command::SetPaused { paused: true }, &mut events);
        assert_eq!(events, vec![Event::PauseChanged { paused: true }]);

        assert!(tick(&mut world, 500).is_empty());
        assert_eq!(query::clock(&world).elapsed(), Duration::ZERO);
        assert_eq!(query::tick_index(&world), 1);

        events.clear();
        apply(&mut world, Command::SetPaused { paused: false }, &mut events);
        assert_eq!(
            tick(&mut world, 500),
            vec![Event::TimeAdvanced {
                dt: Duration::from_millis(500)
            }]
        );
    }

    #[test]
    fn restart_from_pause_announces_resume() {
        let mut world = World::new(Tuning::default(), tier(4));
        let mut events = Vec::new();
        apply(&mut world, Command::SetPaused { paused: true }, &mut events);
        assert!(query::is_paused(&world));

        events.clear();
        apply(
            &mut world,
            Command::StartSession {
                player_tier: tier(4),
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![
                Event::PauseChanged { paused: false },
                Event::SessionStarted {
                    player_tier: tier(4),
                },
            ]
        );
        assert!(!query::is_paused(&world));
        assert_eq!(
            tick(&mut world, 100),
            vec![Event::TimeAdvanced {
                dt: Duration::from_millis(100)
            }]
        );
    }

    #[test]
    fn restart_while_running_emits_only_session_start() {
        let mut world = World::new(Tuning::default(), tier(4));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::StartSession {
                player_tier: tier(5),
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::SessionStarted {
                player_tier: tier(5),
            }]
        );
    }

    #[test]
    fn player_motion_is_clamped_inside_arena() {
        let mut world = World::new(Tuning::default(), tier(3));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetPlayerMotion {
                direction: Vec2::new(-3.0, 0.0),
            },
            &mut events,
        );
        for _ in 0..10 {
            apply(
                &mut world,
                Command::StepEntities {
                    dt: Duration::from_secs(1),
                },
                &mut events,
            );
        }
        let player = query::player(&world);
        assert_eq!(player.position, Vec2::new(15.0, 300.0));
    }

    #[test]
    fn fire_requests_respect_fire_interval() {
        let mut world = World::new(Tuning::default(), tier(3));
        let mut events = Vec::new();
        let fire = Command::FireBullet {
            origin: Vec2::new(400.0, 300.0),
            aim: Aim::Angle(0.0),
        };
        apply(&mut world, fire.clone(), &mut events);
        apply(&mut world, fire.clone(), &mut events);
        assert_eq!(query::bullets(&world).len(), 1);

        let _ = tick(&mut world, 499);
        apply(&mut world, fire.clone(), &mut events);
        assert_eq!(query::bullets(&world).len(), 1);

        let _ = tick(&mut world, 1);
        apply(&mut world, fire, &mut events);
        assert_eq!(query::bullets(&world).len(), 2);
    }

    #[test]
    fn auto_target_aims_at_nearest_entity() {
        let mut world = World::new(Tuning::default(), tier(3));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnEnemy {
                tier: tier(4),
                position: Vec2::new(400.0, 100.0),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SpawnEnemy {
                tier: tier(4),
                position: Vec2::new(400.0, 550.0),
            },
            &mut events,
        );
        events.clear();
        apply(
            &mut world,
            Command::FireBullet {
                origin: Vec2::new(400.0, 300.0),
                aim: Aim::AutoTarget,
            },
            &mut events,
        );
        let Some(Event::BulletFired { velocity, .. }) = events.first() else {
            panic!("expected a bullet, got {events:?}");
        };
        assert!(velocity.y < 0.0);
        assert_eq!(velocity.x, 0.0);
    }

    #[test]
    fn auto_target_without_entities_fires_at_angle_zero() {
        let mut world = World::new(Tuning::default(), tier(3));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::FireBullet {
                origin: Vec2::new(400.0, 300.0),
                aim: Aim::AutoTarget,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::BulletFired {
                bullet: BulletId::new(0),
                origin: Vec2::new(400.0, 300.0),
                velocity: Vec2::new(300.0, 0.0),
                damage: 1,
            }]
        );
    }

    #[test]
    fn player_tier_is_excluded_from_spawns() {
        let mut world = World::new(Tuning::default(), tier(5));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnEnemy {
                tier: tier(5),
                position: Vec2::ZERO,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SpawnBoss {
                tier: tier(5),
                position: Vec2::ZERO,
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(query::enemy_count(&world), 0);
    }

    #[test]
    fn pickups_despawn_after_timeout() {
        let mut world = World::new(Tuning::default(), tier(3));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnPickup {
                kind: BuffKind::Haste,
                position: Vec2::new(200.0, 200.0),
            },
            &mut events,
        );
        let _ = tick(&mut world, 9_999);
        events.clear();
        apply(&mut world, Command::ExpireTimers, &mut events);
        assert!(events.is_empty());

        let _ = tick(&mut world, 1);
        apply(&mut world, Command::ExpireTimers, &mut events);
        assert_eq!(
            events,
            vec![Event::PickupExpired {
                pickup: PickupId::new(0)
            }]
        );
        assert!(query::pickups(&world).is_empty());
    }

    #[test]
    fn collisions_are_ignored_while_paused() {
        let mut world = World::new(Tuning::default(), tier(3));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnEnemy {
                tier: tier(4),
                position: Vec2::ZERO,
            },
            &mut events,
        );
        apply(&mut world, Command::SetPaused { paused: true }, &mut events);
        events.clear();
        apply(
            &mut world,
            Command::ResolveCollision {
                collision: Collision::PlayerEnemy {
                    enemy: EnemyId::new(0),
                },
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(query::enemy_count(&world), 1);
    }
}
