#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Host-facing session boundary for the Polygon Survivor engine.
//!
//! A [`Session`] owns the authoritative world together with every pure system
//! and pumps them in a fixed order on each tick:
//!
//! 1. advance the clock,
//! 2. spawn director, pickup schedule, boss behavior,
//! 3. entity motion,
//! 4. collisions reported since the previous tick, in report order,
//! 5. timer expiry (bullets, buffs, pickups).
//!
//! Every event the world broadcasts is fanned out to each system's inbox and
//! to the host outbox drained by [`Session::drain_events`].

use std::time::Duration;

use polygon_survivor_core::{
    Aim, Collision, Command, Event, PickupId, SessionState, ShapeTier, Tuning, TuningError, Vec2,
};
use polygon_survivor_system_boss_behavior::{BehaviorInputs, BossBehavior};
use polygon_survivor_system_pickups::PickupSchedule;
use polygon_survivor_system_spawning::{SpawnDirector, SpawnInputs};
use polygon_survivor_world::{apply, query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

const RNG_STREAM_SPAWNING: &str = "spawning";
const RNG_STREAM_PICKUPS: &str = "pickups";
const RNG_STREAM_PLAYER_TIER: &str = "player-tier";

/// Running game session wiring the world to its systems.
#[derive(Debug)]
pub struct Session {
    world: World,
    director: SpawnDirector,
    behavior: BossBehavior,
    pickups: PickupSchedule,
    tier_rng: ChaCha8Rng,
    director_inbox: Vec<Event>,
    behavior_inbox: Vec<Event>,
    pickup_inbox: Vec<Event>,
    outbox: Vec<Event>,
    pending_collisions: Vec<Collision>,
}

impl Session {
    /// Validates the tuning and starts a session whose randomness derives from `seed`.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;

        let mut tier_rng =
            ChaCha8Rng::seed_from_u64(derive_labeled_seed(seed, RNG_STREAM_PLAYER_TIER));
        let player_tier = draw_tier(&mut tier_rng);

        let mut session = Self {
            director: SpawnDirector::new(
                tuning.spawning.clone(),
                derive_labeled_seed(seed, RNG_STREAM_SPAWNING),
            ),
            behavior: BossBehavior::new(tuning.bosses.clone()),
            pickups: PickupSchedule::new(
                tuning.pickups.clone(),
                derive_labeled_seed(seed, RNG_STREAM_PICKUPS),
            ),
            world: World::new(tuning, player_tier),
            tier_rng,
            director_inbox: Vec::new(),
            behavior_inbox: Vec::new(),
            pickup_inbox: Vec::new(),
            outbox: Vec::new(),
            pending_collisions: Vec::new(),
        };
        info!(seed, tier = player_tier.sides(), "session created");
        let _ = session.submit(Command::StartSession { player_tier });
        Ok(session)
    }

    /// Read-only access to the authoritative world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Lifecycle of the current run.
    #[must_use]
    pub fn state(&self) -> SessionState {
        query::session_state(&self.world)
    }

    /// Current score of the run.
    #[must_use]
    pub fn score(&self) -> u64 {
        query::ledger(&self.world).score()
    }

    /// Advances the session by `delta_seconds` of real time.
    ///
    /// Negative, NaN and unrepresentable deltas advance nothing.
    pub fn tick(&mut self, delta_seconds: f32) {
        let dt = Duration::try_from_secs_f32(delta_seconds.max(0.0)).unwrap_or_default();
        let advanced = self
            .submit(Command::Tick { dt })
            .iter()
            .find_map(|event| match event {
                Event::TimeAdvanced { dt } => Some(*dt),
                _ => None,
            });

        self.run_director();
        self.run_pickups();
        self.run_behavior();

        if let Some(dt) = advanced {
            let _ = self.submit(Command::StepEntities { dt });
        }

        for collision in std::mem::take(&mut self.pending_collisions) {
            let _ = self.submit(Command::ResolveCollision { collision });
        }

        let _ = self.submit(Command::ExpireTimers);
    }

    /// Fires a bullet immediately if the player's fire interval allows it.
    pub fn request_fire(&mut self, origin: Vec2, aim: Aim) {
        let _ = self.submit(Command::FireBullet { origin, aim });
    }

    /// Queues an overlap for resolution during the next tick.
    pub fn notify_collision(&mut self, collision: Collision) {
        self.pending_collisions.push(collision);
    }

    /// Collects the provided pickup on behalf of the player.
    pub fn collect_buff(&mut self, pickup: PickupId) {
        let _ = self.submit(Command::CollectPickup { pickup });
    }

    /// Replaces the player's movement direction.
    pub fn set_player_motion(&mut self, direction: Vec2) {
        let _ = self.submit(Command::SetPlayerMotion { direction });
    }

    /// Pauses or resumes the session clock.
    pub fn set_paused(&mut self, paused: bool) {
        let _ = self.submit(Command::SetPaused { paused });
    }

    /// Restarts with a freshly drawn player tier.
    pub fn restart_session(&mut self) {
        let player_tier = draw_tier(&mut self.tier_rng);
        self.restart_with_tier(player_tier);
    }

    /// Restarts with the provided player tier.
    pub fn restart_with_tier(&mut self, player_tier: ShapeTier) {
        let dropped = self.pending_collisions.len();
        self.pending_collisions.clear();
        self.director_inbox.clear();
        self.behavior_inbox.clear();
        self.pickup_inbox.clear();
        debug!(dropped, "pending collisions discarded on restart");
        let _ = self.submit(Command::StartSession { player_tier });
    }

    /// Takes every event broadcast since the previous drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.outbox)
    }

    fn run_director(&mut self) {
        let events = std::mem::take(&mut self.director_inbox);
        let mut commands = Vec::new();
        self.director.handle(
            &events,
            SpawnInputs {
                now: query::clock(&self.world).elapsed(),
                state: query::session_state(&self.world),
                arena: query::arena(&self.world),
                catalog: query::catalog(&self.world),
                active_enemies: query::enemy_count(&self.world),
            },
            &mut commands,
        );
        self.submit_all(commands);
    }

    fn run_pickups(&mut self) {
        let events = std::mem::take(&mut self.pickup_inbox);
        let mut commands = Vec::new();
        self.pickups.handle(
            &events,
            query::clock(&self.world).elapsed(),
            query::session_state(&self.world),
            query::arena(&self.world),
            &mut commands,
        );
        self.submit_all(commands);
    }

    fn run_behavior(&mut self) {
        let events = std::mem::take(&mut self.behavior_inbox);
        let bosses = query::boss_view(&self.world);
        let mut commands = Vec::new();
        self.behavior.handle(
            &events,
            BehaviorInputs {
                now: query::clock(&self.world).elapsed(),
                state: query::session_state(&self.world),
                bosses: &bosses,
                player_position: query::player(&self.world).position,
            },
            &mut commands,
        );
        self.submit_all(commands);
    }

    fn submit_all(&mut self, commands: Vec<Command>) {
        for command in commands {
            let _ = self.submit(command);
        }
    }

    /// Applies one command and fans the resulting events out.
    fn submit(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(&mut self.world, command, &mut events);
        self.director_inbox.extend(events.iter().cloned());
        self.behavior_inbox.extend(events.iter().cloned());
        self.pickup_inbox.extend(events.iter().cloned());
        self.outbox.extend(events.iter().cloned());
        events
    }
}

fn draw_tier(rng: &mut ChaCha8Rng) -> ShapeTier {
    ShapeTier::ALL[rng.gen_range(0..ShapeTier::ALL.len())]
}

fn derive_labeled_seed(base: u64, label: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(label.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
