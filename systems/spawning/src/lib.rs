#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawn director responsible for emitting enemy and boss spawn commands.
//!
//! Cadence, unlocks and boss intervals are all derived from absolute session
//! time, so the director needs no countdown state of its own beyond the time
//! of its last regular spawn.

use std::time::Duration;

use polygon_survivor_core::{
    Arena, Catalog, Command, Event, SessionState, SpawnTuning, TierRank, Vec2,
};
use rand::{distributions::WeightedIndex, prelude::Distribution, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

/// Read-only state the director consults on every batch.
#[derive(Clone, Copy, Debug)]
pub struct SpawnInputs<'a> {
    /// Current session time.
    pub now: Duration,
    /// Lifecycle of the current run.
    pub state: SessionState,
    /// Arena whose edges enemies appear beyond.
    pub arena: Arena,
    /// Archetypes of the current session.
    pub catalog: &'a Catalog,
    /// Number of enemies currently alive.
    pub active_enemies: usize,
}

/// Pure system that decides what spawns when, and where.
#[derive(Debug)]
pub struct SpawnDirector {
    tuning: SpawnTuning,
    rng: ChaCha8Rng,
    last_enemy_spawn: Duration,
    unlocked_ranks: usize,
    last_boss_interval: u64,
    boss_level: u8,
}

impl SpawnDirector {
    /// Creates a director using the supplied tuning and seed.
    #[must_use]
    pub fn new(tuning: SpawnTuning, seed: u64) -> Self {
        Self {
            tuning,
            rng: ChaCha8Rng::seed_from_u64(seed),
            last_enemy_spawn: Duration::ZERO,
            unlocked_ranks: 1,
            last_boss_interval: 0,
            boss_level: 0,
        }
    }

    /// Number of enemy ranks currently eligible for spawning.
    #[must_use]
    pub const fn unlocked_ranks(&self) -> usize {
        self.unlocked_ranks
    }

    /// Number of bosses spawned so far, capped at the number of ranks.
    #[must_use]
    pub const fn boss_level(&self) -> u8 {
        self.boss_level
    }

    /// Consumes events and immutable views to emit spawn commands.
    pub fn handle(&mut self, events: &[Event], inputs: SpawnInputs<'_>, out: &mut Vec<Command>) {
        let events = match events
            .iter()
            .rposition(|event| matches!(event, Event::SessionStarted { .. }))
        {
            Some(start) => {
                self.reset();
                &events[start + 1..]
            }
            None => events,
        };

        if inputs.state != SessionState::Running {
            return;
        }

        let mut active = inputs.active_enemies;
        self.honor_minion_requests(events, &mut active, out);
        self.unlock_ranks(inputs.now);
        self.spawn_enemy(&inputs, &mut active, out);
        self.spawn_boss(&inputs, out);
    }

    fn reset(&mut self) {
        self.last_enemy_spawn = Duration::ZERO;
        self.unlocked_ranks = 1;
        self.last_boss_interval = 0;
        self.boss_level = 0;
    }

    fn honor_minion_requests(&self, events: &[Event], active: &mut usize, out: &mut Vec<Command>) {
        for event in events {
            let Event::MinionSpawnRequested {
                boss,
                tier,
                positions,
            } = event
            else {
                continue;
            };
            for position in positions {
                if *active >= self.tuning.max_enemies {
                    debug!(?boss, "minion spawn dropped at cap");
                    continue;
                }
                *active += 1;
                out.push(Command::SpawnEnemy {
                    tier: *tier,
                    position: *position,
                });
            }
        }
    }

    fn unlock_ranks(&mut self, now: Duration) {
        let target = self.tuning.unlocked_ranks_at(now);
        while self.unlocked_ranks < target {
            self.unlocked_ranks += 1;
            debug!(rank = self.unlocked_ranks, ?now, "enemy rank unlocked");
        }
    }

    fn spawn_enemy(&mut self, inputs: &SpawnInputs<'_>, active: &mut usize, out: &mut Vec<Command>) {
        let interval = self.tuning.enemy_interval_at(inputs.now);
        if inputs.now.saturating_sub(self.last_enemy_spawn) < interval {
            return;
        }
        self.last_enemy_spawn = inputs.now;

        if *active >= self.tuning.max_enemies {
            debug!(cap = self.tuning.max_enemies, "enemy spawn dropped at cap");
            return;
        }

        let rank = self.select_rank(inputs.catalog);
        let tier = inputs.catalog.enemy_by_rank(rank).tier;
        let position = edge_position(&mut self.rng, inputs.arena, self.tuning.enemy_margin);
        trace!(tier = tier.sides(), ?interval, "enemy spawn");
        *active += 1;
        out.push(Command::SpawnEnemy { tier, position });
    }

    fn select_rank(&mut self, catalog: &Catalog) -> TierRank {
        let eligible = &TierRank::ALL[..self.unlocked_ranks.clamp(1, TierRank::COUNT)];
        let weights = eligible
            .iter()
            .map(|rank| catalog.enemy_by_rank(*rank).spawn_weight());
        match WeightedIndex::new(weights) {
            Ok(distribution) => eligible[distribution.sample(&mut self.rng)],
            Err(_) => eligible[0],
        }
    }

    fn spawn_boss(&mut self, inputs: &SpawnInputs<'_>, out: &mut Vec<Command>) {
        let interval = self.tuning.boss_intervals_at(inputs.now);
        if interval == 0 || interval <= self.last_boss_interval {
            return;
        }
        self.last_boss_interval = interval;

        let rank = if (self.boss_level as usize) < TierRank::COUNT {
            self.boss_level += 1;
            TierRank::ALL[self.boss_level as usize - 1]
        } else {
            TierRank::ALL[self.rng.gen_range(0..TierRank::COUNT)]
        };
        let tier = inputs.catalog.boss_by_rank(rank).tier;
        let position = edge_position(&mut self.rng, inputs.arena, self.tuning.boss_margin);
        out.push(Command::SpawnBoss { tier, position });
    }
}

/// Uniform point just outside one of the four arena edges.
fn edge_position(rng: &mut ChaCha8Rng, arena: Arena, margin: f32) -> Vec2 {
    match rng.gen_range(0..4) {
        0 => Vec2::new(rng.gen_range(0.0..=arena.width), -margin),
        1 => Vec2::new(rng.gen_range(0.0..=arena.width), arena.height + margin),
        2 => Vec2::new(-margin, rng.gen_range(0.0..=arena.height)),
        _ => Vec2::new(arena.width + margin, rng.gen_range(0.0..=arena.height)),
    }
}
