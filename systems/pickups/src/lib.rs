#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded schedule that drops buff pickups into the arena.

use std::time::Duration;

use polygon_survivor_core::{Arena, BuffKind, Command, Event, PickupTuning, SessionState, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Pure system emitting `Command::SpawnPickup` on a fixed cadence.
#[derive(Debug)]
pub struct PickupSchedule {
    tuning: PickupTuning,
    rng: ChaCha8Rng,
    spawned: u64,
}

impl PickupSchedule {
    /// Creates a schedule using the supplied tuning and seed.
    #[must_use]
    pub fn new(tuning: PickupTuning, seed: u64) -> Self {
        Self {
            tuning,
            rng: ChaCha8Rng::seed_from_u64(seed),
            spawned: 0,
        }
    }

    /// Number of pickups scheduled since the session started.
    #[must_use]
    pub const fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Emits at most one pickup per batch once the next slot is due.
    pub fn handle(
        &mut self,
        events: &[Event],
        now: Duration,
        state: SessionState,
        arena: Arena,
        out: &mut Vec<Command>,
    ) {
        if events
            .iter()
            .any(|event| matches!(event, Event::SessionStarted { .. }))
        {
            self.spawned = 0;
        }

        if state != SessionState::Running {
            return;
        }

        let due = self.slots_due(now);
        if due <= self.spawned {
            return;
        }
        self.spawned = due;

        let kind = BuffKind::ALL[self.rng.gen_range(0..BuffKind::ALL.len())];
        let position = self.inset_position(arena);
        debug!(?kind, ?now, "pickup scheduled");
        out.push(Command::SpawnPickup { kind, position });
    }

    fn slots_due(&self, now: Duration) -> u64 {
        let first = Duration::from_millis(self.tuning.first_spawn_ms);
        if now < first {
            return 0;
        }
        let since = (now - first).as_millis();
        let period = u128::from(self.tuning.spawn_period_ms.max(1));
        u64::try_from(since / period).unwrap_or(u64::MAX).saturating_add(1)
    }

    fn inset_position(&mut self, arena: Arena) -> Vec2 {
        let margin = self.tuning.margin;
        Vec2::new(
            inset_coordinate(&mut self.rng, arena.width, margin),
            inset_coordinate(&mut self.rng, arena.height, margin),
        )
    }
}

fn inset_coordinate(rng: &mut ChaCha8Rng, extent: f32, margin: f32) -> f32 {
    let low = margin;
    let high = extent - margin;
    if high > low {
        rng.gen_range(low..=high)
    } else {
        extent * 0.5
    }
}
