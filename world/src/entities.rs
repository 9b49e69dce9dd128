//! Mutable records for everything that moves in the arena.

use std::time::Duration;

use polygon_survivor_core::{
    BossArchetype, BossId, BossMotion, BuffKind, BulletId, EnemyArchetype, EnemyId, PickupId,
    PlayerStats, RotationStyle, ShapeTier, Vec2,
};

/// Frames per second against which per-step rotation rates are expressed.
const ROTATION_STEP_RATE: f32 = 60.0;

#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) tier: ShapeTier,
    pub(crate) stats: PlayerStats,
    pub(crate) position: Vec2,
    pub(crate) direction: Vec2,
    pub(crate) health: u32,
    pub(crate) speed: f32,
    pub(crate) fire_interval: Duration,
    pub(crate) bullet_damage: u32,
    pub(crate) invincible: bool,
    pub(crate) last_fired: Option<Duration>,
    pub(crate) last_contact_damage: Option<Duration>,
}

impl Player {
    pub(crate) fn new(tier: ShapeTier, stats: PlayerStats, position: Vec2) -> Self {
        Self {
            tier,
            stats,
            position,
            direction: Vec2::ZERO,
            health: stats.max_health,
            speed: stats.speed,
            fire_interval: stats.fire_interval,
            bullet_damage: stats.bullet_damage,
            invincible: false,
            last_fired: None,
            last_contact_damage: None,
        }
    }

    pub(crate) fn can_fire(&self, now: Duration) -> bool {
        match self.last_fired {
            Some(last) => now.saturating_sub(last) >= self.fire_interval,
            None => true,
        }
    }

    pub(crate) fn in_contact_cooldown(&self, now: Duration, cooldown: Duration) -> bool {
        self.last_contact_damage
            .is_some_and(|last| now.saturating_sub(last) < cooldown)
    }
}

/// Deterministic generator for cosmetic randomness.
#[derive(Clone, Debug)]
pub(crate) struct Lcg {
    state: u64,
}

impl Lcg {
    const MULTIPLIER: u64 = 6_364_136_223_846_793_005;
    const INCREMENT: u64 = 1;

    pub(crate) const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Uniform value in `[0, 1)`.
    pub(crate) fn next_unit(&mut self) -> f32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        (self.state >> 40) as f32 / (1u64 << 24) as f32
    }
}

#[derive(Clone, Debug)]
pub(crate) struct RotationState {
    pub(crate) angle: f32,
    rate: f32,
    last_change: Duration,
}

impl RotationState {
    pub(crate) fn new(style: RotationStyle, now: Duration, rng: &mut Lcg) -> Self {
        let rate = match style {
            RotationStyle::Steady { rate }
            | RotationStyle::Pulsing { rate }
            | RotationStyle::Oscillating { rate, .. } => rate,
            RotationStyle::Erratic {
                min_rate, max_rate, ..
            } => roll_erratic(min_rate, max_rate, rng),
        };
        Self {
            angle: 0.0,
            rate,
            last_change: now,
        }
    }

    pub(crate) fn advance(&mut self, style: RotationStyle, now: Duration, dt: Duration, rng: &mut Lcg) {
        let steps = dt.as_secs_f32() * ROTATION_STEP_RATE;
        let rate = match style {
            RotationStyle::Steady { rate } => rate,
            RotationStyle::Pulsing { rate } => rate * (0.8 + 0.4 * now.as_secs_f32().sin()),
            RotationStyle::Oscillating { period, .. } => {
                if now.saturating_sub(self.last_change) >= period {
                    self.rate = -self.rate;
                    self.last_change = now;
                }
                self.rate
            }
            RotationStyle::Erratic {
                min_rate,
                max_rate,
                period,
            } => {
                if now.saturating_sub(self.last_change) >= period {
                    self.rate = roll_erratic(min_rate, max_rate, rng);
                    self.last_change = now;
                }
                self.rate
            }
        };
        self.angle = (self.angle + rate * steps).rem_euclid(std::f32::consts::TAU);
    }
}

fn roll_erratic(min_rate: f32, max_rate: f32, rng: &mut Lcg) -> f32 {
    let magnitude = min_rate + (max_rate - min_rate) * rng.next_unit();
    if rng.next_unit() < 0.5 {
        -magnitude
    } else {
        magnitude
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) archetype: EnemyArchetype,
    pub(crate) position: Vec2,
    pub(crate) health: u32,
    pub(crate) rotation: RotationState,
}

#[derive(Clone, Debug)]
pub(crate) struct Boss {
    pub(crate) id: BossId,
    pub(crate) archetype: BossArchetype,
    pub(crate) position: Vec2,
    pub(crate) health: u32,
    pub(crate) motion: BossMotion,
    pub(crate) invulnerable: bool,
    pub(crate) guard_until: Option<Duration>,
    pub(crate) phase: u8,
    pub(crate) speed_factor: f32,
}

impl Boss {
    pub(crate) fn new(id: BossId, archetype: BossArchetype, position: Vec2) -> Self {
        Self {
            id,
            archetype,
            position,
            health: archetype.health,
            motion: BossMotion::default(),
            invulnerable: false,
            guard_until: None,
            phase: 1,
            speed_factor: 1.0,
        }
    }

    /// Whether bullets are absorbed without damage at `now`.
    pub(crate) fn shielded(&self, now: Duration) -> bool {
        self.invulnerable || self.guard_until.is_some_and(|until| now < until)
    }

    pub(crate) fn phase_speed(&self) -> f32 {
        self.archetype.speed * self.speed_factor
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Bullet {
    pub(crate) id: BulletId,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) damage: u32,
    pub(crate) expires_at: Duration,
}

#[derive(Clone, Debug)]
pub(crate) struct Pickup {
    pub(crate) id: PickupId,
    pub(crate) kind: BuffKind,
    pub(crate) position: Vec2,
    pub(crate) expires_at: Duration,
}
