//! Tunable constants for every system, loadable from partial TOML documents.
//!
//! Durations are expressed in milliseconds and converted to [`Duration`] by
//! the accessor helpers.

use std::time::Duration;

use serde::Deserialize;

use crate::{BuffKind, TierRank};

/// Aggregated tuning knobs for a session.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Tuning {
    /// Playable area.
    pub arena: ArenaTuning,
    /// Enemy and boss cadence, unlocks and caps.
    pub spawning: SpawnTuning,
    /// Player stat formula inputs and combat windows.
    pub player: PlayerTuning,
    /// Buff durations and multipliers.
    pub buffs: BuffTuning,
    /// Pickup schedule.
    pub pickups: PickupTuning,
    /// Boss special-attack timers and parameters.
    pub bosses: BossTuning,
}

impl Tuning {
    /// Checks every section, reporting the first offending field.
    pub fn validate(&self) -> Result<(), TuningError> {
        self.arena.validate()?;
        self.spawning.validate()?;
        self.player.validate()?;
        self.buffs.validate()?;
        self.pickups.validate()?;
        self.bosses.validate()
    }
}

/// Reasons a tuning document is rejected.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum TuningError {
    /// Arena sides must be positive and finite.
    #[error("arena dimensions must be positive and finite, got {width}x{height}")]
    InvalidArena {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// The enemy spawn interval floor lies above its starting value.
    #[error("enemy spawn floor {floor_ms}ms exceeds the base interval {base_ms}ms")]
    SpawnFloorAboveBase {
        /// Configured floor.
        floor_ms: u64,
        /// Configured base interval.
        base_ms: u64,
    },
    /// A period, duration or count was zero.
    #[error("`{field}` must be greater than zero")]
    ZeroValue {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A multiplier or distance was non-positive or not finite.
    #[error("`{field}` must be positive and finite, got {value}")]
    InvalidFactor {
        /// Name of the offending field.
        field: &'static str,
        /// Configured value.
        value: f32,
    },
    /// Phase thresholds must descend strictly inside (0, 1).
    #[error("phase thresholds must descend strictly within (0, 1), got {thresholds:?}")]
    PhaseThresholds {
        /// Configured thresholds.
        thresholds: [f32; 3],
    },
}

fn require_nonzero(value: u64, field: &'static str) -> Result<(), TuningError> {
    if value == 0 {
        Err(TuningError::ZeroValue { field })
    } else {
        Ok(())
    }
}

fn require_positive(value: f32, field: &'static str) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::InvalidFactor { field, value })
    }
}

/// Playable area dimensions.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArenaTuning {
    /// Width in world units.
    pub width: f32,
    /// Height in world units.
    pub height: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl ArenaTuning {
    fn validate(&self) -> Result<(), TuningError> {
        let valid = |side: f32| side.is_finite() && side > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(TuningError::InvalidArena {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Enemy cadence, tier unlocks, boss cadence and the concurrency cap.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnTuning {
    /// Enemy spawn interval at session start.
    pub enemy_interval_base_ms: u64,
    /// Enemy spawn interval lower bound.
    pub enemy_interval_floor_ms: u64,
    /// Interval reduction applied per decay period of elapsed time.
    pub enemy_interval_decay_ms: u64,
    /// Elapsed time over which one decay step accrues.
    pub decay_period_ms: u64,
    /// Elapsed time between successive tier unlocks.
    pub tier_unlock_period_ms: u64,
    /// Elapsed time between boss spawns.
    pub boss_period_ms: u64,
    /// Most enemies alive at once; further spawns are dropped.
    pub max_enemies: usize,
    /// Distance outside the arena at which enemies appear.
    pub enemy_margin: f32,
    /// Distance outside the arena at which bosses appear.
    pub boss_margin: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            enemy_interval_base_ms: 1_000,
            enemy_interval_floor_ms: 500,
            enemy_interval_decay_ms: 150,
            decay_period_ms: 30_000,
            tier_unlock_period_ms: 30_000,
            boss_period_ms: 30_000,
            max_enemies: 100,
            enemy_margin: 50.0,
            boss_margin: 100.0,
        }
    }
}

impl SpawnTuning {
    /// Enemy spawn interval at the provided elapsed time.
    ///
    /// Decays linearly and continuously, never dropping below the floor.
    #[must_use]
    pub fn enemy_interval_at(&self, elapsed: Duration) -> Duration {
        let base = Duration::from_millis(self.enemy_interval_base_ms).as_nanos();
        let floor = Duration::from_millis(self.enemy_interval_floor_ms).as_nanos();
        let decay = elapsed
            .as_nanos()
            .saturating_mul(u128::from(self.enemy_interval_decay_ms))
            / u128::from(self.decay_period_ms.max(1));
        let interval = base.saturating_sub(decay).max(floor);
        Duration::from_nanos(u64::try_from(interval).unwrap_or(u64::MAX))
    }

    /// Number of enemy ranks spawnable at the provided elapsed time.
    #[must_use]
    pub fn unlocked_ranks_at(&self, elapsed: Duration) -> usize {
        let intervals = elapsed.as_millis() / u128::from(self.tier_unlock_period_ms.max(1));
        let unlocked = 1u128.saturating_add(intervals);
        unlocked.min(TierRank::COUNT as u128) as usize
    }

    /// Number of whole boss periods contained in the provided elapsed time.
    #[must_use]
    pub fn boss_intervals_at(&self, elapsed: Duration) -> u64 {
        let intervals = elapsed.as_millis() / u128::from(self.boss_period_ms.max(1));
        u64::try_from(intervals).unwrap_or(u64::MAX)
    }

    fn validate(&self) -> Result<(), TuningError> {
        require_nonzero(self.enemy_interval_floor_ms, "spawning.enemy_interval_floor_ms")?;
        if self.enemy_interval_floor_ms > self.enemy_interval_base_ms {
            return Err(TuningError::SpawnFloorAboveBase {
                floor_ms: self.enemy_interval_floor_ms,
                base_ms: self.enemy_interval_base_ms,
            });
        }
        require_nonzero(self.decay_period_ms, "spawning.decay_period_ms")?;
        require_nonzero(self.tier_unlock_period_ms, "spawning.tier_unlock_period_ms")?;
        require_nonzero(self.boss_period_ms, "spawning.boss_period_ms")?;
        require_nonzero(self.max_enemies as u64, "spawning.max_enemies")?;
        require_positive(self.enemy_margin, "spawning.enemy_margin")?;
        require_positive(self.boss_margin, "spawning.boss_margin")
    }
}

/// Player stat formula inputs and combat windows.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerTuning {
    /// Health at session start.
    pub max_health: u32,
    /// Movement speed of a triangle.
    pub base_speed: f32,
    /// Speed lost between a triangle and an octagon.
    pub speed_falloff: f32,
    /// Bullet speed of a triangle.
    pub base_bullet_speed: f32,
    /// Bullet speed gained between a triangle and an octagon.
    pub bullet_speed_gain: f32,
    /// Minimum time between shots.
    pub fire_interval_ms: u64,
    /// Damage of each bullet.
    pub bullet_damage: u32,
    /// Collision radius of the player body.
    pub radius: f32,
    /// Collision radius of player bullets.
    pub bullet_radius: f32,
    /// Time a bullet lives before expiring.
    pub bullet_lifetime_ms: u64,
    /// Window after contact damage during which further contact damage is suppressed.
    pub contact_cooldown_ms: u64,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            base_speed: 160.0,
            speed_falloff: 40.0,
            base_bullet_speed: 300.0,
            bullet_speed_gain: 100.0,
            fire_interval_ms: 500,
            bullet_damage: 1,
            radius: 15.0,
            bullet_radius: 6.0,
            bullet_lifetime_ms: 2_000,
            contact_cooldown_ms: 500,
        }
    }
}

impl PlayerTuning {
    /// Time a bullet lives before expiring.
    #[must_use]
    pub fn bullet_lifetime(&self) -> Duration {
        Duration::from_millis(self.bullet_lifetime_ms)
    }

    /// Contact damage suppression window.
    #[must_use]
    pub fn contact_cooldown(&self) -> Duration {
        Duration::from_millis(self.contact_cooldown_ms)
    }

    fn validate(&self) -> Result<(), TuningError> {
        require_nonzero(u64::from(self.max_health), "player.max_health")?;
        require_positive(self.base_speed - self.speed_falloff, "player.base_speed")?;
        require_positive(self.base_bullet_speed, "player.base_bullet_speed")?;
        require_nonzero(self.fire_interval_ms, "player.fire_interval_ms")?;
        require_positive(self.radius, "player.radius")?;
        require_positive(self.bullet_radius, "player.bullet_radius")?;
        require_nonzero(self.bullet_lifetime_ms, "player.bullet_lifetime_ms")
    }
}

/// Buff durations and multipliers.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BuffTuning {
    /// Duration of [`BuffKind::DoubleDamage`].
    pub double_damage_ms: u64,
    /// Duration of [`BuffKind::RapidFire`].
    pub rapid_fire_ms: u64,
    /// Duration of [`BuffKind::Haste`].
    pub haste_ms: u64,
    /// Duration of [`BuffKind::Shield`].
    pub shield_ms: u64,
    /// Bullet damage multiplier of [`BuffKind::DoubleDamage`].
    pub damage_multiplier: u32,
    /// Fire interval divisor of [`BuffKind::RapidFire`].
    pub fire_interval_divisor: u32,
    /// Movement speed multiplier of [`BuffKind::Haste`].
    pub speed_multiplier: f32,
}

impl Default for BuffTuning {
    fn default() -> Self {
        Self {
            double_damage_ms: 10_000,
            rapid_fire_ms: 8_000,
            haste_ms: 12_000,
            shield_ms: 15_000,
            damage_multiplier: 2,
            fire_interval_divisor: 2,
            speed_multiplier: 1.5,
        }
    }
}

impl BuffTuning {
    /// Active lifetime of a buff kind.
    #[must_use]
    pub fn duration(&self, kind: BuffKind) -> Duration {
        let millis = match kind {
            BuffKind::DoubleDamage => self.double_damage_ms,
            BuffKind::RapidFire => self.rapid_fire_ms,
            BuffKind::Haste => self.haste_ms,
            BuffKind::Shield => self.shield_ms,
        };
        Duration::from_millis(millis)
    }

    fn validate(&self) -> Result<(), TuningError> {
        require_nonzero(self.double_damage_ms, "buffs.double_damage_ms")?;
        require_nonzero(self.rapid_fire_ms, "buffs.rapid_fire_ms")?;
        require_nonzero(self.haste_ms, "buffs.haste_ms")?;
        require_nonzero(self.shield_ms, "buffs.shield_ms")?;
        require_nonzero(u64::from(self.damage_multiplier), "buffs.damage_multiplier")?;
        require_nonzero(
            u64::from(self.fire_interval_divisor),
            "buffs.fire_interval_divisor",
        )?;
        require_positive(self.speed_multiplier, "buffs.speed_multiplier")
    }
}

/// Timing and placement of buff pickups.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PickupTuning {
    /// Session time of the first pickup.
    pub first_spawn_ms: u64,
    /// Time between subsequent pickups.
    pub spawn_period_ms: u64,
    /// Time an uncollected pickup stays in the arena.
    pub despawn_ms: u64,
    /// Inset from the arena edges inside which pickups are placed.
    pub margin: f32,
    /// Collection radius of a pickup.
    pub radius: f32,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            first_spawn_ms: 60_000,
            spawn_period_ms: 20_000,
            despawn_ms: 10_000,
            margin: 100.0,
            radius: 15.0,
        }
    }
}

impl PickupTuning {
    /// Time an uncollected pickup stays in the arena.
    #[must_use]
    pub fn despawn_after(&self) -> Duration {
        Duration::from_millis(self.despawn_ms)
    }

    fn validate(&self) -> Result<(), TuningError> {
        require_nonzero(self.spawn_period_ms, "pickups.spawn_period_ms")?;
        require_nonzero(self.despawn_ms, "pickups.despawn_ms")?;
        require_positive(self.margin, "pickups.margin")?;
        require_positive(self.radius, "pickups.radius")
    }
}

/// Boss special-attack timers and parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BossTuning {
    /// Special-attack period per rank, before any phase escalation.
    pub attack_period_ms: [u64; 5],
    /// Hold time before a dash, with the target already locked.
    pub dash_charge_ms: u64,
    /// Length of a dash.
    pub dash_duration_ms: u64,
    /// Speed multiplier applied while dashing.
    pub dash_speed_multiplier: f32,
    /// Horizontal and vertical offset of summoned minions from the boss.
    pub minion_offset: f32,
    /// Projectiles in a rank-3 radial burst.
    pub burst_projectiles: u32,
    /// Speed of boss projectiles.
    pub projectile_speed: f32,
    /// Damage of each boss projectile.
    pub projectile_damage: u32,
    /// Length of the rank-4 invulnerable window.
    pub fortify_duration_ms: u64,
    /// Chase speed multiplier during the invulnerable window.
    pub fortify_speed_multiplier: f32,
    /// Rank-4 invulnerability after surviving a bullet hit.
    pub hit_guard_ms: u64,
    /// Health fractions at which a rank-5 boss enters phases 2, 3 and 4.
    pub phase_thresholds: [f32; 3],
    /// Chase speed factor multiplied in on entering phases 2, 3 and 4.
    pub phase_speed_factors: [f32; 3],
    /// Special-attack period of phases 2, 3 and 4.
    pub phase_periods_ms: [u64; 3],
    /// Ring size of phases 1 through 4.
    pub phase_ring_projectiles: [u32; 4],
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            attack_period_ms: [8_000, 10_000, 9_000, 12_000, 15_000],
            dash_charge_ms: 500,
            dash_duration_ms: 500,
            dash_speed_multiplier: 3.0,
            minion_offset: 50.0,
            burst_projectiles: 8,
            projectile_speed: 150.0,
            projectile_damage: 1,
            fortify_duration_ms: 3_000,
            fortify_speed_multiplier: 1.5,
            hit_guard_ms: 1_500,
            phase_thresholds: [0.7, 0.4, 0.2],
            phase_speed_factors: [1.2, 1.2, 1.3],
            phase_periods_ms: [4_000, 3_000, 2_000],
            phase_ring_projectiles: [4, 4, 6, 8],
        }
    }
}

impl BossTuning {
    /// Special-attack period of a boss of `rank` in `phase` (starting at 1).
    #[must_use]
    pub fn attack_period(&self, rank: TierRank, phase: u8) -> Duration {
        let millis = match phase {
            0 | 1 => self.attack_period_ms[rank.index()],
            later => {
                let index = usize::from(later - 2).min(self.phase_periods_ms.len() - 1);
                self.phase_periods_ms[index]
            }
        };
        Duration::from_millis(millis)
    }

    /// Rank-4 invulnerability after surviving a bullet hit.
    #[must_use]
    pub fn hit_guard(&self) -> Duration {
        Duration::from_millis(self.hit_guard_ms)
    }

    fn validate(&self) -> Result<(), TuningError> {
        for period in self.attack_period_ms {
            require_nonzero(period, "bosses.attack_period_ms")?;
        }
        for period in self.phase_periods_ms {
            require_nonzero(period, "bosses.phase_periods_ms")?;
        }
        require_nonzero(self.dash_duration_ms, "bosses.dash_duration_ms")?;
        require_nonzero(self.fortify_duration_ms, "bosses.fortify_duration_ms")?;
        require_nonzero(u64::from(self.burst_projectiles), "bosses.burst_projectiles")?;
        require_positive(self.dash_speed_multiplier, "bosses.dash_speed_multiplier")?;
        require_positive(self.fortify_speed_multiplier, "bosses.fortify_speed_multiplier")?;
        require_positive(self.projectile_speed, "bosses.projectile_speed")?;
        for factor in self.phase_speed_factors {
            require_positive(factor, "bosses.phase_speed_factors")?;
        }

        let [first, second, third] = self.phase_thresholds;
        let descending = first < 1.0 && first > second && second > third && third > 0.0;
        if descending {
            Ok(())
        } else {
            Err(TuningError::PhaseThresholds {
                thresholds: self.phase_thresholds,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_secs(seconds: f64) -> Duration {
        Duration::from_secs_f64(seconds)
    }

    #[test]
    fn enemy_interval_decays_continuously() {
        let spawning = SpawnTuning::default();
        assert_eq!(spawning.enemy_interval_at(Duration::ZERO), Duration::from_millis(1_000));
        assert_eq!(spawning.enemy_interval_at(at_secs(30.0)), Duration::from_millis(850));
        assert_eq!(spawning.enemy_interval_at(at_secs(15.0)), Duration::from_millis(925));
    }

    #[test]
    fn enemy_interval_never_drops_below_floor() {
        let spawning = SpawnTuning::default();
        assert_eq!(spawning.enemy_interval_at(at_secs(100.0)), Duration::from_millis(500));
        assert_eq!(spawning.enemy_interval_at(at_secs(3_600.0)), Duration::from_millis(500));
    }

    #[test]
    fn ranks_unlock_on_thirty_second_boundaries() {
        let spawning = SpawnTuning::default();
        assert_eq!(spawning.unlocked_ranks_at(Duration::ZERO), 1);
        assert_eq!(spawning.unlocked_ranks_at(Duration::from_millis(29_999)), 1);
        assert_eq!(spawning.unlocked_ranks_at(at_secs(30.0)), 2);
        assert_eq!(spawning.unlocked_ranks_at(at_secs(60.0)), 3);
        assert_eq!(spawning.unlocked_ranks_at(at_secs(90.0)), 4);
        assert_eq!(spawning.unlocked_ranks_at(at_secs(120.0)), 5);
        assert_eq!(spawning.unlocked_ranks_at(at_secs(600.0)), 5);
    }

    #[test]
    fn phase_periods_replace_rank_period() {
        let bosses = BossTuning::default();
        let rank = TierRank::ALL[4];
        assert_eq!(bosses.attack_period(rank, 1), Duration::from_secs(15));
        assert_eq!(bosses.attack_period(rank, 2), Duration::from_secs(4));
        assert_eq!(bosses.attack_period(rank, 4), Duration::from_secs(2));
        assert_eq!(bosses.attack_period(TierRank::ALL[0], 1), Duration::from_secs(8));
    }

    #[test]
    fn default_tuning_validates() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_floor_above_base() {
        let mut tuning = Tuning::default();
        tuning.spawning.enemy_interval_floor_ms = 1_500;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::SpawnFloorAboveBase {
                floor_ms: 1_500,
                base_ms: 1_000
            })
        );
    }

    #[test]
    fn rejects_unsorted_phase_thresholds() {
        let mut tuning = Tuning::default();
        tuning.bosses.phase_thresholds = [0.4, 0.7, 0.2];
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::PhaseThresholds { .. })
        ));
    }

    #[test]
    fn rejects_zero_buff_duration() {
        let mut tuning = Tuning::default();
        tuning.buffs.shield_ms = 0;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::ZeroValue {
                field: "buffs.shield_ms"
            })
        );
    }

    #[test]
    fn partial_toml_overrides_named_fields_only() {
        let document = r#"
            [spawning]
            max_enemies = 40

            [buffs]
            haste_ms = 6000
        "#;
        let tuning: Tuning = toml::from_str(document).expect("valid tuning document");
        assert_eq!(tuning.spawning.max_enemies, 40);
        assert_eq!(tuning.spawning.enemy_interval_base_ms, 1_000);
        assert_eq!(tuning.buffs.duration(BuffKind::Haste), Duration::from_secs(6));
        assert_eq!(tuning.buffs.duration(BuffKind::Shield), Duration::from_secs(15));
        assert_eq!(tuning.player, PlayerTuning::default());
    }
}
