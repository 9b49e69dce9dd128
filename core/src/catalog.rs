//! Static stat tables for enemies, bosses and the player.
//!
//! Enemies and bosses are ranked 1..=5 over the five shapes the player does
//! not occupy, weakest first. Health, damage and score come from the rank;
//! speed and radius come from the side count.

use std::time::Duration;

use crate::{tuning::PlayerTuning, ShapeTier, TierRank};

/// Cosmetic spin pattern of an enemy archetype, in radians per 60 Hz step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RotationStyle {
    /// Constant spin.
    Steady {
        /// Radians per step; negative spins counter-clockwise.
        rate: f32,
    },
    /// Spin modulated by `0.8 + 0.4·sin(t)`.
    Pulsing {
        /// Unmodulated radians per step.
        rate: f32,
    },
    /// Spin that reverses direction on a fixed period.
    Oscillating {
        /// Radians per step.
        rate: f32,
        /// Time between reversals.
        period: Duration,
    },
    /// Spin whose rate and direction are re-rolled on a fixed period.
    Erratic {
        /// Slowest rolled rate.
        min_rate: f32,
        /// Fastest rolled rate.
        max_rate: f32,
        /// Time between re-rolls.
        period: Duration,
    },
}

/// Special-attack family driven by the boss behavior state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialAttackKind {
    /// Charge then dash toward the player.
    Dash,
    /// Request two minions beside the boss.
    Summon,
    /// Emit a ring of projectiles.
    RadialBurst,
    /// Become invulnerable while chasing faster.
    Fortify,
    /// Health-phased combination of every attack.
    Phased,
}

/// Immutable stat template for an enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyArchetype {
    /// Shape of the enemy.
    pub tier: ShapeTier,
    /// Rank among the session's enemy shapes.
    pub rank: TierRank,
    /// Health at spawn.
    pub health: u32,
    /// Damage dealt to the player on contact.
    pub contact_damage: u32,
    /// Chase speed in world units per second.
    pub speed: f32,
    /// Score awarded on defeat.
    pub score: u64,
    /// Collision radius.
    pub radius: f32,
    /// Cosmetic spin pattern.
    pub rotation: RotationStyle,
}

impl EnemyArchetype {
    /// Weight used by the spawn director; weaker archetypes are drawn more often.
    #[must_use]
    pub fn spawn_weight(&self) -> u32 {
        6u32.saturating_sub(self.health).max(1)
    }
}

/// Immutable stat template for a boss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossArchetype {
    /// Shape of the boss.
    pub tier: ShapeTier,
    /// Rank among the session's boss shapes.
    pub rank: TierRank,
    /// Health at spawn.
    pub health: u32,
    /// Damage dealt to the player on contact.
    pub contact_damage: u32,
    /// Base chase speed in world units per second.
    pub speed: f32,
    /// Fixed score awarded on defeat.
    pub score: u64,
    /// Collision radius.
    pub radius: f32,
    /// Special-attack family.
    pub special: SpecialAttackKind,
}

#[derive(Clone, Copy)]
struct RankStats {
    health: u32,
    contact_damage: u32,
    score: u64,
}

const ENEMY_RANKS: [RankStats; TierRank::COUNT] = [
    RankStats {
        health: 1,
        contact_damage: 3,
        score: 10,
    },
    RankStats {
        health: 2,
        contact_damage: 4,
        score: 20,
    },
    RankStats {
        health: 3,
        contact_damage: 5,
        score: 30,
    },
    RankStats {
        health: 4,
        contact_damage: 6,
        score: 40,
    },
    RankStats {
        health: 5,
        contact_damage: 7,
        score: 50,
    },
];

const ENEMY_ROTATIONS: [RotationStyle; TierRank::COUNT] = [
    RotationStyle::Steady { rate: 0.03 },
    RotationStyle::Steady { rate: -0.02 },
    RotationStyle::Pulsing { rate: 0.04 },
    RotationStyle::Oscillating {
        rate: 0.025,
        period: Duration::from_millis(1500),
    },
    RotationStyle::Erratic {
        min_rate: 0.01,
        max_rate: 0.05,
        period: Duration::from_millis(800),
    },
];

const BOSS_RANKS: [RankStats; TierRank::COUNT] = [
    RankStats {
        health: 10,
        contact_damage: 5,
        score: 100,
    },
    RankStats {
        health: 12,
        contact_damage: 6,
        score: 150,
    },
    RankStats {
        health: 14,
        contact_damage: 7,
        score: 200,
    },
    RankStats {
        health: 16,
        contact_damage: 8,
        score: 225,
    },
    RankStats {
        health: 20,
        contact_damage: 10,
        score: 250,
    },
];

const BOSS_SPECIALS: [SpecialAttackKind; TierRank::COUNT] = [
    SpecialAttackKind::Dash,
    SpecialAttackKind::Summon,
    SpecialAttackKind::RadialBurst,
    SpecialAttackKind::Fortify,
    SpecialAttackKind::Phased,
];

/// Enemy and boss archetypes for one session, keyed by rank.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    player_tier: ShapeTier,
    enemies: Vec<EnemyArchetype>,
    bosses: Vec<BossArchetype>,
}

impl Catalog {
    /// Builds the catalog for a player occupying the provided tier.
    ///
    /// The player's shape is excluded; the remaining five shapes are ranked in
    /// ascending side count.
    #[must_use]
    pub fn for_player(player_tier: ShapeTier) -> Self {
        let shapes = ShapeTier::ALL
            .into_iter()
            .filter(|tier| *tier != player_tier);
        let mut enemies = Vec::with_capacity(TierRank::COUNT);
        let mut bosses = Vec::with_capacity(TierRank::COUNT);
        for (rank, tier) in TierRank::ALL.into_iter().zip(shapes) {
            let offset = f32::from(tier.offset());
            let enemy = ENEMY_RANKS[rank.index()];
            enemies.push(EnemyArchetype {
                tier,
                rank,
                health: enemy.health,
                contact_damage: enemy.contact_damage,
                speed: 120.0 - offset * 15.0,
                score: enemy.score,
                radius: 15.0 + offset * 2.0,
                rotation: ENEMY_ROTATIONS[rank.index()],
            });
            let boss = BOSS_RANKS[rank.index()];
            bosses.push(BossArchetype {
                tier,
                rank,
                health: boss.health,
                contact_damage: boss.contact_damage,
                speed: 70.0 - offset * 10.0,
                score: boss.score,
                radius: 30.0 + offset * 3.0,
                special: BOSS_SPECIALS[rank.index()],
            });
        }
        debug_assert_eq!(enemies.len(), TierRank::COUNT);
        Self {
            player_tier,
            enemies,
            bosses,
        }
    }

    /// Shape excluded from the enemy and boss pools.
    #[must_use]
    pub const fn player_tier(&self) -> ShapeTier {
        self.player_tier
    }

    /// Enemy archetype of the provided rank.
    #[must_use]
    pub fn enemy_by_rank(&self, rank: TierRank) -> &EnemyArchetype {
        &self.enemies[rank.index()]
    }

    /// Enemy archetype for a shape, or `None` for the player's shape.
    #[must_use]
    pub fn enemy(&self, tier: ShapeTier) -> Option<&EnemyArchetype> {
        self.enemies.iter().find(|archetype| archetype.tier == tier)
    }

    /// Boss archetype of the provided rank.
    #[must_use]
    pub fn boss_by_rank(&self, rank: TierRank) -> &BossArchetype {
        &self.bosses[rank.index()]
    }

    /// Boss archetype for a shape, or `None` for the player's shape.
    #[must_use]
    pub fn boss(&self, tier: ShapeTier) -> Option<&BossArchetype> {
        self.bosses.iter().find(|archetype| archetype.tier == tier)
    }

    /// Enemy archetypes in rank order.
    pub fn enemies(&self) -> impl Iterator<Item = &EnemyArchetype> {
        self.enemies.iter()
    }
}

/// Player stats derived once from the player's tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerStats {
    /// Health at session start.
    pub max_health: u32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Bullet speed in world units per second.
    pub bullet_speed: f32,
    /// Minimum time between shots.
    pub fire_interval: Duration,
    /// Damage of each bullet.
    pub bullet_damage: u32,
    /// Collision radius.
    pub radius: f32,
}

impl PlayerStats {
    /// Derives the stats of a player occupying `tier`.
    ///
    /// Higher tiers move slower and fire faster bullets.
    #[must_use]
    pub fn for_tier(tier: ShapeTier, tuning: &PlayerTuning) -> Self {
        let offset = f32::from(tier.offset());
        Self {
            max_health: tuning.max_health,
            speed: tuning.base_speed - (offset * tuning.speed_falloff / 5.0).floor(),
            bullet_speed: tuning.base_bullet_speed
                + (offset * tuning.bullet_speed_gain / 5.0).floor(),
            fire_interval: Duration::from_millis(tuning.fire_interval_ms),
            bullet_damage: tuning.bullet_damage,
            radius: tuning.radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tier(sides: u8) -> ShapeTier {
        ShapeTier::new(sides).expect("valid tier")
    }

    #[test]
    fn excludes_player_tier_and_ranks_ascending() {
        let catalog = Catalog::for_player(tier(5));
        let sides: Vec<u8> = catalog.enemies().map(|enemy| enemy.tier.sides()).collect();
        assert_eq!(sides, vec![3, 4, 6, 7, 8]);
        assert!(catalog.enemy(tier(5)).is_none());
        assert!(catalog.boss(tier(5)).is_none());
        assert_eq!(catalog.player_tier(), tier(5));
    }

    #[test]
    fn enemy_stats_follow_rank_and_shape() {
        let catalog = Catalog::for_player(tier(3));
        let weakest = catalog.enemy_by_rank(TierRank::ALL[0]);
        assert_eq!(weakest.tier, tier(4));
        assert_eq!(weakest.health, 1);
        assert_eq!(weakest.contact_damage, 3);
        assert_eq!(weakest.score, 10);
        assert_relative_eq!(weakest.speed, 105.0);
        assert_relative_eq!(weakest.radius, 17.0);

        let strongest = catalog.enemy_by_rank(TierRank::ALL[4]);
        assert_eq!(strongest.tier, tier(8));
        assert_eq!(strongest.health, 5);
        assert_eq!(strongest.contact_damage, 7);
        assert_eq!(strongest.score, 50);
        assert_relative_eq!(strongest.speed, 45.0);
    }

    #[test]
    fn boss_stats_use_fixed_tables() {
        let catalog = Catalog::for_player(tier(8));
        let health: Vec<u32> = TierRank::ALL
            .iter()
            .map(|rank| catalog.boss_by_rank(*rank).health)
            .collect();
        let score: Vec<u64> = TierRank::ALL
            .iter()
            .map(|rank| catalog.boss_by_rank(*rank).score)
            .collect();
        assert_eq!(health, vec![10, 12, 14, 16, 20]);
        assert_eq!(score, vec![100, 150, 200, 225, 250]);
        let first = catalog.boss_by_rank(TierRank::ALL[0]);
        assert_relative_eq!(first.speed, 70.0);
        assert_relative_eq!(first.radius, 30.0);
        assert_eq!(first.special, SpecialAttackKind::Dash);
        assert_eq!(
            catalog.boss_by_rank(TierRank::ALL[4]).special,
            SpecialAttackKind::Phased
        );
    }

    #[test]
    fn spawn_weights_favor_weak_enemies() {
        let catalog = Catalog::for_player(tier(3));
        let weights: Vec<u32> = catalog.enemies().map(EnemyArchetype::spawn_weight).collect();
        assert_eq!(weights, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn player_stats_scale_with_tier() {
        let tuning = PlayerTuning::default();
        let triangle = PlayerStats::for_tier(tier(3), &tuning);
        assert_eq!(triangle.max_health, 100);
        assert_relative_eq!(triangle.speed, 160.0);
        assert_relative_eq!(triangle.bullet_speed, 300.0);
        assert_eq!(triangle.fire_interval, Duration::from_millis(500));

        let octagon = PlayerStats::for_tier(tier(8), &tuning);
        assert_relative_eq!(octagon.speed, 120.0);
        assert_relative_eq!(octagon.bullet_speed, 400.0);

        let square = PlayerStats::for_tier(tier(4), &tuning);
        assert_relative_eq!(square.speed, 152.0);
        assert_relative_eq!(square.bullet_speed, 320.0);
    }
}
