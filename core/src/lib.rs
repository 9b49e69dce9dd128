#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Polygon Survivor engine.
//!
//! This crate defines the message surface that connects the session boundary,
//! the authoritative world, and pure systems. The session submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems
//! and host layers to react to deterministically. Systems consume event
//! streams, query immutable snapshots, and respond exclusively with new
//! command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod tuning;

pub use glam::Vec2;

pub use catalog::{
    BossArchetype, Catalog, EnemyArchetype, PlayerStats, RotationStyle, SpecialAttackKind,
};
pub use tuning::{
    ArenaTuning, BossTuning, BuffTuning, PickupTuning, PlayerTuning, SpawnTuning, Tuning,
    TuningError,
};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Restarts the session with a fresh player of the provided tier.
    StartSession {
        /// Shape tier assigned to the player for the new session.
        player_tier: ShapeTier,
    },
    /// Pauses or resumes the session clock.
    SetPaused {
        /// Whether the clock should stop advancing.
        paused: bool,
    },
    /// Advances the session clock by the provided delta time.
    Tick {
        /// Duration of real time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Replaces the player's normalized movement vector.
    SetPlayerMotion {
        /// Desired movement direction; normalized by the world.
        direction: Vec2,
    },
    /// Integrates player, enemy, boss and bullet motion across the delta.
    StepEntities {
        /// Simulated time to integrate.
        dt: Duration,
    },
    /// Requests that the player fire a bullet.
    FireBullet {
        /// Position the bullet leaves from.
        origin: Vec2,
        /// Aiming policy applied to the new bullet.
        aim: Aim,
    },
    /// Resolves a single overlap reported by the external broad-phase.
    ResolveCollision {
        /// Pair of overlapping entities to resolve.
        collision: Collision,
    },
    /// Collects a world pickup on behalf of the player.
    CollectPickup {
        /// Identifier of the pickup being collected.
        pickup: PickupId,
    },
    /// Creates a new enemy of the provided shape.
    SpawnEnemy {
        /// Shape tier of the enemy archetype to instantiate.
        tier: ShapeTier,
        /// Position at which the enemy appears.
        position: Vec2,
    },
    /// Creates a new boss of the provided shape.
    SpawnBoss {
        /// Shape tier of the boss archetype to instantiate.
        tier: ShapeTier,
        /// Position at which the boss appears.
        position: Vec2,
    },
    /// Places a buff pickup into the arena.
    SpawnPickup {
        /// Buff granted by the pickup.
        kind: BuffKind,
        /// Position of the pickup.
        position: Vec2,
    },
    /// Replaces the movement mode of a boss.
    SetBossMotion {
        /// Boss whose motion changes.
        boss: BossId,
        /// Movement mode to adopt.
        motion: BossMotion,
    },
    /// Toggles the special-attack invulnerability flag of a boss.
    SetBossInvulnerable {
        /// Boss whose flag changes.
        boss: BossId,
        /// Whether bullets should be absorbed without damage.
        invulnerable: bool,
    },
    /// Advances a boss to a later escalation phase.
    SetBossPhase {
        /// Boss whose phase changes.
        boss: BossId,
        /// New phase index, starting at 1.
        phase: u8,
        /// Cumulative chase speed factor granted by the phase.
        speed_factor: f32,
    },
    /// Publishes a special attack on behalf of a boss.
    RequestBossAttack {
        /// Boss performing the attack.
        boss: BossId,
        /// Parameters of the attack.
        attack: BossAttack,
    },
    /// Expires buffs, pickups and bullets whose deadlines have passed.
    ExpireTimers,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Reports that the clock was paused or resumed.
    PauseChanged {
        /// Whether the clock is now paused.
        paused: bool,
    },
    /// Announces that a fresh session began.
    SessionStarted {
        /// Shape tier assigned to the player.
        player_tier: ShapeTier,
    },
    /// Confirms that an enemy or boss entered the arena.
    EntitySpawned {
        /// Handle of the new entity.
        entity: EntityId,
        /// Shape tier of the entity.
        tier: ShapeTier,
        /// Position at which the entity appeared.
        position: Vec2,
    },
    /// Reports that an enemy or boss lost health and survived.
    EntityDamaged {
        /// Handle of the damaged entity.
        entity: EntityId,
        /// Health remaining after the hit.
        health: u32,
    },
    /// Reports that an enemy or boss left play and awarded score.
    EntityDefeated {
        /// Handle of the defeated entity.
        entity: EntityId,
        /// Score credited to the ledger.
        score_awarded: u64,
    },
    /// Reports that a boss escalated to a later phase.
    BossPhaseChanged {
        /// Boss that escalated.
        boss: BossId,
        /// Phase the boss entered.
        phase: u8,
    },
    /// Reports that a boss toggled its special-attack invulnerability.
    BossInvulnerabilityChanged {
        /// Boss whose flag changed.
        boss: BossId,
        /// Whether the boss now absorbs bullets.
        invulnerable: bool,
    },
    /// Publishes a special attack for host layers to realize.
    BossAttackRequested {
        /// Boss performing the attack.
        boss: BossId,
        /// Parameters of the attack.
        attack: BossAttack,
    },
    /// Requests that minions be spawned on behalf of a boss.
    MinionSpawnRequested {
        /// Boss that summoned the minions.
        boss: BossId,
        /// Shape tier of the minions.
        tier: ShapeTier,
        /// Requested minion positions.
        positions: Vec<Vec2>,
    },
    /// Reports that the player lost health.
    PlayerDamaged {
        /// Health remaining after the hit.
        health: u32,
    },
    /// Announces the terminal defeat of the player.
    PlayerDefeated {
        /// Final score of the run.
        score: u64,
        /// Whole seconds survived.
        survived_seconds: u64,
    },
    /// Confirms that the player fired a bullet.
    BulletFired {
        /// Identifier assigned to the bullet.
        bullet: BulletId,
        /// Position the bullet left from.
        origin: Vec2,
        /// Velocity of the bullet in world units per second.
        velocity: Vec2,
        /// Damage the bullet deals on impact.
        damage: u32,
    },
    /// Reports that a bullet was destroyed by an impact.
    BulletConsumed {
        /// Identifier of the consumed bullet.
        bullet: BulletId,
    },
    /// Reports that a bullet outlived its lifetime.
    BulletExpired {
        /// Identifier of the expired bullet.
        bullet: BulletId,
    },
    /// Confirms that a buff pickup was placed in the arena.
    PickupSpawned {
        /// Identifier assigned to the pickup.
        pickup: PickupId,
        /// Buff granted by the pickup.
        kind: BuffKind,
        /// Position of the pickup.
        position: Vec2,
    },
    /// Reports that the player collected a pickup.
    PickupCollected {
        /// Identifier of the collected pickup.
        pickup: PickupId,
        /// Buff granted by the pickup.
        kind: BuffKind,
    },
    /// Reports that a pickup despawned uncollected.
    PickupExpired {
        /// Identifier of the expired pickup.
        pickup: PickupId,
    },
    /// Reports that a buff started modifying the player.
    BuffApplied {
        /// Kind of buff applied.
        kind: BuffKind,
        /// Session time at which the buff lapses.
        expires_at: Duration,
    },
    /// Reports that an active buff had its duration renewed.
    BuffRefreshed {
        /// Kind of buff refreshed.
        kind: BuffKind,
        /// New session time at which the buff lapses.
        expires_at: Duration,
    },
    /// Reports that a buff lapsed and its stat was restored.
    BuffExpired {
        /// Kind of buff removed.
        kind: BuffKind,
    },
    /// Reports the ledger score after an award.
    ScoreChanged {
        /// Current score.
        score: u64,
    },
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a boss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BossId(u32);

impl BossId {
    /// Creates a new boss identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a player bullet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BulletId(u32);

impl BulletId {
    /// Creates a new bullet identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a buff pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PickupId(u32);

impl PickupId {
    /// Creates a new pickup identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Handle naming either an enemy or a boss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityId {
    /// Regular enemy.
    Enemy(EnemyId),
    /// Boss.
    Boss(BossId),
}

/// Polygon shape identified by its number of sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeTier(u8);

impl ShapeTier {
    /// Fewest sides a shape may have.
    pub const MIN_SIDES: u8 = 3;
    /// Most sides a shape may have.
    pub const MAX_SIDES: u8 = 8;
    /// Every shape tier in ascending order.
    pub const ALL: [ShapeTier; 6] = [
        ShapeTier(3),
        ShapeTier(4),
        ShapeTier(5),
        ShapeTier(6),
        ShapeTier(7),
        ShapeTier(8),
    ];

    /// Creates a tier for the provided side count, or `None` outside 3..=8.
    #[must_use]
    pub const fn new(sides: u8) -> Option<Self> {
        if sides >= Self::MIN_SIDES && sides <= Self::MAX_SIDES {
            Some(Self(sides))
        } else {
            None
        }
    }

    /// Number of sides of the shape.
    #[must_use]
    pub const fn sides(self) -> u8 {
        self.0
    }

    /// Zero-based offset of the tier above the triangle.
    #[must_use]
    pub const fn offset(self) -> u8 {
        self.0 - Self::MIN_SIDES
    }
}

/// Position of an archetype among the five non-player shapes, weakest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TierRank(u8);

impl TierRank {
    /// Number of ranks populated in a session.
    pub const COUNT: usize = 5;
    /// Every rank in ascending order.
    pub const ALL: [TierRank; 5] = [
        TierRank(1),
        TierRank(2),
        TierRank(3),
        TierRank(4),
        TierRank(5),
    ];

    /// Creates a rank, or `None` outside 1..=5.
    #[must_use]
    pub const fn new(rank: u8) -> Option<Self> {
        if rank >= 1 && rank as usize <= Self::COUNT {
            Some(Self(rank))
        } else {
            None
        }
    }

    /// Numeric rank starting at 1.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into rank-ordered tables.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

/// Timed player modifiers granted by pickups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuffKind {
    /// Doubles bullet damage.
    DoubleDamage,
    /// Halves the fire interval.
    RapidFire,
    /// Increases movement speed.
    Haste,
    /// Makes the player invincible.
    Shield,
}

impl BuffKind {
    /// Every buff kind in processing order.
    pub const ALL: [BuffKind; 4] = [
        BuffKind::DoubleDamage,
        BuffKind::RapidFire,
        BuffKind::Haste,
        BuffKind::Shield,
    ];
}

/// Lifecycle of the current run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// The player is alive and the clock may advance.
    Running,
    /// The player was defeated; the run is over until restarted.
    Defeated,
}

/// Aiming policy for a fire request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Aim {
    /// Fire along the provided angle in radians.
    Angle(f32),
    /// Fire at the nearest live enemy or boss.
    AutoTarget,
}

/// Movement mode of a boss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BossMotion {
    /// Steer toward the player.
    Chase {
        /// Multiplier applied on top of the boss's phase speed.
        speed_multiplier: f32,
    },
    /// Stand still.
    Hold,
    /// Travel along a fixed heading.
    Dash {
        /// Unit vector of travel.
        heading: Vec2,
        /// Multiplier applied on top of the boss's phase speed.
        speed_multiplier: f32,
    },
}

impl Default for BossMotion {
    fn default() -> Self {
        BossMotion::Chase {
            speed_multiplier: 1.0,
        }
    }
}

/// Special attack published by a boss.
#[derive(Clone, Debug, PartialEq)]
pub enum BossAttack {
    /// Straight-line charge toward a locked target.
    Dash {
        /// Player position captured when the attack triggered.
        target: Vec2,
        /// Speed multiplier applied for the dash.
        speed_multiplier: f32,
        /// Length of the dash.
        duration: Duration,
    },
    /// Request for minions near the boss.
    SummonMinions {
        /// Requested minion positions.
        positions: Vec<Vec2>,
    },
    /// Ring of projectiles leaving the boss.
    RadialBurst {
        /// Centre of the ring.
        origin: Vec2,
        /// Number of evenly spaced projectiles.
        projectiles: u32,
        /// Speed of each projectile in world units per second.
        speed: f32,
        /// Damage dealt by each projectile.
        damage: u32,
    },
    /// Temporary invulnerability with faster chasing.
    Fortify {
        /// Length of the invulnerable window.
        duration: Duration,
        /// Chase speed multiplier during the window.
        speed_multiplier: f32,
    },
}

impl BossAttack {
    /// Velocities of a radial burst's projectiles, starting at angle zero.
    ///
    /// Returns an empty list for any other attack.
    #[must_use]
    pub fn projectile_velocities(&self) -> Vec<Vec2> {
        match self {
            BossAttack::RadialBurst {
                projectiles, speed, ..
            } => {
                let count = *projectiles;
                (0..count)
                    .map(|index| {
                        let angle = std::f32::consts::TAU * index as f32 / count as f32;
                        Vec2::from_angle(angle) * *speed
                    })
                    .collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Damage carried by a boss special attack that reached the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BossAttackPayload {
    /// A single boss projectile.
    Projectile {
        /// Damage of the projectile.
        damage: u32,
    },
    /// An expanding wave whose damage falls off with depth.
    Shockwave {
        /// Damage at the innermost ring.
        base_damage: u32,
        /// Ring depth at which the player was caught.
        depth: u32,
    },
    /// A blast with a hard radius.
    Explosion {
        /// Damage inside the radius.
        damage: u32,
        /// Blast radius.
        radius: f32,
        /// Distance from the blast centre to the player.
        distance: f32,
    },
}

impl BossAttackPayload {
    /// Damage the payload deals to an unshielded player.
    #[must_use]
    pub fn damage(&self) -> u32 {
        match *self {
            BossAttackPayload::Projectile { damage } => damage,
            BossAttackPayload::Shockwave { base_damage, depth } => {
                base_damage.saturating_sub(depth).max(1)
            }
            BossAttackPayload::Explosion {
                damage,
                radius,
                distance,
            } => {
                if distance <= radius {
                    damage
                } else {
                    0
                }
            }
        }
    }
}

/// Overlap reported by the external broad-phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collision {
    /// Player bullet touching an enemy.
    BulletEnemy {
        /// Bullet involved.
        bullet: BulletId,
        /// Enemy involved.
        enemy: EnemyId,
    },
    /// Player bullet touching a boss.
    BulletBoss {
        /// Bullet involved.
        bullet: BulletId,
        /// Boss involved.
        boss: BossId,
    },
    /// Player body touching an enemy.
    PlayerEnemy {
        /// Enemy involved.
        enemy: EnemyId,
    },
    /// Player body touching a boss.
    PlayerBoss {
        /// Boss involved.
        boss: BossId,
    },
    /// Boss special attack reaching the player.
    BossAttackPlayer {
        /// Damage carried by the attack.
        payload: BossAttackPayload,
    },
}

/// Rectangular playable area anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    /// Width in world units.
    pub width: f32,
    /// Height in world units.
    pub height: f32,
}

impl Arena {
    /// Creates an arena of the provided size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Centre point of the arena.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Clamps a point so a circle of `radius` stays inside the arena.
    #[must_use]
    pub fn clamp_inset(&self, point: Vec2, radius: f32) -> Vec2 {
        let max_x = (self.width - radius).max(radius);
        let max_y = (self.height - radius).max(radius);
        Vec2::new(point.x.clamp(radius, max_x), point.y.clamp(radius, max_y))
    }
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Shape tier of the player.
    pub tier: ShapeTier,
    /// Current position.
    pub position: Vec2,
    /// Current health.
    pub health: u32,
    /// Health at session start.
    pub max_health: u32,
    /// Effective movement speed in world units per second.
    pub speed: f32,
    /// Effective minimum time between shots.
    pub fire_interval: Duration,
    /// Effective damage of newly fired bullets.
    pub bullet_damage: u32,
    /// Speed of newly fired bullets.
    pub bullet_speed: f32,
    /// Collision radius.
    pub radius: f32,
    /// Whether incoming damage is ignored.
    pub invincible: bool,
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Shape tier of the enemy.
    pub tier: ShapeTier,
    /// Rank of the enemy's archetype.
    pub rank: TierRank,
    /// Current position.
    pub position: Vec2,
    /// Current health.
    pub health: u32,
    /// Cosmetic rotation angle in radians.
    pub rotation: f32,
    /// Collision radius.
    pub radius: f32,
}

/// Immutable representation of a single boss used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct BossSnapshot {
    /// Unique identifier assigned to the boss.
    pub id: BossId,
    /// Shape tier of the boss.
    pub tier: ShapeTier,
    /// Rank of the boss's archetype.
    pub rank: TierRank,
    /// Current position.
    pub position: Vec2,
    /// Current health.
    pub health: u32,
    /// Health at spawn.
    pub max_health: u32,
    /// Whether bullets are currently absorbed without damage.
    pub invulnerable: bool,
    /// Escalation phase, starting at 1.
    pub phase: u8,
    /// Special attack family of the archetype.
    pub special: SpecialAttackKind,
    /// Current movement mode.
    pub motion: BossMotion,
    /// Collision radius.
    pub radius: f32,
}

/// Immutable representation of a single player bullet used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct BulletSnapshot {
    /// Unique identifier assigned to the bullet.
    pub id: BulletId,
    /// Current position.
    pub position: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Damage dealt on impact.
    pub damage: u32,
}

/// Immutable representation of a single pickup used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct PickupSnapshot {
    /// Unique identifier assigned to the pickup.
    pub id: PickupId,
    /// Buff granted by the pickup.
    pub kind: BuffKind,
    /// Position of the pickup.
    pub position: Vec2,
    /// Session time at which the pickup despawns.
    pub expires_at: Duration,
}

/// Immutable representation of an active buff used for queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveBuffSnapshot {
    /// Kind of the active buff.
    pub kind: BuffKind,
    /// Session time at which the buff lapses.
    pub expires_at: Duration,
}

/// Read-only view of all enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Read-only view of all bosses.
#[derive(Clone, Debug, Default)]
pub struct BossView {
    snapshots: Vec<BossSnapshot>,
}

impl BossView {
    /// Creates a new boss view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<BossSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured boss snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &BossSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of a single boss.
    #[must_use]
    pub fn get(&self, id: BossId) -> Option<&BossSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of bosses captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no bosses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<BossSnapshot> {
        self.snapshots
    }
}
