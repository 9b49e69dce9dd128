//! Timed player modifiers with exact reversal.
//!
//! Each active buff stores the value of the stat it replaced. Expiry writes
//! that value back instead of inverting the multiplier, so overlapping buffs
//! on different stats can lapse in any order.

use std::{collections::BTreeMap, time::Duration};

use polygon_survivor_core::{ActiveBuffSnapshot, BuffKind, BuffTuning, Event};
use tracing::debug;

use crate::entities::Player;

/// Player stat value captured before a buff modified it.
#[derive(Clone, Copy, Debug, PartialEq)]
enum StatSnapshot {
    BulletDamage(u32),
    FireInterval(Duration),
    Speed(f32),
    Invincible(bool),
}

impl StatSnapshot {
    fn capture(kind: BuffKind, player: &Player) -> Self {
        match kind {
            BuffKind::DoubleDamage => StatSnapshot::BulletDamage(player.bullet_damage),
            BuffKind::RapidFire => StatSnapshot::FireInterval(player.fire_interval),
            BuffKind::Haste => StatSnapshot::Speed(player.speed),
            BuffKind::Shield => StatSnapshot::Invincible(player.invincible),
        }
    }

    fn restore(self, player: &mut Player) {
        match self {
            StatSnapshot::BulletDamage(value) => player.bullet_damage = value,
            StatSnapshot::FireInterval(value) => player.fire_interval = value,
            StatSnapshot::Speed(value) => player.speed = value,
            StatSnapshot::Invincible(value) => player.invincible = value,
        }
    }
}

#[derive(Clone, Debug)]
struct ActiveBuff {
    expires_at: Duration,
    original: StatSnapshot,
}

/// Active buffs keyed by kind; at most one per kind.
#[derive(Clone, Debug, Default)]
pub(crate) struct BuffEngine {
    active: BTreeMap<BuffKind, ActiveBuff>,
}

impl BuffEngine {
    /// Applies a buff, or refreshes its deadline when already active.
    pub(crate) fn collect(
        &mut self,
        kind: BuffKind,
        player: &mut Player,
        now: Duration,
        tuning: &BuffTuning,
        out_events: &mut Vec<Event>,
    ) {
        let expires_at = now.saturating_add(tuning.duration(kind));
        if let Some(active) = self.active.get_mut(&kind) {
            active.expires_at = expires_at;
            debug!(?kind, ?expires_at, "buff refreshed");
            out_events.push(Event::BuffRefreshed { kind, expires_at });
            return;
        }

        let original = StatSnapshot::capture(kind, player);
        match kind {
            BuffKind::DoubleDamage => {
                player.bullet_damage = player.bullet_damage.saturating_mul(tuning.damage_multiplier);
            }
            BuffKind::RapidFire => {
                player.fire_interval = player.fire_interval / tuning.fire_interval_divisor.max(1);
            }
            BuffKind::Haste => player.speed *= tuning.speed_multiplier,
            BuffKind::Shield => player.invincible = true,
        }
        let _ = self.active.insert(
            kind,
            ActiveBuff {
                expires_at,
                original,
            },
        );
        debug!(?kind, ?expires_at, "buff applied");
        out_events.push(Event::BuffApplied { kind, expires_at });
    }

    /// Restores every buff whose deadline is at or before `now`, in kind order.
    pub(crate) fn expire(&mut self, player: &mut Player, now: Duration, out_events: &mut Vec<Event>) {
        let lapsed: Vec<BuffKind> = self
            .active
            .iter()
            .filter(|(_, active)| active.expires_at <= now)
            .map(|(kind, _)| *kind)
            .collect();
        for kind in lapsed {
            self.remove(kind, player, out_events);
        }
    }

    /// Restores every active buff regardless of deadline.
    pub(crate) fn revert_all(&mut self, player: &mut Player, out_events: &mut Vec<Event>) {
        let kinds: Vec<BuffKind> = self.active.keys().copied().collect();
        for kind in kinds {
            self.remove(kind, player, out_events);
        }
    }

    fn remove(&mut self, kind: BuffKind, player: &mut Player, out_events: &mut Vec<Event>) {
        if let Some(active) = self.active.remove(&kind) {
            active.original.restore(player);
            debug!(?kind, "buff expired");
            out_events.push(Event::BuffExpired { kind });
        }
    }

    pub(crate) fn snapshots(&self) -> Vec<ActiveBuffSnapshot> {
        self.active
            .iter()
            .map(|(kind, active)| ActiveBuffSnapshot {
                kind: *kind,
                expires_at: active.expires_at,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polygon_survivor_core::{PlayerStats, PlayerTuning, ShapeTier, Vec2};

    fn player() -> Player {
        let tier = ShapeTier::ALL[0];
        Player::new(
            tier,
            PlayerStats::for_tier(tier, &PlayerTuning::default()),
            Vec2::ZERO,
        )
    }

    #[test]
    fn refresh_extends_deadline_without_stacking() {
        let tuning = BuffTuning::default();
        let mut engine = BuffEngine::default();
        let mut player = player();
        let mut events = Vec::new();

        engine.collect(BuffKind::DoubleDamage, &mut player, Duration::ZERO, &tuning, &mut events);
        engine.collect(
            BuffKind::DoubleDamage,
            &mut player,
            Duration::from_secs(4),
            &tuning,
            &mut events,
        );

        assert_eq!(player.bullet_damage, 2);
        assert_eq!(
            events,
            vec![
                Event::BuffApplied {
                    kind: BuffKind::DoubleDamage,
                    expires_at: Duration::from_secs(10),
                },
                Event::BuffRefreshed {
                    kind: BuffKind::DoubleDamage,
                    expires_at: Duration::from_secs(14),
                },
            ]
        );

        events.clear();
        engine.expire(&mut player, Duration::from_secs(10), &mut events);
        assert!(events.is_empty());
        engine.expire(&mut player, Duration::from_secs(14), &mut events);
        assert_eq!(
            events,
            vec![Event::BuffExpired {
                kind: BuffKind::DoubleDamage
            }]
        );
        assert_eq!(player.bullet_damage, 1);
    }

    #[test]
    fn simultaneous_expiry_follows_kind_order() {
        let mut tuning = BuffTuning::default();
        tuning.shield_ms = 5_000;
        tuning.haste_ms = 5_000;
        let mut engine = BuffEngine::default();
        let mut player = player();
        let mut events = Vec::new();

        engine.collect(BuffKind::Shield, &mut player, Duration::ZERO, &tuning, &mut events);
        engine.collect(BuffKind::Haste, &mut player, Duration::ZERO, &tuning, &mut events);
        assert!(player.invincible);

        events.clear();
        engine.expire(&mut player, Duration::from_secs(5), &mut events);
        assert_eq!(
            events,
            vec![
                Event::BuffExpired {
                    kind: BuffKind::Haste
                },
                Event::BuffExpired {
                    kind: BuffKind::Shield
                },
            ]
        );
        assert!(!player.invincible);
        assert_eq!(player.speed, player.stats.speed);
        assert!(engine.snapshots().is_empty());
    }
}
