//! Narrow-phase outcomes for overlaps reported by the host broad-phase.
//!
//! Every resolution checks that both handles are still live before touching
//! state, so stale or repeated reports are no-ops.

use polygon_survivor_core::{
    BossAttackPayload, BossId, BulletId, Collision, EnemyId, EntityId, Event, SessionState,
    SpecialAttackKind,
};
use tracing::{debug, info, trace};

use crate::World;

/// Distinguishes melee contact, which respects the contact cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DamageSource {
    Contact,
    Special,
}

pub(crate) fn resolve(world: &mut World, collision: Collision, out_events: &mut Vec<Event>) {
    if world.state != SessionState::Running || !world.clock.is_running() {
        debug!(?collision, "collision ignored outside a running session");
        return;
    }

    match collision {
        Collision::BulletEnemy { bullet, enemy } => bullet_vs_enemy(world, bullet, enemy, out_events),
        Collision::BulletBoss { bullet, boss } => bullet_vs_boss(world, bullet, boss, out_events),
        Collision::PlayerEnemy { enemy } => player_vs_enemy(world, enemy, out_events),
        Collision::PlayerBoss { boss } => player_vs_boss(world, boss, out_events),
        Collision::BossAttackPlayer { payload } => boss_attack_vs_player(world, payload, out_events),
    }
}

fn bullet_vs_enemy(world: &mut World, bullet: BulletId, enemy: EnemyId, out_events: &mut Vec<Event>) {
    if !world.bullets.contains_key(&bullet) || !world.enemies.contains_key(&enemy) {
        debug!(?bullet, ?enemy, "stale bullet/enemy collision ignored");
        return;
    }
    let Some(spent) = world.bullets.remove(&bullet) else {
        return;
    };
    out_events.push(Event::BulletConsumed { bullet });

    let Some(target) = world.enemies.get_mut(&enemy) else {
        return;
    };
    let damage = spent.damage.max(1);
    debug_assert!(target.health > 0, "live enemies always have health");
    target.health = target.health.saturating_sub(damage);
    if target.health > 0 {
        out_events.push(Event::EntityDamaged {
            entity: EntityId::Enemy(enemy),
            health: target.health,
        });
        return;
    }
    defeat_enemy(world, enemy, out_events);
}

fn bullet_vs_boss(world: &mut World, bullet: BulletId, boss: BossId, out_events: &mut Vec<Event>) {
    if !world.bullets.contains_key(&bullet) || !world.bosses.contains_key(&boss) {
        debug!(?bullet, ?boss, "stale bullet/boss collision ignored");
        return;
    }
    let Some(spent) = world.bullets.remove(&bullet) else {
        return;
    };
    out_events.push(Event::BulletConsumed { bullet });

    let now = world.clock.elapsed();
    let hit_guard = world.tuning.bosses.hit_guard();
    let Some(target) = world.bosses.get_mut(&boss) else {
        return;
    };
    if target.shielded(now) {
        trace!(?boss, "bullet absorbed by invulnerable boss");
        return;
    }

    let damage = spent.damage.max(1);
    target.health = target.health.saturating_sub(damage);
    if target.health > 0 {
        if target.archetype.special == SpecialAttackKind::Fortify {
            target.guard_until = Some(now.saturating_add(hit_guard));
        }
        out_events.push(Event::EntityDamaged {
            entity: EntityId::Boss(boss),
            health: target.health,
        });
        return;
    }

    if let Some(defeated) = world.bosses.remove(&boss) {
        let score = world.ledger.award_boss(defeated.archetype.score);
        info!(
            ?boss,
            tier = defeated.archetype.tier.sides(),
            score,
            "boss defeated"
        );
        out_events.push(Event::EntityDefeated {
            entity: EntityId::Boss(boss),
            score_awarded: defeated.archetype.score,
        });
        out_events.push(Event::ScoreChanged { score });
    }
}

fn player_vs_enemy(world: &mut World, enemy: EnemyId, out_events: &mut Vec<Event>) {
    let Some(contact_damage) = world
        .enemies
        .get(&enemy)
        .map(|target| target.archetype.contact_damage)
    else {
        debug!(?enemy, "stale player/enemy collision ignored");
        return;
    };
    defeat_enemy(world, enemy, out_events);
    damage_player(world, contact_damage, DamageSource::Contact, out_events);
}

fn player_vs_boss(world: &mut World, boss: BossId, out_events: &mut Vec<Event>) {
    let Some(contact_damage) = world
        .bosses
        .get(&boss)
        .map(|target| target.archetype.contact_damage)
    else {
        debug!(?boss, "stale player/boss collision ignored");
        return;
    };
    damage_player(world, contact_damage, DamageSource::Contact, out_events);
}

fn boss_attack_vs_player(world: &mut World, payload: BossAttackPayload, out_events: &mut Vec<Event>) {
    let damage = payload.damage();
    if damage == 0 {
        trace!(?payload, "boss attack missed");
        return;
    }
    damage_player(world, damage, DamageSource::Special, out_events);
}

fn defeat_enemy(world: &mut World, enemy: EnemyId, out_events: &mut Vec<Event>) {
    if let Some(defeated) = world.enemies.remove(&enemy) {
        let score = world.ledger.award_enemy(defeated.archetype.score);
        out_events.push(Event::EntityDefeated {
            entity: EntityId::Enemy(enemy),
            score_awarded: defeated.archetype.score,
        });
        out_events.push(Event::ScoreChanged { score });
    }
}

fn damage_player(world: &mut World, damage: u32, source: DamageSource, out_events: &mut Vec<Event>) {
    if world.state != SessionState::Running {
        return;
    }
    let now = world.clock.elapsed();
    let player = &mut world.player;
    if player.invincible {
        trace!(damage, "damage blocked by shield");
        return;
    }
    if source == DamageSource::Contact {
        if player.in_contact_cooldown(now, world.tuning.player.contact_cooldown()) {
            trace!(damage, "contact damage suppressed by cooldown");
            return;
        }
        player.last_contact_damage = Some(now);
    }

    player.health = player.health.saturating_sub(damage);
    let health = player.health;
    out_events.push(Event::PlayerDamaged { health });
    if health == 0 {
        world.defeat_player(out_events);
    }
}
