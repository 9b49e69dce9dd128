use std::time::Duration;

use polygon_survivor_core::{
    Aim, BossAttack, BossId, BossMotion, Collision, Command, EntityId, Event, ShapeTier,
    TierRank, Tuning, Vec2,
};
use polygon_survivor_system_boss_behavior::{BehaviorInputs, BossBehavior, Stage};
use polygon_survivor_world::{apply, query, World};

struct Harness {
    world: World,
    behavior: BossBehavior,
    events: Vec<Event>,
}

impl Harness {
    fn new() -> Self {
        let tuning = Tuning::default();
        Self {
            behavior: BossBehavior::new(tuning.bosses.clone()),
            world: World::new(tuning, ShapeTier::new(3).expect("valid tier")),
            events: Vec::new(),
        }
    }

    fn spawn_boss(&mut self, rank: u8, position: Vec2) -> BossId {
        let rank = TierRank::new(rank).expect("valid rank");
        let tier = query::catalog(&self.world).boss_by_rank(rank).tier;
        let events = self.run(Command::SpawnBoss { tier, position });
        match events.as_slice() {
            [Event::EntitySpawned {
                entity: EntityId::Boss(boss),
                ..
            }] => *boss,
            other => panic!("expected a boss spawn, got {other:?}"),
        }
    }

    fn run(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(&mut self.world, command, &mut events);
        self.events.extend(events.iter().cloned());
        events
    }

    /// Advances the clock without stepping entities so positions stay fixed.
    fn tick(&mut self, millis: u64) -> Vec<Command> {
        let events = self.run(Command::Tick {
            dt: Duration::from_millis(millis),
        });
        let view = query::boss_view(&self.world);
        let mut commands = Vec::new();
        self.behavior.handle(
            &events,
            BehaviorInputs {
                now: query::clock(&self.world).elapsed(),
                state: query::session_state(&self.world),
                bosses: &view,
                player_position: query::player(&self.world).position,
            },
            &mut commands,
        );
        for command in &commands {
            let _ = self.run(command.clone());
        }
        commands
    }

    fn advance_to(&mut self, millis: u64) {
        while query::clock(&self.world).elapsed() < Duration::from_millis(millis) {
            let _ = self.tick(100);
        }
    }

    /// Ticks in 100 ms steps until a batch contains a radial burst.
    fn next_burst(&mut self, limit_millis: u64) -> Vec<Command> {
        while query::clock(&self.world).elapsed() < Duration::from_millis(limit_millis) {
            let commands = self.tick(100);
            if has_burst(&commands) {
                return commands;
            }
        }
        panic!("no burst before {limit_millis} ms");
    }

    fn motion(&self, boss: BossId) -> BossMotion {
        query::boss_view(&self.world)
            .get(boss)
            .expect("boss alive")
            .motion
    }

    fn shoot(&mut self, boss: BossId) -> Vec<Event> {
        let fired = self.run(Command::FireBullet {
            origin: Vec2::new(400.0, 300.0),
            aim: Aim::Angle(0.0),
        });
        let bullet = fired
            .iter()
            .find_map(|event| match event {
                Event::BulletFired { bullet, .. } => Some(*bullet),
                _ => None,
            })
            .expect("bullet fired");
        self.run(Command::ResolveCollision {
            collision: Collision::BulletBoss { bullet, boss },
        })
    }
}

#[test]
fn dash_boss_holds_then_dashes_at_triple_speed_then_chases() {
    let mut harness = Harness::new();
    let boss = harness.spawn_boss(1, Vec2::new(100.0, 300.0));
    let _ = harness.tick(0);

    harness.advance_to(7_900);
    assert_eq!(harness.motion(boss), BossMotion::default());

    let trigger = harness.tick(100);
    assert_eq!(
        trigger,
        vec![
            Command::SetBossMotion {
                boss,
                motion: BossMotion::Hold,
            },
            Command::RequestBossAttack {
                boss,
                attack: BossAttack::Dash {
                    target: Vec2::new(400.0, 300.0),
                    speed_multiplier: 3.0,
                    duration: Duration::from_millis(500),
                },
            },
        ]
    );
    assert_eq!(harness.motion(boss), BossMotion::Hold);

    harness.advance_to(8_500);
    assert_eq!(
        harness.motion(boss),
        BossMotion::Dash {
            heading: Vec2::X,
            speed_multiplier: 3.0,
        }
    );

    harness.advance_to(9_000);
    assert_eq!(harness.motion(boss), BossMotion::default());
    assert_eq!(
        harness.behavior.stage(boss),
        Some(Stage::Cooldown {
            ready_at: Duration::from_secs(16),
        })
    );
}

#[test]
fn summoner_requests_two_minions_beside_itself() {
    let mut harness = Harness::new();
    let boss = harness.spawn_boss(2, Vec2::new(200.0, 200.0));
    let _ = harness.tick(0);
    harness.advance_to(10_000);

    let requests: Vec<&Event> = harness
        .events
        .iter()
        .filter(|event| matches!(event, Event::MinionSpawnRequested { .. }))
        .collect();
    let tier = query::catalog(&harness.world)
        .boss_by_rank(TierRank::new(2).expect("valid rank"))
        .tier;
    assert_eq!(
        requests,
        vec![&Event::MinionSpawnRequested {
            boss,
            tier,
            positions: vec![Vec2::new(250.0, 250.0), Vec2::new(150.0, 150.0)],
        }]
    );
}

#[test]
fn burst_boss_fires_eight_evenly_spaced_projectiles_each_period() {
    let mut harness = Harness::new();
    let boss = harness.spawn_boss(3, Vec2::new(600.0, 100.0));
    let _ = harness.tick(0);
    harness.advance_to(18_000);

    let bursts: Vec<&BossAttack> = harness
        .events
        .iter()
        .filter_map(|event| match event {
            Event::BossAttackRequested { boss: source, attack } if *source == boss => Some(attack),
            _ => None,
        })
        .collect();
    assert_eq!(bursts.len(), 2);
    let velocities = bursts[0].projectile_velocities();
    assert_eq!(velocities.len(), 8);
    assert!((velocities[0] - Vec2::new(150.0, 0.0)).length() < 1e-3);
    assert!((velocities[2] - Vec2::new(0.0, 150.0)).length() < 1e-3);
}

#[test]
fn fortified_boss_absorbs_bullets_until_window_closes() {
    let mut harness = Harness::new();
    let boss = harness.spawn_boss(4, Vec2::new(700.0, 500.0));
    let _ = harness.tick(0);
    harness.advance_to(12_000);

    let snapshot = query::boss_view(&harness.world);
    let fortified = snapshot.get(boss).expect("boss alive");
    assert!(fortified.invulnerable);
    assert_eq!(
        fortified.motion,
        BossMotion::Chase {
            speed_multiplier: 1.5,
        }
    );

    let absorbed = harness.shoot(boss);
    assert!(!absorbed
        .iter()
        .any(|event| matches!(event, Event::EntityDamaged { .. })));

    harness.advance_to(15_000);
    let snapshot = query::boss_view(&harness.world);
    let recovered = snapshot.get(boss).expect("boss alive");
    assert!(!recovered.invulnerable);
    assert_eq!(recovered.motion, BossMotion::default());
    assert_eq!(
        harness
            .events
            .iter()
            .filter(|event| matches!(event, Event::BossInvulnerabilityChanged { .. }))
            .count(),
        2
    );

    let hit = harness.shoot(boss);
    assert!(hit.contains(&Event::EntityDamaged {
        entity: EntityId::Boss(boss),
        health: 15,
    }));
}

#[test]
fn phased_boss_escalates_as_it_loses_health() {
    let mut harness = Harness::new();
    let boss = harness.spawn_boss(5, Vec2::new(100.0, 100.0));
    let _ = harness.tick(0);

    for _ in 0..6 {
        let _ = harness.shoot(boss);
        let _ = harness.tick(500);
    }
    let snapshot = query::boss_view(&harness.world);
    let phased = snapshot.get(boss).expect("boss alive");
    assert_eq!(phased.health, 14);
    assert_eq!(phased.phase, 2);
    assert!(harness.events.contains(&Event::BossPhaseChanged { boss, phase: 2 }));

    for _ in 0..6 {
        let _ = harness.shoot(boss);
        let _ = harness.tick(500);
    }
    assert_eq!(query::boss_view(&harness.world).get(boss).map(|b| b.phase), Some(3));
    let phase_events = harness
        .events
        .iter()
        .filter(|event| matches!(event, Event::BossPhaseChanged { .. }))
        .count();
    assert_eq!(phase_events, 2);
}

fn attacks(commands: &[Command]) -> Vec<BossAttack> {
    commands
        .iter()
        .filter_map(|command| match command {
            Command::RequestBossAttack { attack, .. } => Some(attack.clone()),
            _ => None,
        })
        .collect()
}

fn has_burst(commands: &[Command]) -> bool {
    attacks(commands)
        .iter()
        .any(|attack| matches!(attack, BossAttack::RadialBurst { .. }))
}

fn dashes(commands: &[Command]) -> bool {
    commands.iter().any(|command| {
        matches!(
            command,
            Command::SetBossMotion {
                motion: BossMotion::Dash { .. },
                ..
            }
        )
    })
}

#[test]
fn phased_boss_opens_with_a_four_ring() {
    let mut harness = Harness::new();
    let _ = harness.spawn_boss(5, Vec2::new(100.0, 100.0));
    let _ = harness.tick(0);

    let opening = harness.next_burst(16_000);
    assert_eq!(query::clock(&harness.world).elapsed(), Duration::from_secs(15));
    assert!(!dashes(&opening));
    assert!(matches!(
        attacks(&opening).as_slice(),
        [BossAttack::RadialBurst { projectiles: 4, .. }]
    ));
}

#[test]
fn phased_boss_combines_more_attacks_each_phase() {
    let mut harness = Harness::new();
    let boss = harness.spawn_boss(5, Vec2::new(100.0, 100.0));
    let _ = harness.tick(0);

    let mut batches = Vec::new();
    for _ in 0..12 {
        let _ = harness.shoot(boss);
        batches.push(harness.tick(500));
    }
    let second = batches
        .iter()
        .find(|batch| has_burst(batch))
        .expect("phase two attack");
    assert!(!dashes(second));
    match attacks(second).as_slice() {
        [
            BossAttack::SummonMinions { positions },
            BossAttack::RadialBurst { projectiles: 4, .. },
        ] => assert_eq!(positions.len(), 2),
        other => panic!("unexpected phase two attacks {other:?}"),
    }
    assert_eq!(query::boss_view(&harness.world).get(boss).map(|b| b.phase), Some(3));

    let third = harness.next_burst(12_000);
    assert!(dashes(&third));
    assert!(matches!(
        attacks(&third).as_slice(),
        [
            BossAttack::Dash { .. },
            BossAttack::RadialBurst { projectiles: 6, .. }
        ]
    ));

    let mut batches = Vec::new();
    for _ in 0..5 {
        let _ = harness.shoot(boss);
        batches.push(harness.tick(500));
    }
    assert_eq!(query::boss_view(&harness.world).get(boss).map(|b| b.phase), Some(4));
    let fourth = match batches.into_iter().find(|batch| has_burst(batch)) {
        Some(batch) => batch,
        None => harness.next_burst(14_000),
    };
    assert!(dashes(&fourth));
    match attacks(&fourth).as_slice() {
        [
            BossAttack::Dash { .. },
            BossAttack::SummonMinions { positions },
            BossAttack::RadialBurst { projectiles: 8, .. },
        ] => assert_eq!(
            positions,
            &vec![Vec2::new(150.0, 150.0), Vec2::new(50.0, 50.0)]
        ),
        other => panic!("unexpected final phase attacks {other:?}"),
    }
}

#[test]
fn boss_defeated_mid_charge_leaves_no_pending_sequence() {
    let mut harness = Harness::new();
    let boss = harness.spawn_boss(1, Vec2::new(100.0, 300.0));
    let _ = harness.tick(0);
    for _ in 0..9 {
        let _ = harness.shoot(boss);
        let _ = harness.tick(500);
    }
    harness.advance_to(8_000);
    assert!(matches!(
        harness.behavior.stage(boss),
        Some(Stage::Charging { .. })
    ));

    let defeat = harness.shoot(boss);
    assert!(defeat
        .iter()
        .any(|event| matches!(event, Event::EntityDefeated { .. })));

    let after: Vec<Command> = (0..20).flat_map(|_| harness.tick(100)).collect();
    assert!(after.is_empty());
    assert_eq!(harness.behavior.stage(boss), None);
    assert_eq!(harness.behavior.tracked(), 0);
}

#[test]
fn session_restart_clears_every_machine() {
    let mut harness = Harness::new();
    let _ = harness.spawn_boss(1, Vec2::new(100.0, 100.0));
    let _ = harness.spawn_boss(3, Vec2::new(700.0, 100.0));
    let _ = harness.tick(0);
    assert_eq!(harness.behavior.tracked(), 2);

    let tier = query::player(&harness.world).tier;
    let events = harness.run(Command::StartSession { player_tier: tier });
    let mut commands = Vec::new();
    let view = query::boss_view(&harness.world);
    harness.behavior.handle(
        &events,
        BehaviorInputs {
            now: query::clock(&harness.world).elapsed(),
            state: query::session_state(&harness.world),
            bosses: &view,
            player_position: query::player(&harness.world).position,
        },
        &mut commands,
    );
    assert!(commands.is_empty());
    assert_eq!(harness.behavior.tracked(), 0);
}
