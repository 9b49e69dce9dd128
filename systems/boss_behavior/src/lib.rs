#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system driving the special-attack sequence of every live boss.
//!
//! Each boss owns one machine cycling `Cooldown -> Charging -> Executing ->
//! Cooldown`. The machine only ever emits commands; the world owns the flags
//! those commands toggle. Bosses that leave the view take their machine with
//! them, so nothing is left pending after a defeat.

use std::{collections::BTreeMap, time::Duration};

use polygon_survivor_core::{
    BossAttack, BossId, BossMotion, BossSnapshot, BossTuning, BossView, Command, Event,
    SessionState, SpecialAttackKind, Vec2,
};
use tracing::{debug, trace};

/// Final phase a phased boss can reach.
const FINAL_PHASE: u8 = 4;

/// Read-only state the behavior system consults on every batch.
#[derive(Clone, Copy, Debug)]
pub struct BehaviorInputs<'a> {
    /// Current session time.
    pub now: Duration,
    /// Lifecycle of the current run.
    pub state: SessionState,
    /// Snapshot of every live boss.
    pub bosses: &'a BossView,
    /// Player position used to lock dash targets.
    pub player_position: Vec2,
}

/// Sub-phase of a boss's special-attack cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stage {
    /// Waiting for the attack timer.
    Cooldown {
        /// Session time at which the next attack triggers.
        ready_at: Duration,
    },
    /// Winding up before a dash.
    Charging {
        /// Session time at which the dash starts.
        until: Duration,
        /// Normalized heading locked at trigger time.
        heading: Vec2,
    },
    /// Running a timed effect.
    Executing {
        /// Session time at which the effect ends.
        until: Duration,
        /// Effect to unwind when the window closes.
        effect: TimedEffect,
    },
}

/// Timed effect a boss unwinds when its execution window closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimedEffect {
    /// Straight-line dash at a speed multiple.
    Dash,
    /// Invulnerable chase at increased speed.
    Fortify,
}

#[derive(Clone, Debug)]
struct Machine {
    special: SpecialAttackKind,
    phase: u8,
    stage: Stage,
    last_trigger: Duration,
}

impl Machine {
    fn new(snapshot: &BossSnapshot, now: Duration, tuning: &BossTuning) -> Self {
        let phase = snapshot.phase.max(1);
        Self {
            special: snapshot.special,
            phase,
            stage: Stage::Cooldown {
                ready_at: now + tuning.attack_period(snapshot.rank, phase),
            },
            last_trigger: now,
        }
    }

    fn is_idle(&self) -> bool {
        matches!(self.stage, Stage::Cooldown { .. })
    }
}

/// Boss behavior system owning one attack machine per live boss.
#[derive(Debug)]
pub struct BossBehavior {
    tuning: BossTuning,
    machines: BTreeMap<BossId, Machine>,
}

impl BossBehavior {
    /// Creates a behavior system with no tracked bosses.
    #[must_use]
    pub fn new(tuning: BossTuning) -> Self {
        Self {
            tuning,
            machines: BTreeMap::new(),
        }
    }

    /// Current stage of the provided boss, if it is tracked.
    #[must_use]
    pub fn stage(&self, boss: BossId) -> Option<Stage> {
        self.machines.get(&boss).map(|machine| machine.stage)
    }

    /// Number of bosses with a live machine.
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.machines.len()
    }

    /// Consumes events and the boss view to emit behavior commands.
    pub fn handle(&mut self, events: &[Event], inputs: BehaviorInputs<'_>, out: &mut Vec<Command>) {
        if events
            .iter()
            .any(|event| matches!(event, Event::SessionStarted { .. }))
        {
            self.machines.clear();
        }

        if inputs.state != SessionState::Running {
            return;
        }

        self.sync(inputs.bosses, inputs.now);

        for snapshot in inputs.bosses.iter() {
            let Some(machine) = self.machines.get_mut(&snapshot.id) else {
                continue;
            };
            escalate(machine, snapshot, &self.tuning, out);
            advance(machine, snapshot, &inputs, &self.tuning, out);
        }
    }

    fn sync(&mut self, bosses: &BossView, now: Duration) {
        self.machines.retain(|id, _| {
            let live = bosses.get(*id).is_some();
            if !live {
                debug!(boss = ?id, "boss machine discarded");
            }
            live
        });
        for snapshot in bosses.iter() {
            let _ = self
                .machines
                .entry(snapshot.id)
                .or_insert_with(|| Machine::new(snapshot, now, &self.tuning));
        }
    }
}

/// Moves a phased boss forward by at most one phase while it is idle.
///
/// The pending cooldown is pulled in to the new phase's period, never pushed out.
fn escalate(
    machine: &mut Machine,
    snapshot: &BossSnapshot,
    tuning: &BossTuning,
    out: &mut Vec<Command>,
) {
    if machine.special != SpecialAttackKind::Phased
        || machine.phase >= FINAL_PHASE
        || !machine.is_idle()
        || snapshot.max_health == 0
    {
        return;
    }

    let fraction = snapshot.health as f32 / snapshot.max_health as f32;
    let threshold = tuning.phase_thresholds[usize::from(machine.phase - 1)];
    if fraction > threshold {
        return;
    }

    machine.phase += 1;
    let shortened = machine.last_trigger + tuning.attack_period(snapshot.rank, machine.phase);
    if let Stage::Cooldown { ready_at } = &mut machine.stage {
        *ready_at = (*ready_at).min(shortened);
    }
    let speed_factor = tuning.phase_speed_factors[..usize::from(machine.phase - 1)]
        .iter()
        .product();
    out.push(Command::SetBossPhase {
        boss: snapshot.id,
        phase: machine.phase,
        speed_factor,
    });
}

fn advance(
    machine: &mut Machine,
    snapshot: &BossSnapshot,
    inputs: &BehaviorInputs<'_>,
    tuning: &BossTuning,
    out: &mut Vec<Command>,
) {
    let boss = snapshot.id;
    let now = inputs.now;
    match machine.stage {
        Stage::Cooldown { ready_at } => {
            if now >= ready_at {
                trigger(machine, snapshot, inputs, tuning, out);
            }
        }
        Stage::Charging { until, heading } => {
            if now >= until {
                out.push(Command::SetBossMotion {
                    boss,
                    motion: BossMotion::Dash {
                        heading,
                        speed_multiplier: tuning.dash_speed_multiplier,
                    },
                });
                machine.stage = Stage::Executing {
                    until: until + Duration::from_millis(tuning.dash_duration_ms),
                    effect: TimedEffect::Dash,
                };
            }
        }
        Stage::Executing { until, effect } => {
            if now >= until {
                if effect == TimedEffect::Fortify {
                    out.push(Command::SetBossInvulnerable {
                        boss,
                        invulnerable: false,
                    });
                }
                out.push(Command::SetBossMotion {
                    boss,
                    motion: BossMotion::default(),
                });
                machine.stage = next_cooldown(machine, snapshot, tuning);
            }
        }
    }
}

fn next_cooldown(machine: &Machine, snapshot: &BossSnapshot, tuning: &BossTuning) -> Stage {
    Stage::Cooldown {
        ready_at: machine.last_trigger + tuning.attack_period(snapshot.rank, machine.phase),
    }
}

fn trigger(
    machine: &mut Machine,
    snapshot: &BossSnapshot,
    inputs: &BehaviorInputs<'_>,
    tuning: &BossTuning,
    out: &mut Vec<Command>,
) {
    let boss = snapshot.id;
    let now = inputs.now;
    machine.last_trigger = now;
    trace!(?boss, special = ?machine.special, phase = machine.phase, "special attack");

    match machine.special {
        SpecialAttackKind::Dash => {
            out.push(Command::SetBossMotion {
                boss,
                motion: BossMotion::Hold,
            });
            out.push(dash_request(boss, inputs.player_position, tuning));
            machine.stage = Stage::Charging {
                until: now + Duration::from_millis(tuning.dash_charge_ms),
                heading: (inputs.player_position - snapshot.position).normalize_or_zero(),
            };
        }
        SpecialAttackKind::Summon => {
            out.push(summon_request(boss, snapshot.position, tuning));
            machine.stage = next_cooldown(machine, snapshot, tuning);
        }
        SpecialAttackKind::RadialBurst => {
            out.push(burst_request(boss, snapshot.position, tuning.burst_projectiles, tuning));
            machine.stage = next_cooldown(machine, snapshot, tuning);
        }
        SpecialAttackKind::Fortify => {
            out.push(Command::SetBossInvulnerable {
                boss,
                invulnerable: true,
            });
            out.push(Command::SetBossMotion {
                boss,
                motion: BossMotion::Chase {
                    speed_multiplier: tuning.fortify_speed_multiplier,
                },
            });
            let duration = Duration::from_millis(tuning.fortify_duration_ms);
            out.push(Command::RequestBossAttack {
                boss,
                attack: BossAttack::Fortify {
                    duration,
                    speed_multiplier: tuning.fortify_speed_multiplier,
                },
            });
            machine.stage = Stage::Executing {
                until: now + duration,
                effect: TimedEffect::Fortify,
            };
        }
        SpecialAttackKind::Phased => trigger_phased(machine, snapshot, inputs, tuning, out),
    }
}

/// Phased bosses chain more attacks as they escalate; the dash skips the wind-up.
fn trigger_phased(
    machine: &mut Machine,
    snapshot: &BossSnapshot,
    inputs: &BehaviorInputs<'_>,
    tuning: &BossTuning,
    out: &mut Vec<Command>,
) {
    let boss = snapshot.id;
    let phase = machine.phase;
    let dashes = phase >= 3;

    if dashes {
        out.push(Command::SetBossMotion {
            boss,
            motion: BossMotion::Dash {
                heading: (inputs.player_position - snapshot.position).normalize_or_zero(),
                speed_multiplier: tuning.dash_speed_multiplier,
            },
        });
        out.push(dash_request(boss, inputs.player_position, tuning));
    }
    if phase == 2 || phase == FINAL_PHASE {
        out.push(summon_request(boss, snapshot.position, tuning));
    }
    let ring = tuning.phase_ring_projectiles[usize::from(phase - 1).min(3)];
    out.push(burst_request(boss, snapshot.position, ring, tuning));

    machine.stage = if dashes {
        Stage::Executing {
            until: inputs.now + Duration::from_millis(tuning.dash_duration_ms),
            effect: TimedEffect::Dash,
        }
    } else {
        next_cooldown(machine, snapshot, tuning)
    };
}

fn dash_request(boss: BossId, target: Vec2, tuning: &BossTuning) -> Command {
    Command::RequestBossAttack {
        boss,
        attack: BossAttack::Dash {
            target,
            speed_multiplier: tuning.dash_speed_multiplier,
            duration: Duration::from_millis(tuning.dash_duration_ms),
        },
    }
}

fn summon_request(boss: BossId, origin: Vec2, tuning: &BossTuning) -> Command {
    let offset = Vec2::splat(tuning.minion_offset);
    Command::RequestBossAttack {
        boss,
        attack: BossAttack::SummonMinions {
            positions: vec![origin + offset, origin - offset],
        },
    }
}

fn burst_request(boss: BossId, origin: Vec2, projectiles: u32, tuning: &BossTuning) -> Command {
    Command::RequestBossAttack {
        boss,
        attack: BossAttack::RadialBurst {
            origin,
            projectiles,
            speed: tuning.projectile_speed,
            damage: tuning.projectile_damage,
        },
    }
}
