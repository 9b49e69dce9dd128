//! Summary of a finished autopilot run.

use std::fmt;

use polygon_survivor_core::SessionState;
use polygon_survivor_session::Session;
use polygon_survivor_world::query;
use serde::Serialize;

/// Outcome printed once the autopilot stops.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct RunReport {
    pub(crate) seed: u64,
    pub(crate) player_sides: u8,
    pub(crate) score: u64,
    pub(crate) survived_seconds: u64,
    pub(crate) enemies_defeated: u32,
    pub(crate) bosses_defeated: u32,
    pub(crate) health: u32,
    pub(crate) defeated: bool,
}

impl RunReport {
    pub(crate) fn capture(session: &Session, seed: u64) -> Self {
        let world = session.world();
        let ledger = query::ledger(world);
        let player = query::player(world);
        Self {
            seed,
            player_sides: player.tier.sides(),
            score: ledger.score(),
            survived_seconds: query::clock(world).elapsed_seconds(),
            enemies_defeated: ledger.enemies_defeated(),
            bosses_defeated: ledger.bosses_defeated(),
            health: player.health,
            defeated: session.state() == SessionState::Defeated,
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.defeated { "defeated" } else { "survived" };
        writeln!(
            f,
            "seed {} | {}-sided player {} after {}s",
            self.seed, self.player_sides, outcome, self.survived_seconds
        )?;
        write!(
            f,
            "score {} | enemies {} | bosses {} | health {}",
            self.score, self.enemies_defeated, self.bosses_defeated, self.health
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> RunReport {
        RunReport {
            seed: 7,
            player_sides: 5,
            score: 1_240,
            survived_seconds: 93,
            enemies_defeated: 61,
            bosses_defeated: 2,
            health: 0,
            defeated: true,
        }
    }

    #[test]
    fn text_summary_lists_outcome_and_tallies() {
        assert_eq!(
            report().to_string(),
            "seed 7 | 5-sided player defeated after 93s\n\
             score 1240 | enemies 61 | bosses 2 | health 0"
        );
    }

    #[test]
    fn json_summary_uses_field_names() {
        let json: serde_json::Value =
            serde_json::to_value(report()).expect("report serializes");
        assert_eq!(json["score"], 1_240);
        assert_eq!(json["bosses_defeated"], 2);
        assert_eq!(json["defeated"], true);
    }
}
