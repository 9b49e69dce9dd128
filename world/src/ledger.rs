//! Score and kill tallies for the current run.

/// Monotonic score aggregate, reset only by a session restart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreLedger {
    score: u64,
    enemies_defeated: u32,
    bosses_defeated: u32,
}

impl ScoreLedger {
    /// Total score of the run.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Enemies removed by bullets or contact.
    #[must_use]
    pub const fn enemies_defeated(&self) -> u32 {
        self.enemies_defeated
    }

    /// Bosses removed by bullets.
    #[must_use]
    pub const fn bosses_defeated(&self) -> u32 {
        self.bosses_defeated
    }

    /// Credits an enemy kill, returning the new score.
    pub(crate) fn award_enemy(&mut self, points: u64) -> u64 {
        self.enemies_defeated = self.enemies_defeated.saturating_add(1);
        self.add(points)
    }

    /// Credits a boss kill, returning the new score.
    pub(crate) fn award_boss(&mut self, points: u64) -> u64 {
        self.bosses_defeated = self.bosses_defeated.saturating_add(1);
        self.add(points)
    }

    fn add(&mut self, points: u64) -> u64 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
