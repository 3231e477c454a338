//! Achievements panel: points, level progress, badges, challenges and
//! the leaderboard. Entirely static.

use crate::{
    config::ShieldConfig,
    panel::Panel,
    types::{Localized, Tab},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id:          u32,
    pub name:        Localized<String>,
    pub description: Localized<String>,
    pub unlocked:    bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    pub id:          u32,
    pub name:        Localized<String>,
    pub description: Localized<String>,
    /// Percent complete.
    pub progress:    u8,
    /// Points awarded on completion.
    pub reward:      u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank:     u32,
    pub name:     Localized<String>,
    pub points:   u32,
    /// Avatar initials. The current user's avatar shows the "you" label instead.
    pub initials: Option<String>,
    pub is_user:  bool,
}

impl LeaderboardEntry {
    /// The top three get a trophy; everyone else shows `#rank`.
    pub fn has_trophy(&self) -> bool {
        self.rank <= 3
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementsData {
    pub total_points:         u32,
    pub level:                u32,
    /// Percent of the way to the next level.
    pub level_progress:       u8,
    pub points_to_next_level: u32,
    pub badges:               Vec<Badge>,
    pub challenges:           Vec<Challenge>,
    pub leaderboard:          Vec<LeaderboardEntry>,
}

pub struct AchievementsPanel {
    config: Arc<ShieldConfig>,
}

impl AchievementsPanel {
    pub fn new(config: Arc<ShieldConfig>) -> Self {
        Self { config }
    }

    pub fn data(&self) -> &AchievementsData {
        &self.config.achievements
    }

    pub fn next_level(&self) -> u32 {
        self.data().level + 1
    }

    pub fn unlocked_badges(&self) -> impl Iterator<Item = &Badge> {
        self.data().badges.iter().filter(|b| b.unlocked)
    }

    /// The current user's leaderboard row, if listed.
    pub fn user_entry(&self) -> Option<&LeaderboardEntry> {
        self.data().leaderboard.iter().find(|e| e.is_user)
    }

    /// Points still available from open challenges.
    pub fn pending_rewards(&self) -> u32 {
        self.data()
            .challenges
            .iter()
            .filter(|c| c.progress < 100)
            .map(|c| c.reward)
            .sum()
    }
}

impl Panel for AchievementsPanel {
    fn tab(&self) -> Tab {
        Tab::Achievements
    }

    fn teardown(&mut self) -> usize {
        0
    }
}
