//! Badges and missions: the achievement records and the rules that unlock them.
use serde::{Deserialize, Serialize};

/// An achievement with a progress counter and a fixed threshold.
///
/// `earned` only ever flips from `false` to `true`, and `earned_at` is stamped
/// once, when that happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub earned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earned_at: Option<u64>,
    pub requirement: u32,
    pub progress: u32,
}

impl Badge {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        requirement: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            earned: false,
            earned_at: None,
            requirement,
            progress: 0,
        }
    }

    #[must_use]
    pub const fn threshold_reached(&self) -> bool {
        self.progress >= self.requirement
    }

    /// Write a derived progress value. Progress never moves backwards.
    pub fn record_progress(&mut self, value: u32) {
        self.progress = self.progress.max(value);
    }

    pub fn bump_progress(&mut self) {
        self.progress = self.progress.saturating_add(1);
    }

    /// Unlock the badge if its threshold is met.
    ///
    /// Returns `true` only on the call that flips `earned`. A badge that was
    /// already earned without a timestamp gets one, but is not reported again.
    pub fn evaluate(&mut self, now_ms: u64) -> bool {
        if self.earned {
            if self.earned_at.is_none() {
                self.earned_at = Some(now_ms);
            }
            return false;
        }
        if !self.threshold_reached() {
            return false;
        }
        self.earned = true;
        self.earned_at = Some(now_ms);
        true
    }
}

/// A short goal with a numeric target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub reward: String,
    pub target: u32,
    pub progress: u32,
}

impl Mission {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        reward: impl Into<String>,
        target: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            completed: false,
            reward: reward.into(),
            target,
            progress: 0,
        }
    }

    /// Absolute overwrite; callers may exceed the target.
    pub fn set_progress(&mut self, progress: u32) {
        self.progress = progress;
        self.completed = progress >= self.target;
    }

    /// Raise progress toward `value`, capped at the target. Never lowers it.
    pub fn advance_to(&mut self, value: u32) {
        let capped = value.min(self.target);
        if capped > self.progress {
            self.set_progress(capped);
        }
    }

    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.target.saturating_sub(self.progress)
    }
}

/// Run [`Badge::evaluate`] over every badge and collect the ids that were
/// unlocked by this pass.
pub fn evaluate_badges(badges: &mut [Badge], now_ms: u64) -> Vec<String> {
    badges
        .iter_mut()
        .filter_map(|badge| badge.evaluate(now_ms).then(|| badge.id.clone()))
        .collect()
}
