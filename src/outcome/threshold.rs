//! Ordered-threshold classification.
//!
//! A `ThresholdTable<T>` maps a score to the value of the highest entry
//! whose bound the score reaches. Scores below every bound fall to the
//! lowest entry. Action success, crime witness and jail checks, and
//! crafting quality tiers are all instances of this one lookup.

use crate::core::ConfigError;

/// How a score is compared against an entry's minimum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Bound {
    /// `score >= min_score` reaches the entry. Ties go to the higher entry.
    #[default]
    Inclusive,
    /// `score > min_score` reaches the entry. Ties stay at the lower entry.
    Exclusive,
}

impl Bound {
    fn reaches(self, score: i64, min_score: i64) -> bool {
        match self {
            Bound::Inclusive => score >= min_score,
            Bound::Exclusive => score > min_score,
        }
    }
}

/// One threshold entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Threshold<T> {
    pub min_score: i64,
    pub value: T,
}

/// Ascending threshold table. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThresholdTable<T> {
    entries: Vec<Threshold<T>>,
    bound: Bound,
}

impl<T> ThresholdTable<T> {
    /// Build a table with inclusive bounds.
    ///
    /// Entries must be non-empty and strictly ascending by `min_score`.
    pub fn new(entries: impl IntoIterator<Item = (i64, T)>) -> Result<Self, ConfigError> {
        Self::with_bound(entries, Bound::Inclusive)
    }

    /// Build a table with the given comparison rule.
    pub fn with_bound(
        entries: impl IntoIterator<Item = (i64, T)>,
        bound: Bound,
    ) -> Result<Self, ConfigError> {
        let entries: Vec<Threshold<T>> = entries
            .into_iter()
            .map(|(min_score, value)| Threshold { min_score, value })
            .collect();

        if entries.is_empty() {
            return Err(ConfigError::EmptyThresholds);
        }
        if let Some(index) = entries
            .windows(2)
            .position(|w| w[1].min_score <= w[0].min_score)
        {
            return Err(ConfigError::UnsortedThresholds {
                index: index + 1,
                min_score: entries[index + 1].min_score,
            });
        }

        Ok(Self { entries, bound })
    }

    /// Two-entry table: `below` under `cut`, `reached` at or past it.
    ///
    /// The lower entry sits at `i64::MIN`, so this never fails.
    pub fn binary(cut: i64, below: T, reached: T, bound: Bound) -> Self {
        let entries = if cut == i64::MIN && bound == Bound::Inclusive {
            vec![Threshold {
                min_score: cut,
                value: reached,
            }]
        } else if cut == i64::MIN {
            vec![
                Threshold {
                    min_score: cut,
                    value: below,
                },
                Threshold {
                    min_score: cut,
                    value: reached,
                },
            ]
        } else {
            vec![
                Threshold {
                    min_score: i64::MIN,
                    value: below,
                },
                Threshold {
                    min_score: cut,
                    value: reached,
                },
            ]
        };
        Self { entries, bound }
    }

    /// Value of the highest entry the score reaches, or the lowest entry.
    #[must_use]
    pub fn classify(&self, score: i64) -> &T {
        let reached = self
            .entries
            .partition_point(|e| self.bound.reaches(score, e.min_score));
        &self.entries[reached.saturating_sub(1)].value
    }

    /// Entries in ascending order.
    #[must_use]
    pub fn entries(&self) -> &[Threshold<T>] {
        &self.entries
    }

    #[must_use]
    pub fn bound(&self) -> Bound {
        self.bound
    }

    /// Lowest entry.
    #[must_use]
    pub fn lowest(&self) -> &T {
        &self.entries[0].value
    }

    /// Highest entry.
    #[must_use]
    pub fn highest(&self) -> &T {
        &self.entries[self.entries.len() - 1].value
    }
}
