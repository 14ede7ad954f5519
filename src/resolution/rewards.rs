//! Margin-scaled rewards.

use crate::actions::ActionReward;
use crate::core::RewardCurve;

/// Scale an action's base reward by its success margin.
///
/// XP and gold grow by the curve's bonus percentage, truncated. Item
/// rewards are granted as declared.
#[must_use]
pub fn scale_reward(base: &ActionReward, margin: i64, curve: &RewardCurve) -> ActionReward {
    let bonus = u64::try_from(curve.bonus_percent(margin)).unwrap_or(0);
    let scale = |amount: u64| amount.saturating_mul(100 + bonus) / 100;

    ActionReward {
        xp: scale(base.xp),
        gold: scale(base.gold),
        items: base.items.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ItemReward;
    use crate::core::ItemId;

    fn base() -> ActionReward {
        ActionReward {
            xp: 100,
            gold: 55,
            items: vec![ItemReward {
                item_id: ItemId::new(3),
                quantity: 1,
            }],
        }
    }

    #[test]
    fn test_zero_margin_is_base() {
        assert_eq!(scale_reward(&base(), 0, &RewardCurve::default()), base());
    }

    #[test]
    fn test_margin_bonus() {
        // margin 5 -> +10%
        let scaled = scale_reward(&base(), 5, &RewardCurve::default());
        assert_eq!(scaled.xp, 110);
        assert_eq!(scaled.gold, 60);
        assert_eq!(scaled.items, base().items);
    }

    #[test]
    fn test_bonus_capped() {
        let scaled = scale_reward(&base(), 500, &RewardCurve::default());
        assert_eq!(scaled.xp, 150);
    }

    #[test]
    fn test_monotonic_in_margin() {
        let curve = RewardCurve::default();
        let mut last = 0;
        for margin in 0..60 {
            let xp = scale_reward(&base(), margin, &curve).xp;
            assert!(xp >= last);
            last = xp;
        }
    }
}
