//! Liquidity Pool Holder Analysis
//!
//! Partitions LP holders into burnt (dead address) and locked (lock contract)
//! groups and sums each group's share of the pool. The groups are disjoint:
//! a dead holder is never counted as locked, whatever the provider flag says.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::address::is_dead_address;
use crate::ports::models::LiquidityHolder;

/// Share of the pool above which liquidity counts as locked or burnt
pub const LOCK_THRESHOLD: Decimal = dec!(0.9);

/// Summed LP shares per holder class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiquidityBreakdown {
    /// Share held by lock contracts (non-dead, provider-flagged locked)
    pub locked_percentage: Decimal,
    /// Share held by dead addresses
    pub burnt_percentage: Decimal,
}

impl LiquidityBreakdown {
    /// True when the locked share clears the lock threshold.
    pub fn locked_above_threshold(&self) -> bool {
        self.locked_percentage > LOCK_THRESHOLD
    }

    /// True when the burnt share clears the lock threshold.
    pub fn burnt_above_threshold(&self) -> bool {
        self.burnt_percentage > LOCK_THRESHOLD
    }
}

/// Partition holders into disjoint dead/locked groups and sum their shares.
pub fn partition_holders(holders: &[LiquidityHolder]) -> LiquidityBreakdown {
    let mut breakdown = LiquidityBreakdown::default();
    for holder in holders {
        if is_dead_address(&holder.address) {
            breakdown.burnt_percentage += holder.percent_value();
        } else if holder.is_locked {
            breakdown.locked_percentage += holder.percent_value();
        }
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder(address: &str, percent: &str, is_locked: bool) -> LiquidityHolder {
        LiquidityHolder {
            address: address.to_string(),
            percent: percent.to_string(),
            is_locked,
        }
    }

    #[test]
    fn test_dead_holder_counts_as_burnt_only() {
        // Dead and flagged locked at the same time: dead wins, no double count
        let holders = vec![holder("0x0000dead", "0.95", true)];
        let breakdown = partition_holders(&holders);
        assert_eq!(breakdown.burnt_percentage, dec!(0.95));
        assert_eq!(breakdown.locked_percentage, Decimal::ZERO);
    }

    #[test]
    fn test_locked_requires_provider_flag() {
        let holders = vec![
            holder("0xaaa", "0.50", true),
            holder("0xbbb", "0.30", false),
        ];
        let breakdown = partition_holders(&holders);
        assert_eq!(breakdown.locked_percentage, dec!(0.50));
        assert_eq!(breakdown.burnt_percentage, Decimal::ZERO);
    }

    #[test]
    fn test_mixed_holder_list_sums_disjoint_groups() {
        let holders = vec![
            holder("0x000000000000000000000000000000000000dEaD", "0.40", false),
            holder("0x0000beef", "0.10", false),
            holder("0xlocker1", "0.35", true),
            holder("0xwhale", "0.15", false),
        ];
        let breakdown = partition_holders(&holders);
        assert_eq!(breakdown.burnt_percentage, dec!(0.50));
        assert_eq!(breakdown.locked_percentage, dec!(0.35));
    }

    #[test]
    fn test_threshold_is_strictly_exceeded() {
        let at_threshold = partition_holders(&[holder("0xlock", "0.9", true)]);
        assert!(!at_threshold.locked_above_threshold());

        let above = partition_holders(&[holder("0xlock", "0.91", true)]);
        assert!(above.locked_above_threshold());
    }

    #[test]
    fn test_unparseable_percent_contributes_zero() {
        let holders = vec![
            holder("0x0000dead", "oops", false),
            holder("0x0000dead2", "0.25", false),
        ];
        let breakdown = partition_holders(&holders);
        assert_eq!(breakdown.burnt_percentage, dec!(0.25));
    }

    #[test]
    fn test_empty_holder_list() {
        let breakdown = partition_holders(&[]);
        assert_eq!(breakdown, LiquidityBreakdown::default());
    }
}
