//! Savings accrual calculator.
//!
//! Savings are never stored as a ticking counter. The persisted state keeps
//! a checkpoint (`base_cents` at `base_at_ts`) and everything after that
//! instant is derived: checkpoint plus elapsed wall-clock time times the
//! per-second rate. Rate changes and cigarette costs re-anchor the
//! checkpoint (see [`crate::store`]); this module is pure arithmetic.

use crate::state::Settings;

/// Seconds in one day.
const DAY_SECONDS: f64 = 86_400.0;

/// Daily cigarette spend implied by the settings, rounded to whole cents.
///
/// Zero when `cigs_per_pack` is zero; the division guard lives at the
/// settings call sites, this function just refuses to divide.
pub fn daily_spend_cents(settings: &Settings) -> i64 {
    if settings.cigs_per_pack == 0 {
        return 0;
    }
    let packs_per_day = settings.cigs_per_day as f64 / settings.cigs_per_pack as f64;
    (packs_per_day * settings.pack_price_cents as f64).round().max(0.0) as i64
}

/// Accrual rate in cents per second. Fractional on purpose: rounding here
/// would drift over long intervals.
pub fn rate_cents_per_second(settings: &Settings) -> f64 {
    daily_spend_cents(settings) as f64 / DAY_SECONDS
}

/// Savings at `now_ts`, derived from the checkpoint.
///
/// Pure function of its four inputs; idempotent, clamped at zero, and
/// tolerant of a clock that reads before the checkpoint (negative deltas
/// count as zero elapsed time).
pub fn accrued_cents(base_cents: i64, base_at_ts: i64, now_ts: i64, rate_cents_per_second: f64) -> i64 {
    let delta_seconds = ((now_ts - base_at_ts) as f64 / 1000.0).max(0.0);
    (base_cents as f64 + delta_seconds * rate_cents_per_second)
        .round()
        .max(0.0) as i64
}

/// Gross accrual minus the cost of logged cigarettes, floored at zero.
pub fn net_savings_cents(accrued_cents: i64, cigarettes_spent_cents: i64) -> i64 {
    (accrued_cents - cigarettes_spent_cents).max(0)
}

/// Net savings minus treat/pet spend, floored at zero. This is the balance
/// purchases are checked against.
pub fn spendable_cents(net_savings_cents: i64, caprichos_spent_cents: i64) -> i64 {
    (net_savings_cents - caprichos_spent_cents).max(0)
}

/// Cost of a single cigarette, fractional cents.
pub fn cost_per_cigarette_cents(settings: &Settings) -> f64 {
    if settings.cigs_per_pack == 0 {
        return 0.0;
    }
    settings.pack_price_cents as f64 / settings.cigs_per_pack as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn settings(cigs_per_day: u32, cigs_per_pack: u32, pack_price_cents: i64) -> Settings {
        Settings {
            cigs_per_day,
            cigs_per_pack,
            pack_price_cents,
            ..Settings::default()
        }
    }

    #[test]
    fn pack_a_day_at_five_euros_spends_five_euros() {
        let s = settings(20, 20, 500);
        assert_eq!(daily_spend_cents(&s), 500);
        let rate = rate_cents_per_second(&s);
        assert!((rate - 500.0 / 86_400.0).abs() < 1e-12);
    }

    #[test]
    fn one_full_day_accrues_the_daily_spend() {
        let s = settings(20, 20, 500);
        let rate = rate_cents_per_second(&s);
        let t0 = 1_700_000_000_000;
        let accrued = accrued_cents(0, t0, t0 + 86_400_000, rate);
        assert_eq!(accrued, 500);
    }

    #[test]
    fn partial_packs_round_to_nearest_cent() {
        // 10 cigarettes from a 20-pack at 4.99: half a pack a day.
        let s = settings(10, 20, 499);
        assert_eq!(daily_spend_cents(&s), 250);
    }

    #[test]
    fn zero_pack_size_yields_zero_spend() {
        let s = settings(20, 0, 500);
        assert_eq!(daily_spend_cents(&s), 0);
        assert_eq!(rate_cents_per_second(&s), 0.0);
        assert_eq!(cost_per_cigarette_cents(&s), 0.0);
    }

    #[test]
    fn clock_before_checkpoint_counts_as_zero_elapsed() {
        assert_eq!(accrued_cents(300, 1_000_000, 900_000, 1.0), 300);
    }

    #[test]
    fn balances_never_go_negative() {
        assert_eq!(net_savings_cents(100, 500), 0);
        assert_eq!(spendable_cents(100, 500), 0);
    }

    proptest! {
        /// Accrual is non-decreasing in `now_ts` for a non-negative rate.
        #[test]
        fn accrual_is_monotonic(
            base in 0i64..1_000_000,
            base_at in 0i64..10_000_000_000,
            dt1 in 0i64..100_000_000,
            dt2 in 0i64..100_000_000,
            rate in 0.0f64..10.0,
        ) {
            let (early, late) = if dt1 <= dt2 { (dt1, dt2) } else { (dt2, dt1) };
            let a = accrued_cents(base, base_at, base_at + early, rate);
            let b = accrued_cents(base, base_at, base_at + late, rate);
            prop_assert!(a <= b);
        }

        /// Re-anchoring the checkpoint at T does not move the value at T.
        #[test]
        fn reanchoring_is_seamless(
            base in 0i64..1_000_000,
            base_at in 0i64..10_000_000_000,
            dt in 0i64..100_000_000,
            rate in 0.0f64..10.0,
        ) {
            let t = base_at + dt;
            let before = accrued_cents(base, base_at, t, rate);
            let after = accrued_cents(before, t, t, rate);
            prop_assert_eq!(before, after);
        }

        /// Derived balances are never negative, whatever the spend.
        #[test]
        fn floors_hold(
            accrued in 0i64..1_000_000,
            cig_spent in 0i64..2_000_000,
            treat_spent in 0i64..2_000_000,
        ) {
            let net = net_savings_cents(accrued, cig_spent);
            prop_assert!(net >= 0);
            prop_assert!(spendable_cents(net, treat_spent) >= 0);
        }
    }
}
