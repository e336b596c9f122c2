//! Plain-text rendering of an allocation result

use std::fmt;

use consumption_allocator_core_rs::AllocationResult;

fn check(ok: bool) -> &'static str {
    if ok {
        "OK"
    } else {
        "MISMATCH"
    }
}

/// Table, column sums, targets and match checks
pub struct Report<'a>(pub &'a AllocationResult);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let summary = &result.summary;

        writeln!(
            f,
            "{:>3}  {:<8} {:>10} {:>14} {:>10} {:>14}",
            "#", "Month", "Quantity", "Value excl.", "Fee", "Value incl."
        )?;
        for row in &result.rows {
            writeln!(
                f,
                "{:>3}  {:<8} {:>10.1} {:>14.3} {:>10.3} {:>14.3}",
                row.ordinal,
                row.month,
                row.quantity,
                row.value_excluding_fee,
                row.fee,
                row.value_including_fee
            )?;
        }
        writeln!(
            f,
            "{:>3}  {:<8} {:>10.1} {:>14.3} {:>10.3} {:>14.3}",
            "",
            "Total",
            summary.quantity_sum,
            summary.value_excluding_fee_sum,
            summary.fee_sum,
            summary.value_including_fee_sum
        )?;

        writeln!(f)?;
        writeln!(
            f,
            "Quantity target: {:.1} ({})",
            summary.quantity_target,
            check(summary.quantity_matches())
        )?;
        writeln!(
            f,
            "Value target:    {:.3} ({})",
            summary.value_target,
            check(summary.value_matches())
        )?;
        if summary.quantity_shortfall > 0.0 {
            writeln!(f, "Quantity shortfall: {:.1}", summary.quantity_shortfall)?;
        } else if summary.quantity_overshoot() > 0.0 {
            writeln!(f, "Quantity overshoot: {:.1}", summary.quantity_overshoot())?;
        }
        writeln!(
            f,
            "Tiers: {:.2} / {:.2} / {:.2}   seed {}   balancer {} moves in {} trials",
            result.tiers.first,
            result.tiers.second,
            result.tiers.third,
            result.rng_seed,
            result.balance.accepted_moves,
            result.balance.trials
        )
    }
}
