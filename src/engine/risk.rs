//! Gambler's-ruin estimate from aggregate win/loss odds.
//!
//! Each round is one step of a biased walk: +1 bet with `p_win`, −1 bet with
//! `p_loss`. Payout size is ignored; this is a coarse drift indicator.

use crate::core::RUIN_SENTINEL;
use crate::error::{EngineError, Result};

/// Probability of hitting zero before reaching `bankroll + target_profit`.
///
/// With non-negative drift (`p_win >= p_loss`) the fixed [`RUIN_SENTINEL`] is
/// returned: the classical ratio degenerates there and is not evaluated.
pub fn risk_of_ruin(
    bankroll: f64,
    bet: f64,
    target_profit: f64,
    p_win: f64,
    p_loss: f64,
) -> Result<f64> {
    if !bet.is_finite() || bet <= 0.0 {
        return Err(EngineError::InvalidStake(format!("bet must be positive, got {}", bet)));
    }
    if !bankroll.is_finite() || bankroll < 0.0 {
        return Err(EngineError::InvalidStake(format!(
            "bankroll must be non-negative, got {}",
            bankroll
        )));
    }
    if !target_profit.is_finite() || target_profit < 0.0 {
        return Err(EngineError::InvalidStake(format!(
            "target profit must be non-negative, got {}",
            target_profit
        )));
    }

    for (label, p) in [("p_win", p_win), ("p_loss", p_loss)] {
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(EngineError::InvalidProbability(format!(
                "{} must lie in [0, 1], got {}",
                label, p
            )));
        }
    }

    if p_win >= p_loss {
        return Ok(RUIN_SENTINEL);
    }

    let start = (bankroll / bet).floor();
    let goal = ((bankroll + target_profit) / bet).floor();
    if start <= 0.0 {
        return Ok(1.0);
    }
    if start >= goal {
        return Ok(0.0);
    }

    // (r^a − r^N) / (1 − r^N) with r = q/p, rewritten over s = p/q < 1 so the
    // powers shrink instead of overflowing.
    let s = p_win / p_loss;
    let ruin = (1.0 - s.powf(goal - start)) / (1.0 - s.powf(goal));
    Ok(ruin.clamp(0.0, 1.0))
}
