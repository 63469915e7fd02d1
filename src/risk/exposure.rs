//! Aggregate exposure across a user's trading accounts.

use tracing::debug;

use crate::models::{AccountExposure, AccountSnapshot, ExposureReport};

/// Equity / margin as a percentage; 0 when there is no equity or no margin in use.
fn margin_level(equity: f64, margin: f64) -> f64 {
    if equity > 0.0 && margin > 0.0 {
        equity / margin * 100.0
    } else {
        0.0
    }
}

/// Sum balances, equity, and margin across `accounts`.
///
/// The aggregate margin level is recomputed from the totals rather than
/// averaged over per-account levels. An empty slice yields an all-zero report.
pub fn account_exposure(accounts: &[AccountSnapshot]) -> ExposureReport {
    let lines: Vec<AccountExposure> = accounts
        .iter()
        .map(|account| AccountExposure {
            account_id: account.account_id.clone(),
            balance: account.balance,
            equity: account.equity,
            margin: account.margin,
            leverage: account.leverage.clone(),
            margin_level: margin_level(account.equity, account.margin),
            free_margin: account.equity - account.margin,
        })
        .collect();

    let total_balance: f64 = accounts.iter().map(|a| a.balance).sum();
    let total_equity: f64 = accounts.iter().map(|a| a.equity).sum();
    let total_margin: f64 = accounts.iter().map(|a| a.margin).sum();

    debug!(
        accounts = accounts.len(),
        total_equity = total_equity,
        total_margin = total_margin,
        "Aggregated account exposure"
    );

    ExposureReport {
        total_balance,
        total_equity,
        total_margin,
        margin_level: margin_level(total_equity, total_margin),
        free_margin: total_equity - total_margin,
        accounts: lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_accounts() {
        let report = account_exposure(&[]);

        assert_eq!(report, ExposureReport::default());
        assert_eq!(report.margin_level, 0.0);
        assert!(report.accounts.is_empty());
    }

    #[test]
    fn test_totals_based_margin_level() {
        let accounts = vec![
            AccountSnapshot::new(1_000.0, 1_000.0, 100.0, "1:100"), // 1000%
            AccountSnapshot::new(5_000.0, 4_000.0, 4_000.0, "1:500"), // 100%
        ];
        let report = account_exposure(&accounts);

        assert_eq!(report.total_balance, 6_000.0);
        assert_eq!(report.total_equity, 5_000.0);
        assert_eq!(report.total_margin, 4_100.0);
        assert_eq!(report.free_margin, 900.0);

        // 5000 / 4100, not the 550% average of the per-account levels
        assert!((report.margin_level - 5_000.0 / 4_100.0 * 100.0).abs() < 1e-9);

        assert_eq!(report.accounts.len(), 2);
        assert!((report.accounts[0].margin_level - 1_000.0).abs() < 1e-9);
        assert!((report.accounts[1].margin_level - 100.0).abs() < 1e-9);
        assert_eq!(report.accounts[1].free_margin, 0.0);
    }

    #[test]
    fn test_no_margin_in_use() {
        let accounts = vec![AccountSnapshot::new(2_500.0, 2_500.0, 0.0, "1:200")];
        let report = account_exposure(&accounts);

        assert_eq!(report.margin_level, 0.0);
        assert_eq!(report.free_margin, 2_500.0);
        assert!(report.margin_level.is_finite());
    }

    #[test]
    fn test_negative_equity_has_zero_level() {
        let accounts = vec![AccountSnapshot::new(1_000.0, -50.0, 300.0, "1:100")];
        let report = account_exposure(&accounts);

        assert_eq!(report.accounts[0].margin_level, 0.0);
        assert_eq!(report.free_margin, -350.0);
    }
}
