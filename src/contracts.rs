use crate::types::{AwardTiming, Contract, ContractMatch, OfficialTrade, TimingPattern, TransactionType};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use std::collections::HashMap;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct TickerFragment {
    pub fragment: &'static str,
    pub symbol: &'static str,
}

// Company-name fragments (lowercase) mapped to tickers.
// - Matching is substring containment on the lowercased awardee name.
// - Order is significant: the first fragment contained in the name wins.

lazy_static! {
    pub static ref COMPANY_TICKERS: Vec<TickerFragment> = vec![
        TickerFragment { fragment: "microsoft", symbol: "MSFT" },
        TickerFragment { fragment: "amazon", symbol: "AMZN" },
        TickerFragment { fragment: "aws", symbol: "AMZN" },
        TickerFragment { fragment: "palantir", symbol: "PLTR" },
        TickerFragment { fragment: "nvidia", symbol: "NVDA" },
        TickerFragment { fragment: "lockheed", symbol: "LMT" },
        TickerFragment { fragment: "boeing", symbol: "BA" },
        TickerFragment { fragment: "raytheon", symbol: "RTX" },
        TickerFragment { fragment: "northrop", symbol: "NOC" },
        TickerFragment { fragment: "general dynamics", symbol: "GD" },
        TickerFragment { fragment: "spacex", symbol: "SPACE" },
        TickerFragment { fragment: "tesla", symbol: "TSLA" },
        TickerFragment { fragment: "apple", symbol: "AAPL" },
        TickerFragment { fragment: "google", symbol: "GOOGL" },
        TickerFragment { fragment: "meta", symbol: "META" },
    ];

    pub static ref DEFAULT_WATCHLIST: Vec<String> = ["MSFT", "PLTR", "NVDA", "AMZN", "LMT", "BA", "NOC", "GD"]
        .iter()
        .map(|s| s.to_string())
        .collect();
}

/// Days relative to the award date in which an official BUY counts as a timing pattern.
/// `days_before_award` is positive when the trade preceded the award.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingWindow {
    pub max_days_after: i64,
    pub max_days_before: i64,
}

impl Default for TimingWindow {
    fn default() -> Self {
        Self { max_days_after: 30, max_days_before: 60 }
    }
}

impl TimingWindow {
    pub fn contains(&self, days_before_award: i64) -> bool {
        (-self.max_days_after..=self.max_days_before).contains(&days_before_award)
    }
}

pub struct ContractMatcher {
    fragments: &'static [TickerFragment],
}

impl Default for ContractMatcher {
    fn default() -> Self {
        Self { fragments: COMPANY_TICKERS.as_slice() }
    }
}

impl ContractMatcher {
    pub fn with_fragments(fragments: &'static [TickerFragment]) -> Self {
        Self { fragments }
    }

    pub fn symbol_for(&self, company_name: &str) -> Option<&'static str> {
        let lower = company_name.to_lowercase();
        self.fragments
            .iter()
            .find(|f| lower.contains(f.fragment))
            .map(|f| f.symbol)
    }

    /// Every ticker in the fragment table, deduplicated, in table order.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = Vec::new();
        for f in self.fragments {
            if !symbols.iter().any(|s| s == f.symbol) {
                symbols.push(f.symbol.to_string());
            }
        }
        symbols
    }

    /// Pairs each contract whose awardee maps to a ticker with the official trades in that ticker.
    /// Contracts with no ticker, or no trades in it, are dropped. Input order is kept.
    /// Rows repeating a contract id collapse into one entry at the first row's position,
    /// carrying the last row's data.
    pub fn match_contracts(
        &self,
        contracts: &[Contract],
        official_trades: &[OfficialTrade],
        watchlist: &[String],
    ) -> Vec<ContractMatch> {
        let mut matches: Vec<ContractMatch> = Vec::new();
        let mut by_id: HashMap<i64, usize> = HashMap::new();

        for contract in contracts {
            let Some(symbol) = self.symbol_for(&contract.company_name) else { continue };
            let trades: Vec<OfficialTrade> = official_trades
                .iter()
                .filter(|t| t.stock_symbol == symbol)
                .filter(|t| watchlist.iter().any(|w| w == &t.stock_symbol))
                .cloned()
                .collect();
            if trades.is_empty() {
                continue;
            }

            let m = ContractMatch {
                contract: contract.clone(),
                trades,
            };
            match contract.id.and_then(|id| by_id.get(&id).copied()) {
                Some(idx) => matches[idx] = m,
                None => {
                    if let Some(id) = contract.id {
                        by_id.insert(id, matches.len());
                    }
                    matches.push(m);
                }
            }
        }

        matches
    }
}

/// Whole days from `trade_date` to `award_date`, rounded down (a trade half a day
/// after the award is -1).
pub fn days_before_award(award_date: DateTime<Utc>, trade_date: DateTime<Utc>) -> i64 {
    (award_date - trade_date).num_seconds().div_euclid(86_400)
}

/// Flags official BUYs placed within `window` of a matched contract's award date.
/// Trades or contracts without a known date are skipped.
pub fn award_timing(matches: &[ContractMatch], window: TimingWindow) -> Vec<TimingPattern> {
    let mut patterns = Vec::new();

    for m in matches {
        let Some(award_date) = m.contract.award_date else { continue };

        for trade in m.trades.iter().filter(|t| t.transaction_type == TransactionType::BUY) {
            let Some(trade_date) = trade.transaction_date else { continue };
            let days = days_before_award(award_date, trade_date);
            if !window.contains(days) {
                continue;
            }

            let timing = if days > 0 { AwardTiming::BEFORE_AWARD } else { AwardTiming::AFTER_AWARD };
            match timing {
                AwardTiming::BEFORE_AWARD => warn!(
                    "BEFORE AWARD: {} bought {} {} days before ${:.0} contract ({})",
                    trade.politician_name, trade.stock_symbol, days, m.contract.amount(), m.contract.agency
                ),
                AwardTiming::AFTER_AWARD => info!(
                    "After award: {} bought {} {} days after ${:.0} contract ({})",
                    trade.politician_name, trade.stock_symbol, days.abs(), m.contract.amount(), m.contract.agency
                ),
            }

            patterns.push(TimingPattern {
                politician: trade.politician_name.clone(),
                stock_symbol: trade.stock_symbol.clone(),
                company_name: m.contract.company_name.clone(),
                trade_date,
                award_date,
                days_before_award: days,
                contract_amount: m.contract.amount(),
                agency: m.contract.agency.clone(),
                timing,
            });
        }
    }

    patterns
}
