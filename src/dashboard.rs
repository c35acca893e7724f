use crate::config::Config;
use crate::contracts::{award_timing, ContractMatcher, TimingWindow};
use crate::correlation::Correlator;
use crate::supabase::{Query, StoreError, SupabaseClient, CONGRESSIONAL_TRADES, FEDERAL_CONTRACTS, INSTITUTIONAL_TRADES};
use crate::types::{
    Contract, ContractMatch, CorrelationSignal, InstitutionalTrade, OfficialTrade, TimingPattern, TransactionType,
};
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// ISO-8601 (millisecond, `Z`) timestamp for `now - days`, the form the store compares against.
/// `None` when the subtraction leaves chrono's representable range.
pub fn lookback_cutoff(now: DateTime<Utc>, days: i64) -> Option<String> {
    let window = TimeDelta::try_days(days)?;
    now.checked_sub_signed(window)
        .map(|cutoff| cutoff.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContractsOverview {
    pub contracts: Vec<Contract>,
    pub matches: Vec<ContractMatch>,
    pub timing: Vec<TimingPattern>,
}

/// Fetches records and runs the correlators. Store failures are logged and
/// surface as empty results; nothing here returns an error.
pub struct Dashboard {
    store: SupabaseClient,
    correlator: Correlator,
    matcher: ContractMatcher,
    lookback_days: i64,
    contract_limit: usize,
    watchlist: Vec<String>,
    timing_window: TimingWindow,
}

impl Dashboard {
    pub fn new(store: SupabaseClient, config: &Config) -> Self {
        Self {
            store,
            correlator: Correlator,
            matcher: ContractMatcher::default(),
            lookback_days: config.lookback_days,
            contract_limit: config.contract_limit,
            watchlist: config.watchlist.clone(),
            timing_window: TimingWindow::default(),
        }
    }

    pub fn trades_query() -> Query {
        Query::from(CONGRESSIONAL_TRADES).order("transaction_date", false)
    }

    pub fn recent_buys_query(cutoff: &str) -> Query {
        Query::from(CONGRESSIONAL_TRADES)
            .gte("transaction_date", cutoff)
            .eq("transaction_type", TransactionType::BUY)
    }

    pub fn recent_filings_query(cutoff: &str) -> Query {
        Query::from(INSTITUTIONAL_TRADES).gte("filing_date", cutoff)
    }

    pub fn top_contracts_query(limit: usize) -> Query {
        Query::from(FEDERAL_CONTRACTS)
            .order("contract_amount", false)
            .limit(limit)
    }

    pub fn all_contracts_query() -> Query {
        Query::from(FEDERAL_CONTRACTS)
    }

    pub fn all_buys_query() -> Query {
        Query::from(CONGRESSIONAL_TRADES).eq("transaction_type", TransactionType::BUY)
    }

    pub fn watchlist_trades_query(watchlist: &[String]) -> Query {
        Query::from(CONGRESSIONAL_TRADES).in_list("stock_symbol", watchlist)
    }

    pub async fn recent_trades(&self) -> Vec<OfficialTrade> {
        or_empty("trades", self.store.select(&Self::trades_query()).await)
    }

    pub async fn correlations(&self, now: DateTime<Utc>) -> Vec<CorrelationSignal> {
        let Some(cutoff) = lookback_cutoff(now, self.lookback_days) else {
            warn!("[Dashboard] Lookback of {} days is out of range", self.lookback_days);
            return Vec::new();
        };

        let official: Vec<OfficialTrade> =
            match self.store.select(&Self::recent_buys_query(&cutoff)).await {
                Ok(rows) => rows,
                Err(e) => {
                    warn!("[Dashboard] Error finding correlations: {}", e);
                    return Vec::new();
                }
            };
        let institutional: Vec<InstitutionalTrade> =
            match self.store.select(&Self::recent_filings_query(&cutoff)).await {
                Ok(rows) => rows,
                Err(e) => {
                    warn!("[Dashboard] Error finding correlations: {}", e);
                    return Vec::new();
                }
            };

        let signals = self.correlator.correlate(&official, &institutional);
        info!(
            "[Dashboard] {} correlation signal(s) since {}",
            signals.len(),
            cutoff
        );
        signals
    }

    pub async fn contracts_overview(&self) -> ContractsOverview {
        let contracts: Vec<Contract> = or_empty(
            "contracts",
            self.store.select(&Self::top_contracts_query(self.contract_limit)).await,
        );
        let trades: Vec<OfficialTrade> = or_empty(
            "watchlist trades",
            self.store.select(&Self::watchlist_trades_query(&self.watchlist)).await,
        );

        let matches = self.matcher.match_contracts(&contracts, &trades, &self.watchlist);
        let timing = self.timing_patterns().await;
        if !matches.is_empty() || !timing.is_empty() {
            info!(
                "[Dashboard] {} contract-trade match(es), {} timing pattern(s)",
                matches.len(),
                timing.len()
            );
        }

        ContractsOverview { contracts, matches, timing }
    }

    /// Scans every stored contract against every official BUY, independent of the
    /// panel's contract limit and watchlist.
    async fn timing_patterns(&self) -> Vec<TimingPattern> {
        let contracts: Vec<Contract> =
            or_empty("timing contracts", self.store.select(&Self::all_contracts_query()).await);
        if contracts.is_empty() {
            return Vec::new();
        }
        let buys: Vec<OfficialTrade> =
            or_empty("timing trades", self.store.select(&Self::all_buys_query()).await);

        let matches = self.matcher.match_contracts(&contracts, &buys, &self.matcher.symbols());
        award_timing(&matches, self.timing_window)
    }
}

fn or_empty<T>(what: &str, result: Result<Vec<T>, StoreError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!("[Dashboard] Error fetching {}: {}", what, e);
        Vec::new()
    })
}
