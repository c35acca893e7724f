use crate::types::{CorrelationSignal, InstitutionalTrade, OfficialTrade, SignalStrength};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Per-symbol accumulator. Name sets back the ordered name lists for membership tests.
struct SymbolTally {
    signal: CorrelationSignal,
    seen_politicians: HashSet<String>,
    seen_institutions: HashSet<String>,
}

impl SymbolTally {
    fn new(symbol: &str) -> Self {
        Self {
            signal: CorrelationSignal {
                stock_symbol: symbol.to_string(),
                congress_count: 0,
                institutional_count: 0,
                total_institutional_value: 0.0,
                politicians: Vec::new(),
                institutions: Vec::new(),
                signal_strength: SignalStrength::MEDIUM,
            },
            seen_politicians: HashSet::new(),
            seen_institutions: HashSet::new(),
        }
    }
}

/// Cross-references official and institutional trades by stock symbol.
///
/// Inputs are expected to be pre-filtered by the caller (lookback window, BUY-only
/// official trades). The correlator itself does no date or type filtering.
#[derive(Default)]
pub struct Correlator;

impl Correlator {
    pub fn correlate(
        &self,
        official_trades: &[OfficialTrade],
        institutional_trades: &[InstitutionalTrade],
    ) -> Vec<CorrelationSignal> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut tallies: Vec<SymbolTally> = Vec::new();

        for trade in official_trades.iter().filter(|t| !t.stock_symbol.is_empty()) {
            let idx = tally_index(&mut index, &mut tallies, &trade.stock_symbol);
            let tally = &mut tallies[idx];
            tally.signal.congress_count += 1;
            if tally.seen_politicians.insert(trade.politician_name.clone()) {
                tally.signal.politicians.push(trade.politician_name.clone());
            }
        }

        for trade in institutional_trades.iter().filter(|t| !t.stock_symbol.is_empty()) {
            let idx = tally_index(&mut index, &mut tallies, &trade.stock_symbol);
            let tally = &mut tallies[idx];
            tally.signal.institutional_count += 1;
            tally.signal.total_institutional_value += trade.value_amount.unwrap_or(0.0);
            if tally.seen_institutions.insert(trade.investor_name.clone()) {
                tally.signal.institutions.push(trade.investor_name.clone());
            }
        }

        let grouped = tallies.len();

        // A lone institutional filing is treated as noise; one congressional trade is enough.
        let mut signals: Vec<CorrelationSignal> = tallies
            .into_iter()
            .map(|t| t.signal)
            .filter(|s| s.congress_count > 0 || s.institutional_count > 1)
            .map(|mut s| {
                s.signal_strength = SignalStrength::classify(s.congress_count, s.institutional_count);
                s
            })
            .collect();

        signals.sort_by(|a, b| b.signal_strength.rank().cmp(&a.signal_strength.rank()));

        debug!(
            "Correlated {} official / {} institutional trades: {} symbols grouped, {} retained",
            official_trades.len(),
            institutional_trades.len(),
            grouped,
            signals.len()
        );

        signals
    }
}

fn tally_index(index: &mut HashMap<String, usize>, tallies: &mut Vec<SymbolTally>, symbol: &str) -> usize {
    *index.entry(symbol.to_string()).or_insert_with(|| {
        tallies.push(SymbolTally::new(symbol));
        tallies.len() - 1
    })
}
