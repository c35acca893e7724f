//! Display-ready rows for the dashboard API.
//!
//! Money labels and truncated name lists are rendered here so clients can show
//! them as-is.

use crate::types::{ContractMatch, CorrelationSignal, OfficialTrade, SignalStrength};
use serde::Serialize;

const POLITICIANS_SHOWN: usize = 3;
const INSTITUTIONS_SHOWN: usize = 2;
const MATCH_TRADES_SHOWN: usize = 2;

pub fn format_billions(value: f64) -> String {
    format!("${:.2}B", value / 1_000_000_000.0)
}

pub fn format_millions(value: f64) -> String {
    format!("${:.1}M", value / 1_000_000.0)
}

/// First `shown` names joined with `, `, followed by ` +N more` when truncated.
pub fn summarize_names(names: &[String], shown: usize) -> String {
    let mut out = names.iter().take(shown).cloned().collect::<Vec<_>>().join(", ");
    if names.len() > shown {
        out.push_str(&format!(" +{} more", names.len() - shown));
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationCard {
    pub stock_symbol: String,
    pub signal_strength: SignalStrength,
    pub badge: String,
    pub congress_heading: String,
    pub politicians: String,
    pub institutions_heading: String,
    pub institutions: String,
    pub total_value: Option<String>,
}

impl From<&CorrelationSignal> for CorrelationCard {
    fn from(s: &CorrelationSignal) -> Self {
        Self {
            stock_symbol: s.stock_symbol.clone(),
            signal_strength: s.signal_strength,
            badge: format!("{} SIGNAL", s.signal_strength),
            congress_heading: format!("Congress ({})", s.congress_count),
            politicians: summarize_names(&s.politicians, POLITICIANS_SHOWN),
            institutions_heading: format!("Institutions ({})", s.institutional_count),
            institutions: summarize_names(&s.institutions, INSTITUTIONS_SHOWN),
            total_value: (s.total_institutional_value > 0.0)
                .then(|| format!("Total Institutional Value: {}", format_billions(s.total_institutional_value))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractMatchCard {
    pub company_name: String,
    pub amount: String,
    pub agency: String,
    pub award_date: Option<String>,
    pub traders: Vec<String>,
}

impl From<&ContractMatch> for ContractMatchCard {
    fn from(m: &ContractMatch) -> Self {
        Self {
            company_name: m.contract.company_name.clone(),
            amount: format!("{} from {}", format_millions(m.contract.amount()), m.contract.agency),
            agency: m.contract.agency.clone(),
            award_date: m.contract.award_date.map(|d| d.format("%Y-%m-%d").to_string()),
            traders: m
                .trades
                .iter()
                .take(MATCH_TRADES_SHOWN)
                .map(|t| format!("{} ({})", t.politician_name, t.transaction_type))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRow {
    pub heading: String,
    pub detail: String,
    pub amount: String,
    pub date: String,
    pub transaction_type: String,
}

impl From<&OfficialTrade> for TradeRow {
    fn from(t: &OfficialTrade) -> Self {
        let party = t.politician_party.as_deref().unwrap_or("?");
        let state = t.politician_state.as_deref().unwrap_or("?");
        Self {
            heading: format!("{} ({}-{})", t.politician_name, party, state),
            detail: format!(
                "{} - {} ({})",
                t.transaction_type,
                t.stock_symbol,
                t.company_name.as_deref().unwrap_or("")
            ),
            amount: t.amount_range.clone().unwrap_or_else(|| "N/A".to_string()),
            date: t
                .transaction_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            transaction_type: t.transaction_type.to_string(),
        }
    }
}
