use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TransactionType {
    #[default]
    BUY,
    SELL,
    #[serde(other)]
    OTHER,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::BUY => "BUY",
            Self::SELL => "SELL",
            Self::OTHER => "OTHER",
        })
    }
}

/// A disclosed securities transaction by an elected official.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfficialTrade {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub politician_name: String,
    #[serde(default)]
    pub politician_party: Option<String>,
    #[serde(default)]
    pub politician_state: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub stock_symbol: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default = "unknown_transaction", deserialize_with = "transaction_or_other")]
    pub transaction_type: TransactionType,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub transaction_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub amount_range: Option<String>,
}

/// A disclosed position change by an institutional investor (13F-style filing).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstitutionalTrade {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub investor_name: String,
    #[serde(default)]
    pub investor_type: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub stock_symbol: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub shares_amount: Option<i64>,
    #[serde(default)]
    pub value_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub filing_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: Option<String>,
}

/// An awarded federal contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub company_name: String,
    #[serde(default)]
    pub contract_amount: Option<f64>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub agency: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub award_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contract_id: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl Contract {
    pub fn amount(&self) -> f64 {
        self.contract_amount.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum SignalStrength {
    #[default]
    MEDIUM,
    HIGH,
    EXTREME,
}

impl SignalStrength {
    /// Three-tier classification of how strongly both populations overlap on one symbol.
    pub fn classify(congress_count: usize, institutional_count: usize) -> Self {
        if congress_count >= 2 && institutional_count >= 2 {
            Self::EXTREME
        } else if congress_count >= 1 && institutional_count >= 1 {
            Self::HIGH
        } else {
            Self::MEDIUM
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Self::EXTREME => 3,
            Self::HIGH => 2,
            Self::MEDIUM => 1,
        }
    }
}

impl std::fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::EXTREME => "EXTREME",
            Self::HIGH => "HIGH",
            Self::MEDIUM => "MEDIUM",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationSignal {
    pub stock_symbol: String,
    pub congress_count: usize,
    pub institutional_count: usize,
    pub total_institutional_value: f64,
    pub politicians: Vec<String>,
    pub institutions: Vec<String>,
    pub signal_strength: SignalStrength,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractMatch {
    pub contract: Contract,
    pub trades: Vec<OfficialTrade>,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AwardTiming {
    BEFORE_AWARD,
    AFTER_AWARD,
}

/// An official BUY placed near the award date of a contract for the same company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingPattern {
    pub politician: String,
    pub stock_symbol: String,
    pub company_name: String,
    pub trade_date: DateTime<Utc>,
    pub award_date: DateTime<Utc>,
    pub days_before_award: i64,
    pub contract_amount: f64,
    pub agency: String,
    pub timing: AwardTiming,
}

fn string_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn unknown_transaction() -> TransactionType {
    TransactionType::OTHER
}

// A null or missing type is unknown, not a decode failure for the whole batch.
fn transaction_or_other<'de, D: Deserializer<'de>>(d: D) -> Result<TransactionType, D::Error> {
    Ok(Option::<TransactionType>::deserialize(d)?.unwrap_or(TransactionType::OTHER))
}

// Stored dates come back as full timestamps or bare dates depending on the column type.
fn lenient_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
