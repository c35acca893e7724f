use chrono::{TimeZone, Utc};
use smart_money_tracker::contracts::{award_timing, days_before_award, TickerFragment, TimingWindow, DEFAULT_WATCHLIST};
use smart_money_tracker::types::{AwardTiming, Contract, OfficialTrade, TransactionType};
use smart_money_tracker::ContractMatcher;

fn contract(id: i64, company: &str) -> Contract {
    Contract {
        id: Some(id),
        company_name: company.to_string(),
        contract_amount: Some(1_200_000_000.0),
        agency: "U.S. Air Force".to_string(),
        ..Default::default()
    }
}

fn trade(name: &str, symbol: &str, kind: TransactionType) -> OfficialTrade {
    OfficialTrade {
        politician_name: name.to_string(),
        stock_symbol: symbol.to_string(),
        transaction_type: kind,
        ..Default::default()
    }
}

#[test]
fn test_lockheed_contract_matches_lmt_trade() {
    let contracts = vec![contract(1, "Lockheed Martin Corp")];
    let trades = vec![trade("Tuberville", "LMT", TransactionType::BUY), trade("Pelosi", "NVDA", TransactionType::BUY)];

    let matches = ContractMatcher::default().match_contracts(&contracts, &trades, &DEFAULT_WATCHLIST);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].contract.id, Some(1));
    assert_eq!(matches[0].trades.len(), 1);
    assert_eq!(matches[0].trades[0].politician_name, "Tuberville");
}

#[test]
fn test_unknown_company_is_excluded() {
    let contracts = vec![contract(1, "Acme Widgets")];
    let trades = vec![trade("Tuberville", "LMT", TransactionType::BUY)];

    let matches = ContractMatcher::default().match_contracts(&contracts, &trades, &DEFAULT_WATCHLIST);
    assert!(matches.is_empty());
}

#[test]
fn test_known_company_without_trades_is_excluded() {
    let contracts = vec![contract(1, "Boeing Company")];
    let trades = vec![trade("Tuberville", "LMT", TransactionType::BUY)];

    let matches = ContractMatcher::default().match_contracts(&contracts, &trades, &DEFAULT_WATCHLIST);
    assert!(matches.is_empty());
}

#[test]
fn test_output_follows_contract_order() {
    let contracts = vec![
        contract(7, "Palantir Technologies"),
        contract(3, "SpaceX"),
        contract(5, "Microsoft Corporation"),
        contract(2, "Amazon Web Services"),
    ];
    let trades = vec![
        trade("Pelosi", "MSFT", TransactionType::BUY),
        trade("Greene", "PLTR", TransactionType::SELL),
        trade("Khanna", "AMZN", TransactionType::BUY),
        trade("Khanna", "MSFT", TransactionType::SELL),
    ];

    let matches = ContractMatcher::default().match_contracts(&contracts, &trades, &DEFAULT_WATCHLIST);
    let ids: Vec<i64> = matches.iter().filter_map(|m| m.contract.id).collect();
    assert_eq!(ids, vec![7, 5, 2]);
    assert_eq!(matches[1].trades.len(), 2);
}

#[test]
fn test_symbol_lookup_is_case_insensitive_and_first_match_wins() {
    let matcher = ContractMatcher::default();
    assert_eq!(matcher.symbol_for("NORTHROP GRUMMAN SYSTEMS CORP"), Some("NOC"));
    assert_eq!(matcher.symbol_for("General Dynamics Land Systems"), Some("GD"));
    assert_eq!(matcher.symbol_for("AWS GovCloud"), Some("AMZN"));
    assert_eq!(matcher.symbol_for("Acme Widgets"), None);

    static SHADOWED: [TickerFragment; 2] = [
        TickerFragment { fragment: "martin", symbol: "MLM" },
        TickerFragment { fragment: "lockheed", symbol: "LMT" },
    ];
    let custom = ContractMatcher::with_fragments(&SHADOWED);
    assert_eq!(custom.symbol_for("Lockheed Martin"), Some("MLM"));
}

#[test]
fn test_trades_outside_watchlist_are_ignored() {
    let contracts = vec![contract(1, "Tesla Inc")];
    let trades = vec![trade("Pelosi", "TSLA", TransactionType::BUY)];

    let matches = ContractMatcher::default().match_contracts(&contracts, &trades, &DEFAULT_WATCHLIST);
    assert!(matches.is_empty());

    let watchlist = vec!["TSLA".to_string()];
    let matches = ContractMatcher::default().match_contracts(&contracts, &trades, &watchlist);
    assert_eq!(matches.len(), 1);
}

#[test]
fn test_award_timing_flags_buys_near_award() {
    let mut lockheed = contract(1, "Lockheed Martin");
    lockheed.award_date = Some(Utc.with_ymd_and_hms(2024, 12, 5, 0, 0, 0).unwrap());

    let mut before = trade("Tuberville", "LMT", TransactionType::BUY);
    before.transaction_date = Some(Utc.with_ymd_and_hms(2024, 11, 20, 0, 0, 0).unwrap());
    let mut after = trade("Crenshaw", "LMT", TransactionType::BUY);
    after.transaction_date = Some(Utc.with_ymd_and_hms(2024, 12, 15, 0, 0, 0).unwrap());
    let mut too_early = trade("Greene", "LMT", TransactionType::BUY);
    too_early.transaction_date = Some(Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap());
    let mut sale = trade("Khanna", "LMT", TransactionType::SELL);
    sale.transaction_date = Some(Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
    let undated = trade("Warren", "LMT", TransactionType::BUY);

    let trades = vec![before, after, too_early, sale, undated];
    let matches = ContractMatcher::default().match_contracts(&[lockheed], &trades, &DEFAULT_WATCHLIST);
    assert_eq!(matches[0].trades.len(), 5);

    let patterns = award_timing(&matches, TimingWindow::default());
    assert_eq!(patterns.len(), 2);

    assert_eq!(patterns[0].politician, "Tuberville");
    assert_eq!(patterns[0].days_before_award, 15);
    assert_eq!(patterns[0].timing, AwardTiming::BEFORE_AWARD);
    assert_eq!(patterns[0].contract_amount, 1_200_000_000.0);

    assert_eq!(patterns[1].politician, "Crenshaw");
    assert_eq!(patterns[1].days_before_award, -10);
    assert_eq!(patterns[1].timing, AwardTiming::AFTER_AWARD);
}

#[test]
fn test_award_timing_skips_contract_without_date() {
    let mut buy = trade("Tuberville", "LMT", TransactionType::BUY);
    buy.transaction_date = Some(Utc.with_ymd_and_hms(2024, 11, 20, 0, 0, 0).unwrap());
    let matches = ContractMatcher::default().match_contracts(&[contract(1, "Lockheed Martin")], &[buy], &DEFAULT_WATCHLIST);

    assert_eq!(matches.len(), 1);
    assert!(award_timing(&matches, TimingWindow::default()).is_empty());
}

#[test]
fn test_timing_window_bounds() {
    let window = TimingWindow::default();
    assert!(window.contains(60));
    assert!(window.contains(-30));
    assert!(window.contains(0));
    assert!(!window.contains(61));
    assert!(!window.contains(-31));
}

#[test]
fn test_partial_days_round_down() {
    let award = Utc.with_ymd_and_hms(2024, 12, 5, 0, 0, 0).unwrap();
    assert_eq!(days_before_award(award, Utc.with_ymd_and_hms(2025, 1, 4, 12, 0, 0).unwrap()), -31);
    assert_eq!(days_before_award(award, Utc.with_ymd_and_hms(2025, 1, 4, 0, 0, 0).unwrap()), -30);
    assert_eq!(days_before_award(award, Utc.with_ymd_and_hms(2024, 12, 4, 12, 0, 0).unwrap()), 0);
    assert_eq!(days_before_award(award, Utc.with_ymd_and_hms(2024, 12, 5, 6, 0, 0).unwrap()), -1);
}

#[test]
fn test_half_day_past_window_edge_is_excluded() {
    let mut lockheed = contract(1, "Lockheed Martin");
    lockheed.award_date = Some(Utc.with_ymd_and_hms(2024, 12, 5, 0, 0, 0).unwrap());

    let mut late = trade("Crenshaw", "LMT", TransactionType::BUY);
    late.transaction_date = Some(Utc.with_ymd_and_hms(2025, 1, 4, 12, 0, 0).unwrap());
    let mut on_edge = trade("Tuberville", "LMT", TransactionType::BUY);
    on_edge.transaction_date = Some(Utc.with_ymd_and_hms(2025, 1, 4, 0, 0, 0).unwrap());

    let matches = ContractMatcher::default().match_contracts(&[lockheed], &[late, on_edge], &DEFAULT_WATCHLIST);
    let patterns = award_timing(&matches, TimingWindow::default());

    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].politician, "Tuberville");
    assert_eq!(patterns[0].days_before_award, -30);
}

#[test]
fn test_repeated_contract_id_collapses_to_one_match() {
    let mut revised = contract(4, "Lockheed Martin");
    revised.contract_amount = Some(1_500_000_000.0);
    let contracts = vec![
        contract(4, "Lockheed Martin"),
        contract(5, "Microsoft Corporation"),
        revised,
    ];
    let trades = vec![
        trade("Tuberville", "LMT", TransactionType::BUY),
        trade("Pelosi", "MSFT", TransactionType::BUY),
    ];

    let matches = ContractMatcher::default().match_contracts(&contracts, &trades, &DEFAULT_WATCHLIST);
    let ids: Vec<i64> = matches.iter().filter_map(|m| m.contract.id).collect();
    assert_eq!(ids, vec![4, 5]);
    assert_eq!(matches[0].contract.amount(), 1_500_000_000.0);
}

#[test]
fn test_contracts_without_id_are_not_collapsed() {
    let mut first = contract(0, "Lockheed Martin");
    first.id = None;
    let second = first.clone();
    let trades = vec![trade("Tuberville", "LMT", TransactionType::BUY)];

    let matches = ContractMatcher::default().match_contracts(&[first, second], &trades, &DEFAULT_WATCHLIST);
    assert_eq!(matches.len(), 2);
}

#[test]
fn test_full_table_symbols_reach_every_ticker() {
    let matcher = ContractMatcher::default();
    let symbols = matcher.symbols();
    assert_eq!(
        symbols,
        vec!["MSFT", "AMZN", "PLTR", "NVDA", "LMT", "BA", "RTX", "NOC", "GD", "SPACE", "TSLA", "AAPL", "GOOGL", "META"]
    );

    let mut raytheon = contract(8, "Raytheon Technologies");
    raytheon.award_date = Some(Utc.with_ymd_and_hms(2024, 12, 5, 0, 0, 0).unwrap());
    let mut buy = trade("Greene", "RTX", TransactionType::BUY);
    buy.transaction_date = Some(Utc.with_ymd_and_hms(2024, 11, 25, 0, 0, 0).unwrap());

    let matches = matcher.match_contracts(&[raytheon], &[buy], &symbols);
    let patterns = award_timing(&matches, TimingWindow::default());
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].stock_symbol, "RTX");
    assert_eq!(patterns[0].days_before_award, 10);
}
