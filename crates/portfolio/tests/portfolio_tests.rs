//! Holdings as they arrive from the portfolio file, valued end to end.

use portfolio::{AssetClass, Holding, net_worth, summarize_portfolio};
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

const HOLDINGS: &str = r#"[
    {"symbol": "AAPL", "shares": 10, "purchase_price": "150", "purchase_date": "2023-01-15", "asset_class": "stock"},
    {"symbol": "BND", "shares": "40", "purchase_price": 72.5, "purchase_date": "2023-03-01", "asset_class": "bond"},
    {"symbol": "GLD", "shares": 2, "purchase_price": 180, "purchase_date": "2023-05-20", "notes": "hedge"}
]"#;

#[test]
fn holdings_file_values_and_serializes() {
    let holdings: Vec<Holding> = serde_json::from_str(HOLDINGS).unwrap();
    assert_eq!(holdings[2].asset_class, AssetClass::Other);

    let prices: BTreeMap<String, _> = [("AAPL".to_string(), dec!(180)), ("BND".to_string(), dec!(72.5))].into();
    let summary = summarize_portfolio(&holdings, &prices).unwrap();

    assert_eq!(summary.total_cost, dec!(4760));
    assert_eq!(summary.total_value, dec!(5060));
    assert_eq!(summary.total_gain_loss, dec!(300));
    assert_eq!(summary.allocation.len(), 3);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["allocation"]["stock"]["value"], "1800");
    assert_eq!(json["holdings"][2]["priced"], false);
    assert_eq!(json["holdings"][2]["notes"], "hedge");
    assert!(json["holdings"][0].get("notes").is_none());

    let nw = net_worth(dec!(4940), &summary);
    assert_eq!(nw.total_net_worth, dec!(10000));
    assert_eq!(nw.portfolio_percent, Some(dec!(50.6)));
}
