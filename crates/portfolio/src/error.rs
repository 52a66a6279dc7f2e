use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortfolioError {
    #[error("Holding '{symbol}' has negative {field}: {value}")]
    NegativeAmount { symbol: String, field: &'static str, value: Decimal },

    #[error("Price for '{symbol}' must be positive, got {price}")]
    InvalidPrice { symbol: String, price: Decimal },
}
