//! Column labels of the shipped Ethereum/Bitcoin dataset.

/// Total value locked, billions of dollars.
pub const TVL: &str = "TVL (bn $)";
/// On-chain transactions, millions.
pub const TRANSACTIONS: &str = "Transactions (mn)";
/// Stablecoin capitalisation, billions of dollars.
pub const STABLECOINS: &str = "Stablecoins (bn $)";
/// Native asset price, dollars.
pub const ETH_PRICE: &str = "ETH Price ($)";
/// Bitcoin closing price, dollars.
pub const BTC_PRICE: &str = "BTC Price ($)";
