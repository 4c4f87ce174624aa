//! Reference-ticker entry from the reference data provider.

use serde::{Deserialize, Serialize};

/// Polygon's asset-type code for common stock.
pub const COMMON_STOCK: &str = "CS";

/// One row of the reference ticker list: symbol, asset type, and primary
/// exchange. The pipeline inner-joins bars against this list, keeping only
/// common stock; a symbol with bars but no reference entry is silently
/// excluded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerRef {
    pub symbol: String,
    pub asset_type: String,
    pub primary_exchange: Option<String>,
}

impl TickerRef {
    pub fn is_common_stock(&self) -> bool {
        self.asset_type == COMMON_STOCK
    }

    /// True if this ticker trades on the given exchange MIC (e.g. "XNYS").
    pub fn on_exchange(&self, mic: &str) -> bool {
        self.primary_exchange.as_deref() == Some(mic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_stock_predicate() {
        let cs = TickerRef {
            symbol: "AAPL".into(),
            asset_type: "CS".into(),
            primary_exchange: Some("XNAS".into()),
        };
        let etf = TickerRef {
            symbol: "SPY".into(),
            asset_type: "ETF".into(),
            primary_exchange: Some("XNYS".into()),
        };
        assert!(cs.is_common_stock());
        assert!(!etf.is_common_stock());
    }

    #[test]
    fn exchange_predicate_handles_missing() {
        let t = TickerRef {
            symbol: "X".into(),
            asset_type: "CS".into(),
            primary_exchange: None,
        };
        assert!(!t.on_exchange("XNYS"));
    }
}
