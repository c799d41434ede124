use serde::{Deserialize, Serialize};
use std::fmt;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy at strike price
    Call,
    /// Right to sell at strike price
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// One side (call or put) of an options chain row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    pub bid: f64,
    pub ask: f64,
    /// Last traded price
    pub ltp: f64,
    pub change: f64,
    pub volume: u64,
    /// Open interest
    pub oi: u64,
    /// Implied volatility in percentage points
    pub iv: f64,
}

/// A strike row in the options chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    pub strike: f64,
    pub call: OptionQuote,
    pub put: OptionQuote,
}

impl OptionContract {
    /// Quote for the given side.
    pub fn quote(&self, option_type: OptionType) -> &OptionQuote {
        match option_type {
            OptionType::Call => &self.call,
            OptionType::Put => &self.put,
        }
    }

    /// Whether this strike is in the money for the given side at `spot`.
    pub fn is_itm(&self, option_type: OptionType, spot: f64) -> bool {
        match option_type {
            OptionType::Call => self.strike < spot,
            OptionType::Put => self.strike > spot,
        }
    }
}

/// Greeks across the strike ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreeksPoint {
    pub strike: f64,
    pub call_delta: f64,
    pub put_delta: f64,
    pub gamma: f64,
    /// Time decay per day (call side)
    pub theta: f64,
    /// Sensitivity to a 1 point change in volatility
    pub vega: f64,
}

/// Implied volatility against moneyness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolSmilePoint {
    pub strike: f64,
    /// Strike divided by spot
    pub moneyness: f64,
    pub iv: f64,
}
