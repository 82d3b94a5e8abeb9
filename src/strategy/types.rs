use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Flip strategy attached to every search task and opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    RawGrading,
    QuickFlip,
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::RawGrading => "Raw → Grade",
            Strategy::QuickFlip => "Quick Flip",
        }
    }
}

impl FromStr for Strategy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw_grading" => Ok(Strategy::RawGrading),
            "quick_flip" => Ok(Strategy::QuickFlip),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::RawGrading => write!(f, "raw_grading"),
            Strategy::QuickFlip => write!(f, "quick_flip"),
        }
    }
}

/// Card category. Serializes as either a `sport` or a `tcg` field so the
/// JSON shape matches what the dashboard expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sport(String),
    Tcg(String),
}

impl Category {
    pub fn sport(name: &str) -> Self {
        Category::Sport(name.to_string())
    }

    pub fn tcg(name: &str) -> Self {
        Category::Tcg(name.to_string())
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Sport(name) | Category::Tcg(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl FromStr for RiskLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(()),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Financial projection for a single listing under one strategy.
///
/// Monetary outputs are whole dollars, truncated toward zero. `net_profit`
/// is computed from the truncated sale price so the numbers shown to the
/// user always reconcile with each other.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub current_price: f64,
    pub projected_sale_price: i64,
    pub net_profit: i64,
    pub roi: i64,
    pub confidence: u8,
    pub risk_level: RiskLevel,
}
