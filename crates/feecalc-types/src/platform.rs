use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FeeCalcError, Result};

/// Supported resale marketplaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ebay,
    Etsy,
    Mercari,
    Poshmark,
    Depop,
    #[serde(rename = "facebook")]
    FacebookMarketplace,
}

/// Fee formula family a platform is priced with.
///
/// Chosen by platform identity, never by which rule fields happen to be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormulaFamily {
    /// Percentage of (discounted price + buyer shipping) plus fixed amounts
    StandardPercentPlusFixed,
    /// Flat fee below a price threshold, flat percentage of the discounted price above it
    FlatThresholdOrPercent,
}

impl Platform {
    /// Returns all supported platforms
    pub fn all() -> &'static [Platform] {
        &[
            Platform::Ebay,
            Platform::Etsy,
            Platform::Mercari,
            Platform::Poshmark,
            Platform::Depop,
            Platform::FacebookMarketplace,
        ]
    }

    /// Returns the platform key as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ebay => "ebay",
            Platform::Etsy => "etsy",
            Platform::Mercari => "mercari",
            Platform::Poshmark => "poshmark",
            Platform::Depop => "depop",
            Platform::FacebookMarketplace => "facebook",
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Ebay => "eBay",
            Platform::Etsy => "Etsy",
            Platform::Mercari => "Mercari",
            Platform::Poshmark => "Poshmark",
            Platform::Depop => "Depop",
            Platform::FacebookMarketplace => "Facebook Marketplace",
        }
    }

    /// Parse a platform from a string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ebay" => Some(Platform::Ebay),
            "etsy" => Some(Platform::Etsy),
            "mercari" => Some(Platform::Mercari),
            "poshmark" => Some(Platform::Poshmark),
            "depop" => Some(Platform::Depop),
            "facebook" | "facebook_marketplace" | "facebookmarketplace" => {
                Some(Platform::FacebookMarketplace)
            }
            _ => None,
        }
    }

    /// Parse a platform, failing with [`FeeCalcError::UnknownPlatform`]
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| FeeCalcError::UnknownPlatform(s.to_string()))
    }

    /// Formula family this platform's fees follow
    pub fn formula_family(&self) -> FormulaFamily {
        match self {
            Platform::Poshmark => FormulaFamily::FlatThresholdOrPercent,
            Platform::Ebay
            | Platform::Etsy
            | Platform::Mercari
            | Platform::Depop
            | Platform::FacebookMarketplace => FormulaFamily::StandardPercentPlusFixed,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
