//! Deployment identifiers.
//!
//! A [`Deployment`] is one contract's reducer pipeline together with its own
//! entity namespace. The two namespaces are independent, so an `Approval`
//! entity may exist in both with unrelated contents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IndexerError;

/// The indexed contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    /// The base VSN token. Mint and burn events feed the supply ledger.
    Vsn,
    /// The sVSN yield-bearing wrapper. Reward distributions feed the
    /// yield snapshot series.
    Svsn,
}

impl Deployment {
    /// All deployments, in a stable order.
    pub const ALL: [Self; 2] = [Self::Vsn, Self::Svsn];

    /// Returns the path/namespace segment for this deployment.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vsn => "vsn",
            Self::Svsn => "svsn",
        }
    }
}

impl fmt::Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Deployment {
    type Err = IndexerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vsn" => Ok(Self::Vsn),
            "svsn" => Ok(Self::Svsn),
            _ => Err(IndexerError::UnknownDeployment(s.to_string())),
        }
    }
}
