//! # Baseline
//!
//! The metadata every signup record carries from its first phase to its
//! last: an identifier, the browser, and the client's IP address.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cbc_core::{IpAddress, IpPolicy, ValidationError};

use crate::browser::Browser;

/// Unique identifier for a signup flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignupId(Uuid);

impl SignupId {
    /// Generate a new random signup identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SignupId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SignupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "signup:{}", self.0)
    }
}

/// Fields present in every phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Baseline {
    id: SignupId,
    browser: Browser,
    ip_address: IpAddress,
}

impl Baseline {
    /// Baseline for a new signup flow, with a fresh [`SignupId`].
    pub fn new(browser: Browser, ip_address: IpAddress) -> Self {
        Self::with_id(SignupId::new(), browser, ip_address)
    }

    /// Baseline with a caller-chosen identifier.
    pub fn with_id(id: SignupId, browser: Browser, ip_address: IpAddress) -> Self {
        Self {
            id,
            browser,
            ip_address,
        }
    }

    /// Classify the browser name and validate the IP address under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedIpAddress`] if the address fails
    /// the policy's check.
    pub fn parse(browser: &str, ip_address: &str, policy: IpPolicy) -> Result<Self, ValidationError> {
        let ip_address = IpAddress::parse_with(ip_address, policy)?;
        Ok(Self::new(Browser::from_name(browser), ip_address))
    }

    /// The signup identifier.
    pub fn id(&self) -> SignupId {
        self.id
    }

    /// The browser the signup started from.
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// The client's IP address.
    pub fn ip_address(&self) -> &IpAddress {
        &self.ip_address
    }
}
