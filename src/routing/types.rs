//! Routing request and decision types.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Origination channel of a payment.
///
/// Only `"pos"` and `"online"` are recognised (case-sensitive). Every other
/// value, including the empty string, is kept verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Channel {
    /// Card-present point of sale.
    Pos,
    /// Online checkout.
    Online,
    /// Anything else.
    Unknown(String),
}

impl Channel {
    pub fn as_str(&self) -> &str {
        match self {
            Channel::Pos => "pos",
            Channel::Online => "online",
            Channel::Unknown(raw) => raw,
        }
    }
}

impl Default for Channel {
    fn default() -> Self {
        Channel::Unknown(String::new())
    }
}

impl From<String> for Channel {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pos" => Channel::Pos,
            "online" => Channel::Online,
            _ => Channel::Unknown(raw),
        }
    }
}

impl From<&str> for Channel {
    fn from(raw: &str) -> Self {
        Channel::from(raw.to_string())
    }
}

impl From<Channel> for String {
    fn from(channel: Channel) -> Self {
        match channel {
            Channel::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Downstream gateways a payment can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gateway {
    CardPresentPrimary,
    HighValueSecondary,
    OnlinePrimary,
    Fallback,
}

impl Gateway {
    /// Every gateway the router can select.
    pub const ALL: [Gateway; 4] = [
        Gateway::CardPresentPrimary,
        Gateway::HighValueSecondary,
        Gateway::OnlinePrimary,
        Gateway::Fallback,
    ];

    /// Wire name of the gateway.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gateway::CardPresentPrimary => "card-present-primary",
            Gateway::HighValueSecondary => "high-value-secondary",
            Gateway::OnlinePrimary => "online-primary",
            Gateway::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment amount in major currency units.
///
/// Decodes from JSON numbers only; a quoted amount is a type mismatch. Any
/// number within `f64` range decodes, including magnitudes such as `1e29`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON number")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Amount, E> {
        Ok(Amount(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Amount, E> {
        Ok(Amount(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Amount, E> {
        Ok(Amount(value as f64))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_f64(AmountVisitor)
    }
}

/// Inbound routing request.
///
/// Absent fields decode to their empty value and unknown fields are ignored,
/// so a body without `channel` is still routable (to the fallback gateway).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentRequest {
    /// Merchant identifier, opaque to routing.
    pub merchant_id: String,
    /// Amount in major currency units.
    pub amount: Amount,
    /// ISO-4217 style currency code, not used for selection.
    pub currency: String,
    /// Origination channel.
    pub channel: Channel,
}

/// Correlation identifier of a decision, formatted `YYYYMMDD-HHMMSS`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceId(String);

impl TraceId {
    pub const FORMAT: &'static str = "%Y%m%d-%H%M%S";

    /// Build a trace ID from the decision instant, truncated to the second.
    pub fn from_instant(instant: &DateTime<Utc>) -> Self {
        Self(instant.format(Self::FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `raw` has the shape of a trace ID: 8 digits, `-`, 6 digits.
    pub fn is_well_formed(raw: &str) -> bool {
        let bytes = raw.as_bytes();
        bytes.len() == 15
            && bytes[8] == b'-'
            && bytes[..8].iter().all(u8::is_ascii_digit)
            && bytes[9..].iter().all(u8::is_ascii_digit)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Routing decision returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDecision {
    /// Selected gateway.
    pub gateway: Gateway,
    /// Suggested delay before retrying a failed gateway call.
    /// Encoded as integer nanoseconds.
    #[serde(serialize_with = "serialize_nanos")]
    pub retry_in: Duration,
    /// Correlation ID derived from `timestamp`.
    pub trace_id: TraceId,
    /// Instant the decision was made.
    pub timestamp: DateTime<Utc>,
}

fn serialize_nanos<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX))
}
