//! Gateway matching rules.
//!
//! # Rules (checked in order, first match wins)
//! 1. `pos` → card-present-primary
//! 2. `online` with amount above the high-value threshold → high-value-secondary
//! 3. `online` otherwise → online-primary
//! 4. anything else → fallback
//!
//! # Design Decisions
//! - Currency and merchant are not inspected
//! - Threshold comparison is strict: exactly 1000 stays on online-primary
//! - Negative amounts are not rejected, they just never exceed the threshold

use crate::routing::types::{Amount, Channel, Gateway};

/// Online payments strictly above this amount go to the high-value gateway.
pub const HIGH_VALUE_THRESHOLD: Amount = Amount::new(1000.0);

/// Select the gateway for a channel and amount.
pub fn select_gateway(channel: &Channel, amount: Amount) -> Gateway {
    match channel {
        Channel::Pos => Gateway::CardPresentPrimary,
        Channel::Online if amount > HIGH_VALUE_THRESHOLD => Gateway::HighValueSecondary,
        Channel::Online => Gateway::OnlinePrimary,
        Channel::Unknown(_) => Gateway::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amt(value: f64) -> Amount {
        Amount::new(value)
    }

    #[test]
    fn test_pos_ignores_amount() {
        for amount in [amt(-5.0), amt(0.0), amt(50.0), amt(1000.0), amt(1000000.0)] {
            assert_eq!(select_gateway(&Channel::Pos, amount), Gateway::CardPresentPrimary);
        }
    }

    #[test]
    fn test_online_threshold_is_strict() {
        assert_eq!(select_gateway(&Channel::Online, amt(1000.0)), Gateway::OnlinePrimary);
        assert_eq!(select_gateway(&Channel::Online, amt(1000.00)), Gateway::OnlinePrimary);
        assert_eq!(select_gateway(&Channel::Online, amt(1000.01)), Gateway::HighValueSecondary);
        assert_eq!(select_gateway(&Channel::Online, amt(1500.0)), Gateway::HighValueSecondary);
        assert_eq!(select_gateway(&Channel::Online, amt(1e29)), Gateway::HighValueSecondary);
    }

    #[test]
    fn test_online_low_and_negative_amounts() {
        assert_eq!(select_gateway(&Channel::Online, amt(0.0)), Gateway::OnlinePrimary);
        assert_eq!(select_gateway(&Channel::Online, amt(-2500.0)), Gateway::OnlinePrimary);
        assert_eq!(select_gateway(&Channel::Online, amt(999.99)), Gateway::OnlinePrimary);
    }

    #[test]
    fn test_unknown_channels_fall_back() {
        for raw in ["", "mobile", "Online", "POS", " pos"] {
            let channel = Channel::from(raw);
            assert_eq!(select_gateway(&channel, amt(5000.0)), Gateway::Fallback, "channel {raw:?}");
            assert_eq!(select_gateway(&channel, amt(-1.0)), Gateway::Fallback, "channel {raw:?}");
        }
    }
}
