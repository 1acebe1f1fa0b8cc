//! Turning what the user typed into call arguments.
use alloy::primitives::{Address, U256};

use super::error::CoinError;

/// Whole coins, base 10, strictly positive.
pub fn parse_amount(raw: &str) -> Result<U256, CoinError> {
    let s = raw.trim();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoinError::InvalidAmount(raw.to_string()));
    }
    let amount =
        U256::from_str_radix(s, 10).map_err(|_| CoinError::InvalidAmount(raw.to_string()))?;
    if amount.is_zero() {
        return Err(CoinError::InvalidAmount(raw.to_string()));
    }
    Ok(amount)
}

/// 20 bytes of hex with optional `0x`. Mixed case must carry a valid
/// EIP-55 checksum; all-lower / all-upper input is taken as is.
pub fn parse_receiver(raw: &str) -> Result<Address, CoinError> {
    let bad = |why: &str| CoinError::InvalidReceiver(raw.to_string(), why.to_string());

    let s = raw.trim();
    let hex_part = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(bad("expected 20 bytes of hex"));
    }

    let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
    let addr = if has_upper && has_lower {
        Address::parse_checksummed(format!("0x{hex_part}"), None)
            .map_err(|_| bad("checksum mismatch"))?
    } else {
        hex_part.parse::<Address>().map_err(|_| bad("not an address"))?
    };

    if addr.is_zero() {
        return Err(bad("zero address"));
    }
    Ok(addr)
}
