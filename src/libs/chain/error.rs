use alloy::primitives::B256;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoinError {
    #[error("failed to fetch accounts: {0}")]
    Accounts(String),
    #[error("provider returned no accounts")]
    NoAccounts,
    #[error("no account resolved yet")]
    NoAccount,
    #[error("balance query failed: {0}")]
    Balance(String),
    #[error("invalid amount `{0}`")]
    InvalidAmount(String),
    #[error("invalid receiver `{0}`: {1}")]
    InvalidReceiver(String, String),
    #[error("transaction failed: {0}")]
    Transfer(String),
    #[error("transaction {0} reverted")]
    Reverted(B256),
    #[error("a transfer is already in flight")]
    TransferInFlight,
    #[error("voting call failed: {0}")]
    Voting(String),
}

impl CoinError {
    /// Wrap an error chain (anyhow `{:#}` style) into a variant.
    pub fn chain<E: std::fmt::Display>(wrap: fn(String) -> Self, e: E) -> Self {
        wrap(format!("{e:#}"))
    }
}
