//! Everything that talks to the node: the [`ledger::CoinLedger`] seam the
//! controller runs against, its alloy implementation, a raw JSON-RPC
//! [`client::NodeProbe`] for startup diagnostics, and the input parsing in
//! [`spells`].
pub mod client;
pub mod error;
pub mod ledger;
pub mod spells;
