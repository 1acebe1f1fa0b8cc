use std::future::Future;
use std::str::FromStr;

use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use anyhow::{bail, Context, Result};
use metacoin::{Artifact, ReceiptWait, Tallies, TransferReceipt};
use url::Url;

use super::error::CoinError;
use crate::libs::config::Config;
use crate::libs::lookup::save_log_to_file;

/// The contract calls the controller needs. Everything behind it (signing,
/// transport, ABI) belongs to the implementation.
pub trait CoinLedger: Send + Sync {
    fn accounts(&self) -> impl Future<Output = Result<Vec<Address>, CoinError>> + Send;

    fn balance_of(&self, account: Address)
        -> impl Future<Output = Result<U256, CoinError>> + Send;

    fn balance_in_eth(
        &self,
        account: Address,
    ) -> impl Future<Output = Result<U256, CoinError>> + Send;

    /// Resolves once the transaction is mined. A reverted receipt is an
    /// error; a successful one may still carry no `Transfer` event.
    fn send_coin(
        &self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> impl Future<Output = Result<TransferReceipt, CoinError>> + Send;
}

/// [`CoinLedger`] over a deployed MetaCoin contract.
#[derive(Clone)]
pub struct MetaCoinLedger {
    provider: DynProvider,
    contract: Address,
    network_id: u64,
    /// Set when transactions are signed locally; it is then the only account.
    signer: Option<Address>,
    wait: ReceiptWait,
}

impl MetaCoinLedger {
    pub async fn connect(cfg: &Config, wait: ReceiptWait) -> Result<Self> {
        let url = Url::parse(&cfg.rpc_url)
            .with_context(|| format!("Failed to parse RPC_URL: {}", cfg.rpc_url))?;

        let (provider, signer) = match &cfg.private_key {
            Some(pk) => {
                let signer = PrivateKeySigner::from_str(pk)
                    .context("PRIVATE_KEY did not contain a valid hex encoded secret")?;
                let address = signer.address();
                let provider = ProviderBuilder::new()
                    .wallet(signer)
                    .connect_http(url)
                    .erased();
                (provider, Some(address))
            }
            None => (ProviderBuilder::new().connect_http(url).erased(), None),
        };

        let network_id = provider
            .get_net_version()
            .await
            .context("net_version failed")?;

        let contract = match cfg.contract_address {
            Some(addr) => addr,
            None => Artifact::load(&cfg.artifact_path)?.deployed_address(network_id)?,
        };

        let code = provider
            .get_code_at(contract)
            .await
            .with_context(|| format!("eth_getCode({contract}) failed"))?;
        if code.is_empty() {
            bail!("no contract code at {contract} on network {network_id}");
        }

        save_log_to_file(&format!(
            "[ledger] network={network_id} contract={contract} signer={signer:?}"
        ));

        Ok(Self {
            provider,
            contract,
            network_id,
            signer,
            wait,
        })
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    pub fn network_id(&self) -> u64 {
        self.network_id
    }

    pub fn signs_locally(&self) -> bool {
        self.signer.is_some()
    }

    pub async fn tallies(&self, voting: Address) -> Result<Tallies, CoinError> {
        metacoin::voting::tallies(self.provider.clone(), voting)
            .await
            .map_err(|e| CoinError::chain(CoinError::Voting, e))
    }

    pub async fn total_votes(
        &self,
        voting: Address,
        ballot: Vec<U256>,
    ) -> Result<U256, CoinError> {
        metacoin::voting::total_votes(self.provider.clone(), voting, ballot)
            .await
            .map_err(|e| CoinError::chain(CoinError::Voting, e))
    }
}

/// A mined receipt with a failed status is a revert, not a transfer.
fn settle(receipt: TransferReceipt) -> Result<TransferReceipt, CoinError> {
    if !receipt.status {
        return Err(CoinError::Reverted(receipt.tx_hash));
    }
    Ok(receipt)
}

impl CoinLedger for MetaCoinLedger {
    async fn accounts(&self) -> Result<Vec<Address>, CoinError> {
        if let Some(signer) = self.signer {
            return Ok(vec![signer]);
        }
        self.provider
            .get_accounts()
            .await
            .map_err(|e| CoinError::chain(CoinError::Accounts, e))
    }

    async fn balance_of(&self, account: Address) -> Result<U256, CoinError> {
        metacoin::get_balance(self.provider.clone(), self.contract, account)
            .await
            .map_err(|e| CoinError::chain(CoinError::Balance, e))
    }

    async fn balance_in_eth(&self, account: Address) -> Result<U256, CoinError> {
        metacoin::get_balance_in_eth(self.provider.clone(), self.contract, account)
            .await
            .map_err(|e| CoinError::chain(CoinError::Balance, e))
    }

    async fn send_coin(
        &self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<TransferReceipt, CoinError> {
        let receipt = metacoin::send_coin(
            self.provider.clone(),
            self.contract,
            from,
            to,
            amount,
            self.wait,
        )
        .await
        .map_err(|e| CoinError::chain(CoinError::Transfer, e))?;
        settle(receipt)
    }
}
