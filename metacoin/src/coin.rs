use std::time::Duration;

use alloy::network::ReceiptResponse;
use alloy::primitives::{Address, B256, U256};
use alloy::providers::Provider;
use alloy::rpc::types::eth::{Log as RpcLog, TransactionReceipt};
use anyhow::{bail, Context, Result};

use crate::abi::MetaCoin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinTransfer {
    pub from: Address,
    pub to: Address,
    pub value: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub status: bool,
    /// The `Transfer` event emitted by the coin contract, if any.
    pub transfer: Option<CoinTransfer>,
}

impl TransferReceipt {
    pub fn moved_coins(&self) -> bool {
        self.status && self.transfer.is_some()
    }
}

/// How long and how deep to wait for a submitted transfer.
#[derive(Debug, Clone, Copy)]
pub struct ReceiptWait {
    pub confirmations: u64,
    pub timeout: Duration,
}

impl Default for ReceiptWait {
    fn default() -> Self {
        Self {
            confirmations: 1,
            timeout: Duration::from_secs(120),
        }
    }
}

pub async fn get_balance<P: Provider + Clone>(
    provider: P,
    coin: Address,
    owner: Address,
) -> Result<U256> {
    let ret = MetaCoin::new(coin, provider).getBalance(owner).call().await?;
    Ok(ret)
}

pub async fn get_balance_in_eth<P: Provider + Clone>(
    provider: P,
    coin: Address,
    owner: Address,
) -> Result<U256> {
    let ret = MetaCoin::new(coin, provider)
        .getBalanceInEth(owner)
        .call()
        .await?;
    Ok(ret)
}

/// Submit `sendCoin(to, amount)` from `from` and wait for the receipt.
///
/// Signing is left to the provider: a wallet filler when one is attached,
/// otherwise the node signs for its own unlocked `from` account.
pub async fn send_coin<P: Provider + Clone>(
    provider: P,
    coin: Address,
    from: Address,
    to: Address,
    amount: U256,
    wait: ReceiptWait,
) -> Result<TransferReceipt> {
    if amount.is_zero() {
        bail!("amount must be > 0");
    }
    let mc = MetaCoin::new(coin, provider);
    let pending = mc.sendCoin(to, amount).from(from).send().await?;
    let tx = *pending.tx_hash();
    let receipt = pending
        .with_required_confirmations(wait.confirmations)
        .with_timeout(Some(wait.timeout))
        .get_receipt()
        .await
        .with_context(|| format!("waiting for receipt of {tx}"))?;
    Ok(summarize_receipt(coin, &receipt))
}

pub fn summarize_receipt(coin: Address, receipt: &TransactionReceipt) -> TransferReceipt {
    TransferReceipt {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
        status: receipt.status(),
        transfer: decode_transfer(coin, receipt.inner.logs()),
    }
}

/// First `Transfer` emitted by `coin` in `logs`. Other contracts sharing
/// the event signature (any ERC20) are ignored.
pub fn decode_transfer(coin: Address, logs: &[RpcLog]) -> Option<CoinTransfer> {
    logs.iter()
        .filter(|log| log.address() == coin)
        .find_map(|log| log.log_decode::<MetaCoin::Transfer>().ok())
        .map(|decoded| {
            let ev = decoded.inner.data;
            CoinTransfer {
                from: ev._from,
                to: ev._to,
                value: ev._value,
            }
        })
}
