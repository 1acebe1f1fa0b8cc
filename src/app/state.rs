//! What the screen shows and how each operation moves it along.
//!
//! Every operation is split in two: a synchronous `begin_*` that validates
//! input, sets the status and hands back the [`Job`] to run, and
//! [`ViewState::apply`] which folds the job's [`Outcome`] back in and may
//! ask for a follow-up job. Nothing here awaits, so the TUI can run jobs on
//! spawned tasks while the controller runs them inline.
use std::collections::VecDeque;

use alloy::primitives::{Address, B256, U256};
use metacoin::TransferReceipt;

use crate::constants::*;
use crate::libs::chain::error::CoinError;
use crate::libs::chain::spells::{parse_amount, parse_receiver};

const ACTIVITY_CAP: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Idle,
    Pending,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Default for Status {
    fn default() -> Self {
        Self {
            message: String::new(),
            kind: StatusKind::Idle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    ResolveAccount,
    RefreshBalance(Address),
    SendCoin {
        from: Address,
        to: Address,
        amount: U256,
    },
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Accounts(Result<Vec<Address>, CoinError>),
    Balance {
        account: Address,
        balance: Result<U256, CoinError>,
        /// Best effort; `None` when the conversion call failed.
        in_eth: Option<U256>,
    },
    Transfer(Result<TransferReceipt, CoinError>),
}

#[derive(Debug, Default)]
pub struct ViewState {
    pub account: Option<Address>,
    pub balance: Option<U256>,
    pub balance_in_eth: Option<U256>,
    pub status: Status,
    pub transfer_in_flight: bool,
    pub last_tx: Option<B256>,
    activity: VecDeque<String>,
    unflushed: Vec<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, message: impl Into<String>, kind: StatusKind) {
        self.status = Status {
            message: message.into(),
            kind,
        };
    }

    /// Most recent first.
    pub fn activity(&self) -> impl Iterator<Item = &String> {
        self.activity.iter().rev()
    }

    /// Lines noted since the last call, for the file log.
    pub fn take_unflushed(&mut self) -> Vec<String> {
        std::mem::take(&mut self.unflushed)
    }

    fn note(&mut self, line: String) {
        if self.activity.len() == ACTIVITY_CAP {
            self.activity.pop_front();
        }
        self.activity.push_back(line.clone());
        self.unflushed.push(line);
    }

    fn fail(&mut self, message: &str, err: &CoinError) {
        self.set_status(message, StatusKind::Error);
        self.note(format!("error: {err}"));
    }

    pub fn begin_start(&mut self) -> Job {
        self.set_status("Fetching accounts...", StatusKind::Pending);
        Job::ResolveAccount
    }

    pub fn begin_refresh(&mut self) -> Option<Job> {
        match self.account {
            Some(account) => Some(Job::RefreshBalance(account)),
            None => {
                self.fail(MSG_NO_ACCOUNT_YET, &CoinError::NoAccount);
                None
            }
        }
    }

    pub fn begin_send(&mut self, amount_raw: &str, receiver_raw: &str) -> Option<Job> {
        let amount = match parse_amount(amount_raw) {
            Ok(a) => a,
            Err(e) => {
                self.fail(&format!("Invalid amount: {}", amount_raw.trim()), &e);
                return None;
            }
        };
        let to = match parse_receiver(receiver_raw) {
            Ok(a) => a,
            Err(e) => {
                // the reason goes to the activity line via `fail`
                self.fail(&format!("Invalid receiver: {}", receiver_raw.trim()), &e);
                return None;
            }
        };
        let Some(from) = self.account else {
            self.fail(MSG_NO_ACCOUNT_YET, &CoinError::NoAccount);
            return None;
        };
        if self.transfer_in_flight {
            self.fail(MSG_TX_IN_FLIGHT, &CoinError::TransferInFlight);
            return None;
        }

        self.transfer_in_flight = true;
        self.set_status(MSG_TX_PENDING, StatusKind::Pending);
        self.note(format!("send {amount} → {to}"));
        Some(Job::SendCoin { from, to, amount })
    }

    /// Fold a finished job in; returns the follow-up to run, if any.
    pub fn apply(&mut self, outcome: Outcome) -> Option<Job> {
        match outcome {
            Outcome::Accounts(Err(e)) => {
                self.fail(MSG_ACCOUNTS_ERROR, &e);
                None
            }
            Outcome::Accounts(Ok(accounts)) => match accounts.first() {
                None => {
                    self.fail(MSG_NO_ACCOUNTS, &CoinError::NoAccounts);
                    None
                }
                Some(&account) => {
                    self.account = Some(account);
                    self.set_status("", StatusKind::Idle);
                    self.note(format!("account {account} ({} available)", accounts.len()));
                    Some(Job::RefreshBalance(account))
                }
            },
            Outcome::Balance {
                account,
                balance,
                in_eth,
            } => {
                if self.account != Some(account) {
                    return None;
                }
                match balance {
                    Ok(b) => {
                        self.balance = Some(b);
                        self.balance_in_eth = in_eth;
                    }
                    Err(e) => self.fail(MSG_BALANCE_ERROR, &e),
                }
                None
            }
            Outcome::Transfer(result) => {
                self.transfer_in_flight = false;
                let receipt = match result {
                    Ok(r) => r,
                    Err(e) => {
                        self.fail(MSG_TX_ERROR, &e);
                        return None;
                    }
                };
                self.last_tx = Some(receipt.tx_hash);
                let block = receipt
                    .block_number
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "?".into());
                if receipt.moved_coins() {
                    self.set_status(MSG_TX_COMPLETE, StatusKind::Success);
                    self.note(format!(
                        "tx {} mined in block {block} (gas {})",
                        receipt.tx_hash, receipt.gas_used
                    ));
                } else {
                    self.set_status(MSG_TX_NOTHING_MOVED, StatusKind::Error);
                    self.note(format!(
                        "tx {} mined in block {block} without a Transfer event",
                        receipt.tx_hash
                    ));
                }
                self.account.map(Job::RefreshBalance)
            }
        }
    }
}
