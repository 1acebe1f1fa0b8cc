use crate::app::state::{Job, Outcome, ViewState};
use crate::libs::chain::ledger::CoinLedger;

/// Run one job against the ledger. Never retries.
pub async fn run_job<L: CoinLedger>(ledger: &L, job: Job) -> Outcome {
    match job {
        Job::ResolveAccount => Outcome::Accounts(ledger.accounts().await),
        Job::RefreshBalance(account) => {
            let balance = ledger.balance_of(account).await;
            let in_eth = match balance {
                Ok(_) => ledger.balance_in_eth(account).await.ok(),
                Err(_) => None,
            };
            Outcome::Balance {
                account,
                balance,
                in_eth,
            }
        }
        Job::SendCoin { from, to, amount } => {
            Outcome::Transfer(ledger.send_coin(from, to, amount).await)
        }
    }
}

/// Runs the operations inline, follow-ups included, one at a time.
pub struct Controller<L> {
    ledger: L,
    state: ViewState,
}

impl<L: CoinLedger> Controller<L> {
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            state: ViewState::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub async fn start(&mut self) {
        let job = self.state.begin_start();
        self.drive(Some(job)).await;
    }

    pub async fn refresh_balance(&mut self) {
        let job = self.state.begin_refresh();
        self.drive(job).await;
    }

    pub async fn send_coin(&mut self, amount: &str, receiver: &str) {
        let job = self.state.begin_send(amount, receiver);
        self.drive(job).await;
    }

    async fn drive(&mut self, mut job: Option<Job>) {
        while let Some(next) = job.take() {
            let outcome = run_job(&self.ledger, next).await;
            job = self.state.apply(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::StatusKind;
    use crate::constants::*;
    use crate::libs::chain::error::CoinError;
    use alloy::primitives::{address, Address, B256, U256};
    use metacoin::{CoinTransfer, TransferReceipt};
    use std::collections::HashMap;
    use std::sync::Mutex;

    const ME: Address = address!("00000000000000000000000000000000000000a1");
    const BOB: Address = address!("00000000000000000000000000000000000000b2");
    const BOB_STR: &str = "0x00000000000000000000000000000000000000b2";

    /// In-memory MetaCoin: `sendCoin` moves nothing when short, like the
    /// contract; balance in eth is the fixed 2x conversion.
    struct FakeLedger {
        accounts: Result<Vec<Address>, CoinError>,
        balances: Mutex<HashMap<Address, U256>>,
        fail_balance: Mutex<bool>,
        fail_in_eth: bool,
        fail_send: Option<CoinError>,
        calls: Mutex<Vec<&'static str>>,
        nonce: Mutex<u8>,
    }

    impl FakeLedger {
        fn new(accounts: Vec<Address>) -> Self {
            let balances = accounts
                .first()
                .map(|a| HashMap::from([(*a, U256::from(10_000u64))]))
                .unwrap_or_default();
            Self {
                accounts: Ok(accounts),
                balances: Mutex::new(balances),
                fail_balance: Mutex::new(false),
                fail_in_eth: false,
                fail_send: None,
                calls: Mutex::new(Vec::new()),
                nonce: Mutex::new(0),
            }
        }

        fn calls(&self, name: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|&&c| c == name).count()
        }

        fn record(&self, name: &'static str) {
            self.calls.lock().unwrap().push(name);
        }
    }

    impl CoinLedger for FakeLedger {
        async fn accounts(&self) -> Result<Vec<Address>, CoinError> {
            self.record("accounts");
            self.accounts.clone()
        }

        async fn balance_of(&self, account: Address) -> Result<U256, CoinError> {
            self.record("balance_of");
            if *self.fail_balance.lock().unwrap() {
                return Err(CoinError::Balance("connection refused".into()));
            }
            Ok(self
                .balances
                .lock()
                .unwrap()
                .get(&account)
                .copied()
                .unwrap_or_default())
        }

        async fn balance_in_eth(&self, account: Address) -> Result<U256, CoinError> {
            self.record("balance_in_eth");
            if self.fail_in_eth {
                return Err(CoinError::Balance("no ConvertLib".into()));
            }
            let b = self
                .balances
                .lock()
                .unwrap()
                .get(&account)
                .copied()
                .unwrap_or_default();
            Ok(b * U256::from(2u64))
        }

        async fn send_coin(
            &self,
            from: Address,
            to: Address,
            amount: U256,
        ) -> Result<TransferReceipt, CoinError> {
            self.record("send_coin");
            if let Some(e) = &self.fail_send {
                return Err(e.clone());
            }
            let mut nonce = self.nonce.lock().unwrap();
            *nonce += 1;
            let mut balances = self.balances.lock().unwrap();
            let have = balances.get(&from).copied().unwrap_or_default();
            let transfer = if have >= amount {
                balances.insert(from, have - amount);
                *balances.entry(to).or_default() += amount;
                Some(CoinTransfer {
                    from,
                    to,
                    value: amount,
                })
            } else {
                None
            };
            Ok(TransferReceipt {
                tx_hash: B256::repeat_byte(*nonce),
                block_number: Some(*nonce as u64),
                gas_used: 30_000,
                status: true,
                transfer,
            })
        }
    }

    async fn started(ledger: FakeLedger) -> Controller<FakeLedger> {
        let mut c = Controller::new(ledger);
        c.start().await;
        c
    }

    #[tokio::test]
    async fn start_resolves_account_and_balance() {
        let c = started(FakeLedger::new(vec![ME, BOB])).await;
        let s = c.state();
        assert_eq!(s.account, Some(ME));
        assert_eq!(s.balance, Some(U256::from(10_000u64)));
        assert_eq!(s.balance_in_eth, Some(U256::from(20_000u64)));
        assert_eq!(s.status.kind, StatusKind::Idle);
    }

    #[tokio::test]
    async fn start_with_broken_accounts() {
        let mut ledger = FakeLedger::new(vec![]);
        ledger.accounts = Err(CoinError::Accounts("eth_accounts: method not found".into()));
        let c = started(ledger).await;
        assert_eq!(c.state().status.message, MSG_ACCOUNTS_ERROR);
        assert!(c.state().account.is_none());
        assert_eq!(c.ledger().calls("balance_of"), 0);
    }

    #[tokio::test]
    async fn start_with_no_accounts() {
        let c = started(FakeLedger::new(vec![])).await;
        assert_eq!(c.state().status.message, MSG_NO_ACCOUNTS);
        assert_eq!(c.state().status.kind, StatusKind::Error);
        assert_eq!(c.ledger().calls("balance_of"), 0);
    }

    #[tokio::test]
    async fn refresh_before_start_does_not_touch_ledger() {
        let mut c = Controller::new(FakeLedger::new(vec![ME]));
        c.refresh_balance().await;
        assert_eq!(c.state().status.message, MSG_NO_ACCOUNT_YET);
        assert_eq!(c.ledger().calls("balance_of"), 0);
    }

    #[tokio::test]
    async fn balance_failure_reports_and_keeps_display() {
        let mut c = started(FakeLedger::new(vec![ME])).await;
        *c.ledger().fail_balance.lock().unwrap() = true;
        c.refresh_balance().await;
        assert_eq!(c.state().status.message, MSG_BALANCE_ERROR);
        assert_eq!(c.state().balance, Some(U256::from(10_000u64)));
        assert!(c
            .state()
            .activity()
            .next()
            .unwrap()
            .contains("connection refused"));
    }

    #[tokio::test]
    async fn conversion_failure_is_not_a_balance_failure() {
        let mut ledger = FakeLedger::new(vec![ME]);
        ledger.fail_in_eth = true;
        let c = started(ledger).await;
        assert_eq!(c.state().balance, Some(U256::from(10_000u64)));
        assert!(c.state().balance_in_eth.is_none());
        assert_eq!(c.state().status.kind, StatusKind::Idle);
    }

    #[tokio::test]
    async fn send_moves_coins_and_refreshes() {
        let mut c = started(FakeLedger::new(vec![ME])).await;
        c.send_coin("250", BOB_STR).await;
        let s = c.state();
        assert_eq!(s.status.message, MSG_TX_COMPLETE);
        assert_eq!(s.balance, Some(U256::from(9_750u64)));
        assert!(!s.transfer_in_flight);
        assert_eq!(s.last_tx, Some(B256::repeat_byte(1)));
        assert_eq!(c.ledger().calls("balance_of"), 2);
    }

    #[tokio::test]
    async fn send_more_than_balance_moves_nothing() {
        let mut c = started(FakeLedger::new(vec![ME])).await;
        c.send_coin("10001", BOB_STR).await;
        assert_eq!(c.state().status.message, MSG_TX_NOTHING_MOVED);
        assert_eq!(c.state().balance, Some(U256::from(10_000u64)));
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_ledger() {
        let mut c = started(FakeLedger::new(vec![ME])).await;
        c.send_coin("ten", BOB_STR).await;
        assert_eq!(c.state().status.message, "Invalid amount: ten");
        c.send_coin("10", "bob").await;
        assert_eq!(c.state().status.message, "Invalid receiver: bob");
        c.send_coin("0", BOB_STR).await;
        assert_eq!(c.state().status.message, "Invalid amount: 0");
        assert_eq!(c.ledger().calls("send_coin"), 0);
    }

    #[tokio::test]
    async fn failed_send_is_reported_once() {
        let mut ledger = FakeLedger::new(vec![ME]);
        ledger.fail_send = Some(CoinError::Reverted(B256::repeat_byte(0xaa)));
        let mut c = started(ledger).await;
        c.send_coin("1", BOB_STR).await;
        assert_eq!(c.state().status.message, MSG_TX_ERROR);
        assert_eq!(c.state().status.kind, StatusKind::Error);
        assert!(!c.state().transfer_in_flight);
        assert_eq!(c.ledger().calls("send_coin"), 1);
        // no follow-up refresh after a failed send
        assert_eq!(c.ledger().calls("balance_of"), 1);
        assert!(c.state().activity().next().unwrap().contains("reverted"));
    }
}
