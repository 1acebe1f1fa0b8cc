#[macro_export]
macro_rules! env_lazy {
    ($( $vis:vis $name:ident : $ty:ty = ($key:literal, $default:expr); )* ) => {
        $(
            $vis static $name: ::std::sync::LazyLock<$ty> = ::std::sync::LazyLock::new(|| {
                $crate::libs::config::load_env();
                $crate::libs::config::Config::get_var_t::<$ty>($key, $default)
            });
        )*
    };
}

env_lazy! {
    pub MIN_TERMINAL_HEIGHT: u16    = ("MIN_TERMINAL_HEIGHT", 20);
    pub TICK_MS: u64                = ("TICK_MS", 100);
    pub CONFIRMATIONS: u64          = ("CONFIRMATIONS", 1);
    pub RECEIPT_TIMEOUT_SECS: u64   = ("RECEIPT_TIMEOUT_SECS", 120);
}

pub const APP_NAME: &str = "coinpad";
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";
pub const DEFAULT_ARTIFACT: &str = "build/contracts/MetaCoin.json";

pub const MSG_ACCOUNTS_ERROR: &str = "There was an error fetching your accounts.";
pub const MSG_NO_ACCOUNTS: &str =
    "Couldn't get any accounts! Make sure your Ethereum client is configured correctly.";
pub const MSG_NO_ACCOUNT_YET: &str = "No account resolved yet.";
pub const MSG_BALANCE_ERROR: &str = "Error getting balance; see log.";
pub const MSG_TX_PENDING: &str = "Initiating transaction... (please wait)";
pub const MSG_TX_COMPLETE: &str = "Transaction complete!";
pub const MSG_TX_NOTHING_MOVED: &str = "Transaction mined but no coins moved (insufficient balance?)";
pub const MSG_TX_ERROR: &str = "Error sending coin; see log.";
pub const MSG_TX_IN_FLIGHT: &str = "A transaction is already pending.";
