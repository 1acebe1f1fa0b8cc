use {
    crate::constants::{DEFAULT_ARTIFACT, DEFAULT_RPC_URL},
    alloy::primitives::{Address, U256},
    anyhow::{bail, Context, Result},
    dotenv::dotenv,
    serde::{Deserialize, Serialize},
    std::{fmt::Debug, path::PathBuf, str::FromStr},
    url::Url,
};

pub fn load_env() {
    dotenv().ok();
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    pub rpc_url: String,
    /// Set when `RPC_URL` was absent and the local node default is used.
    pub rpc_url_is_fallback: bool,
    pub private_key: Option<String>,
    pub artifact_path: PathBuf,
    pub contract_address: Option<Address>,
    pub voting_address: Option<Address>,
    /// Vote weights passed to `totalVotes` at startup; empty skips the call.
    pub voting_ballot: Vec<U256>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("rpc_url_is_fallback", &self.rpc_url_is_fallback)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("artifact_path", &self.artifact_path)
            .field("contract_address", &self.contract_address)
            .field("voting_address", &self.voting_address)
            .field("voting_ballot", &self.voting_ballot)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (rpc_url, rpc_url_is_fallback) = match get("RPC_URL") {
            Some(url) => (url.trim().to_string(), false),
            None => (DEFAULT_RPC_URL.to_string(), true),
        };
        Url::parse(&rpc_url).with_context(|| format!("Failed to parse RPC_URL: {rpc_url}"))?;

        let private_key = get("PRIVATE_KEY").map(|k| k.trim().to_string());
        if let Some(pk) = &private_key {
            let hex_part = pk.strip_prefix("0x").unwrap_or(pk);
            if hex_part.len() != 64 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
                bail!("PRIVATE_KEY did not contain a valid hex encoded secret");
            }
        }

        let artifact_path = get("METACOIN_ARTIFACT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT));

        let contract_address = match get("METACOIN_ADDRESS") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<Address>()
                    .with_context(|| format!("Failed to parse METACOIN_ADDRESS: {raw}"))?,
            ),
            None => None,
        };

        let voting_address = match get("VOTING_ADDRESS") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<Address>()
                    .with_context(|| format!("Failed to parse VOTING_ADDRESS: {raw}"))?,
            ),
            None => None,
        };

        let voting_ballot = match get("VOTING_BALLOT") {
            Some(raw) => raw
                .split(',')
                .map(|w| {
                    let w = w.trim();
                    if w.is_empty() {
                        bail!("Failed to parse VOTING_BALLOT: empty entry in {raw}");
                    }
                    U256::from_str(w)
                        .with_context(|| format!("Failed to parse VOTING_BALLOT entry: {w}"))
                })
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            rpc_url,
            rpc_url_is_fallback,
            private_key,
            artifact_path,
            contract_address,
            voting_address,
            voting_ballot,
        })
    }

    /// Parse env var to T; fall back to typed default.
    pub fn get_var_t<T>(key: &str, default: T) -> T
    where
        T: FromStr,
        <T as FromStr>::Err: Debug,
    {
        std::env::var(key)
            .ok()
            .and_then(|s| s.parse::<T>().ok())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn cfg(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_to_local_node() {
        let c = cfg(&[]).unwrap();
        assert_eq!(c.rpc_url, DEFAULT_RPC_URL);
        assert!(c.rpc_url_is_fallback);
        assert!(c.private_key.is_none());
        assert_eq!(c.artifact_path, PathBuf::from(DEFAULT_ARTIFACT));
        assert!(c.contract_address.is_none());
        assert!(c.voting_address.is_none());
        assert!(c.voting_ballot.is_empty());
    }

    #[test]
    fn voting_settings() {
        let c = cfg(&[
            ("VOTING_ADDRESS", "0x2B79dFf7cD509365B664ED7A1d4C06Ee04c15e31"),
            ("VOTING_BALLOT", "123, 1"),
        ])
        .unwrap();
        assert!(c.voting_address.is_some());
        assert_eq!(c.voting_ballot, vec![U256::from(123u64), U256::from(1u64)]);

        assert!(cfg(&[("VOTING_ADDRESS", "0x12")]).is_err());
        let err = cfg(&[("VOTING_BALLOT", "123,,1")]).unwrap_err();
        assert!(err.to_string().contains("VOTING_BALLOT"));
    }

    #[test]
    fn explicit_values_win() {
        let c = cfg(&[
            ("RPC_URL", "https://rpc.example.org"),
            ("PRIVATE_KEY", KEY),
            ("METACOIN_ARTIFACT", "out/MetaCoin.json"),
            ("METACOIN_ADDRESS", "0x2B79dFf7cD509365B664ED7A1d4C06Ee04c15e31"),
        ])
        .unwrap();
        assert_eq!(c.rpc_url, "https://rpc.example.org");
        assert!(!c.rpc_url_is_fallback);
        assert_eq!(c.private_key.as_deref(), Some(KEY));
        assert_eq!(c.artifact_path, PathBuf::from("out/MetaCoin.json"));
        assert!(c.contract_address.is_some());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let c = cfg(&[("RPC_URL", "  "), ("PRIVATE_KEY", "")]).unwrap();
        assert!(c.rpc_url_is_fallback);
        assert!(c.private_key.is_none());
    }

    #[test]
    fn rejects_garbage() {
        assert!(cfg(&[("RPC_URL", "not a url")]).is_err());
        assert!(cfg(&[("PRIVATE_KEY", "0x1234")]).is_err());
        assert!(cfg(&[("METACOIN_ADDRESS", "0xnothex")]).is_err());
    }

    #[test]
    fn debug_hides_key() {
        let c = cfg(&[("PRIVATE_KEY", KEY)]).unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains(KEY));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn typed_var_falls_back() {
        assert_eq!(
            Config::get_var_t::<u64>("COINPAD_TEST_SURELY_UNSET_VAR", 42),
            42
        );
    }
}
