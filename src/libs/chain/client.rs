use anyhow::{Context, Result};
use reqwest::Client as HttpClient;
use serde_json::Value;
use url::Url;

/// Bare JSON-RPC access to the configured node, used at startup to tell
/// a missing or misconfigured endpoint apart from a contract problem
/// before the terminal UI takes over.
#[derive(Clone, Debug)]
pub struct NodeProbe {
    rpc_url: Url,
    http: HttpClient,
}

impl NodeProbe {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url =
            Url::parse(rpc_url).with_context(|| format!("Failed to parse RPC_URL: {rpc_url}"))?;
        Ok(Self {
            rpc_url: url,
            http: HttpClient::new(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.rpc_url
    }

    /// `web3_clientVersion`, e.g. `Ganache/v7.9.1/EthereumJS TestRPC/v7.9.1/ethereum-js`.
    pub async fn client_version(&self) -> Result<String> {
        let res = self.rpc("web3_clientVersion", serde_json::json!([])).await?;
        Ok(res.as_str().context("clientVersion not string")?.to_string())
    }

    /// `net_version` is what Truffle keys artifact deployments by.
    pub async fn net_version(&self) -> Result<u64> {
        let res = self.rpc("net_version", serde_json::json!([])).await?;
        parse_quantity(&res).context("bad net_version")
    }

    async fn rpc(&self, method: &str, params: Value) -> Result<Value> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let res = self
            .http
            .post(self.rpc_url.as_str())
            .json(&body)
            .send()
            .await
            .with_context(|| format!("{method} request to {} failed", self.rpc_url))?;
        let status = res.status();
        let bytes = res.bytes().await?;
        decode_response(&bytes, status.as_u16(), &self.rpc_url)
    }
}

fn decode_response(bytes: &[u8], status: u16, endpoint: &Url) -> Result<Value> {
    let v: Value = match serde_json::from_slice(bytes) {
        Ok(json) => json,
        Err(e) => {
            let mut sample = String::from_utf8_lossy(bytes).to_string();
            if sample.len() > 512 {
                let mut cut = 512;
                while !sample.is_char_boundary(cut) {
                    cut -= 1;
                }
                sample.truncate(cut);
            }
            let hint = if sample.trim_start().starts_with('<') {
                "Response looks like HTML; RPC_URL may point at a gateway page. Ensure it is a JSON-RPC endpoint."
            } else if sample.trim().is_empty() {
                "Empty body from RPC. Endpoint may be down or require authentication."
            } else {
                "Non-JSON response from RPC."
            };
            anyhow::bail!(
                "RPC decode error ({status}): {e}. {hint}\nEndpoint: {endpoint}\nSample: {sample}"
            );
        }
    };
    if let Some(err) = v.get("error") {
        anyhow::bail!("rpc error: {}", err);
    }
    Ok(v.get("result").cloned().unwrap_or(Value::Null))
}

/// Nodes disagree on `net_version`: decimal string, hex string or number.
fn parse_quantity(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => match s.strip_prefix("0x") {
            Some(hex) => u64::from_str_radix(hex, 16).ok(),
            None => s.parse().ok(),
        },
        _ => None,
    }
}
