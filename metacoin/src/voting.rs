//! The `Voting` contract deployed next to MetaCoin: two running tallies and
//! a `totalVotes` helper over a ballot of vote weights.
use std::fmt;

use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use anyhow::{Context, Result};

use crate::abi::Voting;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tallies {
    pub a: U256,
    pub b: U256,
}

impl fmt::Display for Tallies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A {} · B {}", self.a, self.b)
    }
}

pub async fn tallies<P: Provider + Clone>(provider: P, voting: Address) -> Result<Tallies> {
    let v = Voting::new(voting, provider);
    let a = v.voteA().call().await.context("voteA()")?;
    let b = v.voteB().call().await.context("voteB()")?;
    Ok(Tallies { a, b })
}

/// `totalVotes(ballot)` evaluated with `eth_call`; nothing is mined.
pub async fn total_votes<P: Provider + Clone>(
    provider: P,
    voting: Address,
    ballot: Vec<U256>,
) -> Result<U256> {
    let ret = Voting::new(voting, provider)
        .totalVotes(ballot)
        .call()
        .await
        .context("totalVotes()")?;
    Ok(ret)
}
