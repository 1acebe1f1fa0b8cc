pub mod abi;
pub mod artifact;
pub mod coin;
pub mod voting;

pub use artifact::*;
pub use coin::*;
pub use voting::Tallies;
