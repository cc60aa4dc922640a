use anyhow::bail;

pub const ETHEREUM: u64 = 1;
pub const SEPOLIA: u64 = 11155111;
pub const BASE: u64 = 8453;

pub const SUPPORTED_CHAINS: [u64; 3] = [ETHEREUM, SEPOLIA, BASE];

const ERR_MSG: &str = "Unsupported chain id";

/// Gas needed for a native coin transfer
const TRANSFER_GAS: u64 = 21_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChainId {
   Ethereum(u64),
   Sepolia(u64),
   Base(u64),
}

impl Default for ChainId {
   fn default() -> Self {
      Self::Ethereum(ETHEREUM)
   }
}

impl ChainId {
   pub fn new(id: u64) -> Result<Self, anyhow::Error> {
      match id {
         ETHEREUM => Ok(Self::Ethereum(id)),
         SEPOLIA => Ok(Self::Sepolia(id)),
         BASE => Ok(Self::Base(id)),
         _ => bail!("{} {}", ERR_MSG, id),
      }
   }

   pub fn ethereum() -> Self {
      Self::Ethereum(ETHEREUM)
   }

   pub fn sepolia() -> Self {
      Self::Sepolia(SEPOLIA)
   }

   pub fn base() -> Self {
      Self::Base(BASE)
   }

   pub fn is_ethereum(&self) -> bool {
      matches!(self, Self::Ethereum(_))
   }

   pub fn is_sepolia(&self) -> bool {
      matches!(self, Self::Sepolia(_))
   }

   pub fn is_base(&self) -> bool {
      matches!(self, Self::Base(_))
   }

   pub fn supported_chains() -> Vec<Self> {
      SUPPORTED_CHAINS
         .iter()
         .map(|id| Self::new(*id).unwrap())
         .collect()
   }

   pub fn id(&self) -> u64 {
      match self {
         Self::Ethereum(id) => *id,
         Self::Sepolia(id) => *id,
         Self::Base(id) => *id,
      }
   }

   pub fn name(&self) -> &str {
      match self {
         Self::Ethereum(_) => "Ethereum",
         Self::Sepolia(_) => "Sepolia",
         Self::Base(_) => "Base",
      }
   }

   /// The symbol of the native coin, all supported chains settle in ETH
   pub fn coin_symbol(&self) -> &str {
      "ETH"
   }

   /// Block time in milliseconds
   pub fn block_time(&self) -> u64 {
      match self {
         Self::Ethereum(_) => 12_000,
         Self::Sepolia(_) => 12_000,
         Self::Base(_) => 2_000,
      }
   }

   pub fn block_explorer(&self) -> &str {
      match self {
         Self::Ethereum(_) => "https://etherscan.io",
         Self::Sepolia(_) => "https://sepolia.etherscan.io",
         Self::Base(_) => "https://basescan.org",
      }
   }

   /// Gas limit for transferring the native coin
   pub fn transfer_gas(&self) -> u64 {
      TRANSFER_GAS
   }
}

/// Compute the base fee of the next block as per EIP-1559
///
/// All supported chains follow the same fee schedule
pub fn next_block_base_fee(gas_used: u64, gas_limit: u64, base_fee: u64) -> u64 {
   const BASE_FEE_CHANGE_DENOMINATOR: u128 = 8;

   let gas_target = (gas_limit / 2) as u128;
   let gas_used = gas_used as u128;
   let base_fee_u128 = base_fee as u128;

   if gas_target == 0 {
      return base_fee;
   }

   if gas_used > gas_target {
      let delta = base_fee_u128 * (gas_used - gas_target) / gas_target / BASE_FEE_CHANGE_DENOMINATOR;
      (base_fee_u128 + delta.max(1)) as u64
   } else if gas_used < gas_target {
      let delta = base_fee_u128 * (gas_target - gas_used) / gas_target / BASE_FEE_CHANGE_DENOMINATOR;
      base_fee_u128.saturating_sub(delta) as u64
   } else {
      base_fee
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn chain_new() {
      let chain = ChainId::new(1).unwrap();
      assert_eq!(chain.id(), 1);
      assert_eq!(chain.name(), "Ethereum");
      assert!(chain.is_ethereum());

      let chain = ChainId::new(11155111).unwrap();
      assert_eq!(chain.id(), 11155111);
      assert!(chain.is_sepolia());

      let chain = ChainId::new(8453).unwrap();
      assert_eq!(chain.id(), 8453);
      assert!(chain.is_base());
   }

   #[test]
   fn chain_new_err() {
      assert!(ChainId::new(1000).is_err());
   }

   #[test]
   fn supported_chains_roundtrip() {
      let chains = ChainId::supported_chains();
      assert_eq!(chains.len(), SUPPORTED_CHAINS.len());
      for chain in chains {
         assert!(SUPPORTED_CHAINS.contains(&chain.id()));
         assert_eq!(chain.transfer_gas(), 21_000);
         assert_eq!(chain.coin_symbol(), "ETH");
         assert!(chain.block_explorer().starts_with("https://"));
      }
   }

   #[test]
   fn base_fee_increases_when_above_target() {
      // Block 100% full, target is 50%
      let next = next_block_base_fee(30_000_000, 30_000_000, 100);
      assert_eq!(next, 112);
   }

   #[test]
   fn base_fee_decreases_when_below_target() {
      // Empty block
      let next = next_block_base_fee(0, 30_000_000, 100);
      assert_eq!(next, 88);
   }

   #[test]
   fn base_fee_unchanged_at_target() {
      let next = next_block_base_fee(15_000_000, 30_000_000, 100);
      assert_eq!(next, 100);
   }

   #[test]
   fn base_fee_moves_by_at_least_one_wei() {
      // Tiny overshoot still bumps the fee
      let next = next_block_base_fee(15_000_001, 30_000_000, 100);
      assert_eq!(next, 101);
   }
}
