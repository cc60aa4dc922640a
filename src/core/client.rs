use rigo_eth::{
   chain::{BASE, ETHEREUM, SEPOLIA},
   client::{RpcClient, get_client, retry_layer, throttle_layer},
};

use anyhow::anyhow;
use std::{
   collections::HashMap,
   sync::{Arc, RwLock},
   time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};
use tokio::time::sleep;

/// Requests per second
pub const CLIENT_RPS: u32 = 10;
/// Max retries
pub const MAX_RETRIES: u32 = 10;
/// Initial backoff in milliseconds
pub const INITIAL_BACKOFF: u64 = 400;
/// Compute units per second
pub const COMPUTE_UNITS_PER_SECOND: u64 = 330;

/// Per request timeout in seconds
pub const CLIENT_TIMEOUT: u64 = 30;

/// Overall deadline for a request across retries, in seconds
const REQUEST_TIMEOUT: u64 = 60;

/// Timeout in seconds when broadcasting a transaction and waiting for its receipt
pub const TIMEOUT_FOR_SENDING_TX: u64 = 60;

#[derive(Debug, Clone)]
pub struct Rpc {
   pub url: String,
   pub chain_id: u64,
   /// Last time in UNIX milliseconds this RPC served a request
   pub last_used: u64,
}

impl Rpc {
   pub fn new(url: impl Into<String>, chain_id: u64) -> Self {
      Self {
         url: url.into(),
         chain_id,
         last_used: 0,
      }
   }

   pub fn is_ws(&self) -> bool {
      self.url.starts_with("ws")
   }
}

/// Keeps track of the known RPC endpoints and spreads requests across them
#[derive(Debug, Clone)]
pub struct RigoClient {
   pub rpcs: Arc<RwLock<HashMap<u64, Vec<Rpc>>>>,
}

impl Default for RigoClient {
   fn default() -> Self {
      let mut rpcs = HashMap::new();

      // Chain ID 1: Ethereum

      rpcs.insert(
         ETHEREUM,
         vec![
            Rpc::new("wss://eth.merkle.io", ETHEREUM),
            Rpc::new("wss://ethereum-rpc.publicnode.com", ETHEREUM),
            Rpc::new("wss://mainnet.gateway.tenderly.co", ETHEREUM),
            Rpc::new("https://reth-ethereum.ithaca.xyz/rpc", ETHEREUM),
            Rpc::new("https://rpc.payload.de", ETHEREUM),
            Rpc::new("https://eth.merkle.io", ETHEREUM),
            Rpc::new("https://ethereum-rpc.publicnode.com", ETHEREUM),
         ],
      );

      // Chain ID 11155111: Sepolia

      rpcs.insert(
         SEPOLIA,
         vec![
            Rpc::new("wss://ethereum-sepolia-rpc.publicnode.com", SEPOLIA),
            Rpc::new("wss://sepolia.gateway.tenderly.co", SEPOLIA),
            Rpc::new("https://ethereum-sepolia-rpc.publicnode.com", SEPOLIA),
            Rpc::new("https://sepolia.drpc.org", SEPOLIA),
            Rpc::new("https://1rpc.io/sepolia", SEPOLIA),
         ],
      );

      // Chain ID 8453: Base

      rpcs.insert(
         BASE,
         vec![
            Rpc::new("wss://base-rpc.publicnode.com", BASE),
            Rpc::new("wss://base.gateway.tenderly.co", BASE),
            Rpc::new("https://mainnet.base.org", BASE),
            Rpc::new("https://1rpc.io/base", BASE),
            Rpc::new("https://base-rpc.publicnode.com", BASE),
         ],
      );

      Self {
         rpcs: Arc::new(RwLock::new(rpcs)),
      }
   }
}

impl RigoClient {
   pub fn read<R>(&self, reader: impl FnOnce(&HashMap<u64, Vec<Rpc>>) -> R) -> R {
      reader(&self.rpcs.read().unwrap())
   }

   pub fn write<R>(&self, writer: impl FnOnce(&mut HashMap<u64, Vec<Rpc>>) -> R) -> R {
      writer(&mut self.rpcs.write().unwrap())
   }

   pub fn get_rpcs(&self, chain: u64) -> Vec<Rpc> {
      self.read(|rpcs| rpcs.get(&chain).unwrap_or(&vec![]).to_vec())
   }

   pub async fn connect_to(&self, rpc: &Rpc, timeout: u64) -> Result<RpcClient, anyhow::Error> {
      let retry = retry_layer(MAX_RETRIES, INITIAL_BACKOFF, COMPUTE_UNITS_PER_SECOND);
      let throttle = throttle_layer(CLIENT_RPS);
      get_client(&rpc.url, retry, throttle, timeout).await
   }

   /// Get a client for this chain from the first endpoint that connects
   pub async fn get_client(&self, chain: u64, timeout: u64) -> Result<RpcClient, anyhow::Error> {
      let rpcs = self.get_rpcs(chain);

      for rpc in &rpcs {
         match self.connect_to(rpc, timeout).await {
            Ok(client) => return Ok(client),
            Err(e) => {
               tracing::error!(
                  "Error connecting to client using {} for chain {}: {:?}",
                  rpc.url,
                  chain,
                  e
               );
               continue;
            }
         }
      }

      Err(anyhow!("No clients found for chain {}", chain))
   }

   /// Execute a request with automatic RPC selection and retries
   ///
   /// The closure `f` receives a connected [RpcClient] and returns a future with the result.
   /// Endpoints are picked with a usage cooldown so concurrent load spreads across them.
   pub async fn request<F, Fut, R>(&self, chain: u64, f: F) -> Result<R, anyhow::Error>
   where
      F: Fn(RpcClient) -> Fut,
      Fut: Future<Output = Result<R, anyhow::Error>>,
   {
      let cooldown_ms: u64 = 1000 / CLIENT_RPS as u64;
      let mut attempts = 0;
      let start = Instant::now();

      while attempts < MAX_RETRIES as usize {
         let rpc = self.write(|rpcs| {
            let mut empty = Vec::new();
            let rpcs = rpcs.get_mut(&chain).unwrap_or(&mut empty);

            let now_ms = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_millis() as u64;
            let mut best_idx = None;
            let mut best_score = u64::MAX;

            for (idx, rpc) in rpcs.iter().enumerate() {
               let time_since_used = now_ms.saturating_sub(rpc.last_used);
               let score = cooldown_ms.saturating_sub(time_since_used);
               if score < best_score {
                  best_score = score;
                  best_idx = Some(idx);
               }
            }

            let Some(idx) = best_idx else {
               return None;
            };

            rpcs[idx].last_used = now_ms;
            Some(rpcs[idx].clone())
         });

         let rpc = match rpc {
            Some(rpc) => rpc,
            None => {
               return Err(anyhow!("No available RPCs for chain {}", chain));
            }
         };

         let client = match self.connect_to(&rpc, CLIENT_TIMEOUT).await {
            Ok(client) => client,
            Err(e) => {
               tracing::warn!("Failed to connect to {}: {:?}", rpc.url, e);
               // Could be a network issue, move on to the next endpoint
               attempts += 1;
               continue;
            }
         };

         match f(client).await {
            Ok(res) => return Ok(res),
            Err(e) => {
               tracing::warn!("Request failed on {}: {:?}", rpc.url, e);
               attempts += 1;
               // Exponential backoff, capped at 5s
               let backoff = (INITIAL_BACKOFF * 2u64.pow(attempts as u32 - 1)).min(5_000);
               sleep(Duration::from_millis(backoff)).await;
            }
         }

         if start.elapsed() > Duration::from_secs(REQUEST_TIMEOUT) {
            return Err(anyhow!("Request timed out for chain {}", chain));
         }
      }

      Err(anyhow!("Exhausted retries for chain {}", chain))
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use rigo_eth::chain::SUPPORTED_CHAINS;

   #[test]
   fn default_endpoints_cover_every_chain() {
      let client = RigoClient::default();

      for chain in SUPPORTED_CHAINS {
         let rpcs = client.get_rpcs(chain);
         assert!(!rpcs.is_empty(), "no endpoints for chain {}", chain);

         for rpc in rpcs {
            assert_eq!(rpc.chain_id, chain);
            assert!(
               rpc.url.starts_with("wss://") || rpc.url.starts_with("https://"),
               "unexpected url scheme: {}",
               rpc.url
            );
         }
      }
   }

   #[test]
   fn unknown_chain_has_no_endpoints() {
      let client = RigoClient::default();
      assert!(client.get_rpcs(1000).is_empty());
   }

   #[test]
   fn ws_endpoints_are_detected() {
      let rpc = Rpc::new("wss://eth.merkle.io", ETHEREUM);
      assert!(rpc.is_ws());

      let rpc = Rpc::new("https://eth.merkle.io", ETHEREUM);
      assert!(!rpc.is_ws());
   }
}
