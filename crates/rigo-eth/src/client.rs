use alloy_contract::private::Ethereum;
use alloy_json_rpc::{RequestPacket, ResponsePacket};
use alloy_provider::{
   Identity, ProviderBuilder, RootProvider, WsConnect,
   fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
};
use alloy_rpc_client::ClientBuilder;
use alloy_transport::{
   TransportError, TransportErrorKind,
   layers::{RetryBackoffLayer, ThrottleLayer},
};
use tower::{BoxError, Layer, Service, timeout::Timeout};
use url::Url;

use std::{
   future::Future,
   pin::Pin,
   task::{Context, Poll},
   time::Duration,
};

/// A provider with the recommended fillers, works over both ws and http transports
pub type RpcClient = FillProvider<
   JoinFill<Identity, JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>>,
   RootProvider<Ethereum>,
>;

// Applies a timeout to every request and maps the error back to a TransportError
#[derive(Clone, Copy, Debug)]
struct TimeoutLayer(Duration);

impl TimeoutLayer {
   fn new(timeout: Duration) -> Self {
      Self(timeout)
   }
}

impl<S> Layer<S> for TimeoutLayer
where
   S: Service<RequestPacket> + Send + 'static,
   S::Future: Send + 'static,
{
   type Service = TimeoutService<S>;

   fn layer(&self, inner: S) -> Self::Service {
      TimeoutService(Timeout::new(inner, self.0))
   }
}

#[derive(Clone, Debug)]
struct TimeoutService<S>(Timeout<S>);

impl<S> Service<RequestPacket> for TimeoutService<S>
where
   S: Service<RequestPacket, Response = ResponsePacket, Error = TransportError> + Send + 'static,
   S::Future: Send + 'static,
{
   type Response = ResponsePacket;
   type Error = TransportError;
   type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

   fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
      self.0.poll_ready(cx).map_err(timeout_error)
   }

   fn call(&mut self, req: RequestPacket) -> Self::Future {
      let fut = self.0.call(req);
      Box::pin(async move { fut.await.map_err(timeout_error) })
   }
}

fn timeout_error(e: BoxError) -> TransportError {
   TransportErrorKind::custom_str(&format!("Request timeout {:?}", e)).into()
}

pub fn retry_layer(
   max_rate_limit_retries: u32,
   initial_backoff: u64,
   compute_units_per_second: u64,
) -> RetryBackoffLayer {
   RetryBackoffLayer::new(
      max_rate_limit_retries,
      initial_backoff,
      compute_units_per_second,
   )
}

pub fn throttle_layer(max_requests_per_second: u32) -> ThrottleLayer {
   ThrottleLayer::new(max_requests_per_second)
}

/// Connect to an RPC endpoint, ws or http depending on the url scheme
///
/// `timeout` is in seconds and applies per request
pub async fn get_client(
   url: &str,
   retry: RetryBackoffLayer,
   throttle: ThrottleLayer,
   timeout: u64,
) -> Result<RpcClient, anyhow::Error> {
   let is_ws = url.starts_with("ws");
   let url = Url::parse(url)?;
   let timeout = Duration::from_secs(timeout);

   let client_builder = ClientBuilder::default()
      .layer(retry)
      .layer(throttle)
      .layer(TimeoutLayer::new(timeout));

   let client = if is_ws {
      client_builder.ws(WsConnect::new(url)).await?
   } else {
      client_builder.http(url)
   };

   let client = ProviderBuilder::new().connect_client(client);
   Ok(client)
}
