//! Go module proxy protocol: endpoint URL layout, the metadata client used
//! by the resolution engine, and `go.mod` requirement parsing.

pub mod client;
pub mod gomod;
pub mod proxy;

pub use client::ProxyClient;
pub use proxy::GoProxy;
