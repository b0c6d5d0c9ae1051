pub mod client;
pub mod events;
pub mod hosts;
pub mod incidents;
pub mod model;
pub mod transport;
pub mod ureq_transport;

pub use client::{ApiClient, CallOptions, UnstableOperation};
pub use transport::{HttpRequest, Method, Transport};
