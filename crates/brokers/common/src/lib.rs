//! Exchange-neutral REST plumbing shared by broker adapters: the signed
//! request descriptor, path templating, and the transports that execute
//! requests.

pub mod request;
pub mod simulated;
pub mod transport;

pub use request::{HttpMethod, SignedRequest};
pub use simulated::SimulatedTransport;
pub use transport::{HttpTransport, Transport};
