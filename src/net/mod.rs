pub mod ip_lookup;
pub mod transport;

pub use ip_lookup::IpLookup;
pub use transport::{HttpResponse, Transport, UreqTransport};
