pub mod session;

pub use session::{acquire, PortalSession};
