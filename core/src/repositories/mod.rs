pub mod identity;
pub mod revocation;

pub use identity::{IdentityProvider, InMemoryIdentityProvider};
pub use revocation::{InMemoryRevocationRegistry, RevocationRegistry};

#[cfg(any(test, feature = "testing"))]
pub use revocation::UnavailableRevocationRegistry;
