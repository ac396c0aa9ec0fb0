//! Authentication: version-dispatched credential envelopes, token extraction, and the
//! redacted bearer secret.

pub mod extract;
pub mod payload;
pub mod secret;

pub use extract::*;
pub use payload::*;
pub use secret::*;
