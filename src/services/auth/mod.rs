pub mod bearer;
pub mod guard;
pub mod jwks;
pub mod permissions;
pub mod verify;

pub use guard::AuthGuard;
pub use jwks::{Jwk, JwkSet, JwksClient};
pub use verify::{Claims, TokenVerifier};
