/// IAM API-key token exchange.
pub mod credentials;
/// Token caching and the request authenticator.
pub mod token;

pub use token::Authenticator;
