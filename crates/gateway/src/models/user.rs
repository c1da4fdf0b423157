//! Authenticated caller identity.

use forkful_core::UserId;

/// The caller of the current request.
///
/// Produced by the auth boundary (see `middleware::auth`) from the identity
/// provider's bearer token. Core logic receives this explicitly; nothing below
/// the extractor reads ambient auth state.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    /// Subject id minted by the external identity provider.
    pub id: UserId,
}
