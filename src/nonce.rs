//! Single-use random values for the identity login URL.

use rand::{Rng as _, distr::Alphanumeric};

/// Length of generated nonces.
pub const NONCE_LENGTH: usize = 7;

/// Creates an arbitrary alphanumeric value that should only be used once.
#[must_use]
pub fn create_nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}
