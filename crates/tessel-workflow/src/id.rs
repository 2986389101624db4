//! Short, collision-resistant identities.

use data_encoding::BASE32_NOPAD;
use uuid::Uuid;

/// Generate a 26 character, lowercase base32 token from 128 random bits.
///
/// Used for auto-assigned activity identities and workflow-type keys.
pub fn unique_id() -> String {
  BASE32_NOPAD
    .encode(Uuid::new_v4().as_bytes())
    .to_ascii_lowercase()
}
