// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::id::EntityId;
use crate::kind::EntityKind;

/// Entities with an owning user.
///
/// Ownership is assigned at creation and never changes afterwards. The
/// ownership guard in `tubekit-engine` authorizes every mutating command
/// through this seam, comparing identifiers by value.
pub trait Owned {
    /// Entity kind, used when reporting authorization failures.
    const KIND: EntityKind;

    /// Identifier of the owning user.
    fn owner(&self) -> &EntityId;
}
