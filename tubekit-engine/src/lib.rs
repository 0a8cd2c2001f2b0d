// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orchestration layer of the tubekit backend: relation edge toggling,
//! owner-authorized entity commands and derived read views.
//!
//! Every component is generic over the store traits from `tubekit-store` and
//! receives the acting principal as an explicit parameter; there is no
//! ambient request state anywhere in this crate. Writes go through the
//! command modules and the [`ToggleCoordinator`]; reads go through the
//! [`ViewComposer`], which joins entities and edges into flattened view
//! records and computes aggregates on demand instead of maintaining derived
//! counters.

pub mod command;
pub mod error;
pub mod guard;
pub mod page;
pub mod toggle;
pub mod views;

pub use error::EngineError;
pub use guard::OwnershipGuard;
pub use page::{DEFAULT_PAGE_LIMIT, Page, SortDirection, SortField, VideoSort};
pub use toggle::{ToggleCoordinator, ToggleOutcome, ToggleState};
pub use views::{
    ChannelProfile, CommentPage, CommentView, DashboardStats, PlaylistView, TweetView, VideoPage,
    VideoView, ViewComposer,
};
