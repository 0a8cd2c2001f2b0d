// SPDX-License-Identifier: MIT OR Apache-2.0

//! UNIX timestamp helpers.
use std::time::{SystemTime, UNIX_EPOCH};

/// Current UNIX timestamp in seconds.
pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock drifted before UNIX epoch")
        .as_secs()
}
