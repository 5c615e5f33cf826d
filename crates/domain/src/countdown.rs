//! Countdown arithmetic for the presentation boundary
//!
//! The presentation layer polls [`remaining`] on its own timer tick; the
//! domain holds no timer state.

use std::time::Duration;

/// Time left until a departure
///
/// Never negative: once `now_epoch` reaches `departure_epoch` the result is
/// exactly [`Duration::ZERO`], meaning "arriving now".
#[must_use]
pub fn remaining(departure_epoch: i64, now_epoch: i64) -> Duration {
    u64::try_from(departure_epoch.saturating_sub(now_epoch))
        .map_or(Duration::ZERO, Duration::from_secs)
}
