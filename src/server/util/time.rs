//! Wall clock for response timestamps, frozen under test.

use chrono::{DateTime, Utc};

pub(crate) mod helper {
    #[cfg(not(test))]
    pub(crate) use super::system::now;
    #[cfg(test)]
    pub(crate) use super::frozen::now;

    /// milliseconds since the unix epoch
    pub(crate) fn epoch_millis() -> i64 {
        now().timestamp_millis()
    }
}

#[cfg(not(test))]
mod system {
    use super::*;

    pub(crate) fn now() -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub(crate) mod frozen {
    use super::*;
    use std::cell::Cell;

    thread_local! {
        static FROZEN_MILLIS: Cell<i64> = const { Cell::new(0) };
    }

    pub(crate) fn now() -> DateTime<Utc> {
        FROZEN_MILLIS
            .with(|millis| DateTime::<Utc>::from_timestamp_millis(millis.get()))
            .expect("invalid timestamp")
    }

    pub(crate) fn set(millis: i64) {
        FROZEN_MILLIS.with(|cell| cell.set(millis));
    }
}
