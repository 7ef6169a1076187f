use std::{env, sync::Arc};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use mtp_core::{Clock, FixedClock, DATE_FORMAT};
use tracing::{info, warn};

/// Pins "today" to a `YYYY-MM-DD` date. Used by scripted runs that need stable dates.
pub const TODAY_ENV: &str = "MONEY_TRACKER_TODAY";

/// Real-time clock. Calendar days follow the local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn timestamp(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// [`SystemClock`], unless `$MONEY_TRACKER_TODAY` names a date to pin the shell to.
pub fn clock_from_env() -> Arc<dyn Clock> {
    clock_for(env::var(TODAY_ENV).ok().as_deref())
}

fn clock_for(pinned: Option<&str>) -> Arc<dyn Clock> {
    match pinned.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) => {
                info!(%date, "clock pinned");
                Arc::new(FixedClock::at_noon(date))
            }
            Err(err) => {
                warn!(value = raw, error = %err, "ignoring unparsable MONEY_TRACKER_TODAY");
                Arc::new(SystemClock)
            }
        },
        None => Arc::new(SystemClock),
    }
}
