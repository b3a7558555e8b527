//! Breadcrumb timestamp rendering, e.g. "Sep 15 16:49 EST"

use crate::config::BreadcrumbZone;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use chrono_tz::Tz;
use tracing::warn;

const BREADCRUMB_TIME_FORMAT: &str = "%b %d %H:%M";

/// Format an epoch-millis timestamp in the configured zone followed by the zone abbreviation
pub fn format_breadcrumb_time(timestamp_ms: i64, zone: &BreadcrumbZone) -> String {
    let instant = DateTime::<Utc>::from_timestamp_millis(timestamp_ms).unwrap_or_default();

    match zone {
        BreadcrumbZone::Fixed {
            offset_minutes,
            abbreviation,
        } => {
            // out-of-range offsets fall back to UTC
            let offset = FixedOffset::east_opt(offset_minutes.saturating_mul(60))
                .unwrap_or_else(|| Utc.fix());
            format!(
                "{} {}",
                instant.with_timezone(&offset).format(BREADCRUMB_TIME_FORMAT),
                abbreviation
            )
        }
        BreadcrumbZone::Named { zone } => {
            let tz = zone.parse::<Tz>().unwrap_or_else(|_| {
                warn!(zone = %zone, "unknown time zone, using UTC");
                Tz::UTC
            });
            format_in(instant, tz)
        }
        BreadcrumbZone::Local { .. } => format_in(instant, host_zone()),
    }
}

// the abbreviation follows the instant, so winter dates read EST and summer dates EDT
fn format_in(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .format(&format!("{} %Z", BREADCRUMB_TIME_FORMAT))
        .to_string()
}

/// Best guess of the host's IANA zone: `TZ` first, then the system setting, else UTC
pub fn host_zone() -> Tz {
    let tz_var = std::env::var("TZ").ok();
    let system = iana_time_zone::get_timezone().ok();
    guess_zone(tz_var.as_deref(), system.as_deref())
}

fn guess_zone(tz_var: Option<&str>, system: Option<&str>) -> Tz {
    tz_var
        .map(|name| name.trim_start_matches(':'))
        .into_iter()
        .chain(system)
        .find_map(|name| name.parse::<Tz>().ok())
        .unwrap_or(Tz::UTC)
}
