//! Resolve "today" for file naming.

use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;

/// Today's date in `tz` (an IANA name like "America/Chicago"), or in the
/// system's local time when no timezone is configured.
pub fn today_in(tz: Option<&str>) -> Result<NaiveDate> {
    match tz {
        Some(name) => {
            let tz: Tz = name
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid timezone: {name}"))?;
            Ok(Utc::now().with_timezone(&tz).date_naive())
        }
        None => Ok(Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_timezone() {
        assert!(today_in(Some("America/Chicago")).is_ok());
    }

    #[test]
    fn test_invalid_timezone() {
        let err = today_in(Some("Mars/Olympus_Mons")).unwrap_err();
        assert!(err.to_string().contains("invalid timezone"));
    }
}
