use time::format_description::{self, BorrowedFormatItem};
use time::macros::format_description as fd;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::constants::INPUT_DATE_FORMAT;
use crate::error::AppError;

const UTC_OFFSET_FORMAT: &[BorrowedFormatItem<'static>] =
    fd!("[year]-[month]-[day]T[hour]:[minute]:[second]+00:00");

/// Parse a host date (`2024-01-01T00:00:00.000Z`). The trailing `Z` makes it UTC.
pub fn parse_input_date(field: &str, raw: &str) -> Result<OffsetDateTime, AppError> {
    let items = format_description::parse(INPUT_DATE_FORMAT).map_err(|e| {
        AppError::new(
            "PARAM_DATE_FORMAT",
            format!("Date format config error for {field}"),
        )
        .with_details(e.to_string())
    })?;

    let pdt = PrimitiveDateTime::parse(raw.trim(), &items).map_err(|e| {
        AppError::new(
            "PARAM_DATE_FORMAT",
            format!("Unparseable date for {field}; expected YYYY-MM-DDTHH:MM:SS.fffZ"),
        )
        .with_details(format!("value={raw}; err={e}"))
    })?;

    Ok(pdt.assume_utc())
}

/// `YYYY-MM-DDTHH:MM:SS+00:00`, fractional seconds dropped.
pub fn to_utc_offset_string(dt: OffsetDateTime) -> Result<String, AppError> {
    dt.to_offset(UtcOffset::UTC)
        .format(UTC_OFFSET_FORMAT)
        .map_err(|e| {
            AppError::new("PARAM_DATE_FORMAT", "Failed to format date").with_details(e.to_string())
        })
}

pub fn to_epoch_seconds(dt: OffsetDateTime) -> i64 {
    dt.unix_timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_millisecond_and_microsecond_inputs() {
        let dt = parse_input_date("detected", "2024-01-01T00:00:00.000Z").expect("parse");
        assert_eq!(dt.unix_timestamp(), 1_704_067_200);

        let dt = parse_input_date("detected", "2024-03-05T10:20:30.123456Z").expect("parse");
        assert_eq!(dt.microsecond(), 123_456);
    }

    #[test]
    fn rejects_other_formats() {
        for raw in [
            "2024-01-01",
            "2024-01-01T00:00:00Z",
            "2024-01-01 00:00:00.000",
            "01/01/2024",
        ] {
            let err = parse_input_date("detected", raw).expect_err(raw);
            assert_eq!(err.code, "PARAM_DATE_FORMAT");
        }
    }

    #[test]
    fn renders_utc_offset_form() {
        let dt = parse_input_date("from", "2024-06-30T23:59:58.999Z").expect("parse");
        assert_eq!(
            to_utc_offset_string(dt).expect("format"),
            "2024-06-30T23:59:58+00:00"
        );
        assert_eq!(to_epoch_seconds(dt), 1_719_791_998);
    }
}
