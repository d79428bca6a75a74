use chrono::{DateTime, Utc};

pub(crate) fn format_date(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}
