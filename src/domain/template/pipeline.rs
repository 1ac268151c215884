// Value conversion applied before a binding is substituted

use chrono::{DateTime, SecondsFormat, Utc};

/// How a bound value is written into the URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueEncoding {
    /// Opaque identifiers and pre-built fragments, written as given
    Verbatim,
    /// Percent-encoded free text
    Encode,
}

impl ValueEncoding {
    pub fn apply(&self, value: &str) -> String {
        match self {
            ValueEncoding::Verbatim => value.to_string(),
            ValueEncoding::Encode => urlencoding::encode(value).into_owned(),
        }
    }
}

/// Conversion of a typed argument into its canonical binding string
pub trait BindingValue {
    fn to_binding(&self) -> String;
}

impl BindingValue for str {
    fn to_binding(&self) -> String {
        self.to_string()
    }
}

impl BindingValue for String {
    fn to_binding(&self) -> String {
        self.clone()
    }
}

impl<T: BindingValue + ?Sized> BindingValue for &T {
    fn to_binding(&self) -> String {
        (**self).to_binding()
    }
}

macro_rules! numeric_binding {
    ($($ty:ty),*) => {
        $(
            impl BindingValue for $ty {
                fn to_binding(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

numeric_binding!(u16, u32, u64, usize, i32, i64);

impl BindingValue for DateTime<Utc> {
    fn to_binding(&self) -> String {
        format_timestamp(self)
    }
}

/// Sortable, timezone-qualified timestamp: `2024-03-01T08:15:00.000Z`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_encode() {
        assert_eq!(ValueEncoding::Encode.apply("hello world"), "hello%20world");
        assert_eq!(ValueEncoding::Encode.apply("foo/bar"), "foo%2Fbar");
        assert_eq!(ValueEncoding::Encode.apply("West"), "West");
    }

    #[test]
    fn test_verbatim() {
        assert_eq!(ValueEncoding::Verbatim.apply("vf_a=b"), "vf_a=b");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(1000u32.to_binding(), "1000");
        assert_eq!((&7usize).to_binding(), "7");
    }

    #[test]
    fn test_timestamp_format() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 8, 15, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2024-03-01T08:15:00.000Z");
        assert_eq!(ts.to_binding(), "2024-03-01T08:15:00.000Z");
    }

    #[test]
    fn test_timestamps_sort_lexically() {
        let earlier = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(format_timestamp(&earlier) < format_timestamp(&later));
    }

    #[test]
    fn test_timestamp_round_trips() {
        let ts = Utc.with_ymd_and_hms(2022, 7, 4, 12, 0, 30).unwrap();
        let parsed = DateTime::parse_from_rfc3339(&format_timestamp(&ts)).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), ts);
    }
}
