//! Scalar providers for [`time`] types.
//!
//! Types with an offset are formatted as RFC 2822, the rest with their [`Display`]
//! implementation.
//!
//! [`Display`]: std::fmt::Display
use std::borrow::Cow;
use time::format_description::well_known::Rfc2822;

use crate::{Provider, Shape};

pub use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcDateTime, UtcOffset};

macro_rules! rfc2822 {
    ($ty:ty) => {
        impl Provider for $ty {
            fn shape(&self) -> Shape<'_> {
                let text = self.format(&Rfc2822).unwrap_or_else(|_| self.to_string());
                Shape::Scalar(Cow::Owned(text))
            }
        }
    };
}

macro_rules! display {
    ($ty:ty) => {
        impl Provider for $ty {
            fn shape(&self) -> Shape<'_> {
                Shape::Scalar(Cow::Owned(self.to_string()))
            }
        }
    };
}

rfc2822!(OffsetDateTime);
rfc2822!(UtcDateTime);

display!(Date);
display!(PrimitiveDateTime);
display!(Time);
display!(UtcOffset);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rfc2822() {
        let date = Date::from_calendar_date(2024, time::Month::March, 1).unwrap();
        let at = PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc();
        let Shape::Scalar(text) = at.shape() else { panic!("expected scalar") };
        assert_eq!(text, "Fri, 01 Mar 2024 00:00:00 +0000");

        let Shape::Scalar(text) = date.shape() else { panic!("expected scalar") };
        assert_eq!(text, "2024-03-01");
    }
}
