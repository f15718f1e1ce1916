/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::Float;
use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Timelike};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Days elapsed before the first day of each month (non-leap year)
const CUMULATED_DAYS_BEFORE_MONTH: [Float; 12] = [
    0.,   // Jan
    31.,  // Feb
    59.,  // Mar
    90.,  // Apr
    120., // May
    151., // Jun
    181., // Jul
    212., // Aug
    243., // Sept
    273., // Oct
    304., // Nov
    334., // Dec
];

/// An extremely simple Date object.
/// It does not consider years at all!
/// Days and Months are counted from 1
/// (e.g. January is 1, not 0)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Date {
    /// Months of the year, from 1 to 12
    pub month: u8,

    /// Day of the month, from 1 to N
    pub day: u8,

    /// Hour of the day, from 0.0 to 23.999999
    pub hour: Float,
}

impl std::convert::From<NaiveDateTime> for Date {
    fn from(item: NaiveDateTime) -> Self {
        let month = item.month() as u8;
        let day = item.day() as u8;
        let hour_int = item.hour() as Float;
        let minute = item.minute() as Float;
        let seconds = item.second() as Float;
        let hour = hour_int + minute / 60. + seconds / 3600.;
        Self { month, day, hour }
    }
}

/// Uses the wall-clock (i.e., standard) time of the timestamp, not UTC.
impl<Tz: TimeZone> std::convert::From<DateTime<Tz>> for Date {
    fn from(item: DateTime<Tz>) -> Self {
        item.naive_local().into()
    }
}

impl Date {
    /// Retrieves the day of the year corresponding
    /// to the date (includes the decimals for the hour).
    ///
    /// January 1st at midnight is `0.0`. February 29th is folded
    /// onto March 1st.
    pub fn day_of_year(&self) -> Float {
        let month = (self.month.clamp(1, 12) - 1) as usize;
        CUMULATED_DAYS_BEFORE_MONTH[month] + self.day as Float + self.hour / 24.0 - 1.0
    }
}
