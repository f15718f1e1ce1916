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

use crate::Timestamp;
use chrono::{Duration, FixedOffset, NaiveDate, TimeZone};

/// Number of hourly records in a (non-leap) year
pub const HOURS_PER_YEAR: usize = 8760;

/// A struct that will give us timestamps, separated by
/// a fixed step and all sharing the same UTC offset.
#[derive(Clone, Debug)]
pub struct Period {
    /// The next timestamp to be returned
    current: Timestamp,

    /// The separation between timestamps
    step: Duration,

    /// How many timestamps are left
    remaining: usize,
}

impl Period {
    /// Creates a new Period starting on `start`, producing `count`
    /// timestamps separated by `step`.
    pub fn new(start: Timestamp, step: Duration, count: usize) -> Self {
        Self {
            current: start,
            step,
            remaining: count,
        }
    }

    /// Hourly timestamps covering a whole year, starting at 00:00 on
    /// January 1st in the wall-clock time of `offset`.
    ///
    /// Returns `None` if the year cannot be represented.
    ///
    /// ```
    /// use calendar::Period;
    /// use chrono::FixedOffset;
    ///
    /// let offset = FixedOffset::east_opt(3600).unwrap();
    /// let p = Period::reference_year(2015, offset).unwrap();
    /// let v : Vec<_> = p.collect();
    /// assert_eq!(v[0].to_rfc3339(), "2015-01-01T00:00:00+01:00");
    /// assert_eq!(v[8759].to_rfc3339(), "2015-12-31T23:00:00+01:00");
    /// ```
    pub fn reference_year(year: i32, offset: FixedOffset) -> Option<Self> {
        let start = Self::local_midnight(year, 1, 1, offset)?;
        Some(Self::new(start, Duration::hours(1), crate::HOURS_PER_YEAR))
    }

    /// Builds a timestamp at 00:00 of the given day, in the wall-clock
    /// time of `offset`.
    pub fn local_midnight(
        year: i32,
        month: u32,
        day: u32,
        offset: FixedOffset,
    ) -> Option<Timestamp> {
        let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
        offset.from_local_datetime(&naive).single()
    }
}

impl Iterator for Period {
    type Item = Timestamp;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ret = self.current;
        self.current += self.step;
        self.remaining -= 1;
        Some(ret)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Period {}
