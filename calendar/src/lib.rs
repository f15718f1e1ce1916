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

#![deny(missing_docs)]

//! Time handling for hourly weather series.
//!
//! Two things live here:
//!
//! * [`Date`], a year-agnostic date (month, day and decimal hour). Solar
//!   calculations only need the day of the year, so this is what they consume.
//! * [`Period`], an iterator producing evenly spaced `chrono` timestamps tagged
//!   with a fixed UTC offset. Weather files are normalized onto a reference year
//!   through it.
//!
//! # Example
//!
//! ```
//! use calendar::{Date, Period};
//! use chrono::FixedOffset;
//!
//! let offset = FixedOffset::east_opt(3600).unwrap();
//! let period = Period::reference_year(2015, offset).unwrap();
//! assert_eq!(period.len(), 8760);
//!
//! let first = period.clone().next().unwrap();
//! let date: Date = first.into();
//! assert_eq!(date.month, 1);
//! assert_eq!(date.day, 1);
//! assert!(date.hour.abs() < 1e-9);
//! ```

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
type Float = f32;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(not(feature = "float"))]
type Float = f64;

mod date;
pub use crate::date::Date;
mod period;
pub use crate::period::{Period, HOURS_PER_YEAR};

/// A timestamp with a fixed UTC offset. This is what weather series use.
pub type Timestamp = chrono::DateTime<chrono::FixedOffset>;

/// Re-exported so downstream crates name the same `chrono`.
pub use chrono;
