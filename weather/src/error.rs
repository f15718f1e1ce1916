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
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while reading a weather source.
///
/// Every variant names the file it comes from. Inline sources
/// (i.e., datasets embedded in a request) use the path `<inline>`.
#[derive(Debug, Error)]
pub enum DataFormatError {
    /// The file could not be read
    #[error("could not read weather file '{}': {source}", path.display())]
    Io {
        /// The file
        path: PathBuf,
        /// The underlying cause
        source: std::io::Error,
    },

    /// A header field was found but its value could not be understood
    #[error("invalid header field '{field}' in '{}': {reason}", path.display())]
    Header {
        /// The file
        path: PathBuf,
        /// The header label
        field: String,
        /// What went wrong
        reason: String,
    },

    /// The kind of file cannot be inferred from its extension
    #[error("unsupported weather file '{}' (expected a .dat or .epw file)", path.display())]
    UnsupportedFormat {
        /// The file
        path: PathBuf,
    },

    /// A required header field is not present
    #[error("missing header field '{field}' in '{}'", path.display())]
    MissingHeader {
        /// The file
        path: PathBuf,
        /// The header label
        field: String,
    },

    /// A required column is not present in the table
    #[error("missing column '{column}' in '{}'", path.display())]
    MissingColumn {
        /// The file
        path: PathBuf,
        /// The column name
        column: String,
    },

    /// The line separating the header from the data was never found
    #[error("no line starting with '***' found in '{}'", path.display())]
    MissingSentinel {
        /// The file
        path: PathBuf,
    },

    /// A table value is not a number (or the row is malformed)
    #[error("invalid value '{value}' in line {line} of '{}'", path.display())]
    Value {
        /// The file
        path: PathBuf,
        /// Line number, counted from 1
        line: usize,
        /// The offending text
        value: String,
    },

    /// The number of data rows is not the expected one
    #[error("'{}' contains {found} data rows, expected {expected}", path.display())]
    RowCount {
        /// The file
        path: PathBuf,
        /// Rows found
        found: usize,
        /// Rows expected
        expected: usize,
    },

    /// Columns of an inline dataset do not have the same length
    #[error("column '{column}' of '{}' has {found} values, expected {expected}", path.display())]
    Columns {
        /// The file
        path: PathBuf,
        /// The column name
        column: String,
        /// Values found
        found: usize,
        /// Values expected
        expected: usize,
    },

    /// The EPW file is malformed
    #[error("invalid EPW file '{}' (line {line}): {reason}", path.display())]
    Epw {
        /// The file
        path: PathBuf,
        /// Line number, counted from 1
        line: usize,
        /// What went wrong
        reason: String,
    },

    /// Timestamps are not hourly, or the UTC offset changes
    #[error("invalid timestamps in '{}': {reason}", path.display())]
    Timestamps {
        /// The file
        path: PathBuf,
        /// What went wrong
        reason: String,
    },
}
