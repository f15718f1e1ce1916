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
use std::sync::Mutex;

/// How important a message is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Progress information
    Info,
    /// Something the user should know about, but that does not stop the simulation
    Warning,
    /// Something went wrong
    Error,
}

/// Receives the messages produced while simulating.
///
/// Loggers are passed explicitly to every part of the pipeline that
/// reports something. They are shared by plants that are simulated at
/// the same time, so they must be `Sync`.
pub trait Logger: Sync {
    /// Receives a message. `module` indicates where the message comes from.
    fn log(&self, level: Level, module: &str, msg: &str);

    /// Logs progress information
    fn info(&self, module: &str, msg: &str) {
        self.log(Level::Info, module, msg)
    }

    /// Logs a warning
    fn warning(&self, module: &str, msg: &str) {
        self.log(Level::Warning, module, msg)
    }

    /// Logs an error
    fn error(&self, module: &str, msg: &str) {
        self.log(Level::Error, module, msg)
    }
}

/// Forwards messages to [`tracing`]
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, module: &str, msg: &str) {
        match level {
            Level::Info => tracing::info!("[in {}] {}", module, msg),
            Level::Warning => tracing::warn!("[in {}] {}", module, msg),
            Level::Error => tracing::error!("[in {}] {}", module, msg),
        }
    }
}

/// Keeps every message in memory
#[derive(Debug, Default)]
pub struct RecordingLogger {
    messages: Mutex<Vec<(Level, String)>>,
}

impl RecordingLogger {
    /// Creates an empty logger
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything logged so far, formatted as `[in <module>] <msg>`
    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The messages logged with a certain level
    pub fn with_level(&self, level: Level) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: Level, module: &str, msg: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((level, format!("[in {}] {}", module, msg)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording() {
        let logger = RecordingLogger::new();
        logger.info("weather", "loaded");
        logger.warning("weather", "careful");
        logger.error("plants", "oops");

        assert_eq!(logger.messages().len(), 3);
        assert_eq!(
            logger.with_level(Level::Warning),
            vec!["[in weather] careful".to_string()]
        );
        assert_eq!(
            logger.with_level(Level::Error),
            vec!["[in plants] oops".to_string()]
        );
    }

    #[test]
    fn test_tracing_does_not_panic() {
        // No subscriber installed: messages are simply dropped
        TracingLogger.info("test", "hello");
        TracingLogger.warning("test", "hello");
    }
}
