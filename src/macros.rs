//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. The message is
//! only formatted when the logger emits the kind.
//!
//! # Examples
//!
//! ```
//! use named_logger::prelude::*;
//! use named_logger::warn;
//!
//! let provider = LoggerProvider::builder().console(MemoryConsole::new()).build();
//! let logger = provider.get_logger().named("Server");
//!
//! // Basic logging
//! warn!(logger, "Server started without TLS");
//!
//! // With format arguments
//! let port = 8080;
//! warn!(logger, "Port {} is already bound", port);
//! ```

/// Log a message of the given kind with automatic formatting.
///
/// # Examples
///
/// ```
/// # use named_logger::prelude::*;
/// # let provider = LoggerProvider::builder().console(MemoryConsole::new()).build();
/// # let logger = provider.get_logger();
/// use named_logger::log;
/// log!(logger, LogKind::Warn, "Simple message");
/// log!(logger, LogKind::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $kind:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let kind: $crate::LogKind = $kind;
        if logger.enabled(kind) {
            logger.log(kind, &format!($($arg)+), None);
        }
    }};
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use named_logger::prelude::*;
/// # let provider = LoggerProvider::builder().console(MemoryConsole::new()).build();
/// # provider.configure_logging(LoggingConfig::new().min(LogLevel::Trace));
/// # let logger = provider.get_logger();
/// use named_logger::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogKind::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use named_logger::prelude::*;
/// # let provider = LoggerProvider::builder().console(MemoryConsole::new()).build();
/// # let logger = provider.get_logger();
/// use named_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogKind::Debug, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use named_logger::prelude::*;
/// # let provider = LoggerProvider::builder().console(MemoryConsole::new()).build();
/// # let logger = provider.get_logger();
/// use named_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogKind::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use named_logger::prelude::*;
/// # let provider = LoggerProvider::builder().console(MemoryConsole::new()).build();
/// # let logger = provider.get_logger();
/// use named_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogKind::Error, $($arg)+)
    };
}

/// Log something unexpected that deserves a look, at error severity.
///
/// # Examples
///
/// ```
/// # use named_logger::prelude::*;
/// # let provider = LoggerProvider::builder().console(MemoryConsole::new()).build();
/// # let logger = provider.get_logger();
/// use named_logger::hmm;
/// hmm!(logger, "Cache returned {} entries for an empty key", 3);
/// ```
#[macro_export]
macro_rules! hmm {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogKind::Hmm, $($arg)+)
    };
}
