//! Logging abstraction
//!
//! Provides logging macros that work across different targets:
//! - Device (`defmt` feature): forwards to defmt
//! - Host (`log` feature): forwards to the `log` facade
//! - Host tests: prints to stdout
//! - Otherwise: no-op (arguments are still type-checked)
//!
//! Format strings must stay within the subset both defmt and `core::fmt`
//! accept: `{}` and `{:?}` placeholders, with `&str`, integers, `bool` and
//! types deriving both `Debug` and `defmt::Format` as arguments.

/// Log error message
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($($arg)*);

        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::error!($($arg)*);

        #[cfg(all(test, not(feature = "defmt"), not(feature = "log")))]
        ::std::println!("[ERROR] {}", ::core::format_args!($($arg)*));

        #[cfg(not(any(test, feature = "defmt", feature = "log")))]
        {
            let _ = ::core::format_args!($($arg)*);
        }
    }};
}

/// Log warning message
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::warn!($($arg)*);

        #[cfg(all(test, not(feature = "defmt"), not(feature = "log")))]
        ::std::println!("[WARN] {}", ::core::format_args!($($arg)*));

        #[cfg(not(any(test, feature = "defmt", feature = "log")))]
        {
            let _ = ::core::format_args!($($arg)*);
        }
    }};
}

/// Log informational message
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);

        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::info!($($arg)*);

        #[cfg(all(test, not(feature = "defmt"), not(feature = "log")))]
        ::std::println!("[INFO] {}", ::core::format_args!($($arg)*));

        #[cfg(not(any(test, feature = "defmt", feature = "log")))]
        {
            let _ = ::core::format_args!($($arg)*);
        }
    }};
}

/// Log debug message
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::debug!($($arg)*);

        #[cfg(all(test, not(feature = "defmt"), not(feature = "log")))]
        ::std::println!("[DEBUG] {}", ::core::format_args!($($arg)*));

        #[cfg(not(any(test, feature = "defmt", feature = "log")))]
        {
            let _ = ::core::format_args!($($arg)*);
        }
    }};
}

/// Log trace message
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);

        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::trace!($($arg)*);

        #[cfg(all(test, not(feature = "defmt"), not(feature = "log")))]
        ::std::println!("[TRACE] {}", ::core::format_args!($($arg)*));

        #[cfg(not(any(test, feature = "defmt", feature = "log")))]
        {
            let _ = ::core::format_args!($($arg)*);
        }
    }};
}
