// Logging shims so call sites stay free of `cfg` attributes when the
// `logging` feature is disabled.

macro_rules! scan_trace {
    ($($arg:tt)+) => {
        #[cfg(feature = "logging")]
        {
            log::trace!($($arg)+);
        }
    };
}

macro_rules! scan_debug {
    ($($arg:tt)+) => {
        #[cfg(feature = "logging")]
        {
            log::debug!($($arg)+);
        }
    };
}
