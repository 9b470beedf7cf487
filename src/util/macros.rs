//! Logging macros that forward to `tracing` if the feature is enabled and
//! expand to nothing otherwise.

macro_rules! log_trace {
    ( $( $arg:tt )* ) => {
        #[cfg(feature = "tracing")]
        tracing::trace!( $( $arg )* );
    };
}

macro_rules! log_debug {
    ( $( $arg:tt )* ) => {
        #[cfg(feature = "tracing")]
        tracing::debug!( $( $arg )* );
    };
}

macro_rules! log_warn {
    ( $( $arg:tt )* ) => {
        #[cfg(feature = "tracing")]
        tracing::warn!( $( $arg )* );
    };
}
