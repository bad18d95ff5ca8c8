// Optional `tracing` events.
//
// - `tracing-recover`: malformed input was tolerated and a substitute used;
// - `tracing-discard`: malformed input was dropped;
// - `tracing`: every re-encoded token.
//
// Without the features the macros expand to nothing, so arguments must not
// be computed solely for them.

#[cfg(feature = "tracing-recover")]
macro_rules! recover {
    ($($arg:tt)*) => { tracing::debug!(target: "eml_header::recover", $($arg)*) };
}
#[cfg(not(feature = "tracing-recover"))]
macro_rules! recover {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing-discard")]
macro_rules! discard {
    ($($arg:tt)*) => { tracing::warn!(target: "eml_header::discard", $($arg)*) };
}
#[cfg(not(feature = "tracing-discard"))]
macro_rules! discard {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! trace_token {
    ($($arg:tt)*) => { tracing::trace!(target: "eml_header::token", $($arg)*) };
}
#[cfg(not(feature = "tracing"))]
macro_rules! trace_token {
    ($($arg:tt)*) => {};
}
