//! Contains several macros used in this crate.

macro_rules! gen_setter {
    ($(#[$comments:meta])* $field:ident : val $t:ty) => {
        $(#[$comments])*
        ///
        /// <small>See [`ParserConfig`][crate::ParserConfig] fields docs for details</small>
        #[inline]
        #[must_use]
        pub fn $field(mut self, value: $t) -> Self {
            self.$field = value;
            self
        }
    };
}

macro_rules! gen_setters {
    ($target:ident, $($(#[$comments:meta])* $field:ident : $k:tt $tpe:ty),+) => (
        impl $target {$(
            gen_setter! { $(#[$comments])* $field : $k $tpe }
        )+}
    )
}

/// Returns early with an [`Error`](crate::reader::Error) built from an error code,
/// a position and an optional formatted message.
macro_rules! fail {
    ($code:ident, $pos:expr) => {
        return Err($crate::reader::Error::new($crate::reader::ErrorCode::$code, $pos))
    };
    ($code:ident, $pos:expr, $msg:literal) => {
        return Err($crate::reader::Error::with_message($crate::reader::ErrorCode::$code, $pos, $msg))
    };
    ($code:ident, $pos:expr, $fmt:literal, $($arg:expr),+) => {
        return Err($crate::reader::Error::with_message(
            $crate::reader::ErrorCode::$code,
            $pos,
            format!($fmt, $($arg),+),
        ))
    };
}
