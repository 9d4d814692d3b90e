// src/macros.rs
//
// String shorthands used across the crate.

/// `s!()` is an empty `String`; `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Owned concatenation: the first piece becomes the buffer, the rest are
/// pushed as `&str`.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut buf = ::std::string::String::from($first);
        $( buf.push_str($rest); )+
        buf
    }};
}
