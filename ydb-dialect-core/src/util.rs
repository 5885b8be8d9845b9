use std::fmt::{self, Display, Formatter};

pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Displays at most the first 497 bytes of a query, used in error contexts and logs.
pub struct TruncateLong<'a>(pub &'a str);

impl<'a> Display for TruncateLong<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        const LIMIT: usize = 497;
        let value = self.0;
        if value.len() <= LIMIT {
            return f.write_str(value.trim_end());
        }
        let mut end = LIMIT;
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        write!(f, "{}...", value[..end].trim_end())
    }
}

/// Logs the error once and hands it back, meant to be used inside `map_err`.
#[macro_export]
macro_rules! log_error {
    ($error:expr) => {{
        let error: $crate::Error = $error;
        log::error!("{:#}", error);
        error
    }};
}
