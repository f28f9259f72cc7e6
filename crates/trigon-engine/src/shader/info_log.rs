/// Byte bound applied to compile and link diagnostics unless configured otherwise.
pub const DEFAULT_INFO_LOG_LIMIT: usize = 512;

/// Options shared by shader compilation and program linking.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ShaderOptions {
    /// Maximum length, in bytes, of a reported diagnostic.
    ///
    /// `None` reports the full text. The full text is always written to the
    /// debug log regardless of this setting.
    pub info_log_limit: Option<usize>,
}

impl Default for ShaderOptions {
    fn default() -> Self {
        Self {
            info_log_limit: Some(DEFAULT_INFO_LOG_LIMIT),
        }
    }
}

/// Produces the reported diagnostic from the full compiler/linker text.
///
/// Never returns an empty string for a failed compile or link, so callers can
/// rely on a failure always carrying some text.
pub(crate) fn info_log(full: &str, limit: Option<usize>) -> String {
    let full = full.trim_end();
    let full = if full.is_empty() { "unknown error" } else { full };

    match limit {
        Some(max) => truncate_on_char_boundary(full, max).to_owned(),
        None => full.to_owned(),
    }
}

/// Returns the longest prefix of `s` that is at most `max` bytes and ends on a
/// UTF-8 character boundary.
pub(crate) fn truncate_on_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }

    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_log_is_untouched() {
        assert_eq!(info_log("error: bad token\n", Some(512)), "error: bad token");
    }

    #[test]
    fn long_log_is_bounded() {
        let full = "x".repeat(2000);
        let log = info_log(&full, Some(DEFAULT_INFO_LOG_LIMIT));
        assert_eq!(log.len(), DEFAULT_INFO_LOG_LIMIT);
    }

    #[test]
    fn unbounded_log_is_lossless() {
        let full = "y".repeat(2000);
        assert_eq!(info_log(&full, None).len(), 2000);
    }

    #[test]
    fn empty_log_gets_placeholder() {
        assert_eq!(info_log("  \n", None), "unknown error");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 'é' is two bytes; cutting at 3 would split the second one.
        let s = "éé";
        assert_eq!(truncate_on_char_boundary(s, 3), "é");
        assert_eq!(truncate_on_char_boundary(s, 4), "éé");
        assert_eq!(truncate_on_char_boundary(s, 0), "");
    }
}
