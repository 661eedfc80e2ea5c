use std::fmt;

/// Line ending convention of a text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Crlf,
    Lf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineEnding::Crlf => write!(f, "CRLF"),
            LineEnding::Lf => write!(f, "LF"),
        }
    }
}

/// Reports the dominant line ending of `text`, or `None` when it has no newlines.
///
/// A `\r\n` pair counts once as CRLF. Ties go to LF.
pub fn detect(text: &str) -> Option<LineEnding> {
    let bytes = text.as_bytes();
    let mut total = 0usize;
    let mut crlf = 0usize;

    for (idx, byte) in bytes.iter().enumerate() {
        if *byte == b'\n' {
            total += 1;
            if idx > 0 && bytes[idx - 1] == b'\r' {
                crlf += 1;
            }
        }
    }

    if total == 0 {
        return None;
    }

    let lf = total - crlf;
    if crlf > lf {
        Some(LineEnding::Crlf)
    } else {
        Some(LineEnding::Lf)
    }
}

/// Like [`detect`], but falls back to LF when there are no newlines.
pub fn detect_or_default(text: &str) -> LineEnding {
    detect(text).unwrap_or(LineEnding::Lf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_only_text_is_crlf() {
        assert_eq!(detect("a\r\nb\r\n"), Some(LineEnding::Crlf));
        assert_eq!(detect("\r\n"), Some(LineEnding::Crlf));
    }

    #[test]
    fn lf_only_text_is_lf() {
        assert_eq!(detect("a\nb\nc"), Some(LineEnding::Lf));
    }

    #[test]
    fn no_newlines_has_no_opinion() {
        assert_eq!(detect(""), None);
        assert_eq!(detect("single line\r"), None);
        assert_eq!(detect_or_default("single line"), LineEnding::Lf);
    }

    #[test]
    fn tie_resolves_to_lf() {
        assert_eq!(detect("a\r\nb\nc"), Some(LineEnding::Lf));
    }

    #[test]
    fn majority_wins() {
        assert_eq!(detect("a\r\nb\r\nc\nd"), Some(LineEnding::Crlf));
        assert_eq!(detect("a\nb\nc\r\nd"), Some(LineEnding::Lf));
    }

    #[test]
    fn as_str_matches_variant() {
        assert_eq!(LineEnding::Crlf.as_str(), "\r\n");
        assert_eq!(LineEnding::Lf.as_str(), "\n");
    }
}
