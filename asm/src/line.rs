use crate::error::Error;

// ----------------------------------------------------------------------------
// Source Line

/// One non-blank, non-comment line of the input, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub text: String,
    /// 1-based
    pub num: usize,
}

impl SourceLine {
    pub fn new(text: &str, num: usize) -> Self {
        SourceLine {
            text: text.to_string(),
            num,
        }
    }
}

/// Keeps every line that carries something other than whitespace or a comment.
pub fn collect_lines(src: &str) -> Vec<SourceLine> {
    src.lines()
        .enumerate()
        .filter(|(_, raw)| {
            let raw = raw.trim();
            !raw.is_empty() && !raw.starts_with(';')
        })
        .map(|(idx, raw)| SourceLine::new(raw, idx + 1))
        .collect()
}

// ----------------------------------------------------------------------------
// Classified Line

/// A line split into its optional label and the instruction text after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub label: Option<&'a str>,
    pub code: &'a str,
}

impl<'a> Line<'a> {
    pub fn classify(raw: &'a str) -> Result<Line<'a>, Error> {
        let code = match raw.split_once(';') {
            Some((code, _comment)) => code,
            None => raw,
        }
        .trim();

        let Some((label, rest)) = code.split_once(':') else {
            return Ok(Line { label: None, code });
        };

        let label = label.trim();
        if !is_ident(label) {
            return Err(Error::MalformedLine);
        }
        if arch::is_reserved(label) {
            return Err(Error::ReservedLabelName(label.to_string()));
        }

        let rest = rest.trim();
        if rest.contains(':') {
            return Err(Error::MalformedLine);
        }

        Ok(Line {
            label: Some(label),
            code: rest,
        })
    }

    /// Label-only and comment-only lines occupy no program slot.
    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }
}

/// `[A-Za-z0-9_-]+`
pub fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(raw: &str, label: Option<&str>, code: &str) {
        let line = Line::classify(raw).unwrap();
        assert_eq!(line.label, label, "{raw:?}");
        assert_eq!(line.code, code, "{raw:?}");
    }

    #[test]
    fn classify() {
        case("add r0, r1, r2", None, "add r0, r1, r2");
        case("  add r0, r1, r2   ; sum", None, "add r0, r1, r2");
        case("loop: jmp loop", Some("loop"), "jmp loop");
        case("loop :", Some("loop"), "");
        case("  end-of_2:   ; trailing", Some("end-of_2"), "");
        case("   ", None, "");
        case("; only a comment", None, "");
        case("stop ; a: b; c", None, "stop");
    }

    #[test]
    fn reserved_labels() {
        for name in ["add", "noop", "nop", "stop", "r0", "r7", "sp", "lr"] {
            let raw = format!("{name}: nop");
            assert!(
                matches!(Line::classify(&raw), Err(Error::ReservedLabelName(n)) if n == name),
                "{name}"
            );
        }
        // case-sensitive: these are ordinary identifiers
        case("ADD: nop", Some("ADD"), "nop");
        case("R1: nop", Some("R1"), "nop");
    }

    #[test]
    fn malformed() {
        assert!(matches!(Line::classify("a b: nop"), Err(Error::MalformedLine)));
        assert!(matches!(Line::classify(": nop"), Err(Error::MalformedLine)));
        assert!(matches!(Line::classify("a: b: nop"), Err(Error::MalformedLine)));
        assert!(matches!(Line::classify("a.b: nop"), Err(Error::MalformedLine)));
    }

    #[test]
    fn collect_skips_blank_and_comment_lines() {
        let lines = collect_lines("; header\n\n  ldi r0, 1\n\t\n  ; note\nloop:\r\n");
        assert_eq!(
            lines,
            vec![SourceLine::new("  ldi r0, 1", 3), SourceLine::new("loop:", 6)]
        );
    }
}
