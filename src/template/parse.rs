use super::types::{Placeholder, Segment, TemplateLine};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Malformed template at line {line_number}: {reason} in '{line}'")]
    Malformed {
        line: String,
        line_number: usize,
        reason: String,
    },

    #[error("Invalid block name '{0}': must be non-empty without whitespace, '/', '\\', '<' or '>'")]
    InvalidBlockName(String),

    #[error("PVTE axes are too large: the combination count overflows")]
    TooManyCombinations,
}

/// A single `<...>` span with no nested brackets
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([^<>]*)>").expect("token pattern should compile"));

/// Parse one raw golden-list line.
///
/// Returns `Ok(None)` for lines that are blank after trimming.
pub fn parse_line(raw: &str, line_number: usize) -> Result<Option<TemplateLine>, TemplateError> {
    let line = raw.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let malformed = |reason: String| TemplateError::Malformed {
        line: line.to_string(),
        line_number,
        reason,
    };

    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut tokens = TOKEN_RE.captures_iter(line).peekable();

    while let Some(caps) = tokens.next() {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        push_literal(&mut segments, &line[cursor..whole.start()]).map_err(&malformed)?;
        cursor = whole.end();

        let placeholder = match inner.as_str() {
            "PVTE" => {
                let paired = tokens.peek().and_then(|next| {
                    let next_whole = next.get(0)?;
                    let next_inner = next.get(1)?;
                    (next_whole.start() == whole.end() && next_inner.as_str() == "Mode")
                        .then_some(next_whole.end())
                });
                match paired {
                    Some(end) => {
                        tokens.next();
                        cursor = end;
                        Placeholder::PvteAxis
                    }
                    None => return Err(malformed("'<PVTE>' must be followed by '<Mode>'".into())),
                }
            }
            "Mode" => return Err(malformed("'<Mode>' must follow '<PVTE>'".into())),
            other => Placeholder::from_token(other)
                .ok_or_else(|| malformed(format!("unrecognized placeholder '<{}>'", other)))?,
        };

        segments.push(Segment::Placeholder(placeholder));
    }

    push_literal(&mut segments, &line[cursor..]).map_err(&malformed)?;

    Ok(Some(TemplateLine {
        line_number,
        segments,
    }))
}

/// Parse every line of a golden list, skipping blank lines
pub fn parse_template<S: AsRef<str>>(lines: &[S]) -> Result<Vec<TemplateLine>, TemplateError> {
    let mut parsed = Vec::with_capacity(lines.len());
    for (index, raw) in lines.iter().enumerate() {
        if let Some(line) = parse_line(raw.as_ref(), index + 1)? {
            parsed.push(line);
        }
    }
    Ok(parsed)
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) -> Result<(), String> {
    if let Some(stray) = text.chars().find(|c| *c == '<' || *c == '>') {
        return Err(format!("unbalanced '{}'", stray));
    }
    if !text.is_empty() {
        segments.push(Segment::Literal(text.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> TemplateLine {
        parse_line(raw, 1).unwrap().unwrap()
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        assert_eq!(parse_line("", 1).unwrap(), None);
        assert_eq!(parse_line("   \t", 2).unwrap(), None);
    }

    #[test]
    fn test_literal_line() {
        let line = parse("  plain_file.log ");
        assert!(line.is_literal());
        assert_eq!(line.segments, vec![Segment::Literal("plain_file.log".into())]);
    }

    #[test]
    fn test_block_and_mode_tokens() {
        let line = parse("<block>_<mode>.log");
        assert_eq!(
            line.segments,
            vec![
                Segment::Placeholder(Placeholder::BlockName),
                Segment::Literal("_".into()),
                Segment::Placeholder(Placeholder::ModeAxis),
                Segment::Literal(".log".into()),
            ]
        );
    }

    #[test]
    fn test_empty_brackets_are_block_name() {
        let line = parse("<>_stuck.pat");
        assert!(line.contains(Placeholder::BlockName));
    }

    #[test]
    fn test_pvte_pair_is_one_placeholder() {
        let line = parse("<block>_<PVTE><Mode>.sdf");
        assert_eq!(
            line.segments,
            vec![
                Segment::Placeholder(Placeholder::BlockName),
                Segment::Literal("_".into()),
                Segment::Placeholder(Placeholder::PvteAxis),
                Segment::Literal(".sdf".into()),
            ]
        );
    }

    #[test]
    fn test_upper_mode_is_pvte() {
        assert!(parse("sta_<MODE>.rpt").contains(Placeholder::PvteAxis));
    }

    #[test]
    fn test_unbalanced_open_bracket() {
        let err = parse_line("core_<mode.log", 7).unwrap_err();
        match err {
            TemplateError::Malformed {
                line, line_number, ..
            } => {
                assert_eq!(line, "core_<mode.log");
                assert_eq!(line_number, 7);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unbalanced_close_bracket() {
        assert!(parse_line("core_mode>.log", 1).is_err());
    }

    #[test]
    fn test_nested_brackets_are_malformed() {
        assert!(parse_line("<<block>>.log", 1).is_err());
    }

    #[test]
    fn test_unknown_placeholder_is_malformed() {
        let err = parse_line("<blk>_FUNC.log", 3).unwrap_err();
        assert!(err.to_string().contains("unrecognized placeholder '<blk>'"));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_dangling_pvte_is_malformed() {
        assert!(parse_line("<PVTE>.log", 1).is_err());
        assert!(parse_line("<PVTE>_<Mode>.log", 1).is_err());
        assert!(parse_line("<Mode>.log", 1).is_err());
    }

    #[test]
    fn test_parse_template_reports_source_line_number() {
        let lines = vec!["a.log", "", "<bad>.log"];
        let err = parse_template(&lines).unwrap_err();
        assert!(matches!(err, TemplateError::Malformed { line_number: 3, .. }));
    }
}
