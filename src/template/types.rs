/// A recognized golden-list placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// `<block>` or `<>`, replaced by the SoC block name
    BlockName,
    /// `<mode>`, fanned out over the mode set
    ModeAxis,
    /// `<MODE>` or `<PVTE><Mode>`, fanned out over the five-axis product
    PvteAxis,
}

impl Placeholder {
    /// Classify the text between `<` and `>` of a single token.
    ///
    /// `PVTE` and `Mode` are only meaningful as the pair `<PVTE><Mode>` and
    /// are handled by the parser, so they classify as `None` here.
    pub fn from_token(inner: &str) -> Option<Self> {
        match inner {
            "block" | "" => Some(Placeholder::BlockName),
            "mode" => Some(Placeholder::ModeAxis),
            "MODE" => Some(Placeholder::PvteAxis),
            _ => None,
        }
    }
}

/// One piece of a tokenized template line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A non-blank golden-list line, tokenized once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLine {
    /// 1-based position in the source file
    pub line_number: usize,
    pub segments: Vec<Segment>,
}

impl TemplateLine {
    pub fn contains(&self, placeholder: Placeholder) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Placeholder(p) if *p == placeholder))
    }

    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }
}
