pub const SUMMARY_MARKER: &str = "S:";
pub const VALUE_MARKER: &str = "V:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedOutput<'a> {
    Parsed { summary: &'a str, value: &'a str },
    Failed,
}

impl<'a> ParsedOutput<'a> {
    pub fn summary(&self) -> &'a str {
        match self {
            Self::Parsed { summary, .. } => summary,
            Self::Failed => "",
        }
    }

    pub fn value(&self) -> &'a str {
        match self {
            Self::Parsed { value, .. } => value,
            Self::Failed => "",
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed { .. })
    }
}

pub fn parse_output(candidate: &str) -> ParsedOutput<'_> {
    let mut lines = candidate.trim().lines();
    let (Some(summary_line), Some(value_line), None) = (lines.next(), lines.next(), lines.next())
    else {
        return ParsedOutput::Failed;
    };

    let (Some(summary), Some(value)) = (
        summary_line.strip_prefix(SUMMARY_MARKER),
        value_line.strip_prefix(VALUE_MARKER),
    ) else {
        return ParsedOutput::Failed;
    };

    ParsedOutput::Parsed {
        summary: summary.trim(),
        value: value.trim(),
    }
}
