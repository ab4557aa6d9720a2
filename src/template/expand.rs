use super::parse::{parse_template, TemplateError};
use super::types::{Placeholder, Segment, TemplateLine};
use crate::config::AxisSets;
use crate::utils::is_name_fragment;
use std::collections::BTreeSet;
use tracing::debug;

/// The deduplicated set of concrete file names a golden list expands to
pub type ExpectedNames = BTreeSet<String>;

/// Expand golden-list lines into the set of expected file names.
///
/// Blank lines are skipped. Every line is parsed before anything is emitted,
/// so a malformed line fails the whole expansion.
pub fn expand<S: AsRef<str>>(
    template_lines: &[S],
    block_name: &str,
    axes: &AxisSets,
) -> Result<ExpectedNames, TemplateError> {
    let parsed = parse_template(template_lines)?;

    if parsed.iter().any(|l| l.contains(Placeholder::BlockName)) {
        validate_block_name(block_name)?;
    }

    // The five-axis product is only built when some line asks for it
    let pvte = if parsed.iter().any(|l| l.contains(Placeholder::PvteAxis)) {
        if axes.pvte_combination_count().is_none() {
            return Err(TemplateError::TooManyCombinations);
        }
        pvte_combinations(axes)
    } else {
        Vec::new()
    };
    let mut expected = ExpectedNames::new();

    for line in &parsed {
        let before = expected.len();
        expand_line(line, block_name, axes, &pvte, &mut expected);
        debug!(
            line_number = line.line_number,
            added = expected.len() - before,
            "Expanded golden list line"
        );
    }

    Ok(expected)
}

/// Enumerate `P_V_T_E_Mode` in sorted axis order
pub fn pvte_combinations(axes: &AxisSets) -> Vec<String> {
    let mut combinations = Vec::with_capacity(axes.pvte_combination_count().unwrap_or(0));
    for p in axes.process() {
        for v in axes.voltage() {
            for t in axes.temperature() {
                for e in axes.environment() {
                    for m in axes.modes() {
                        combinations.push(format!("{}_{}_{}_{}_{}", p, v, t, e, m));
                    }
                }
            }
        }
    }
    combinations
}

pub fn validate_block_name(block_name: &str) -> Result<(), TemplateError> {
    if is_name_fragment(block_name) {
        Ok(())
    } else {
        Err(TemplateError::InvalidBlockName(block_name.to_string()))
    }
}

fn expand_line(
    line: &TemplateLine,
    block_name: &str,
    axes: &AxisSets,
    pvte: &[String],
    out: &mut ExpectedNames,
) {
    // All occurrences of one family on a line take the same value
    let modes: Vec<Option<&str>> = if line.contains(Placeholder::ModeAxis) {
        axes.modes().iter().map(|m| Some(m.as_str())).collect()
    } else {
        vec![None]
    };
    let corners: Vec<Option<&str>> = if line.contains(Placeholder::PvteAxis) {
        pvte.iter().map(|c| Some(c.as_str())).collect()
    } else {
        vec![None]
    };

    for mode in &modes {
        for corner in &corners {
            out.insert(render(line, block_name, *mode, *corner));
        }
    }
}

fn render(line: &TemplateLine, block_name: &str, mode: Option<&str>, corner: Option<&str>) -> String {
    let mut rendered = String::new();
    for segment in &line.segments {
        match segment {
            Segment::Literal(text) => rendered.push_str(text),
            Segment::Placeholder(Placeholder::BlockName) => rendered.push_str(block_name),
            Segment::Placeholder(Placeholder::ModeAxis) => rendered.push_str(mode.unwrap_or_default()),
            Segment::Placeholder(Placeholder::PvteAxis) => {
                rendered.push_str(corner.unwrap_or_default())
            }
        }
    }
    rendered
}
