//! Console rendering of analysis outcomes

use ipcsense_core::AnalysisOutcome;
use std::fmt::Write;

const RULE: &str = "==================================================";
const THIN_RULE: &str = "--------------------------------------------------";

/// Human-readable report for an outcome
pub fn render_report(outcome: &AnalysisOutcome) -> String {
    let mut out = String::new();
    write_report(&mut out, outcome).expect("writing to a String cannot fail");
    out
}

fn write_report(out: &mut String, outcome: &AnalysisOutcome) -> std::fmt::Result {
    writeln!(out, "\nLegal Case Analysis")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "\nCase Description:")?;
    writeln!(out, "{}", outcome.case_text())?;

    let result = match outcome {
        AnalysisOutcome::Failed(failure) => {
            writeln!(out, "\nError: {}", failure.error)?;
            writeln!(out, "Message: {}", failure.message)?;
            return Ok(());
        }
        AnalysisOutcome::Analyzed(result) => result,
    };

    let debug = &result.debug;
    writeln!(out, "\nDebug Information:")?;
    writeln!(out, "Raw prediction index: {}", debug.prediction_idx)?;
    writeln!(out, "Original section: {}", debug.original_section)?;
    if debug.is_override {
        writeln!(out, "Section overridden to: {}", debug.final_section)?;
    }
    writeln!(out, "Top classes by probability:")?;
    for (i, (section, prob)) in debug.top_probs.iter().enumerate() {
        writeln!(out, "  {}. Section {}: {:.1}%", i + 1, section, prob)?;
    }

    writeln!(out, "\nLegal Analysis:")?;
    writeln!(out, "{}", THIN_RULE)?;

    if !result.parties.is_empty() {
        writeln!(out, "\nParties Involved:")?;
        for party in &result.parties {
            writeln!(out, "- {}", party)?;
        }
    }

    writeln!(
        out,
        "\nApplicable IPC Section: {} (Confidence: {:.1}%)",
        result.predicted_section, result.confidence
    )?;
    writeln!(out, "\n{}", result.explanation)?;
    writeln!(out, "\n{}", result.recommendations)?;
    Ok(())
}
