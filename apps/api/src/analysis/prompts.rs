// Prompt text for candidate analysis and the fixed summaries used when the
// generation service cannot be relied on.

use std::fmt::Display;

/// Builds the candidate-evaluation prompt. Caller text is embedded verbatim.
pub fn analysis_prompt(job_desc: &str, resume: &str, pct: impl Display) -> String {
    format!(
        "You are an expert HR analyst. Evaluate this candidate for the job opening.

JOB DESCRIPTION:
{job_desc}

CANDIDATE RESUME:
{resume}

SIMILARITY SCORE: {pct}% match

Provide a concise, professional analysis in 2–3 sentences explaining why this candidate \
would be valuable for this role. Be specific about qualifications and likely contributions."
    )
}

/// Templated summary used when the generation service fails or rejects the call.
pub fn fallback_summary(name: &str, pct: impl Display) -> String {
    format!(
        "{name} shows a {pct}% match to the job description. \
         Based on overlapping keywords and experience, they could ramp quickly and \
         support core responsibilities. (Auto-generated fallback)"
    )
}

/// Last-resort summary when the request itself could not be handled.
pub const APOLOGY_SUMMARY: &str =
    "Candidate analysis generated via fallback due to a temporary server issue.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_inputs() {
        let prompt = analysis_prompt("Rust engineer", "10 years of C++", 73);
        assert!(prompt.starts_with("You are an expert HR analyst."));
        assert!(prompt.contains("JOB DESCRIPTION:\nRust engineer\n"));
        assert!(prompt.contains("CANDIDATE RESUME:\n10 years of C++\n"));
        assert!(prompt.contains("SIMILARITY SCORE: 73% match"));
        assert!(prompt.ends_with("likely contributions."));
    }

    #[test]
    fn test_prompt_does_not_expand_braces_in_caller_text() {
        let prompt = analysis_prompt("{resume}", "{pct}", 5);
        assert!(prompt.contains("JOB DESCRIPTION:\n{resume}\n"));
        assert!(prompt.contains("CANDIDATE RESUME:\n{pct}\n"));
    }

    #[test]
    fn test_fallback_summary_exact_text() {
        assert_eq!(
            fallback_summary("Ada", 87),
            "Ada shows a 87% match to the job description. Based on overlapping keywords \
             and experience, they could ramp quickly and support core responsibilities. \
             (Auto-generated fallback)"
        );
    }
}
