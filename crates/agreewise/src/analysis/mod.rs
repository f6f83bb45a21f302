//! The contract analysis document and the pure helpers around the model call.
//!
//! The language-model client itself lives outside this crate. What lives here is
//! what surrounds it: trimming extracted text to the model's input budget,
//! parsing the JSON it returns into [`AnalysisDocument`], and the short spoken
//! summary used for audio playback.

use crate::{AgreewiseError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;

/// Appended to contract text that was cut to fit the model's input budget.
pub const TRUNCATION_MARKER: &str = "\n\n[... document continues ...]";

/// Cut `text` to at most `max_chars` characters, marking the cut.
///
/// Text within the budget is returned unchanged.
pub fn prepare_contract_text(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => {
            tracing::warn!(
                "Contract text truncated from {} to {} characters",
                text.chars().count(),
                max_chars
            );
            let mut truncated = String::with_capacity(cut + TRUNCATION_MARKER.len());
            truncated.push_str(&text[..cut]);
            truncated.push_str(TRUNCATION_MARKER);
            Cow::Owned(truncated)
        }
    }
}

/// Plain-language explanation of a contract, as returned by the model.
///
/// Every section is optional in the input; missing ones are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisDocument {
    #[serde(default)]
    pub document_summary: Option<DocumentSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_clauses: Vec<KeyClause>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub risk_analysis: RiskAnalysis,
    #[serde(default, deserialize_with = "null_as_default")]
    pub your_obligations: Vec<Obligation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub your_rights: Vec<Right>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions_to_ask: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    #[serde(default = "default_document_type", deserialize_with = "null_as_document_type")]
    pub document_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parties: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub purpose: String,
}

fn default_document_type() -> String {
    "agreement".to_string()
}

/// Models sometimes send `null` for a section they have nothing to say about.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_document_type<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_document_type))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyClause {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub explanation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub impact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskAnalysis {
    #[serde(deserialize_with = "null_as_default")]
    pub red_flags: Vec<RedFlag>,
    #[serde(deserialize_with = "null_as_default")]
    pub yellow_flags: Vec<YellowFlag>,
    #[serde(deserialize_with = "null_as_default")]
    pub positive_terms: Vec<PositiveTerm>,
}

/// A clause that is unfair or dangerous for the reader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedFlag {
    #[serde(deserialize_with = "null_as_default")]
    pub issue: String,
    #[serde(deserialize_with = "null_as_default")]
    pub why_it_matters: String,
    #[serde(deserialize_with = "null_as_default")]
    pub potential_consequence: String,
}

/// A clause worth a second look.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YellowFlag {
    #[serde(deserialize_with = "null_as_default")]
    pub issue: String,
    #[serde(deserialize_with = "null_as_default")]
    pub why_it_matters: String,
    #[serde(deserialize_with = "null_as_default")]
    pub what_to_review: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositiveTerm {
    #[serde(deserialize_with = "null_as_default")]
    pub benefit: String,
    #[serde(deserialize_with = "null_as_default")]
    pub why_it_helps: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Obligation {
    #[serde(deserialize_with = "null_as_default")]
    pub obligation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub details: String,
    #[serde(deserialize_with = "null_as_default")]
    pub deadline_or_requirement: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Right {
    #[serde(deserialize_with = "null_as_default")]
    pub right: String,
    #[serde(deserialize_with = "null_as_default")]
    pub details: String,
}

impl AnalysisDocument {
    /// Parse the model's JSON response.
    ///
    /// # Errors
    ///
    /// Returns `AgreewiseError::Serialization` if the response is not valid JSON
    /// of the expected shape.
    pub fn from_json(response: &str) -> Result<Self> {
        serde_json::from_str(response)
            .map_err(|e| AgreewiseError::serialization_with_source("AI returned invalid JSON format", e))
    }

    /// Short summary for text-to-speech playback.
    pub fn spoken_summary(&self) -> String {
        let Some(summary) = &self.document_summary else {
            return "Analysis not available".to_string();
        };

        let mut parts = vec![format!("This is a {}. {}", summary.document_type, summary.purpose)];

        let risks = &self.risk_analysis;
        let counts: Vec<String> = [
            (risks.red_flags.len(), "red flag"),
            (risks.yellow_flags.len(), "yellow flag"),
            (risks.positive_terms.len(), "positive term"),
        ]
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, label)| format!("{} {}{}", count, label, if count == 1 { "" } else { "s" }))
        .collect();

        if !counts.is_empty() {
            parts.push(format!("We found {}.", counts.join(", ")));
        }

        if let Some(top) = self.your_obligations.first().filter(|top| !top.obligation.is_empty()) {
            parts.push(format!("Your main obligation: {}", top.obligation));
        }

        parts.join(" ")
    }

    pub fn risk_count(&self) -> usize {
        self.risk_analysis.red_flags.len() + self.risk_analysis.yellow_flags.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "document_summary": {
            "document_type": "Rental Lease",
            "parties": ["You (Tenant)", "Oak Street LLC (Landlord)"],
            "purpose": "You rent the apartment for 12 months."
        },
        "key_clauses": [
            {"title": "Rent", "explanation": "You pay $1200 a month.", "impact": "Due on the 1st."}
        ],
        "risk_analysis": {
            "red_flags": [
                {"issue": "Deposit kept for any wear", "why_it_matters": "Normal wear is allowed by law", "potential_consequence": "You lose $2400"}
            ],
            "yellow_flags": [
                {"issue": "Late fee", "why_it_matters": "$50 per day", "what_to_review": "Ask for a grace period"},
                {"issue": "Auto renewal", "why_it_matters": "Renews silently", "what_to_review": "Set a reminder"}
            ],
            "positive_terms": []
        },
        "your_obligations": [
            {"obligation": "Pay rent monthly", "details": "$1200", "deadline_or_requirement": "1st of each month"}
        ],
        "your_rights": [{"right": "Quiet enjoyment", "details": "Landlord must give notice"}],
        "questions_to_ask": ["Can the late fee be reduced?"]
    }"#;

    #[test]
    fn test_short_text_is_borrowed() {
        let prepared = prepare_contract_text("Rent: $1200", 30_000);
        assert!(matches!(prepared, Cow::Borrowed("Rent: $1200")));
    }

    #[test]
    fn test_text_at_limit_is_unchanged() {
        let text = "a".repeat(100);
        assert_eq!(prepare_contract_text(&text, 100), text);
    }

    #[test]
    fn test_long_text_is_truncated_on_char_boundary() {
        let text = "é".repeat(10);
        let prepared = prepare_contract_text(&text, 4);
        assert_eq!(prepared, format!("éééé{}", TRUNCATION_MARKER));
    }

    #[test]
    fn test_from_json() {
        let doc = AnalysisDocument::from_json(RESPONSE).unwrap();
        let summary = doc.document_summary.as_ref().unwrap();
        assert_eq!(summary.document_type, "Rental Lease");
        assert_eq!(summary.parties.len(), 2);
        assert_eq!(doc.key_clauses[0].title, "Rent");
        assert_eq!(doc.risk_analysis.yellow_flags[1].what_to_review, "Set a reminder");
        assert_eq!(doc.your_rights[0].right, "Quiet enjoyment");
        assert_eq!(doc.risk_count(), 3);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let doc = AnalysisDocument::from_json(r#"{"document_summary": {"purpose": "Hire a contractor."}}"#).unwrap();
        assert_eq!(doc.document_summary.unwrap().document_type, "agreement");
        assert!(doc.key_clauses.is_empty());
        assert!(doc.questions_to_ask.is_empty());
    }

    #[test]
    fn test_null_sections_fall_back_to_defaults() {
        let doc = AnalysisDocument::from_json(
            r#"{
                "document_summary": {"document_type": null, "parties": null, "purpose": "Lease a car."},
                "key_clauses": null,
                "risk_analysis": {
                    "red_flags": [{"issue": "Balloon payment", "why_it_matters": null}],
                    "yellow_flags": null,
                    "positive_terms": null
                },
                "your_obligations": [{"obligation": "Insure the car", "details": null, "deadline_or_requirement": null}],
                "your_rights": null,
                "questions_to_ask": null
            }"#,
        )
        .unwrap();

        let summary = doc.document_summary.as_ref().unwrap();
        assert_eq!(summary.document_type, "agreement");
        assert!(summary.parties.is_empty());
        assert!(doc.key_clauses.is_empty());
        assert_eq!(doc.risk_analysis.red_flags[0].why_it_matters, "");
        assert!(doc.risk_analysis.positive_terms.is_empty());
        assert!(doc.your_rights.is_empty());
        assert_eq!(doc.risk_count(), 1);
        assert_eq!(
            doc.spoken_summary(),
            "This is a agreement. Lease a car. We found 1 red flag. Your main obligation: Insure the car"
        );
    }

    #[test]
    fn test_null_risk_analysis_is_empty() {
        let doc = AnalysisDocument::from_json(r#"{"document_summary": null, "risk_analysis": null}"#).unwrap();
        assert!(doc.document_summary.is_none());
        assert_eq!(doc.risk_count(), 0);
    }

    #[test]
    fn test_invalid_json() {
        let err = AnalysisDocument::from_json("Sure! Here is the analysis:").unwrap_err();
        assert!(matches!(err, AgreewiseError::Serialization { .. }));
        assert_eq!(err.to_string(), "Serialization error: AI returned invalid JSON format");
    }

    #[test]
    fn test_spoken_summary() {
        let doc = AnalysisDocument::from_json(RESPONSE).unwrap();
        assert_eq!(
            doc.spoken_summary(),
            "This is a Rental Lease. You rent the apartment for 12 months. \
             We found 1 red flag, 2 yellow flags. \
             Your main obligation: Pay rent monthly"
        );
    }

    #[test]
    fn test_spoken_summary_without_summary() {
        assert_eq!(AnalysisDocument::default().spoken_summary(), "Analysis not available");
    }
}
