//! Deliberation value objects - immutable result types for council calls.
//!
//! - [`ResponseSet`] - one reply per consulted provider, in registration order
//! - [`CritiqueSet`] - one critique per provider, of everyone else's answers
//! - [`ConfidenceMap`] - normalized agreement score per provider
//! - [`RefinementStep`] - one link of a sequential refinement chain
//! - [`DeliberationResult`] - the per-mode result returned to callers

use super::mode::DeliberationMode;
use super::reply::ProviderReply;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One provider's slot in a [`ResponseSet`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEntry {
    pub provider: String,
    pub reply: ProviderReply,
}

/// Provider name -> reply, iterated in provider registration order.
///
/// Holds exactly one entry per provider; inserting an existing name replaces
/// its reply in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet {
    entries: Vec<ResponseEntry>,
}

/// Provider name -> that provider's critique of the other answers.
pub type CritiqueSet = ResponseSet;

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, provider: impl Into<String>, reply: ProviderReply) {
        let provider = provider.into();
        match self.entries.iter_mut().find(|e| e.provider == provider) {
            Some(entry) => entry.reply = reply,
            None => self.entries.push(ResponseEntry { provider, reply }),
        }
    }

    pub fn get(&self, provider: &str) -> Option<&ProviderReply> {
        self.entries
            .iter()
            .find(|e| e.provider == provider)
            .map(|e| &e.reply)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProviderReply)> {
        self.entries.iter().map(|e| (e.provider.as_str(), &e.reply))
    }

    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.provider.as_str())
    }

    /// Successful answers only, as `(provider, text)`
    pub fn answers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|e| e.reply.text().map(|t| (e.provider.as_str(), t)))
    }

    /// Successful answers from everyone except `provider`
    pub fn answers_excluding<'a>(
        &'a self,
        provider: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.answers().filter(move |(name, _)| *name != provider)
    }

    pub fn success_count(&self) -> usize {
        self.entries.iter().filter(|e| e.reply.is_success()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ProviderReply)> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = (String, ProviderReply)>>(iter: I) -> Self {
        let mut set = ResponseSet::new();
        for (provider, reply) in iter {
            set.insert(provider, reply);
        }
        set
    }
}

/// Confidence of one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceEntry {
    pub provider: String,
    pub confidence: f64,
}

/// Provider name -> confidence in `[0, 1]`, in provider registration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceMap {
    entries: Vec<ConfidenceEntry>,
}

impl ConfidenceMap {
    pub fn get(&self, provider: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.provider == provider)
            .map(|e| e.confidence)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|e| (e.provider.as_str(), e.confidence))
    }

    pub fn max(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.confidence)
            .fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, f64)> for ConfidenceMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(provider, confidence)| ConfidenceEntry {
                    provider,
                    confidence,
                })
                .collect(),
        }
    }
}

/// Position of a step in a refinement chain.
///
/// Serialized as `"initial"` or `"refinement_<k>"`, `k` counting refiners
/// from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefinementStage {
    Initial,
    Refinement(usize),
}

impl RefinementStage {
    pub fn is_initial(&self) -> bool {
        matches!(self, RefinementStage::Initial)
    }
}

impl std::fmt::Display for RefinementStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefinementStage::Initial => write!(f, "initial"),
            RefinementStage::Refinement(k) => write!(f, "refinement_{}", k),
        }
    }
}

impl std::str::FromStr for RefinementStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "initial" {
            return Ok(RefinementStage::Initial);
        }
        s.strip_prefix("refinement_")
            .and_then(|k| k.parse::<usize>().ok())
            .filter(|k| *k >= 1)
            .map(RefinementStage::Refinement)
            .ok_or_else(|| format!("invalid refinement stage: {}", s))
    }
}

impl Serialize for RefinementStage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RefinementStage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One link of a refinement chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinementStep {
    pub stage: RefinementStage,
    pub provider: String,
    pub response: String,
    /// What the refiner found lacking; absent on the initial step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

impl RefinementStep {
    pub fn initial(provider: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            stage: RefinementStage::Initial,
            provider: provider.into(),
            response: response.into(),
            analysis: None,
        }
    }

    pub fn refinement(
        k: usize,
        provider: impl Into<String>,
        response: impl Into<String>,
        analysis: impl Into<String>,
    ) -> Self {
        Self {
            stage: RefinementStage::Refinement(k),
            provider: provider.into(),
            response: response.into(),
            analysis: Some(analysis.into()),
        }
    }
}

/// Result of vote mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteResult {
    pub question: String,
    pub responses: ResponseSet,
    pub confidence: ConfidenceMap,
    pub selected_provider: String,
    pub optimal_answer: String,
}

impl VoteResult {
    /// Confidence of the winning provider
    pub fn selected_confidence(&self) -> f64 {
        self.confidence.get(&self.selected_provider).unwrap_or(0.0)
    }
}

/// Result of critique-and-synthesize mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisResult {
    pub question: String,
    pub responses: ResponseSet,
    pub critiques: CritiqueSet,
    /// The provider that merged everything
    pub synthesizer: String,
    pub final_answer: String,
}

/// Result of sequential refinement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinementResult {
    pub question: String,
    pub chain: Vec<RefinementStep>,
    /// Baselines gathered concurrently before refining (two-provider councils)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub independent_responses: Option<ResponseSet>,
    pub final_answer: String,
}

impl RefinementResult {
    /// Analysis written by the last refiner
    pub fn analysis(&self) -> Option<&str> {
        self.chain.last().and_then(|step| step.analysis.as_deref())
    }
}

/// Result of summarize mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub question: String,
    pub provider: String,
    pub summary: String,
}

/// Result of any council entry point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DeliberationResult {
    Vote(VoteResult),
    Synthesis(SynthesisResult),
    Refinement(RefinementResult),
    Summary(SummaryResult),
}

impl DeliberationResult {
    pub fn mode(&self) -> DeliberationMode {
        match self {
            DeliberationResult::Vote(_) => DeliberationMode::Vote,
            DeliberationResult::Synthesis(_) => DeliberationMode::Synthesize,
            DeliberationResult::Refinement(_) => DeliberationMode::Sequential,
            DeliberationResult::Summary(_) => DeliberationMode::Summarize,
        }
    }

    pub fn question(&self) -> &str {
        match self {
            DeliberationResult::Vote(r) => &r.question,
            DeliberationResult::Synthesis(r) => &r.question,
            DeliberationResult::Refinement(r) => &r.question,
            DeliberationResult::Summary(r) => &r.question,
        }
    }

    /// The single answer the caller ultimately wants
    pub fn final_answer(&self) -> &str {
        match self {
            DeliberationResult::Vote(r) => &r.optimal_answer,
            DeliberationResult::Synthesis(r) => &r.final_answer,
            DeliberationResult::Refinement(r) => &r.final_answer,
            DeliberationResult::Summary(r) => &r.summary,
        }
    }
}

impl From<VoteResult> for DeliberationResult {
    fn from(r: VoteResult) -> Self {
        DeliberationResult::Vote(r)
    }
}

impl From<SynthesisResult> for DeliberationResult {
    fn from(r: SynthesisResult) -> Self {
        DeliberationResult::Synthesis(r)
    }
}

impl From<RefinementResult> for DeliberationResult {
    fn from(r: RefinementResult) -> Self {
        DeliberationResult::Refinement(r)
    }
}

impl From<SummaryResult> for DeliberationResult {
    fn from(r: SummaryResult) -> Self {
        DeliberationResult::Summary(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deliberation::reply::ReplyFailure;

    #[test]
    fn test_response_set_keeps_registration_order() {
        let set: ResponseSet = vec![
            ("Groq".to_string(), ProviderReply::answer("a")),
            ("Mistral".to_string(), ProviderReply::answer("b")),
            ("Ollama".to_string(), ProviderReply::answer("c")),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = set.providers().collect();
        assert_eq!(names, vec!["Groq", "Mistral", "Ollama"]);
    }

    #[test]
    fn test_insert_replaces_existing_slot() {
        let mut set = ResponseSet::new();
        set.insert("Groq", ProviderReply::answer("first"));
        set.insert("Groq", ProviderReply::answer("second"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("Groq").and_then(|r| r.text()), Some("second"));
    }

    #[test]
    fn test_answers_excluding_skips_self_and_failures() {
        let mut set = ResponseSet::new();
        set.insert("A", ProviderReply::answer("a"));
        set.insert("B", ProviderReply::failed(ReplyFailure::upstream("boom")));
        set.insert("C", ProviderReply::answer("c"));

        let others: Vec<_> = set.answers_excluding("A").collect();
        assert_eq!(others, vec![("C", "c")]);
        assert_eq!(set.success_count(), 2);
    }

    #[test]
    fn test_refinement_stage_serialization() {
        assert_eq!(
            serde_json::to_string(&RefinementStage::Initial).unwrap(),
            "\"initial\""
        );
        assert_eq!(
            serde_json::to_string(&RefinementStage::Refinement(2)).unwrap(),
            "\"refinement_2\""
        );
        let parsed: RefinementStage = serde_json::from_str("\"refinement_3\"").unwrap();
        assert_eq!(parsed, RefinementStage::Refinement(3));
        assert!("refinement_0".parse::<RefinementStage>().is_err());
    }

    #[test]
    fn test_initial_step_has_no_analysis() {
        let step = RefinementStep::initial("Groq", "X");
        assert!(step.stage.is_initial());
        assert!(step.analysis.is_none());
        let json = serde_json::to_value(&step).unwrap();
        assert!(json.get("analysis").is_none());
    }

    #[test]
    fn test_result_tagged_by_mode() {
        let result = DeliberationResult::from(SummaryResult {
            question: "q".to_string(),
            provider: "Groq".to_string(),
            summary: "- point".to_string(),
        });
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mode"], "summary");
        assert_eq!(result.final_answer(), "- point");
        assert_eq!(result.mode(), DeliberationMode::Summarize);
    }

    #[test]
    fn test_vote_selected_confidence() {
        let confidence: ConfidenceMap = vec![("A".to_string(), 0.5), ("B".to_string(), 1.0)]
            .into_iter()
            .collect();
        let result = VoteResult {
            question: "q".to_string(),
            responses: ResponseSet::new(),
            confidence,
            selected_provider: "B".to_string(),
            optimal_answer: "b".to_string(),
        };
        assert_eq!(result.selected_confidence(), 1.0);
    }
}
