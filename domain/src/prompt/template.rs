//! Prompt template with `{persona}` and `{question}` slots

use crate::core::error::ConfigurationError;
use crate::core::question::Question;
use crate::persona::Persona;
use serde::{Deserialize, Serialize};

const PERSONA_SLOT: &str = "persona";
const QUESTION_SLOT: &str = "question";

const DEFAULT_TEMPLATE: &str = "Answer questions as if you are a {persona}

input: {question}
output:
";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Persona,
    Question,
}

/// A parsed prompt template.
///
/// The template must contain exactly two slots, `{persona}` and `{question}`,
/// each exactly once. `{{` and `}}` render as literal braces.
///
/// # Example
///
/// ```
/// use simulacra_domain::PromptTemplate;
///
/// let template = PromptTemplate::parse("As a {persona}: {question}").unwrap();
/// assert_eq!(template.source(), "As a {persona}: {question}");
///
/// assert!(PromptTemplate::parse("As a {persona}").is_err());
/// assert!(PromptTemplate::parse("{persona} {question} {question}").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PromptTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parse and validate a template
    pub fn parse(source: impl Into<String>) -> Result<Self, ConfigurationError> {
        let source = source.into();
        let segments = Self::tokenize(&source)?;

        let persona_slots = segments.iter().filter(|s| **s == Segment::Persona).count();
        let question_slots = segments.iter().filter(|s| **s == Segment::Question).count();

        if persona_slots != 1 || question_slots != 1 {
            return Err(ConfigurationError::template(format!(
                "expected exactly one {{persona}} and one {{question}} slot, found {} and {}",
                persona_slots, question_slots
            )));
        }

        Ok(Self { source, segments })
    }

    /// The template text as written
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Fill both slots for one branch
    pub fn render(&self, persona: &Persona, question: &Question) -> String {
        let mut out = String::with_capacity(
            self.source.len() + persona.as_str().len() + question.content().len(),
        );
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Persona => out.push_str(persona.as_str()),
                Segment::Question => out.push_str(question.content()),
            }
        }
        out
    }

    fn tokenize(source: &str) -> Result<Vec<Segment>, ConfigurationError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => {
                                return Err(ConfigurationError::template(
                                    "unclosed '{' in template",
                                ));
                            }
                            Some(ch) => name.push(ch),
                        }
                    }
                    let slot = match name.trim() {
                        PERSONA_SLOT => Segment::Persona,
                        QUESTION_SLOT => Segment::Question,
                        other => {
                            return Err(ConfigurationError::template(format!(
                                "unknown slot '{{{}}}'",
                                other
                            )));
                        }
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(slot);
                }
                '}' => {
                    return Err(ConfigurationError::template(
                        "unmatched '}' in template",
                    ));
                }
                other => literal.push(other),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(segments)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
            segments: vec![
                Segment::Literal("Answer questions as if you are a ".to_string()),
                Segment::Persona,
                Segment::Literal("\n\ninput: ".to_string()),
                Segment::Question,
                Segment::Literal("\noutput:\n".to_string()),
            ],
        }
    }
}

impl TryFrom<String> for PromptTemplate {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PromptTemplate> for String {
    fn from(template: PromptTemplate) -> Self {
        template.source
    }
}

impl std::fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}
