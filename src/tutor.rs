//! Tutoring content generated by a hosted language model.
//!
//! The model itself sits behind [`TextGenerator`]; this module owns the
//! prompts, the response schemas and the decoding of schema-constrained
//! JSON replies.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

pub const CUSTOM_SUBJECT_ID: &str = "custom-path";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResource {
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResource {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub books: Vec<BookResource>,
    pub videos: Vec<VideoResource>,
}

/// Lesson body (markdown) plus further reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub content: String,
    pub resources: Resources,
}

#[derive(Deserialize)]
struct QuizPayload {
    questions: Vec<Question>,
}

/// A single call to the text-generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// When set, the reply must be JSON conforming to this schema.
    pub response_schema: Option<Value>,
}

#[derive(Debug, Error)]
#[error("text generation failed: {0}")]
pub struct GenerationError(pub String);

#[derive(Debug, Error)]
pub enum TutorError {
    #[error("Failed to {what}.")]
    GenerationFailed { what: &'static str },
}

/// Port to the hosted model.
pub trait TextGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

impl<F> TextGenerator for F
where
    F: Fn(&GenerationRequest) -> Result<String, GenerationError>,
{
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self(request)
    }
}

fn subject(id: &str, name: &str, description: &str) -> Subject {
    Subject {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    }
}

/// The predefined subjects offered on the selection screen.
pub fn builtin_subjects() -> Vec<Subject> {
    vec![
        subject(
            "calculus",
            "Calculus",
            "Master derivatives, integrals, and the fundamental theorems of calculus.",
        ),
        subject(
            "javascript",
            "JavaScript",
            "Learn the language of the web, from variables to asynchronous programming.",
        ),
        subject(
            "data-structures",
            "Data Structures & Algorithms",
            "Understand fundamental data structures and algorithmic complexity.",
        ),
        subject(
            "machine-learning",
            "Machine Learning",
            "Explore core concepts of AI, from regression to neural networks.",
        ),
        subject(
            "thermodynamics",
            "Thermodynamics",
            "Grasp the laws of energy, heat, work, and entropy in physical systems.",
        ),
        subject(
            "digital-logic",
            "Digital Logic Design",
            "Learn the building blocks of digital computers, from logic gates to circuits.",
        ),
        subject(
            "linear-algebra",
            "Linear Algebra",
            "Study vectors, matrices, and linear transformations.",
        ),
        subject(
            "databases",
            "Databases",
            "Learn about relational models, SQL, and database design principles.",
        ),
    ]
}

/// The subject standing in for a learner's free-form goal.
pub fn custom_subject(goal: &str) -> Subject {
    subject(CUSTOM_SUBJECT_ID, "Your Custom Path", goal)
}

/// Turn ordered topic names into topics with positional ids.
pub fn topics_from_names<S: AsRef<str>>(names: &[S]) -> Vec<Topic> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| Topic {
            id: format!("topic-{index}"),
            name: name.as_ref().to_string(),
        })
        .collect()
}

fn learning_path_schema() -> Value {
    json!({
        "type": "ARRAY",
        "description": "An ordered list of 10 beginner to intermediate topics for a subject.",
        "items": {
            "type": "STRING",
            "description": "The name of a single learning topic."
        }
    })
}

fn quiz_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "questions": {
                "type": "ARRAY",
                "description": "A list of 3-5 quiz questions.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING", "description": "The quiz question text." },
                        "options": {
                            "type": "ARRAY",
                            "description": "An array of 4 possible answers.",
                            "items": { "type": "STRING" }
                        },
                        "correctAnswer": {
                            "type": "STRING",
                            "description": "The correct answer from the options."
                        }
                    },
                    "required": ["question", "options", "correctAnswer"]
                }
            }
        },
        "required": ["questions"]
    })
}

fn lesson_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "content": {
                "type": "STRING",
                "description": "The lesson content in markdown format (300-500 words)."
            },
            "resources": {
                "type": "OBJECT",
                "properties": {
                    "books": {
                        "type": "ARRAY",
                        "description": "An array of 2-3 relevant book recommendations.",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "title": { "type": "STRING" },
                                "author": { "type": "STRING" }
                            },
                            "required": ["title", "author"]
                        }
                    },
                    "videos": {
                        "type": "ARRAY",
                        "description": "An array of 2-3 relevant YouTube video links from channels that are still available.",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "title": { "type": "STRING" },
                                "url": { "type": "STRING", "description": "A full YouTube URL." }
                            },
                            "required": ["title", "url"]
                        }
                    }
                },
                "required": ["books", "videos"]
            }
        },
        "required": ["content", "resources"]
    })
}

pub fn learning_path_prompt(subject_name: &str) -> String {
    format!(
        "Generate a comprehensive, ordered list of 10 beginner to intermediate topics for learning {subject_name}."
    )
}

pub fn custom_learning_path_prompt(goal: &str) -> String {
    format!(
        "Based on the learning goal: \"{goal}\", generate a comprehensive, ordered list of 10 beginner to intermediate topics. The topics should form a logical learning path to achieve this goal."
    )
}

pub fn lesson_prompt(subject_name: &str, topic_name: &str) -> String {
    format!(
        "You are an expert tutor. Create a lesson on \"{topic_name}\" within the subject of {subject_name}. The lesson should include:\n\
         1.  A clear, step-by-step explanation of the concept for a beginner (300-500 words) in markdown.\n\
         2.  A list of 2-3 book recommendations for further reading.\n\
         3.  A list of 2-3 relevant YouTube video links to supplement the learning."
    )
}

pub fn explanation_prompt(topic_name: &str) -> String {
    format!(
        "You are an expert tutor. Create a lesson on \"{topic_name}\". The topic might be broad, so provide a foundational overview suitable for a beginner. The lesson should include:\n\
         1.  A clear, step-by-step explanation of the concept (300-500 words) in markdown.\n\
         2.  A list of 2-3 book recommendations for further reading.\n\
         3.  A list of 2-3 relevant YouTube video links to supplement the learning."
    )
}

pub fn quiz_prompt(subject_name: &str, topic_name: &str) -> String {
    format!(
        "Create a 3-question multiple-choice quiz on the topic of \"{topic_name}\" for a {subject_name} student. For each question, provide 4 options, and indicate the correct answer. The difficulty should be suitable for a beginner who has just learned the topic."
    )
}

pub fn reexplain_prompt(content: &str) -> String {
    format!(
        "Re-explain the following concept in a simpler way, using an analogy if possible. Use markdown formatting. Concept:\n\n---\n\n{content}"
    )
}

pub fn notes_prompt(document_text: &str) -> String {
    format!(
        "Please summarize the following document and convert it into concise, easy-to-read notes. Use markdown for formatting, including headers and bullet points to structure the information clearly. Focus on the key concepts, definitions, and main points.\n\n---\n\nDOCUMENT CONTENT:\n\n{document_text}"
    )
}

/// Lesson, quiz and notes generation on top of a [`TextGenerator`].
///
/// Failures are logged and collapsed into [`TutorError::GenerationFailed`];
/// callers show the message and let the learner retry.
pub struct Tutor<G> {
    generator: G,
}

impl<G: TextGenerator> Tutor<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn learning_path(&self, subject_name: &str) -> Result<Vec<String>, TutorError> {
        self.generate_json(
            learning_path_prompt(subject_name),
            learning_path_schema(),
            "generate learning path",
        )
    }

    pub fn custom_learning_path(&self, goal: &str) -> Result<Vec<String>, TutorError> {
        self.generate_json(
            custom_learning_path_prompt(goal),
            learning_path_schema(),
            "generate custom learning path",
        )
    }

    pub fn lesson(&self, subject_name: &str, topic_name: &str) -> Result<Lesson, TutorError> {
        self.generate_json(
            lesson_prompt(subject_name, topic_name),
            lesson_schema(),
            "generate lesson content",
        )
    }

    pub fn explanation(&self, topic_name: &str) -> Result<Lesson, TutorError> {
        self.generate_json(
            explanation_prompt(topic_name),
            lesson_schema(),
            "generate explanation",
        )
    }

    pub fn quiz(&self, subject_name: &str, topic_name: &str) -> Result<Vec<Question>, TutorError> {
        let payload: QuizPayload = self.generate_json(
            quiz_prompt(subject_name, topic_name),
            quiz_schema(),
            "generate quiz",
        )?;
        Ok(payload.questions)
    }

    /// Returns markdown prose.
    pub fn reexplain(&self, content: &str) -> Result<String, TutorError> {
        self.generate_text(reexplain_prompt(content), "re-explain concept")
    }

    /// Returns markdown notes.
    pub fn notes_from_document(&self, document_text: &str) -> Result<String, TutorError> {
        self.generate_text(
            notes_prompt(document_text),
            "generate notes from document",
        )
    }

    fn generate_text(&self, prompt: String, what: &'static str) -> Result<String, TutorError> {
        let request = GenerationRequest {
            prompt,
            response_schema: None,
        };
        self.generator.generate(&request).map_err(|e| {
            tracing::error!(error = %e, "failed to {what}");
            TutorError::GenerationFailed { what }
        })
    }

    fn generate_json<T: DeserializeOwned>(
        &self,
        prompt: String,
        schema: Value,
        what: &'static str,
    ) -> Result<T, TutorError> {
        let request = GenerationRequest {
            prompt,
            response_schema: Some(schema),
        };
        let reply = self.generator.generate(&request).map_err(|e| {
            tracing::error!(error = %e, "failed to {what}");
            TutorError::GenerationFailed { what }
        })?;

        serde_json::from_str(&reply).map_err(|e| {
            tracing::error!(error = %e, "malformed reply while trying to {what}");
            TutorError::GenerationFailed { what }
        })
    }
}
