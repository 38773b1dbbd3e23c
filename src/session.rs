//! Screen navigation as an explicit state value and a pure reducer.

use crate::progress::{ProgressStore, ProgressTracker};
use crate::tutor::{Subject, Topic, custom_subject, topics_from_names};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    SubjectSelection,
    Dashboard,
    Lesson,
    DocToNotes,
    AskAnything,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub view: View,
    pub subject: Option<Subject>,
    pub topic: Option<Topic>,
    pub custom_query: String,
    /// Set when the learner generated a path from a free-form goal.
    pub custom_topics: Option<Vec<Topic>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectSubject(Subject),
    SelectTopic(Topic),
    AskAnything(String),
    CustomPathGenerated { goal: String, topics: Vec<String> },
    BackToDashboard,
    BackToSubjects,
    OpenDocToNotes,
    QuizCompleted { score: u32 },
}

/// Compute the session that follows `action`.
pub fn reduce(session: &Session, action: Action) -> Session {
    let mut next = session.clone();
    match action {
        Action::SelectSubject(subject) => {
            next.subject = Some(subject);
            next.view = View::Dashboard;
        }
        Action::SelectTopic(topic) => {
            next.topic = Some(topic);
            next.view = View::Lesson;
        }
        Action::AskAnything(query) => {
            next.custom_query = query;
            next.view = View::AskAnything;
        }
        Action::CustomPathGenerated { goal, topics } => {
            next.subject = Some(custom_subject(&goal));
            next.custom_topics = Some(topics_from_names(&topics));
            next.view = View::Dashboard;
        }
        Action::BackToDashboard | Action::QuizCompleted { .. } => {
            next.view = View::Dashboard;
            next.topic = None;
        }
        Action::BackToSubjects => {
            next = Session::default();
        }
        Action::OpenDocToNotes => {
            next.view = View::DocToNotes;
            next.subject = None;
            next.topic = None;
        }
    }
    next
}

impl Session {
    /// Apply `action`, recording quiz results through `tracker` first.
    pub fn apply<S: ProgressStore>(&self, action: Action, tracker: &mut ProgressTracker<S>) -> Session {
        if let Action::QuizCompleted { score } = &action {
            if let (Some(subject), Some(topic)) = (&self.subject, &self.topic) {
                tracker.record_completion(&subject.id, &topic.id, *score);
            }
        }
        reduce(self, action)
    }

    /// The screen to actually show. A dashboard needs a subject and a lesson
    /// needs both subject and topic; otherwise fall back to subject selection.
    pub fn screen(&self) -> View {
        match self.view {
            View::Dashboard if self.subject.is_none() => View::SubjectSelection,
            View::Lesson if self.subject.is_none() || self.topic.is_none() => {
                View::SubjectSelection
            }
            view => view,
        }
    }

    /// Progress records for the selected subject are keyed by this id.
    pub fn subject_id(&self) -> Option<&str> {
        self.subject.as_ref().map(|subject| subject.id.as_str())
    }
}
