use crate::tutor::Question;

/// Outcome of advancing past the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    /// Moved on to the question at this index.
    Question(usize),
    /// No questions left; score is a percentage.
    Finished { score: u32 },
}

/// How an answer option should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFeedback {
    Selected,
    Unselected,
    Correct,
    Incorrect,
    Neutral,
}

/// One pass through a multiple-choice quiz: select, check, next.
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    questions: Vec<Question>,
    current: usize,
    answers: Vec<Option<String>>,
    show_feedback: bool,
}

impl QuizAttempt {
    pub fn new(questions: Vec<Question>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            questions,
            current: 0,
            answers,
            show_feedback: false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.answers.get(self.current)?.as_deref()
    }

    pub fn showing_feedback(&self) -> bool {
        self.show_feedback
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    /// "Question 2 of 3"
    pub fn position_label(&self) -> String {
        format!("Question {} of {}", self.current + 1, self.questions.len())
    }

    /// Answers are locked while feedback is shown.
    pub fn select(&mut self, option: &str) {
        if self.show_feedback {
            return;
        }
        if let Some(answer) = self.answers.get_mut(self.current) {
            *answer = Some(option.to_string());
        }
    }

    /// Reveal feedback. Returns false when nothing is selected yet.
    pub fn check(&mut self) -> bool {
        if self.selected_answer().is_some() {
            self.show_feedback = true;
        }
        self.show_feedback
    }

    pub fn next(&mut self) -> QuizStep {
        self.show_feedback = false;
        if !self.is_last_question() {
            self.current += 1;
            QuizStep::Question(self.current)
        } else {
            QuizStep::Finished {
                score: self.score(),
            }
        }
    }

    /// Percentage of correct answers, rounded. An empty quiz scores 0.
    pub fn score(&self) -> u32 {
        if self.questions.is_empty() {
            return 0;
        }
        let correct = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, answer)| answer.as_deref() == Some(question.correct_answer.as_str()))
            .count();
        ((correct as f64 / self.questions.len() as f64) * 100.0).round() as u32
    }

    pub fn feedback_for(&self, option: &str) -> OptionFeedback {
        let selected = self.selected_answer();
        if !self.show_feedback {
            return if selected == Some(option) {
                OptionFeedback::Selected
            } else {
                OptionFeedback::Unselected
            };
        }

        let correct = self
            .current_question()
            .map(|question| question.correct_answer.as_str());
        if correct == Some(option) {
            OptionFeedback::Correct
        } else if selected == Some(option) {
            OptionFeedback::Incorrect
        } else {
            OptionFeedback::Neutral
        }
    }
}
