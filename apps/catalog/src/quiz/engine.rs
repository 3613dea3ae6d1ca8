use serde::Serialize;

use crate::errors::QuizStateError;
use crate::quiz::profiles::{classify, profile, Profile, ProfileKind};
use crate::quiz::questions::{Question, QuizOption, QUESTIONS};
use crate::quiz::scores::ScoreVector;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizState {
    InProgress {
        index: usize,
        scores: ScoreVector,
        /// Option ids of committed answers; `answers[i]` answers question `i`.
        answers: Vec<&'static str>,
        /// Selected but not yet committed.
        pending: Option<&'static str>,
    },
    Completed {
        classification: ProfileKind,
        scores: ScoreVector,
        answers: Vec<&'static str>,
    },
}

/// Read-only projection handed to the presentation layer.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuizView {
    #[serde(rename_all = "camelCase")]
    InProgress {
        question_index: usize,
        total_questions: usize,
        question: &'static Question,
        /// The current question's options, surfaced for direct rendering.
        options: &'static [QuizOption],
        can_go_back: bool,
        pending: Option<&'static str>,
    },
    #[serde(rename_all = "camelCase")]
    Completed {
        classification: ProfileKind,
        profile: &'static Profile,
        scores: ScoreVector,
    },
}

/// Linear quiz over a fixed question bank.
///
/// Score changes happen only on `advance` (add) and `retreat` (subtract), so the
/// score vector always equals the sum of the committed answers' contributions.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    questions: &'static [Question],
    state: QuizState,
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizEngine {
    pub fn new() -> Self {
        Self::with_questions(&QUESTIONS)
    }

    pub fn with_questions(questions: &'static [Question]) -> Self {
        Self {
            questions,
            state: Self::initial_state(questions),
        }
    }

    fn initial_state(questions: &'static [Question]) -> QuizState {
        if questions.is_empty() {
            QuizState::Completed {
                classification: classify(&ScoreVector::ZERO),
                scores: ScoreVector::ZERO,
                answers: Vec::new(),
            }
        } else {
            QuizState::InProgress {
                index: 0,
                scores: ScoreVector::ZERO,
                answers: Vec::new(),
                pending: None,
            }
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn scores(&self) -> ScoreVector {
        match &self.state {
            QuizState::InProgress { scores, .. } | QuizState::Completed { scores, .. } => *scores,
        }
    }

    pub fn answers(&self) -> &[&'static str] {
        match &self.state {
            QuizState::InProgress { answers, .. } | QuizState::Completed { answers, .. } => answers,
        }
    }

    pub fn pending(&self) -> Option<&'static str> {
        match &self.state {
            QuizState::InProgress { pending, .. } => *pending,
            QuizState::Completed { .. } => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, QuizState::Completed { .. })
    }

    /// Records a pending selection for the current question without scoring it.
    pub fn select_option(&mut self, option_id: &str) -> Result<(), QuizStateError> {
        let questions = self.questions;
        match &mut self.state {
            QuizState::Completed { .. } => Err(QuizStateError::AlreadyCompleted),
            QuizState::InProgress { index, pending, .. } => {
                let option = questions[*index]
                    .option(option_id)
                    .ok_or_else(|| QuizStateError::UnknownOption(option_id.to_string()))?;
                *pending = Some(option.id);
                Ok(())
            }
        }
    }

    /// Commits the pending selection and moves to the next question, completing
    /// the quiz after the last one.
    pub fn advance(&mut self) -> Result<(), QuizStateError> {
        let questions = self.questions;
        let QuizState::InProgress {
            index,
            scores,
            answers,
            pending,
        } = &mut self.state
        else {
            return Err(QuizStateError::AlreadyCompleted);
        };

        let selected = pending.ok_or(QuizStateError::NoPendingSelection)?;
        let option = questions[*index]
            .option(selected)
            .ok_or_else(|| QuizStateError::UnknownOption(selected.to_string()))?;

        *scores += option.scores;
        answers.push(option.id);
        *index += 1;
        *pending = None;

        if *index == questions.len() {
            let scores = *scores;
            let answers = std::mem::take(answers);
            self.state = QuizState::Completed {
                classification: classify(&scores),
                scores,
                answers,
            };
        }
        Ok(())
    }

    /// Rescinds the previous answer, subtracting its contribution and
    /// pre-selecting it as the pending choice. From `Completed` this reopens the
    /// last question.
    pub fn retreat(&mut self) -> Result<(), QuizStateError> {
        let answered = match &self.state {
            QuizState::InProgress { index, .. } => *index,
            QuizState::Completed { answers, .. } => answers.len(),
        };
        if answered == 0 {
            return Err(QuizStateError::AtFirstQuestion);
        }

        let previous = answered - 1;
        let option_id = self.answers()[previous];
        let option = self.questions[previous]
            .option(option_id)
            .ok_or_else(|| QuizStateError::UnknownOption(option_id.to_string()))?;

        let mut scores = self.scores();
        scores -= option.scores;
        let mut answers = match &mut self.state {
            QuizState::InProgress { answers, .. } | QuizState::Completed { answers, .. } => {
                std::mem::take(answers)
            }
        };
        answers.pop();

        self.state = QuizState::InProgress {
            index: previous,
            scores,
            answers,
            pending: Some(option.id),
        };
        Ok(())
    }

    /// Select-and-advance in one step.
    pub fn answer_question(&mut self, option_id: &str) -> Result<(), QuizStateError> {
        self.select_option(option_id)?;
        self.advance()
    }

    pub fn previous_question(&mut self) -> Result<(), QuizStateError> {
        self.retreat()
    }

    /// Discards all progress.
    pub fn restart(&mut self) {
        self.state = Self::initial_state(self.questions);
    }

    pub fn current_state(&self) -> QuizView {
        match &self.state {
            QuizState::InProgress { index, pending, .. } => QuizView::InProgress {
                question_index: *index,
                total_questions: self.questions.len(),
                question: &self.questions[*index],
                options: self.questions[*index].options,
                can_go_back: *index > 0,
                pending: *pending,
            },
            QuizState::Completed {
                classification,
                scores,
                ..
            } => QuizView::Completed {
                classification: *classification,
                profile: profile(*classification),
                scores: *scores,
            },
        }
    }

    /// The final profile, once the quiz is complete.
    pub fn result(&self) -> Result<&'static Profile, QuizStateError> {
        match &self.state {
            QuizState::Completed { classification, .. } => Ok(profile(*classification)),
            QuizState::InProgress { .. } => Err(QuizStateError::NotCompleted),
        }
    }

    /// Recomputes the score vector from the committed answers.
    pub fn replayed_scores(&self) -> ScoreVector {
        self.answers()
            .iter()
            .zip(self.questions)
            .filter_map(|(id, q)| q.option(id))
            .map(|o| o.scores)
            .sum()
    }
}
