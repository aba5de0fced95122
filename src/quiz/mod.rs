//! The quiz state machine.
//!
//! A quiz is a fixed list of questions with one answer slot each. It runs
//! until it is submitted, either explicitly or because the last question's
//! timer ran out, and then becomes [`QuizState::Complete`] for good.
//! Front ends only talk to it through [`QuizDriver`].

mod runner;
mod timer;

use crate::config::NavigationMode;
use crate::errors::QuizError;
use crate::models::{Answer, Grade, Question, QuestionKind, ScoreRecord};

pub use runner::{QuizRunner, RunnerPolicy};
pub use timer::{Countdown, Urgency};

#[derive(Debug, Clone, PartialEq)]
pub enum QuizState {
    InProgress { index: usize },
    Complete(QuizResult),
}

/// Where a transition left the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Stay,
    Moved(usize),
    Finished,
}

/// What one second of wall time did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The quiz is already complete.
    Idle,
    Counting { remaining: u32 },
    /// The question timer ran out on this tick.
    Expired(Step),
    /// Feedback is on screen; the question timer is paused.
    Feedback { remaining: u32 },
    FeedbackDone(Step),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    NoAnswer,
}

/// Transient verdict shown after an answer in linear mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub outcome: Outcome,
    pub message: String,
    pub remaining_secs: u32,
}

/// One incorrectly answered question, for the review list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mistake {
    pub number: usize,
    pub prompt: String,
    pub kind: QuestionKind,
    pub your_answer: String,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizResult {
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
    pub mistakes: Vec<Mistake>,
    /// Per-question correctness, in quiz order.
    pub graded: Vec<bool>,
}

impl QuizResult {
    pub fn grade(&self) -> Grade {
        Grade::from_percentage(self.percentage)
    }

    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }

    pub fn record(&self) -> ScoreRecord {
        ScoreRecord::today(self.correct, self.total)
    }
}

/// Everything a presentation layer may do with a running quiz.
pub trait QuizDriver {
    fn questions(&self) -> &[Question];
    fn answers(&self) -> &[Option<Answer>];
    fn state(&self) -> &QuizState;
    fn navigation(&self) -> NavigationMode;

    /// Index and question being shown, unless the quiz is complete.
    fn current(&self) -> Option<(usize, &Question)>;
    fn remaining_secs(&self) -> u32;
    fn urgency(&self) -> Urgency;
    fn feedback(&self) -> Option<&Feedback>;

    /// Store (or clear) the answer for the current question.
    fn record_answer(&mut self, answer: Option<Answer>) -> Result<(), QuizError>;
    /// Commit the current answer and move on. On the last question of a
    /// free quiz this submits the quiz.
    fn submit_answer(&mut self) -> Result<Step, QuizError>;
    fn next(&mut self) -> Result<Step, QuizError>;
    fn previous(&mut self) -> Result<Step, QuizError>;
    fn tick(&mut self) -> TickOutcome;
    /// Grade every slot and finish the quiz.
    fn submit(&mut self) -> Result<&QuizResult, QuizError>;

    fn result(&self) -> Option<&QuizResult> {
        match self.state() {
            QuizState::Complete(result) => Some(result),
            QuizState::InProgress { .. } => None,
        }
    }

    fn is_complete(&self) -> bool {
        self.result().is_some()
    }
}
