use crate::config::{NavigationMode, Settings};
use crate::errors::QuizError;
use crate::grading::is_correct;
use crate::models::{Answer, Question, percentage};

use super::{
    Countdown, Feedback, Mistake, Outcome, QuizDriver, QuizResult, QuizState, Step, TickOutcome,
    Urgency,
};

pub const TIME_UP_MESSAGE: &str = "Time's up! No answer submitted.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerPolicy {
    pub navigation: NavigationMode,
    /// Seconds a verdict stays on screen before auto-advancing (linear mode).
    pub feedback_secs: u32,
}

impl RunnerPolicy {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            navigation: settings.navigation,
            feedback_secs: settings.feedback_secs,
        }
    }
}

impl Default for RunnerPolicy {
    fn default() -> Self {
        Self {
            navigation: NavigationMode::Free,
            feedback_secs: 2,
        }
    }
}

pub struct QuizRunner {
    questions: Vec<Question>,
    answers: Vec<Option<Answer>>,
    policy: RunnerPolicy,
    state: QuizState,
    countdown: Countdown,
    feedback: Option<Feedback>,
}

impl QuizRunner {
    pub fn new(questions: Vec<Question>, policy: RunnerPolicy) -> Self {
        let answers = vec![None; questions.len()];
        let countdown = Countdown::new(questions.first().map_or(0, |q| q.time_limit_secs));
        let mut runner = Self {
            questions,
            answers,
            policy,
            state: QuizState::InProgress { index: 0 },
            countdown,
            feedback: None,
        };
        if runner.questions.is_empty() {
            runner.finish();
        }
        runner
    }

    fn index(&self) -> Result<usize, QuizError> {
        match self.state {
            QuizState::InProgress { index } => Ok(index),
            QuizState::Complete(_) => Err(QuizError::AlreadyComplete),
        }
    }

    fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.questions.len()
    }

    fn move_to(&mut self, index: usize) -> Step {
        self.state = QuizState::InProgress { index };
        self.countdown.reset(self.questions[index].time_limit_secs);
        self.feedback = None;
        log::debug!("Moved to question {}", index + 1);
        Step::Moved(index)
    }

    fn advance_or_finish(&mut self, index: usize) -> Step {
        if self.is_last(index) {
            self.finish();
            Step::Finished
        } else {
            self.move_to(index + 1)
        }
    }

    /// Show a verdict, or move straight on when feedback is disabled.
    fn show_feedback(&mut self, index: usize, outcome: Outcome, message: String) -> Step {
        if self.policy.feedback_secs == 0 {
            return self.advance_or_finish(index);
        }
        self.feedback = Some(Feedback {
            outcome,
            message,
            remaining_secs: self.policy.feedback_secs,
        });
        Step::Stay
    }

    fn finish(&mut self) {
        let graded: Vec<bool> = self
            .questions
            .iter()
            .zip(&self.answers)
            .map(|(question, answer)| is_correct(question, answer.as_ref()))
            .collect();

        let mistakes = self
            .questions
            .iter()
            .zip(&self.answers)
            .zip(&graded)
            .enumerate()
            .filter(|(_, (_, ok))| !**ok)
            .map(|(i, ((question, answer), _))| Mistake {
                number: i + 1,
                prompt: question.prompt.clone(),
                kind: question.kind(),
                your_answer: question.describe_answer(answer.as_ref()),
                correct_answer: question.correct_answer_text(),
            })
            .collect();

        let correct = graded.iter().filter(|ok| **ok).count();
        let total = self.questions.len();
        let result = QuizResult {
            correct,
            total,
            percentage: percentage(correct, total).round() as u32,
            mistakes,
            graded,
        };

        log::info!("Quiz complete: {}/{}", correct, total);
        self.feedback = None;
        self.state = QuizState::Complete(result);
    }

    fn on_expired(&mut self, index: usize) -> Step {
        log::debug!("Timer expired on question {}", index + 1);
        match self.policy.navigation {
            NavigationMode::Free => self.advance_or_finish(index),
            NavigationMode::Linear => {
                self.answers[index] = None;
                self.show_feedback(index, Outcome::NoAnswer, TIME_UP_MESSAGE.to_string())
            }
        }
    }
}

impl QuizDriver for QuizRunner {
    fn questions(&self) -> &[Question] {
        &self.questions
    }

    fn answers(&self) -> &[Option<Answer>] {
        &self.answers
    }

    fn state(&self) -> &QuizState {
        &self.state
    }

    fn navigation(&self) -> NavigationMode {
        self.policy.navigation
    }

    fn current(&self) -> Option<(usize, &Question)> {
        let index = self.index().ok()?;
        self.questions.get(index).map(|q| (index, q))
    }

    fn remaining_secs(&self) -> u32 {
        self.countdown.remaining()
    }

    fn urgency(&self) -> Urgency {
        self.countdown.urgency()
    }

    fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    fn record_answer(&mut self, answer: Option<Answer>) -> Result<(), QuizError> {
        let index = self.index()?;
        if self.feedback.is_some() {
            return Ok(());
        }

        let question = &self.questions[index];
        let answer = match answer {
            Some(Answer::Text(text)) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| Answer::Text(trimmed.to_string()))
            }
            other => other,
        };
        if let Some(given) = &answer {
            if !given.fits(question.kind()) {
                return Err(QuizError::AnswerMismatch {
                    expected: question.kind().label(),
                });
            }
        }

        self.answers[index] = answer;
        Ok(())
    }

    fn submit_answer(&mut self) -> Result<Step, QuizError> {
        let index = self.index()?;
        match self.policy.navigation {
            NavigationMode::Free => {
                if self.is_last(index) {
                    self.finish();
                    Ok(Step::Finished)
                } else {
                    Ok(self.move_to(index + 1))
                }
            }
            NavigationMode::Linear => {
                if self.feedback.is_some() {
                    return Ok(Step::Stay);
                }
                let question = &self.questions[index];
                let (outcome, message) = if is_correct(question, self.answers[index].as_ref()) {
                    (Outcome::Correct, "Correct!".to_string())
                } else {
                    (
                        Outcome::Incorrect,
                        format!("Incorrect! Correct answer: {}", question.correct_answer_text()),
                    )
                };
                Ok(self.show_feedback(index, outcome, message))
            }
        }
    }

    fn next(&mut self) -> Result<Step, QuizError> {
        let index = self.index()?;
        if self.policy.navigation == NavigationMode::Linear {
            return Err(QuizError::NavigationLocked);
        }
        if self.is_last(index) {
            Ok(Step::Stay)
        } else {
            Ok(self.move_to(index + 1))
        }
    }

    fn previous(&mut self) -> Result<Step, QuizError> {
        let index = self.index()?;
        if self.policy.navigation == NavigationMode::Linear {
            return Err(QuizError::NavigationLocked);
        }
        if index == 0 {
            Ok(Step::Stay)
        } else {
            Ok(self.move_to(index - 1))
        }
    }

    fn tick(&mut self) -> TickOutcome {
        let Ok(index) = self.index() else {
            return TickOutcome::Idle;
        };

        if let Some(feedback) = &mut self.feedback {
            feedback.remaining_secs = feedback.remaining_secs.saturating_sub(1);
            if feedback.remaining_secs > 0 {
                return TickOutcome::Feedback {
                    remaining: feedback.remaining_secs,
                };
            }
            self.feedback = None;
            return TickOutcome::FeedbackDone(self.advance_or_finish(index));
        }

        if self.countdown.tick() {
            TickOutcome::Expired(self.on_expired(index))
        } else {
            TickOutcome::Counting {
                remaining: self.countdown.remaining(),
            }
        }
    }

    fn submit(&mut self) -> Result<&QuizResult, QuizError> {
        self.index()?;
        self.finish();
        match &self.state {
            QuizState::Complete(result) => Ok(result),
            QuizState::InProgress { .. } => Err(QuizError::AlreadyComplete),
        }
    }
}
