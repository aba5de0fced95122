mod account;
mod question;
mod score;

pub use account::{Account, RegisterForm};
pub use question::{Answer, Expected, NO_ANSWER, Question, QuestionKind};
pub use score::{Grade, ScoreRecord, percentage};
