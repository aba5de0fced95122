use std::path::Path;
use std::sync::Arc;

use crate::config::Settings;
use crate::content::{ContentSource, FilenameHeuristic, StudyContent, UploadedDocument};
use crate::errors::{AppError, AppResult, QuizError};
use crate::generator::QuestionGenerator;
use crate::models::{Answer, QuestionKind, RegisterForm};
use crate::quiz::{QuizDriver, QuizResult, QuizRunner, RunnerPolicy, Step, TickOutcome};
use crate::store::{AccountStore, KeyValueStore, ScoreStore, ScoreSummary, Session};

const TRUE_FALSE_OPTIONS: [&str; 2] = ["True", "False"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Dashboard,
    Quiz,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    SignIn,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    FullName,
    Email,
    Password,
    Confirm,
}

impl AuthTab {
    pub fn fields(self) -> &'static [AuthField] {
        match self {
            AuthTab::SignIn => &[AuthField::Email, AuthField::Password],
            AuthTab::Register => &[
                AuthField::FullName,
                AuthField::Email,
                AuthField::Password,
                AuthField::Confirm,
            ],
        }
    }
}

impl AuthField {
    pub fn label(self) -> &'static str {
        match self {
            AuthField::FullName => "Full name",
            AuthField::Email => "Email",
            AuthField::Password => "Password",
            AuthField::Confirm => "Confirm password",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, AuthField::Password | AuthField::Confirm)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub tab: AuthTab,
    pub form: RegisterForm,
    pub focus: usize,
    pub error: Option<String>,
}

impl AuthForm {
    pub fn focused(&self) -> AuthField {
        let fields = self.tab.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn value(&self, field: AuthField) -> &str {
        match field {
            AuthField::FullName => &self.form.full_name,
            AuthField::Email => &self.form.email,
            AuthField::Password => &self.form.password,
            AuthField::Confirm => &self.form.confirm_password,
        }
    }

    fn value_mut(&mut self, field: AuthField) -> &mut String {
        match field {
            AuthField::FullName => &mut self.form.full_name,
            AuthField::Email => &mut self.form.email,
            AuthField::Password => &mut self.form.password,
            AuthField::Confirm => &mut self.form.confirm_password,
        }
    }
}

/// State of the document picker on the dashboard.
#[derive(Debug, Clone, Default)]
pub enum Upload {
    #[default]
    Empty,
    Ready {
        name: String,
        kind_label: &'static str,
        content: StudyContent,
    },
    Failed {
        name: String,
        message: String,
    },
}

/// Owned application context: stores, session and whatever screen is live.
pub struct App {
    pub screen: Screen,
    settings: Settings,
    accounts: AccountStore,
    session: Session,
    scores: ScoreStore,
    source: Box<dyn ContentSource>,
    auth: AuthForm,
    path_input: String,
    upload: Upload,
    summary: ScoreSummary,
    quiz: Option<Box<dyn QuizDriver>>,
    selected_option: Option<usize>,
    text_input: String,
    quiz_error: Option<String>,
    result_scroll: usize,
}

impl App {
    pub fn new(settings: Settings, store: Arc<dyn KeyValueStore>) -> AppResult<Self> {
        Self::with_source(settings, store, Box::new(FilenameHeuristic))
    }

    pub fn with_source(
        settings: Settings,
        store: Arc<dyn KeyValueStore>,
        source: Box<dyn ContentSource>,
    ) -> AppResult<Self> {
        let accounts = AccountStore::new(Arc::clone(&store), &settings);
        let session = Session::restore(Arc::clone(&store))?;
        let scores = ScoreStore::new(store);
        let summary = scores.summary()?;
        let screen = if session.is_signed_in() {
            Screen::Dashboard
        } else {
            Screen::Auth
        };

        Ok(Self {
            screen,
            settings,
            accounts,
            session,
            scores,
            source,
            auth: AuthForm::default(),
            path_input: String::new(),
            upload: Upload::Empty,
            summary,
            quiz: None,
            selected_option: None,
            text_input: String::new(),
            quiz_error: None,
            result_scroll: 0,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn auth(&self) -> &AuthForm {
        &self.auth
    }

    pub fn summary(&self) -> &ScoreSummary {
        &self.summary
    }

    pub fn path_input(&self) -> &str {
        &self.path_input
    }

    pub fn upload(&self) -> &Upload {
        &self.upload
    }

    pub fn quiz(&self) -> Option<&dyn QuizDriver> {
        self.quiz.as_deref()
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    pub fn text_input(&self) -> &str {
        &self.text_input
    }

    pub fn quiz_error(&self) -> Option<&str> {
        self.quiz_error.as_deref()
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.quiz.as_ref().and_then(|quiz| quiz.result())
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// Labels for the options of the current question, if it has any.
    pub fn current_options(&self) -> Vec<String> {
        let Some((_, question)) = self.quiz.as_ref().and_then(|quiz| quiz.current()) else {
            return Vec::new();
        };
        match question.kind() {
            QuestionKind::MultipleChoice => question.options().unwrap_or_default().to_vec(),
            QuestionKind::TrueFalse => TRUE_FALSE_OPTIONS.iter().map(|s| s.to_string()).collect(),
            _ => Vec::new(),
        }
    }

    // ---- auth ----

    pub fn switch_auth_tab(&mut self) {
        self.auth.tab = match self.auth.tab {
            AuthTab::SignIn => AuthTab::Register,
            AuthTab::Register => AuthTab::SignIn,
        };
        self.auth.focus = 0;
        self.auth.error = None;
    }

    pub fn focus_next_field(&mut self) {
        self.auth.focus = (self.auth.focus + 1) % self.auth.tab.fields().len();
    }

    pub fn focus_previous_field(&mut self) {
        let len = self.auth.tab.fields().len();
        self.auth.focus = (self.auth.focus + len - 1) % len;
    }

    pub fn auth_input_push(&mut self, c: char) {
        let field = self.auth.focused();
        self.auth.value_mut(field).push(c);
        self.auth.error = None;
    }

    pub fn auth_input_pop(&mut self) {
        let field = self.auth.focused();
        self.auth.value_mut(field).pop();
        self.auth.error = None;
    }

    /// Sign in or register depending on the active tab.
    pub fn submit_auth(&mut self) -> AppResult<()> {
        let attempt = match self.auth.tab {
            AuthTab::SignIn => self
                .accounts
                .sign_in(&self.auth.form.email, &self.auth.form.password),
            AuthTab::Register => self.accounts.register(&self.auth.form),
        };

        match attempt {
            Ok(account) => {
                self.session.login(account)?;
                self.auth = AuthForm::default();
                self.screen = Screen::Dashboard;
                Ok(())
            }
            Err(AppError::Auth(err)) => {
                log::warn!("Authentication rejected: {}", err);
                self.auth.error = Some(err.to_string());
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    pub fn logout(&mut self) -> AppResult<()> {
        self.session.logout()?;
        self.quiz = None;
        self.path_input.clear();
        self.upload = Upload::Empty;
        self.screen = Screen::Auth;
        Ok(())
    }

    // ---- dashboard ----

    pub fn path_input_push(&mut self, c: char) {
        self.path_input.push(c);
    }

    pub fn path_input_pop(&mut self) {
        self.path_input.pop();
    }

    /// Fill the path field and load the document straight away.
    pub fn select_document(&mut self, path: &Path) {
        self.path_input = path.display().to_string();
        self.load_document();
    }

    /// Validate the typed path and derive quiz vocabulary from it.
    pub fn load_document(&mut self) {
        let path = self.path_input.trim().to_string();
        if path.is_empty() {
            return;
        }
        self.upload = self.process_document(Path::new(&path));
    }

    fn process_document(&self, path: &Path) -> Upload {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let extracted = UploadedDocument::from_path(path)
            .and_then(|doc| self.source.extract(&doc).map(|content| (doc, content)));

        match extracted {
            Ok((doc, content)) => Upload::Ready {
                name,
                kind_label: doc.kind.label(),
                content,
            },
            Err(err) => {
                log::warn!("Rejected document {}: {}", path.display(), err);
                Upload::Failed {
                    name,
                    message: err.to_string(),
                }
            }
        }
    }

    pub fn can_generate(&self) -> bool {
        matches!(self.upload, Upload::Ready { .. })
    }

    /// Build a fresh quiz from the loaded document and switch to it.
    pub fn start_quiz(&mut self) -> AppResult<()> {
        let Upload::Ready { content, .. } = &self.upload else {
            return Ok(());
        };

        let generator = QuestionGenerator::new(
            content,
            self.settings.time_limits,
            self.settings.questions_per_kind,
        );
        let questions = generator.generate(&mut rand::thread_rng());
        let runner = QuizRunner::new(questions, RunnerPolicy::from_settings(&self.settings));

        self.quiz = Some(Box::new(runner));
        self.result_scroll = 0;
        self.quiz_error = None;
        self.sync_input();
        self.screen = Screen::Quiz;

        // A quiz with no questions is complete before it starts.
        if self.quiz.as_ref().is_some_and(|quiz| quiz.is_complete()) {
            self.finish_quiz()?;
        }
        Ok(())
    }

    // ---- quiz ----

    /// Input is frozen while a verdict is on screen.
    fn input_locked(&self) -> bool {
        self.quiz
            .as_ref()
            .is_some_and(|quiz| quiz.feedback().is_some())
    }

    pub fn select_next_option(&mut self) {
        if self.input_locked() {
            return;
        }
        let count = self.current_options().len();
        if count == 0 {
            return;
        }
        let next = self.selected_option.map_or(0, |i| (i + 1) % count);
        self.choose_option(next);
    }

    pub fn select_previous_option(&mut self) {
        if self.input_locked() {
            return;
        }
        let count = self.current_options().len();
        if count == 0 {
            return;
        }
        let previous = self.selected_option.map_or(count - 1, |i| (i + count - 1) % count);
        self.choose_option(previous);
    }

    fn choose_option(&mut self, index: usize) {
        let answer = match self.current_kind() {
            Some(QuestionKind::MultipleChoice) => Answer::Choice(index),
            Some(QuestionKind::TrueFalse) => Answer::Bool(index == 0),
            _ => return,
        };
        self.selected_option = Some(index);
        self.record(Some(answer));
    }

    pub fn text_input_push(&mut self, c: char) {
        if self.input_locked() {
            return;
        }
        self.text_input.push(c);
        self.record_text();
    }

    pub fn text_input_pop(&mut self) {
        if self.input_locked() {
            return;
        }
        self.text_input.pop();
        self.record_text();
    }

    fn record_text(&mut self) {
        if self.current_kind().is_some_and(QuestionKind::is_free_text) {
            let answer = Answer::Text(self.text_input.clone());
            self.record(Some(answer));
        }
    }

    fn record(&mut self, answer: Option<Answer>) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        self.quiz_error = quiz.record_answer(answer).err().map(|e| e.to_string());
    }

    pub fn current_kind(&self) -> Option<QuestionKind> {
        self.quiz
            .as_ref()
            .and_then(|quiz| quiz.current())
            .map(|(_, question)| question.kind())
    }

    pub fn submit_answer(&mut self) -> AppResult<()> {
        let step = match self.quiz.as_mut() {
            Some(quiz) => quiz.submit_answer(),
            None => return Ok(()),
        };
        self.apply_step(step)
    }

    pub fn next_question(&mut self) -> AppResult<()> {
        let step = match self.quiz.as_mut() {
            Some(quiz) => quiz.next(),
            None => return Ok(()),
        };
        self.apply_step(step)
    }

    pub fn previous_question(&mut self) -> AppResult<()> {
        let step = match self.quiz.as_mut() {
            Some(quiz) => quiz.previous(),
            None => return Ok(()),
        };
        self.apply_step(step)
    }

    /// End the quiz now, grading whatever has been answered.
    pub fn submit_quiz(&mut self) -> AppResult<()> {
        let submitted = match self.quiz.as_mut() {
            Some(quiz) => quiz.submit().map(|_| ()),
            None => return Ok(()),
        };
        match submitted {
            Ok(()) => self.finish_quiz(),
            Err(err) => {
                self.quiz_error = Some(err.to_string());
                Ok(())
            }
        }
    }

    /// One second of wall time.
    pub fn on_tick(&mut self) -> AppResult<()> {
        if self.screen != Screen::Quiz {
            return Ok(());
        }
        let Some(quiz) = self.quiz.as_mut() else {
            return Ok(());
        };

        match quiz.tick() {
            TickOutcome::Expired(step) | TickOutcome::FeedbackDone(step) => self.apply_step(Ok(step)),
            TickOutcome::Idle | TickOutcome::Counting { .. } | TickOutcome::Feedback { .. } => {
                Ok(())
            }
        }
    }

    fn apply_step(&mut self, step: Result<Step, QuizError>) -> AppResult<()> {
        match step {
            Ok(Step::Stay) => Ok(()),
            Ok(Step::Moved(_)) => {
                self.sync_input();
                Ok(())
            }
            Ok(Step::Finished) => self.finish_quiz(),
            Err(err) => {
                self.quiz_error = Some(err.to_string());
                Ok(())
            }
        }
    }

    /// Persist exactly one score for the finished quiz and show the results.
    fn finish_quiz(&mut self) -> AppResult<()> {
        let Some(record) = self.result().map(QuizResult::record) else {
            return Ok(());
        };
        self.scores.append(record)?;
        self.summary = self.scores.summary()?;
        self.result_scroll = 0;
        self.screen = Screen::Result;
        Ok(())
    }

    /// Load the stored answer for the question now on screen into the inputs.
    fn sync_input(&mut self) {
        self.selected_option = None;
        self.text_input.clear();
        self.quiz_error = None;

        let Some(quiz) = self.quiz.as_ref() else {
            return;
        };
        let Some((index, _)) = quiz.current() else {
            return;
        };
        match &quiz.answers()[index] {
            Some(Answer::Choice(choice)) => self.selected_option = Some(*choice),
            Some(Answer::Bool(value)) => self.selected_option = Some(if *value { 0 } else { 1 }),
            Some(Answer::Text(text)) => self.text_input = text.clone(),
            None => {}
        }
    }

    /// Leave a quiz or its results. An unfinished quiz is discarded unscored.
    pub fn back_to_dashboard(&mut self) {
        if let Some(quiz) = &self.quiz {
            if !quiz.is_complete() {
                log::info!("Quiz abandoned");
            }
        }
        self.quiz = None;
        self.screen = Screen::Dashboard;
    }

    // ---- results ----

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self
            .result()
            .map_or(0, |r| r.mistakes.len().saturating_sub(1));
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NavigationMode;
    use crate::errors::ContentError;
    use crate::store::MemoryStore;

    /// Serves CPU-like vocabulary for any document name.
    struct FixedSource;

    impl ContentSource for FixedSource {
        fn extract(&self, _doc: &UploadedDocument) -> Result<StudyContent, ContentError> {
            Ok(StudyContent {
                topics: vec!["CPU".into()],
                key_terms: ["CPU", "ALU", "Cache", "Core"].map(String::from).to_vec(),
                concepts: vec!["The CPU executes instructions".into()],
                facts: vec!["CPUs are fast".into()],
            })
        }
    }

    fn app_with(store: Arc<dyn KeyValueStore>, settings: Settings) -> App {
        App::with_source(settings, store, Box::new(FixedSource)).unwrap()
    }

    fn type_into(app: &mut App, text: &str) {
        for c in text.chars() {
            app.auth_input_push(c);
        }
    }

    fn register(app: &mut App) {
        app.switch_auth_tab();
        type_into(app, "Juan Dela Cruz");
        app.focus_next_field();
        type_into(app, "juan@carsu.edu.ph");
        app.focus_next_field();
        type_into(app, "secret1");
        app.focus_next_field();
        type_into(app, "secret1");
        app.submit_auth().unwrap();
    }

    fn load_pdf(app: &mut App, dir: &tempfile::TempDir) {
        let path = dir.path().join("cpu.pdf");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();
        for c in path.display().to_string().chars() {
            app.path_input_push(c);
        }
        app.load_document();
    }

    #[test]
    fn test_register_signs_in_and_session_survives_restart() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut app = app_with(Arc::clone(&store), Settings::default());
        assert_eq!(app.screen, Screen::Auth);

        register(&mut app);
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(
            app.session().current().map(|a| a.email.as_str()),
            Some("juan@carsu.edu.ph")
        );

        let restarted = app_with(store, Settings::default());
        assert_eq!(restarted.screen, Screen::Dashboard);
    }

    #[test]
    fn test_bad_sign_in_shows_message() {
        let mut app = app_with(Arc::new(MemoryStore::new()), Settings::default());
        type_into(&mut app, "juan@gmail.com");
        app.submit_auth().unwrap();
        assert_eq!(app.screen, Screen::Auth);
        assert_eq!(
            app.auth().error.as_deref(),
            Some("Please use your @carsu.edu.ph email address")
        );
    }

    #[test]
    fn test_select_document_prefills_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("networking.pptx");
        std::fs::write(&path, vec![1u8; 4096]).unwrap();
        let mut app = app_with(Arc::new(MemoryStore::new()), Settings::default());

        app.select_document(&path);
        assert_eq!(app.path_input(), path.display().to_string());
        assert!(app.can_generate());
    }

    #[test]
    fn test_rejected_document_disables_generation() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(Arc::new(MemoryStore::new()), Settings::default());
        let path = dir.path().join("tiny.pdf");
        std::fs::write(&path, b"%PDF").unwrap();
        for c in path.display().to_string().chars() {
            app.path_input_push(c);
        }
        app.load_document();

        assert!(!app.can_generate());
        assert!(matches!(app.upload(), Upload::Failed { .. }));
        app.start_quiz().unwrap();
        assert!(app.quiz().is_none());
    }

    #[test]
    fn test_full_quiz_records_one_score() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(Arc::new(MemoryStore::new()), Settings::default());
        register(&mut app);
        load_pdf(&mut app, &dir);
        assert!(app.can_generate());

        app.start_quiz().unwrap();
        assert_eq!(app.screen, Screen::Quiz);
        let total = app.quiz().map(|q| q.questions().len()).unwrap();
        assert_eq!(total, 25);

        app.submit_quiz().unwrap();
        assert_eq!(app.screen, Screen::Result);
        let result = app.result().unwrap();
        assert!(result.correct <= result.total);
        assert_eq!(app.summary().quizzes_taken, 1);
        assert_eq!(app.summary().recent[0].total, 25);

        app.back_to_dashboard();
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(app.quiz().is_none());
    }

    #[test]
    fn test_free_mode_restores_answers_on_navigation() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(Arc::new(MemoryStore::new()), Settings::default());
        register(&mut app);
        load_pdf(&mut app, &dir);
        app.start_quiz().unwrap();

        let first_kind = app.current_kind().unwrap();
        if first_kind.is_free_text() {
            app.text_input_push('x');
        } else {
            app.select_next_option();
        }
        app.next_question().unwrap();
        app.previous_question().unwrap();

        if first_kind.is_free_text() {
            assert_eq!(app.text_input(), "x");
        } else {
            assert_eq!(app.selected_option(), Some(0));
        }
    }

    #[test]
    fn test_linear_timeouts_finish_quiz_through_ticks() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.navigation = NavigationMode::Linear;
        settings.questions_per_kind = 1;
        settings.feedback_secs = 1;
        settings.time_limits = crate::config::TimeLimits {
            multiple_choice: 1,
            true_false: 1,
            fill_blank: 1,
            define: 1,
            enumeration: 1,
        };
        let mut app = app_with(Arc::new(MemoryStore::new()), settings);
        register(&mut app);
        load_pdf(&mut app, &dir);
        app.start_quiz().unwrap();

        // Each question: one tick to expire, one to clear the feedback.
        for _ in 0..10 {
            app.on_tick().unwrap();
        }
        assert_eq!(app.screen, Screen::Result);
        assert_eq!(app.result().map(|r| r.correct), Some(0));
        assert_eq!(app.summary().quizzes_taken, 1);
    }

    #[test]
    fn test_zero_questions_goes_straight_to_results() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.questions_per_kind = 0;
        let mut app = app_with(Arc::new(MemoryStore::new()), settings);
        load_pdf(&mut app, &dir);

        app.start_quiz().unwrap();
        assert_eq!(app.screen, Screen::Result);
        assert_eq!(app.result().map(|r| r.total), Some(0));
    }

    #[test]
    fn test_free_mode_enter_through_every_question_submits() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(Arc::new(MemoryStore::new()), Settings::default());
        load_pdf(&mut app, &dir);
        app.start_quiz().unwrap();

        for _ in 0..25 {
            app.submit_answer().unwrap();
        }
        assert_eq!(app.screen, Screen::Result);
        assert_eq!(app.summary().quizzes_taken, 1);
    }

    #[test]
    fn test_linear_feedback_freezes_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.navigation = NavigationMode::Linear;
        let mut app = app_with(Arc::new(MemoryStore::new()), settings);
        load_pdf(&mut app, &dir);
        app.start_quiz().unwrap();

        app.submit_answer().unwrap();
        assert!(app.quiz().and_then(|q| q.feedback()).is_some());

        app.text_input_push('z');
        app.select_next_option();
        assert_eq!(app.text_input(), "");
        assert_eq!(app.selected_option(), None);
        assert_eq!(app.quiz().map(|q| q.answers()[0].clone()), Some(None));
    }

    #[test]
    fn test_logout_returns_to_auth() {
        let mut app = app_with(Arc::new(MemoryStore::new()), Settings::default());
        register(&mut app);
        app.logout().unwrap();
        assert_eq!(app.screen, Screen::Auth);
        assert!(!app.session().is_signed_in());
    }
}
