use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::models::QuestionKind;

pub const ENV_PREFIX: &str = "TERMTRACK";
pub const DEFAULT_DATA_DIR: &str = ".study-termtrack";

/// How the quiz runner moves between questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    /// Answers are stored without grading; back/forward allowed; scored on submit.
    #[default]
    Free,
    /// Each answer is graded on the spot, feedback shown, then auto-advance.
    Linear,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub email_domain: String,
    pub min_password_len: usize,
    pub questions_per_kind: usize,
    pub feedback_secs: u32,
    pub navigation: NavigationMode,
    pub time_limits: TimeLimits,
}

/// Per-question countdown, in seconds.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TimeLimits {
    pub multiple_choice: u32,
    pub true_false: u32,
    pub fill_blank: u32,
    pub define: u32,
    pub enumeration: u32,
}

impl TimeLimits {
    pub fn for_kind(&self, kind: QuestionKind) -> u32 {
        match kind {
            QuestionKind::MultipleChoice => self.multiple_choice,
            QuestionKind::TrueFalse => self.true_false,
            QuestionKind::FillBlank => self.fill_blank,
            QuestionKind::Define => self.define,
            QuestionKind::Enumeration => self.enumeration,
        }
    }
}

impl Default for TimeLimits {
    fn default() -> Self {
        Self {
            multiple_choice: 15,
            true_false: 15,
            fill_blank: 30,
            define: 60,
            enumeration: 60,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            email_domain: "@carsu.edu.ph".to_string(),
            min_password_len: 6,
            questions_per_kind: 5,
            feedback_secs: 2,
            navigation: NavigationMode::Free,
            time_limits: TimeLimits::default(),
        }
    }
}

impl Settings {
    /// Layer built-in defaults, an optional TOML file and `TERMTRACK_*` variables.
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with(file, environment())
    }

    fn load_with(
        file: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let defaults = Settings::default();
        let limits = defaults.time_limits;

        let mut builder = config::Config::builder()
            .set_default("data_dir", DEFAULT_DATA_DIR)?
            .set_default("email_domain", defaults.email_domain)?
            .set_default("min_password_len", defaults.min_password_len as u64)?
            .set_default("questions_per_kind", defaults.questions_per_kind as u64)?
            .set_default("feedback_secs", defaults.feedback_secs as u64)?
            .set_default("navigation", "free")?
            .set_default("time_limits.multiple_choice", limits.multiple_choice as u64)?
            .set_default("time_limits.true_false", limits.true_false as u64)?
            .set_default("time_limits.fill_blank", limits.fill_blank as u64)?
            .set_default("time_limits.define", limits.define as u64)?
            .set_default("time_limits.enumeration", limits.enumeration as u64)?;

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    /// Location of the log file when none is given on the command line.
    pub fn default_log_file(&self) -> PathBuf {
        self.data_dir.join("study-termtrack.log")
    }
}

/// `TERMTRACK_EMAIL_DOMAIN`, with `__` between nested keys
/// (`TERMTRACK_TIME_LIMITS__DEFINE`).
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.email_domain, "@carsu.edu.ph");
        assert_eq!(settings.min_password_len, 6);
        assert_eq!(settings.questions_per_kind, 5);
        assert_eq!(settings.time_limits, TimeLimits::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "navigation = \"linear\"\nfeedback_secs = 3\n[time_limits]\nmultiple_choice = 20"
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.navigation, NavigationMode::Linear);
        assert_eq!(settings.feedback_secs, 3);
        assert_eq!(settings.time_limits.multiple_choice, 20);
        assert_eq!(settings.time_limits.define, 60);
    }

    fn env_vars(pairs: &[(&str, &str)]) -> config::Environment {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(vars))
    }

    #[test]
    fn test_environment_overrides_with_single_underscore_prefix() {
        let env = env_vars(&[
            ("TERMTRACK_EMAIL_DOMAIN", "@example.edu"),
            ("TERMTRACK_TIME_LIMITS__DEFINE", "90"),
            ("TERMTRACK_NAVIGATION", "linear"),
        ]);

        let settings = Settings::load_with(None, env).unwrap();
        assert_eq!(settings.email_domain, "@example.edu");
        assert_eq!(settings.time_limits.define, 90);
        assert_eq!(settings.time_limits.fill_blank, 30);
        assert_eq!(settings.navigation, NavigationMode::Linear);
    }

    #[test]
    fn test_environment_beats_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "feedback_secs = 3").unwrap();
        let env = env_vars(&[("TERMTRACK_FEEDBACK_SECS", "5")]);

        let settings = Settings::load_with(Some(file.path()), env).unwrap();
        assert_eq!(settings.feedback_secs, 5);
    }

    #[test]
    fn test_time_limit_lookup() {
        let limits = TimeLimits::default();
        assert_eq!(limits.for_kind(QuestionKind::FillBlank), 30);
        assert_eq!(limits.for_kind(QuestionKind::Enumeration), 60);
    }
}
