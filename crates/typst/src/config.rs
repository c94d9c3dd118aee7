//! Engine settings.

use chrono::NaiveDate;

/// Settings for a [`crate::TypstEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypstConfig {
    /// Virtual path of the main document, used in diagnostics and for
    /// resolving relative references made by it.
    pub main_path: String,
    /// Emit tagged (accessible) PDF.
    pub tagged_pdf: bool,
    /// Date reported by `datetime.today()`. `None` uses the system clock,
    /// which makes documents that ask for today's date time-dependent.
    pub today: Option<NaiveDate>,
    /// After each compile, memoized results unused for this many compiles
    /// are evicted from Typst's process-wide cache. `0` clears it every time.
    pub cache_max_age: usize,
}

impl Default for TypstConfig {
    fn default() -> Self {
        Self {
            main_path: "/main.typ".to_string(),
            tagged_pdf: false,
            today: None,
            cache_max_age: 10,
        }
    }
}

impl TypstConfig {
    pub fn with_main_path(mut self, path: impl Into<String>) -> Self {
        self.main_path = path.into();
        self
    }

    pub fn with_tagged_pdf(mut self, tagged: bool) -> Self {
        self.tagged_pdf = tagged;
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn with_cache_max_age(mut self, max_age: usize) -> Self {
        self.cache_max_age = max_age;
        self
    }
}
