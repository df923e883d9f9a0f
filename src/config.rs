// Endpoint configuration for the classification service.
//
// The service address used to be fixed at build time; here the base URL
// and both endpoint paths can be overridden from the environment or from
// command-line flags (see `main.rs`).

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TEXT_PATH: &str = "/classify/text";
pub const DEFAULT_PDF_PATH: &str = "/classify/pdf";
pub const HEALTH_PATH: &str = "/health";

/// Where the classification endpoints live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub text_path: String,
    pub pdf_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.into(),
            text_path: DEFAULT_TEXT_PATH.into(),
            pdf_path: DEFAULT_PDF_PATH.into(),
        }
    }
}

impl Config {
    /// Read `CLASSIFIER_API_URL`, `CLASSIFIER_TEXT_PATH` and
    /// `CLASSIFIER_PDF_PATH`, falling back to the defaults.
    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| std::env::var(name).unwrap_or_else(|_| default.into());
        Config {
            base_url: var("CLASSIFIER_API_URL", DEFAULT_BASE_URL),
            text_path: var("CLASSIFIER_TEXT_PATH", DEFAULT_TEXT_PATH),
            pdf_path: var("CLASSIFIER_PDF_PATH", DEFAULT_PDF_PATH),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Apply command-line overrides on top of the current values.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        text_path: Option<String>,
        pdf_path: Option<String>,
    ) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(text_path) = text_path {
            self.text_path = text_path;
        }
        if let Some(pdf_path) = pdf_path {
            self.pdf_path = pdf_path;
        }
        self
    }

    pub fn text_url(&self) -> String {
        self.join(&self.text_path)
    }

    pub fn pdf_url(&self) -> String {
        self.join(&self.pdf_path)
    }

    pub fn health_url(&self) -> String {
        self.join(HEALTH_PATH)
    }

    fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_urls_point_at_localhost() {
        let cfg = Config::default();
        assert_eq!(cfg.text_url(), "http://localhost:8000/classify/text");
        assert_eq!(cfg.pdf_url(), "http://localhost:8000/classify/pdf");
        assert_eq!(cfg.health_url(), "http://localhost:8000/health");
    }

    #[test]
    fn from_env_reads_classifier_variables() {
        std::env::set_var("CLASSIFIER_API_URL", "http://classifier.internal:9000/");
        std::env::set_var("CLASSIFIER_TEXT_PATH", "/v2/text");
        std::env::set_var("CLASSIFIER_PDF_PATH", "v2/pdf");

        let cfg = Config::from_env();

        std::env::remove_var("CLASSIFIER_API_URL");
        std::env::remove_var("CLASSIFIER_TEXT_PATH");
        std::env::remove_var("CLASSIFIER_PDF_PATH");

        assert_eq!(cfg.text_url(), "http://classifier.internal:9000/v2/text");
        assert_eq!(cfg.pdf_url(), "http://classifier.internal:9000/v2/pdf");
        assert_eq!(cfg.health_url(), "http://classifier.internal:9000/health");
    }

    #[test]
    fn join_normalises_slashes() {
        let cfg = Config {
            base_url: "http://svc:9000/api/".into(),
            text_path: "v1/text".into(),
            pdf_path: "/v1/pdf".into(),
        };
        assert_eq!(cfg.text_url(), "http://svc:9000/api/v1/text");
        assert_eq!(cfg.pdf_url(), "http://svc:9000/api/v1/pdf");
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let cfg = Config::default().with_overrides(Some("http://other:1234".into()), None, None);
        assert_eq!(cfg.text_url(), "http://other:1234/classify/text");
        assert_eq!(cfg.pdf_url(), "http://other:1234/classify/pdf");
    }
}
