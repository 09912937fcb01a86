use regex::Regex;
use std::fmt;

/// Removes credentials from text before it reaches logs or error messages.
#[derive(Clone)]
pub struct SecretScrubber {
    atlassian_token_pattern: Regex,
    field_pattern: Regex,
    bearer_pattern: Regex,
    basic_pattern: Regex,
}

impl SecretScrubber {
    /// Create a new secret scrubber
    pub fn new() -> Self {
        Self {
            // Atlassian API tokens: ATATT3xFfGF0...
            atlassian_token_pattern: Regex::new(r"ATATT[a-zA-Z0-9_\-=]{16,}").unwrap(),
            // Secret-looking JSON or query fields; quoted values are taken whole
            field_pattern: Regex::new(
                r#"(?i)["']?(client_secret|client_id|api_token|access_token|token|secret|password)["']?\s*([:=])\s*("[^"]*"|'[^']*'|[^"'\s,}&]+)"#,
            )
            .unwrap(),
            bearer_pattern: Regex::new(r"Bearer\s+[a-zA-Z0-9\-_\.=]+").unwrap(),
            basic_pattern: Regex::new(r"Basic\s+[a-zA-Z0-9+/=]+").unwrap(),
        }
    }

    /// Scrub a message of sensitive data
    pub fn scrub(&self, message: &str) -> String {
        let mut scrubbed = self
            .atlassian_token_pattern
            .replace_all(message, "[API_TOKEN_REDACTED]")
            .to_string();
        scrubbed = self
            .bearer_pattern
            .replace_all(&scrubbed, "Bearer [TOKEN_REDACTED]")
            .to_string();
        scrubbed = self
            .basic_pattern
            .replace_all(&scrubbed, "Basic [CREDENTIALS_REDACTED]")
            .to_string();
        scrubbed = self
            .field_pattern
            .replace_all(&scrubbed, "$1$2[REDACTED]")
            .to_string();
        scrubbed
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
