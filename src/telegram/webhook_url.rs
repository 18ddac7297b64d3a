//! Per-tenant webhook URL template
//!
//! Tenant bots receive updates on `<host><prefix>/<token>`; the token in the
//! path both authenticates the request and selects the tenant's dispatcher
//! context.

/// Template for tenant webhook URLs, e.g. host `https://hub.example.com` and
/// prefix `/webhook/bot`.
#[derive(Debug, Clone)]
pub struct MultibotWebhookUrl {
    host: String,
    path_prefix: String,
}

impl MultibotWebhookUrl {
    pub fn new(host: impl Into<String>, path_prefix: impl Into<String>) -> Self {
        Self {
            host: trim_trailing_slash(host.into()),
            path_prefix: trim_trailing_slash(path_prefix.into()),
        }
    }

    /// Full webhook URL for a tenant bot, with the token as the final path
    /// segment.
    pub fn format(&self, token: &str) -> String {
        format!("{}{}/{}", self.host, self.path_prefix, token)
    }

    /// The axum route pattern serving this template.
    pub fn route_pattern(&self) -> String {
        format!("{}/{{token}}", self.path_prefix)
    }
}

fn trim_trailing_slash(mut s: String) -> String {
    while s.ends_with('/') {
        s.pop();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_token_as_final_segment() {
        let url = MultibotWebhookUrl::new("https://hub.example.com", "/webhook/bot");
        assert_eq!(
            url.format("123:ABC"),
            "https://hub.example.com/webhook/bot/123:ABC"
        );
    }

    #[test]
    fn tolerates_trailing_slashes() {
        let url = MultibotWebhookUrl::new("https://hub.example.com/", "/webhook/bot/");
        assert_eq!(url.format("t"), "https://hub.example.com/webhook/bot/t");
        assert_eq!(url.route_pattern(), "/webhook/bot/{token}");
    }
}
