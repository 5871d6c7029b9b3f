use super::Config;
use super::schema::MAX_TIMEOUT_SECS;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("NEWSROOM_FETCH_URL")
            && !url.is_empty()
        {
            self.webhooks.fetch_url = url;
        }

        if let Ok(url) = std::env::var("NEWSROOM_SAVE_URL")
            && !url.is_empty()
        {
            self.webhooks.save_url = url;
        }

        if let Ok(url) = std::env::var("NEWSROOM_TEST_URL")
            && !url.is_empty()
        {
            self.webhooks.test_url = url;
        }

        if let Ok(url) = std::env::var("NEWSROOM_COMMENT_URL")
            && !url.is_empty()
        {
            self.webhooks.comment_url = url;
        }

        if let Ok(timeout_str) = std::env::var("NEWSROOM_TIMEOUT_SECS")
            && let Ok(timeout) = timeout_str.trim().parse::<u64>()
            && (1..=MAX_TIMEOUT_SECS).contains(&timeout)
        {
            self.webhooks.timeout_secs = timeout;
        }

        if let Ok(level) = std::env::var("NEWSROOM_LOG")
            && !level.is_empty()
        {
            self.observability.log_level = level;
        }
    }
}
