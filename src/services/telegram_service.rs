use regex::Regex;
use reqwest::Client;
use std::sync::OnceLock;
use url::Url;

use crate::config::get_config;
use crate::error::{Error, Result};

/// One message pulled from a channel's public preview page.
#[derive(Debug, Clone)]
pub struct ChannelMessage {
    pub id: i64,
    pub text: String,
}

/// Channel source collaborator. Resolves a channel username to its public
/// preview page (`<base>/s/<name>`) and fetches the most recent messages.
///
/// The underlying HTTP client is built once at startup and shared; there
/// is no ambient singleton.
#[derive(Clone)]
pub struct TelegramService {
    client: Client,
    base_url: String,
}

impl TelegramService {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: get_config().telegram_base_url.clone(),
        }
    }

    /// One-time startup probe of the preview endpoint.
    pub async fn check_connection(&self) -> Result<()> {
        let response = self.client.get(&self.base_url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Internal(format!(
                "Channel preview endpoint returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// Fetches up to `limit` most recent messages from a channel,
    /// newest first.
    pub async fn fetch_messages(&self, channel: &str, limit: usize) -> Result<Vec<ChannelMessage>> {
        let name = channel.trim_start_matches('@');
        let url = Url::parse(&self.base_url)?.join(&format!("s/{}", name))?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Internal(format!(
                "Channel {} returned {}",
                channel, response.status()
            )));
        }

        let html = response.text().await?;
        let mut messages = parse_preview_page(&html);
        // The preview page lists oldest first; callers expect newest first.
        messages.reverse();
        messages.truncate(limit);
        Ok(messages)
    }

    /// Canonical message URL, the identity key for deduplication.
    pub fn message_url(&self, channel: &str, message_id: i64) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            channel.trim_start_matches('@'),
            message_id
        )
    }
}

fn post_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"data-post="[^"/]+/(\d+)""#).expect("post id pattern"))
}

fn message_text_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?s)<div class="tgme_widget_message_text[^"]*"[^>]*>(.*?)</div>"#)
            .expect("message text pattern")
    })
}

/// Pulls (id, text) pairs out of a channel preview page. Messages without
/// a text body (photos, polls) are skipped.
fn parse_preview_page(html: &str) -> Vec<ChannelMessage> {
    let mut messages = Vec::new();
    for block in html.split("tgme_widget_message_wrap").skip(1) {
        let Some(id_caps) = post_id_pattern().captures(block) else {
            continue;
        };
        let Ok(id) = id_caps[1].parse::<i64>() else {
            continue;
        };
        let Some(text_caps) = message_text_pattern().captures(block) else {
            continue;
        };
        let text = html_to_text(&text_caps[1]);
        if text.is_empty() {
            continue;
        }
        messages.push(ChannelMessage { id, text });
    }
    messages
}

/// Converts a message HTML fragment to plain text. Bold spans are kept as
/// `**...**` markers because the extractor reads the position from them.
fn html_to_text(fragment: &str) -> String {
    static BR: OnceLock<Regex> = OnceLock::new();
    static BOLD_OPEN: OnceLock<Regex> = OnceLock::new();
    static BOLD_CLOSE: OnceLock<Regex> = OnceLock::new();
    static TAG: OnceLock<Regex> = OnceLock::new();

    let br = BR.get_or_init(|| Regex::new(r"<br\s*/?>").expect("br pattern"));
    let bold_open =
        BOLD_OPEN.get_or_init(|| Regex::new(r"<(?:b|strong)[^>]*>").expect("bold open pattern"));
    let bold_close =
        BOLD_CLOSE.get_or_init(|| Regex::new(r"</(?:b|strong)>").expect("bold close pattern"));
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern"));

    let text = br.replace_all(fragment, "\n");
    let text = bold_open.replace_all(&text, "**");
    let text = bold_close.replace_all(&text, "**");
    let text = tag.replace_all(&text, "");

    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}
