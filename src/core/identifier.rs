use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

/// Internal channel ids start with this prefix.
pub const CHANNEL_ID_PREFIX: &str = "UC";
pub const CHANNEL_ID_MIN_LEN: usize = 24;

static HOST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(www\.)?(youtube\.com|youtu\.be)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChannelIdentifier {
    ChannelId(String),
    /// Handle text without the leading `@`.
    Handle(String),
    LegacyCustomPath(String),
}

impl ChannelIdentifier {
    /// The text a search-based resolver should query with.
    pub fn query_text(&self) -> &str {
        match self {
            Self::ChannelId(id) => id,
            Self::Handle(handle) => handle,
            Self::LegacyCustomPath(name) => name,
        }
    }
}

impl fmt::Display for ChannelIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChannelId(id) => write!(f, "{}", id),
            Self::Handle(handle) => write!(f, "@{}", handle),
            Self::LegacyCustomPath(name) => write!(f, "c/{}", name),
        }
    }
}

pub fn is_channel_id(candidate: &str) -> bool {
    candidate.starts_with(CHANNEL_ID_PREFIX) && candidate.len() >= CHANNEL_ID_MIN_LEN
}

/// Parse a channel URL into an identifier.
///
/// Returns `None` for malformed URLs, foreign hosts and paths that do not
/// name a channel. Query and fragment are ignored.
pub fn parse_channel_url(input: &str) -> Option<ChannelIdentifier> {
    let url = Url::parse(input.trim()).ok()?;
    let host = url.host_str()?;
    if !HOST_RE.is_match(&host.to_ascii_lowercase()) {
        return None;
    }

    let path = url.path().trim_end_matches('/');

    if let Some(rest) = path.strip_prefix("/channel/") {
        let id = first_segment(rest)?;
        return is_channel_id(&id).then(|| ChannelIdentifier::ChannelId(id));
    }

    if let Some(rest) = path.strip_prefix("/@") {
        return first_segment(rest).map(ChannelIdentifier::Handle);
    }

    if let Some(rest) = path.strip_prefix("/c/") {
        return first_segment(rest).map(ChannelIdentifier::LegacyCustomPath);
    }

    // Legacy usernames resolve the same way handles do
    if let Some(rest) = path.strip_prefix("/user/") {
        return first_segment(rest).map(ChannelIdentifier::Handle);
    }

    None
}

fn first_segment(rest: &str) -> Option<String> {
    let segment = rest.split('/').next().unwrap_or_default();
    if segment.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    Some(decoded)
}
