use std::str::FromStr;

use permissions::Bitmask;

pub const AUTHORIZE_URL: &str = "https://discord.com/oauth2/authorize/";
pub const EMBED_URL: &str = "https://discord.now.sh/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// The service's own OAuth2 authorize endpoint.
    Primary,
    /// Short link service that renders an embed preview and redirects.
    EmbedPreview,
}

impl FromStr for Provider {
    type Err = InviteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discord" | "primary" => Ok(Provider::Primary),
            "embed" => Ok(Provider::EmbedPreview),
            other => Err(InviteError::UnknownProvider(other.to_owned())),
        }
    }
}

/// OAuth2 scopes understood by the embed link's `s` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Bot,
    Connections,
    Email,
    Identify,
    Guilds,
    GuildsJoin,
    GdmJoin,
    MessagesRead,
    Rpc,
    RpcApi,
    RpcNotificationsRead,
    WebhookIncoming,
}

impl Scope {
    pub const ALL: [Scope; 12] = [
        Scope::Bot,
        Scope::Connections,
        Scope::Email,
        Scope::Identify,
        Scope::Guilds,
        Scope::GuildsJoin,
        Scope::GdmJoin,
        Scope::MessagesRead,
        Scope::Rpc,
        Scope::RpcApi,
        Scope::RpcNotificationsRead,
        Scope::WebhookIncoming,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Bot => "bot",
            Scope::Connections => "connections",
            Scope::Email => "email",
            Scope::Identify => "identify",
            Scope::Guilds => "guilds",
            Scope::GuildsJoin => "guilds.join",
            Scope::GdmJoin => "gdm.join",
            Scope::MessagesRead => "messages.read",
            Scope::Rpc => "rpc",
            Scope::RpcApi => "rpc.api",
            Scope::RpcNotificationsRead => "rpc.notifications.read",
            Scope::WebhookIncoming => "webhook.incoming",
        }
    }

    pub fn bit(&self) -> Bitmask {
        match self {
            Scope::Bot => 0x1,
            Scope::Connections => 0x2,
            Scope::Email => 0x4,
            Scope::Identify => 0x8,
            Scope::Guilds => 0x10,
            Scope::GuildsJoin => 0x20,
            Scope::GdmJoin => 0x40,
            Scope::MessagesRead => 0x80,
            Scope::Rpc => 0x100,
            Scope::RpcApi => 0x200,
            Scope::RpcNotificationsRead => 0x400,
            Scope::WebhookIncoming => 0x800,
        }
    }
}

impl FromStr for Scope {
    type Err = InviteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| InviteError::UnknownScope(s.to_owned()))
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fold a scope list such as `bot,identify` into the embed link's scope
/// bits. Tokens are runs of ASCII word characters and dots; everything else
/// separates them. A missing list is `0`, an unknown token fails the whole
/// list.
pub fn parse_scopes(text: Option<&str>) -> Result<Bitmask, InviteError> {
    let Some(text) = text else {
        return Ok(0);
    };

    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
        .filter(|token| !token.is_empty())
        .try_fold(0, |bm, token| token.parse::<Scope>().map(|scope| bm | scope.bit()))
}

/// Loose form input for an invite link, as filled in by the page. Every
/// field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteInfo {
    pub id: Option<String>,
    pub scope: Option<String>,
    pub has_scope: bool,
    pub has_code: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteRequest {
    pub provider: Provider,
    pub client_id: String,
    pub permissions: Bitmask,
    pub scope: Option<String>,
    pub wants_code: bool,
}

impl InviteRequest {
    /// Returns `None` when the client id is missing. A scope only counts
    /// when it was asked for and is not blank.
    pub fn new(provider: Provider, info: &InviteInfo, permissions: Bitmask) -> Option<Self> {
        let client_id = info.id.as_deref().filter(|id| !id.is_empty())?;
        let scope = info
            .scope
            .as_deref()
            .filter(|scope| info.has_scope && !scope.trim().is_empty());

        Some(Self {
            provider,
            client_id: client_id.to_owned(),
            permissions,
            scope: scope.map(str::to_owned),
            wants_code: info.has_code,
        })
    }

    pub fn url(&self) -> Result<String, InviteError> {
        let mut url = match self.provider {
            Provider::Primary => format!(
                "{}?permissions={}&scope={}&client_id={}",
                AUTHORIZE_URL,
                self.permissions,
                self.scope.as_deref().unwrap_or("bot"),
                self.client_id,
            ),
            Provider::EmbedPreview => {
                let mut url = format!("{}{}?p{}", EMBED_URL, self.client_id, self.permissions);
                if let Some(scope) = &self.scope {
                    url.push_str(&format!("&s{}", parse_scopes(Some(scope))?));
                }
                url
            }
        };

        if self.wants_code {
            url.push_str(match self.provider {
                Provider::Primary => "&response_type=code",
                Provider::EmbedPreview => "&t1",
            });
        }
        Ok(url)
    }
}

/// Build an invite link, or the empty string when the provider, the form,
/// its client id or the permissions are missing.
pub fn invite_url(
    provider: Option<Provider>,
    info: Option<&InviteInfo>,
    permissions: Option<Bitmask>,
) -> Result<String, InviteError> {
    let request = provider
        .zip(info)
        .zip(permissions)
        .and_then(|((provider, info), permissions)| InviteRequest::new(provider, info, permissions));

    match request {
        Some(request) => request.url(),
        None => Ok(String::new()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteError {
    UnknownScope(String),
    UnknownProvider(String),
}

impl std::fmt::Display for InviteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InviteError::UnknownScope(scope) => write!(f, "Unknown scope: {}", scope),
            InviteError::UnknownProvider(provider) => {
                write!(f, "Unknown invite provider: {}", provider)
            }
        }
    }
}

impl std::error::Error for InviteError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str, scope: Option<&str>, has_code: bool) -> InviteInfo {
        InviteInfo {
            id: Some(id.to_owned()),
            scope: scope.map(str::to_owned),
            has_scope: scope.is_some(),
            has_code,
        }
    }

    fn url(provider: Provider, info: &InviteInfo, permissions: Bitmask) -> String {
        invite_url(Some(provider), Some(info), Some(permissions)).unwrap()
    }

    #[test]
    fn parses_scope_lists() {
        assert_eq!(parse_scopes(Some("bot,identify")), Ok(9));
        assert_eq!(parse_scopes(Some("bot, guilds.join,rpc.notifications.read")), Ok(0x421));
        assert_eq!(parse_scopes(Some("bot bot")), Ok(1));
        assert_eq!(parse_scopes(None), Ok(0));
        assert_eq!(parse_scopes(Some("")), Ok(0));
        assert_eq!(parse_scopes(Some(",,")), Ok(0));
    }

    #[test]
    fn unknown_scope_rejects_the_list() {
        assert_eq!(
            parse_scopes(Some("bot,applications.commands")),
            Err(InviteError::UnknownScope("applications.commands".to_owned()))
        );
    }

    #[test]
    fn scope_names_round_trip() {
        for scope in Scope::ALL {
            assert_eq!(scope.as_str().parse::<Scope>(), Ok(scope));
        }
        let all = Scope::ALL.iter().fold(0, |bm, s| bm | s.bit());
        assert_eq!(all, 0xfff);
    }

    #[test]
    fn primary_link_with_code() {
        assert_eq!(
            url(Provider::Primary, &info("123", None, true), 8),
            "https://discord.com/oauth2/authorize/?permissions=8&scope=bot&client_id=123&response_type=code"
        );
    }

    #[test]
    fn primary_link_without_code() {
        assert_eq!(
            url(Provider::Primary, &info("123", None, false), 8),
            "https://discord.com/oauth2/authorize/?permissions=8&scope=bot&client_id=123"
        );
    }

    #[test]
    fn primary_link_with_scope() {
        assert_eq!(
            url(Provider::Primary, &info("42", Some("bot,identify"), true), 70368744177664),
            "https://discord.com/oauth2/authorize/?permissions=70368744177664&scope=bot,identify&client_id=42&response_type=code"
        );
        assert_eq!(
            url(Provider::Primary, &info("42", Some("identify"), false), 0),
            "https://discord.com/oauth2/authorize/?permissions=0&scope=identify&client_id=42"
        );
    }

    #[test]
    fn embed_links() {
        assert_eq!(
            url(Provider::EmbedPreview, &info("123", None, false), 8),
            "https://discord.now.sh/123?p8"
        );
        assert_eq!(
            url(Provider::EmbedPreview, &info("123", None, true), 8),
            "https://discord.now.sh/123?p8&t1"
        );
        assert_eq!(
            url(Provider::EmbedPreview, &info("123", Some("bot,identify"), false), 8),
            "https://discord.now.sh/123?p8&s9"
        );
        assert_eq!(
            url(Provider::EmbedPreview, &info("123", Some("bot,identify"), true), 8),
            "https://discord.now.sh/123?p8&s9&t1"
        );
    }

    #[test]
    fn embed_link_with_unknown_scope_fails() {
        let result = invite_url(
            Some(Provider::EmbedPreview),
            Some(&info("123", Some("bot,nope"), false)),
            Some(8),
        );
        assert_eq!(result, Err(InviteError::UnknownScope("nope".to_owned())));
    }

    #[test]
    fn blank_or_unrequested_scope_falls_back_to_bot() {
        let mut form = info("7", Some("   "), false);
        assert!(url(Provider::Primary, &form, 1).contains("&scope=bot&"));

        form.scope = Some("identify".to_owned());
        form.has_scope = false;
        assert!(url(Provider::Primary, &form, 1).contains("&scope=bot&"));
        assert_eq!(url(Provider::EmbedPreview, &form, 1), "https://discord.now.sh/7?p1");
    }

    #[test]
    fn missing_fields_give_empty_link() {
        let form = info("123", None, true);
        assert_eq!(
            invite_url(Some(Provider::Primary), Some(&InviteInfo::default()), Some(8)),
            Ok(String::new())
        );
        assert_eq!(invite_url(Some(Provider::Primary), None, Some(8)), Ok(String::new()));
        assert_eq!(invite_url(Some(Provider::Primary), Some(&form), None), Ok(String::new()));
        assert_eq!(invite_url(None, Some(&form), Some(8)), Ok(String::new()));
    }

    #[test]
    fn zero_permissions_still_build_a_link() {
        assert_eq!(
            url(Provider::EmbedPreview, &info("1", None, false), 0),
            "https://discord.now.sh/1?p0"
        );
    }

    #[test]
    fn providers_by_name() {
        assert_eq!("discord".parse::<Provider>(), Ok(Provider::Primary));
        assert_eq!("embed".parse::<Provider>(), Ok(Provider::EmbedPreview));
        assert!("slack".parse::<Provider>().is_err());
    }
}
