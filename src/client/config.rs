use serde::Deserialize;

/// Gateway settings as an application would store them.
///
/// The crate never loads this itself; deserialize it from whatever source the
/// application uses and hand it to [`super::GatewayClientBuilder::from_config`].
/// Blank `name` and `affix` values are treated as unset.
#[derive(Clone, Deserialize)]
pub struct GatewayConfig {
    pub account: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub affix: Option<String>,
    #[serde(default)]
    pub send_url: Option<String>,
    #[serde(default)]
    pub quota_url: Option<String>,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("account", &self.account)
            .field("password", &"***")
            .field("name", &self.name)
            .field("affix", &self.affix)
            .field("send_url", &self.send_url)
            .field("quota_url", &self.quota_url)
            .finish()
    }
}

pub(super) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|it| !it.trim().is_empty())
}
