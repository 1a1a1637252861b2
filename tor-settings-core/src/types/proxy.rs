//! Local proxy configuration types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of local proxy Tor connects through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyType {
    #[default]
    None,
    Socks4,
    Socks5,
    Https,
}

impl ProxyType {
    /// Stable string form used by the proxy type list
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Socks4 => "socks4",
            Self::Socks5 => "socks5",
            Self::Https => "https",
        }
    }

    /// Whether this proxy type accepts a username and password
    #[must_use]
    pub fn supports_credentials(self) -> bool {
        matches!(self, Self::Socks5 | Self::Https)
    }
}

impl fmt::Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProxyType {
    type Err = String;

    /// An empty selection is treated as `None`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(Self::None),
            "socks4" => Ok(Self::Socks4),
            "socks5" => Ok(Self::Socks5),
            "https" => Ok(Self::Https),
            other => Err(format!("Unknown proxy type: '{other}'")),
        }
    }
}

/// Local proxy configuration
///
/// Invariant for every non-`None` variant: `host` is non-empty and `port` is
/// non-zero. The factory functions collapse violating input to `None`.
/// Variants built by hand skip those checks; [`ProxyConfiguration::normalized`]
/// re-applies them, and serialization always goes through it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "lowercase",
    from = "StoredProxyConfiguration",
    into = "StoredProxyConfiguration"
)]
pub enum ProxyConfiguration {
    #[default]
    None,
    Socks4 {
        host: String,
        port: u16,
    },
    Socks5 {
        host: String,
        port: u16,
        username: String,
        password: String,
    },
    Https {
        host: String,
        port: u16,
        username: String,
        password: String,
    },
}

impl ProxyConfiguration {
    #[must_use]
    pub fn none() -> Self {
        Self::None
    }

    #[must_use]
    pub fn socks4(host: impl Into<String>, port: u16) -> Self {
        let host = host.into();
        if !Self::valid_endpoint(&host, port) {
            return Self::None;
        }
        Self::Socks4 { host, port }
    }

    #[must_use]
    pub fn socks5(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let host = host.into();
        if !Self::valid_endpoint(&host, port) {
            return Self::None;
        }
        Self::Socks5 {
            host,
            port,
            username: username.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn https(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let host = host.into();
        if !Self::valid_endpoint(&host, port) {
            return Self::None;
        }
        Self::Https {
            host,
            port,
            username: username.into(),
            password: password.into(),
        }
    }

    fn valid_endpoint(host: &str, port: u16) -> bool {
        !host.trim().is_empty() && port != 0
    }

    /// Re-run the factory checks, collapsing invalid values to `None`
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::None => Self::none(),
            Self::Socks4 { host, port } => Self::socks4(host, port),
            Self::Socks5 {
                host,
                port,
                username,
                password,
            } => Self::socks5(host, port, username, password),
            Self::Https {
                host,
                port,
                username,
                password,
            } => Self::https(host, port, username, password),
        }
    }

    #[must_use]
    pub fn proxy_type(&self) -> ProxyType {
        match self {
            Self::None => ProxyType::None,
            Self::Socks4 { .. } => ProxyType::Socks4,
            Self::Socks5 { .. } => ProxyType::Socks5,
            Self::Https { .. } => ProxyType::Https,
        }
    }

    #[must_use]
    pub fn host(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Socks4 { host, .. } | Self::Socks5 { host, .. } | Self::Https { host, .. } => {
                Some(host)
            }
        }
    }

    #[must_use]
    pub fn port(&self) -> Option<u16> {
        match self {
            Self::None => None,
            Self::Socks4 { port, .. } | Self::Socks5 { port, .. } | Self::Https { port, .. } => {
                Some(*port)
            }
        }
    }

    /// `(username, password)` for the variants that carry credentials
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match self {
            Self::Socks5 {
                username, password, ..
            }
            | Self::Https {
                username, password, ..
            } => Some((username, password)),
            Self::None | Self::Socks4 { .. } => None,
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Proxy URI for outbound requests made on behalf of the pane, such as
    /// asking the bridge distribution service for bridges.
    ///
    /// SOCKS4 is expressed as `socks4a` so host names resolve on the proxy side.
    #[must_use]
    pub fn proxy_uri(&self) -> Option<String> {
        let scheme = match self {
            Self::None => return None,
            Self::Socks4 { .. } => "socks4a",
            Self::Socks5 { .. } => "socks5",
            Self::Https { .. } => "https",
        };
        let host = self.host()?;
        let port = self.port()?;
        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]")
        } else {
            host.to_string()
        };

        let userinfo = match self.credentials() {
            Some((username, password)) if !username.is_empty() => {
                if password.is_empty() {
                    format!("{}@", urlencoding::encode(username))
                } else {
                    format!(
                        "{}:{}@",
                        urlencoding::encode(username),
                        urlencoding::encode(password)
                    )
                }
            }
            _ => String::new(),
        };

        Some(format!("{scheme}://{userinfo}{host}:{port}"))
    }
}

// Keeps passwords out of logs.
impl fmt::Debug for ProxyConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Socks4 { host, port } => f
                .debug_struct("Socks4")
                .field("host", host)
                .field("port", port)
                .finish(),
            Self::Socks5 {
                host,
                port,
                username,
                ..
            } => f
                .debug_struct("Socks5")
                .field("host", host)
                .field("port", port)
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::Https {
                host,
                port,
                username,
                ..
            } => f
                .debug_struct("Https")
                .field("host", host)
                .field("port", port)
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum StoredProxyConfiguration {
    None,
    Socks4 {
        host: String,
        port: u16,
    },
    Socks5 {
        host: String,
        port: u16,
        #[serde(default)]
        username: String,
        #[serde(default)]
        password: String,
    },
    Https {
        host: String,
        port: u16,
        #[serde(default)]
        username: String,
        #[serde(default)]
        password: String,
    },
}

impl From<StoredProxyConfiguration> for ProxyConfiguration {
    fn from(stored: StoredProxyConfiguration) -> Self {
        match stored {
            StoredProxyConfiguration::None => Self::none(),
            StoredProxyConfiguration::Socks4 { host, port } => Self::socks4(host, port),
            StoredProxyConfiguration::Socks5 {
                host,
                port,
                username,
                password,
            } => Self::socks5(host, port, username, password),
            StoredProxyConfiguration::Https {
                host,
                port,
                username,
                password,
            } => Self::https(host, port, username, password),
        }
    }
}

impl From<ProxyConfiguration> for StoredProxyConfiguration {
    fn from(config: ProxyConfiguration) -> Self {
        match config.normalized() {
            ProxyConfiguration::None => Self::None,
            ProxyConfiguration::Socks4 { host, port } => Self::Socks4 { host, port },
            ProxyConfiguration::Socks5 {
                host,
                port,
                username,
                password,
            } => Self::Socks5 {
                host,
                port,
                username,
                password,
            },
            ProxyConfiguration::Https {
                host,
                port,
                username,
                password,
            } => Self::Https {
                host,
                port,
                username,
                password,
            },
        }
    }
}
