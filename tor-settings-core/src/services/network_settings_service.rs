//! Network settings controller for the Tor preferences pane
//!
//! Holds the three current configuration values (bridges, local proxy, local
//! firewall) for as long as the pane is open. Every mutation goes through one
//! of the commit methods, which write through the matching store immediately.

use std::sync::Arc;

use crate::error::CoreResult;
use crate::parse::{parse_bridge_strings, parse_port, parse_port_list};
use crate::services::ServiceContext;
use crate::types::{
    BridgeConfiguration, BridgeEnablement, BridgeForm, BridgeSource, DomainState,
    FirewallConfiguration, FirewallEnablement, FirewallForm, PaneEnablement,
    ProxyConfiguration, ProxyEnablement, ProxyForm, ProxyType,
};

/// Network settings controller
///
/// Single owner, single threaded: each method runs to completion before the
/// next UI event is handled, so commits apply in event order.
pub struct NetworkSettingsService {
    ctx: Arc<ServiceContext>,

    bridges: BridgeConfiguration,
    proxy: ProxyConfiguration,
    firewall: FirewallConfiguration,

    use_bridges: bool,
    /// Last radio selection; never `BridgeSource::None`
    bridge_source: BridgeSource,
    use_proxy: bool,
    /// Last proxy type selection
    proxy_type: ProxyType,
    use_firewall: bool,
}

impl NetworkSettingsService {
    /// Create a controller. Call [`Self::initialize`] before use.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            bridges: BridgeConfiguration::None,
            proxy: ProxyConfiguration::None,
            firewall: FirewallConfiguration::None,
            use_bridges: false,
            bridge_source: BridgeSource::Builtin,
            use_proxy: false,
            proxy_type: ProxyType::None,
            use_firewall: false,
        }
    }

    /// Whether the pane should be offered at all
    pub fn is_pane_enabled(&self) -> bool {
        self.ctx.protocol_service().owns_tor_daemon()
    }

    /// Load all three configurations and derive the initial enablement
    pub fn initialize(&mut self) -> PaneEnablement {
        self.bridges = self.ctx.bridge_store().read();
        self.use_bridges = !self.bridges.is_none();
        self.bridge_source = match self.bridges.source() {
            BridgeSource::None => BridgeSource::Builtin,
            source => source,
        };

        self.proxy = self.ctx.proxy_store().read();
        self.use_proxy = !self.proxy.is_none();
        self.proxy_type = self.proxy.proxy_type();

        self.firewall = self.ctx.firewall_store().read();
        self.use_firewall = self.firewall.has_ports();

        log::debug!(
            "Network settings loaded: bridges={}, proxy={}, firewall ports={}",
            self.bridges.source(),
            self.proxy_type,
            self.firewall.allowed_ports().len()
        );

        self.pane_enablement()
    }

    /// Enablement of every section for the current state
    pub fn pane_enablement(&self) -> PaneEnablement {
        PaneEnablement {
            bridges: self.bridge_enablement(),
            proxy: self.proxy_enablement(),
            firewall: FirewallEnablement {
                allowed_ports: self.use_firewall,
            },
        }
    }

    // ===== Bridges =====

    /// "Use a bridge" checkbox toggled
    pub fn set_bridge_use_enabled(&mut self, enabled: bool) -> BridgeEnablement {
        self.use_bridges = enabled;
        self.bridge_enablement()
    }

    /// Radio option selected
    ///
    /// The enabled group follows `source` directly, whatever the checkbox says.
    pub fn select_bridge_source(&mut self, source: BridgeSource) -> BridgeEnablement {
        if source != BridgeSource::None {
            self.bridge_source = source;
        }
        BridgeEnablement::new(self.use_bridges, source)
    }

    /// Build a bridge configuration from the form and store it
    ///
    /// Empty selections fall back to `None` rather than failing.
    pub fn commit_bridge_configuration(
        &mut self,
        form: &BridgeForm,
    ) -> CoreResult<BridgeConfiguration> {
        let config = if form.use_bridges {
            self.bridge_configuration_for(form)
        } else {
            BridgeConfiguration::None
        };

        self.write_bridges(&config)?;

        self.use_bridges = form.use_bridges;
        if form.source != BridgeSource::None {
            self.bridge_source = form.source;
        }
        log::info!("Bridge settings saved: {}", config.source());
        Ok(config)
    }

    fn bridge_configuration_for(&self, form: &BridgeForm) -> BridgeConfiguration {
        match form.source {
            BridgeSource::None => BridgeConfiguration::None,
            BridgeSource::Builtin => {
                let bridge_type = form.builtin_type.trim();
                if bridge_type.is_empty() {
                    return BridgeConfiguration::None;
                }
                let known = self
                    .builtin_bridge_types()
                    .iter()
                    .any(|t| t == bridge_type);
                if !known {
                    log::warn!("Unknown builtin bridge type '{bridge_type}', using no bridges");
                    return BridgeConfiguration::None;
                }
                BridgeConfiguration::builtin(bridge_type)
            }
            BridgeSource::RequestedFromProvider => BridgeConfiguration::requested_from_provider(
                parse_bridge_strings(&form.requested_bridges),
            ),
            BridgeSource::UserProvided => {
                BridgeConfiguration::user_provided(parse_bridge_strings(&form.user_bridges))
            }
        }
    }

    /// Store bridges handed out by the bridge distribution service
    ///
    /// Returns `Ok(None)` and changes nothing when `bridge_lines` holds no
    /// usable line.
    pub fn apply_requested_bridges(
        &mut self,
        bridge_lines: Vec<String>,
    ) -> CoreResult<Option<BridgeConfiguration>> {
        let bridge_lines: Vec<String> = bridge_lines
            .iter()
            .flat_map(|line| parse_bridge_strings(line))
            .collect();
        if bridge_lines.is_empty() {
            log::info!("Bridge provider returned no bridges");
            return Ok(None);
        }

        let config = BridgeConfiguration::requested_from_provider(bridge_lines);
        self.write_bridges(&config)?;

        self.use_bridges = true;
        self.bridge_source = BridgeSource::RequestedFromProvider;
        log::info!(
            "Saved {} bridges from the bridge provider",
            config.bridge_lines().len()
        );
        Ok(Some(config))
    }

    fn write_bridges(&mut self, config: &BridgeConfiguration) -> CoreResult<()> {
        self.ctx
            .bridge_store()
            .write(config)
            .inspect_err(|e| log::error!("Failed to save bridge settings: {e}"))?;
        self.bridges = config.clone();
        Ok(())
    }

    fn bridge_enablement(&self) -> BridgeEnablement {
        let effective = if self.use_bridges {
            self.bridge_source
        } else {
            BridgeSource::None
        };
        BridgeEnablement::new(self.use_bridges, effective)
    }

    // ===== Local proxy =====

    /// "I use a proxy" checkbox toggled
    ///
    /// Disabling blanks the live fields only; the stored proxy is kept until
    /// the next commit.
    pub fn set_proxy_use_enabled(&mut self, enabled: bool) -> ProxyEnablement {
        self.use_proxy = enabled;
        self.proxy_enablement()
    }

    /// Proxy type selected
    pub fn select_proxy_type(&mut self, proxy_type: ProxyType) -> ProxyEnablement {
        self.proxy_type = proxy_type;
        ProxyEnablement::for_type(proxy_type, self.use_proxy)
    }

    /// Build a proxy configuration from the form and store it
    ///
    /// An unparsable port rejects the whole commit and leaves the stored
    /// configuration untouched. A blank address falls back to `None`.
    pub fn commit_proxy_configuration(
        &mut self,
        form: &ProxyForm,
    ) -> CoreResult<ProxyConfiguration> {
        let config = if form.use_proxy {
            Self::proxy_configuration_for(form)
                .inspect_err(|e| log::warn!("Proxy settings rejected: {e}"))?
        } else {
            ProxyConfiguration::None
        };

        self.ctx
            .proxy_store()
            .write(&config)
            .inspect_err(|e| log::error!("Failed to save proxy settings: {e}"))?;

        self.proxy = config.clone();
        self.use_proxy = form.use_proxy;
        self.proxy_type = form.proxy_type;
        match (config.host(), config.port()) {
            (Some(host), Some(port)) => {
                log::info!("Proxy settings saved: {} {host}:{port}", config.proxy_type());
            }
            _ => log::info!("Proxy settings saved: none"),
        }
        Ok(config)
    }

    fn proxy_configuration_for(form: &ProxyForm) -> CoreResult<ProxyConfiguration> {
        if form.proxy_type == ProxyType::None {
            return Ok(ProxyConfiguration::None);
        }

        let port = parse_port(&form.port)?;
        let host = form.address.trim();
        Ok(match form.proxy_type {
            ProxyType::None => ProxyConfiguration::None,
            ProxyType::Socks4 => ProxyConfiguration::socks4(host, port),
            ProxyType::Socks5 => ProxyConfiguration::socks5(
                host,
                port,
                form.username.as_str(),
                form.password.as_str(),
            ),
            ProxyType::Https => ProxyConfiguration::https(
                host,
                port,
                form.username.as_str(),
                form.password.as_str(),
            ),
        })
    }

    fn proxy_enablement(&self) -> ProxyEnablement {
        if self.use_proxy {
            ProxyEnablement::for_type(self.proxy_type, true)
        } else {
            ProxyEnablement::disabled()
        }
    }

    /// Outbound proxy URI for requests the pane makes itself
    pub fn proxy_uri(&self) -> Option<String> {
        self.proxy.proxy_uri()
    }

    // ===== Local firewall =====

    /// "My firewall only allows certain ports" checkbox toggled
    pub fn set_firewall_use_enabled(&mut self, enabled: bool) -> FirewallEnablement {
        self.use_firewall = enabled;
        FirewallEnablement {
            allowed_ports: enabled,
        }
    }

    /// Build a firewall configuration from the form and store it
    pub fn commit_firewall_configuration(
        &mut self,
        form: &FirewallForm,
    ) -> CoreResult<FirewallConfiguration> {
        let config = if form.use_firewall && !form.allowed_ports.trim().is_empty() {
            let ports = parse_port_list(&form.allowed_ports)
                .inspect_err(|e| log::warn!("Firewall settings rejected: {e}"))?;
            FirewallConfiguration::custom(ports)
        } else {
            FirewallConfiguration::None
        };

        self.ctx
            .firewall_store()
            .write(&config)
            .inspect_err(|e| log::error!("Failed to save firewall settings: {e}"))?;

        self.firewall = config.clone();
        self.use_firewall = form.use_firewall;
        log::info!(
            "Firewall settings saved: {} allowed ports",
            config.allowed_ports().len()
        );
        Ok(config)
    }

    // ===== Pane lifecycle =====

    /// The pane lost focus: have the daemon write its settings to disk
    pub fn on_focus_lost(&self) -> CoreResult<()> {
        self.ctx
            .protocol_service()
            .flush_settings()
            .inspect_err(|e| log::error!("Failed to flush Tor settings: {e}"))
    }

    /// Daemon log text for the log viewer
    pub fn tor_logs(&self) -> CoreResult<String> {
        self.ctx
            .protocol_service()
            .tor_logs()
            .inspect_err(|e| log::error!("Failed to read Tor logs: {e}"))
    }

    // ===== Accessors =====

    pub fn bridge_configuration(&self) -> &BridgeConfiguration {
        &self.bridges
    }

    pub fn proxy_configuration(&self) -> &ProxyConfiguration {
        &self.proxy
    }

    pub fn firewall_configuration(&self) -> &FirewallConfiguration {
        &self.firewall
    }

    /// Transports for the builtin bridge list
    pub fn builtin_bridge_types(&self) -> Vec<String> {
        self.ctx.bridge_store().default_bridge_types()
    }

    pub fn bridge_state(&self) -> DomainState {
        DomainState::derive(self.use_bridges, !self.bridges.is_none())
    }

    pub fn proxy_state(&self) -> DomainState {
        DomainState::derive(self.use_proxy, !self.proxy.is_none())
    }

    pub fn firewall_state(&self) -> DomainState {
        DomainState::derive(self.use_firewall, self.firewall.has_ports())
    }

    /// Bridges section contents for pre-filling the form
    pub fn bridge_form(&self) -> BridgeForm {
        BridgeForm {
            use_bridges: self.use_bridges,
            ..BridgeForm::from_configuration(&self.bridges, self.bridge_source)
        }
    }

    pub fn proxy_form(&self) -> ProxyForm {
        ProxyForm {
            use_proxy: self.use_proxy,
            ..ProxyForm::from_configuration(&self.proxy)
        }
    }

    pub fn firewall_form(&self) -> FirewallForm {
        FirewallForm {
            use_firewall: self.use_firewall,
            ..FirewallForm::from_configuration(&self.firewall)
        }
    }
}
