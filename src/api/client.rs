//! Router client: one method per configuration concern.

use http::HeaderValue;
use http::header::CONTENT_TYPE;
use serde_json::Value;
use url::Url;

use super::address::{ensure_same_family, ensure_version, parse_cidr, parse_ip, parse_network};
use super::response::{decode, decode_data};
use super::{
    Action, ClientConfig, Endpoint, Error, FORM_CONTENT_TYPE, IpVersion, encode_form, normalize_host,
};
use crate::transport::{HttpClient, HttpRequest, ReqwestClient};

/// MTU written whenever an interface address is set.
const INTERFACE_MTU: &str = "1450";

/// Client for the VyOS HTTP configuration API.
///
/// Each operation validates its arguments, sends a single request and
/// decodes the response. Nothing is retried and no state is kept between
/// calls, so a client can be shared freely across tasks.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation (defaults to [`ReqwestClient`])
///
/// # Example
///
/// ```no_run
/// use vyos_client::{ClientConfig, VyosClient};
///
/// # async fn example() -> Result<(), vyos_client::Error> {
/// let client = VyosClient::new(
///     ClientConfig::new("https://192.0.2.1")
///         .with_api_key("secret")
///         .with_skip_tls_verify(true),
/// )?;
/// client.add_snat(10, "10.20.122.10", "203.0.113.8", "eth2").await?;
/// client.save_config().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VyosClient<H = ReqwestClient> {
    http: H,
    config: ClientConfig,
    base: String,
}

impl VyosClient<ReqwestClient> {
    /// Creates a client that talks to the router over reqwest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHost`] if `config.host` is not an http(s) URL,
    /// or [`Error::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = ReqwestClient::with_settings(config.timeout, config.skip_tls_verify)?;
        Self::with_http_client(config, http)
    }
}

impl<H> VyosClient<H> {
    /// Creates a client on top of an existing HTTP client.
    ///
    /// The timeout and TLS settings in `config` are not applied to `http`;
    /// configure them on the HTTP client directly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHost`] if `config.host` is not an http(s) URL.
    pub fn with_http_client(config: ClientConfig, http: H) -> Result<Self, Error> {
        let base = normalize_host(&config.host).map_err(|reason| Error::InvalidHost {
            host: config.host.clone(),
            reason,
        })?;
        if config.api_key.is_empty() {
            tracing::warn!("No API key configured for {base}, requests will carry an empty key");
        }
        Ok(Self { http, config, base })
    }

    /// Returns the settings this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &H {
        &self.http
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, Error> {
        let raw = format!("{}/{endpoint}", self.base);
        Url::parse(&raw).map_err(|e| Error::InvalidHost {
            host: self.config.host.clone(),
            reason: e.to_string(),
        })
    }
}

impl<H: HttpClient> VyosClient<H> {
    /// Sets the MTU of an ethernet interface and, optionally, an address.
    ///
    /// The MTU is always written as 1450. `address` must be in CIDR
    /// notation; `None` or an empty string only sets the MTU.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a malformed address, or any
    /// transport or API error.
    pub async fn set_address(&self, interface: &str, address: Option<&str>) -> Result<(), Error> {
        let base = ["interfaces", "ethernet", interface];
        let mut actions = vec![Action::set(base).with_segment("mtu").with_segment(INTERFACE_MTU)];

        if let Some(address) = address.filter(|a| !a.is_empty()) {
            parse_cidr("address", address)?;
            actions.push(
                Action::set(base)
                    .with_segment("address")
                    .with_segment(address),
            );
        }

        tracing::debug!("Setting address on {interface}: {address:?}");
        let body = self
            .execute_batch_action(Endpoint::Configure, &actions)
            .await?;
        decode(&body)
    }

    /// Deletes one address from an ethernet interface, or all of them.
    ///
    /// With `None` or an empty string every address on the interface is
    /// removed. Otherwise `address` must be in CIDR notation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a malformed address, or any
    /// transport or API error.
    pub async fn delete_address(
        &self,
        interface: &str,
        address: Option<&str>,
    ) -> Result<(), Error> {
        let mut action = Action::delete(["interfaces", "ethernet", interface, "address"]);
        if let Some(address) = address.filter(|a| !a.is_empty()) {
            parse_cidr("address", address)?;
            action = action.with_segment(address);
        }

        tracing::debug!("Deleting address on {interface}: {address:?}");
        let body = self.execute_action(Endpoint::Configure, &action).await?;
        decode(&body)
    }

    /// Removes the whole configuration of an ethernet interface.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn delete_interface(&self, interface: &str) -> Result<(), Error> {
        let action = Action::delete(["interfaces", "ethernet", interface]);

        tracing::debug!("Deleting interface {interface}");
        let body = self.execute_action(Endpoint::Configure, &action).await?;
        decode(&body)
    }

    /// Writes the running configuration to the boot configuration file.
    ///
    /// Changes made through the other methods are lost on reboot until
    /// this is called.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn save_config(&self) -> Result<(), Error> {
        tracing::debug!("Saving running configuration");
        let body = self
            .execute_action(Endpoint::ConfigFile, &Action::save())
            .await?;
        decode(&body)
    }

    /// Creates a source NAT rule.
    ///
    /// Traffic from `source` leaving through `interface` is rewritten to
    /// `translation`. Both must be IP addresses of the same family.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a malformed address or a family
    /// mismatch, or any transport or API error.
    pub async fn add_snat(
        &self,
        rule: u32,
        source: &str,
        translation: &str,
        interface: &str,
    ) -> Result<(), Error> {
        let source_ip = parse_ip("source address", source)?;
        let translation_ip = parse_ip("translation address", translation)?;
        ensure_same_family((source, source_ip), (translation, translation_ip))?;

        let actions = nat_rule_actions(
            NatKind::Source,
            rule,
            ("outbound-interface", interface),
            ("source", source),
            translation,
        );

        tracing::debug!("Adding SNAT rule {rule}: {source} -> {translation} via {interface}");
        let body = self
            .execute_batch_action(Endpoint::Configure, &actions)
            .await?;
        decode(&body)
    }

    /// Deletes a source NAT rule.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn delete_snat(&self, rule: u32) -> Result<(), Error> {
        tracing::debug!("Deleting SNAT rule {rule}");
        self.delete_nat_rule(NatKind::Source, rule).await
    }

    /// Creates a destination NAT rule.
    ///
    /// Traffic to `destination` arriving on `interface` is rewritten to
    /// `translation`. Both must be IP addresses of the same family.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a malformed address or a family
    /// mismatch, or any transport or API error.
    pub async fn add_dnat(
        &self,
        rule: u32,
        destination: &str,
        translation: &str,
        interface: &str,
    ) -> Result<(), Error> {
        let destination_ip = parse_ip("destination address", destination)?;
        let translation_ip = parse_ip("translation address", translation)?;
        ensure_same_family((destination, destination_ip), (translation, translation_ip))?;

        let actions = nat_rule_actions(
            NatKind::Destination,
            rule,
            ("inbound-interface", interface),
            ("destination", destination),
            translation,
        );

        tracing::debug!(
            "Adding DNAT rule {rule}: {destination} -> {translation} via {interface}"
        );
        let body = self
            .execute_batch_action(Endpoint::Configure, &actions)
            .await?;
        decode(&body)
    }

    /// Deletes a destination NAT rule.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn delete_dnat(&self, rule: u32) -> Result<(), Error> {
        tracing::debug!("Deleting DNAT rule {rule}");
        self.delete_nat_rule(NatKind::Destination, rule).await
    }

    /// Adds a static route.
    ///
    /// `destination` is parsed as CIDR and reduced to its network address,
    /// so `192.168.1.5/24` is configured as `192.168.1.0/24`. Both the
    /// destination and `next_hop` must belong to `version`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for malformed input or a family
    /// mismatch, or any transport or API error.
    pub async fn add_route(
        &self,
        destination: &str,
        next_hop: &str,
        version: IpVersion,
    ) -> Result<(), Error> {
        let network = parse_network("destination", destination)?;
        let next_hop_ip = parse_ip("next hop", next_hop)?;
        ensure_version("destination", destination, network.ip(), version)?;
        ensure_version("next hop", next_hop, next_hop_ip, version)?;

        let network = network.to_string();
        let action = Action::set([
            "protocols",
            "static",
            version.route_node(),
            network.as_str(),
            "next-hop",
            next_hop,
        ]);

        tracing::debug!("Adding {version} route {network} via {next_hop}");
        let body = self.execute_action(Endpoint::Configure, &action).await?;
        decode(&body)
    }

    /// Returns the full running configuration as a JSON tree.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn show_configuration(&self) -> Result<Value, Error> {
        tracing::debug!("Retrieving running configuration");
        let body = self
            .execute_action(Endpoint::Retrieve, &Action::show_config())
            .await?;
        decode_data(&body)
    }

    async fn delete_nat_rule(&self, kind: NatKind, rule: u32) -> Result<(), Error> {
        let rule = rule.to_string();
        let action = Action::delete(["nat", kind.node(), "rule", rule.as_str()]);
        let body = self.execute_action(Endpoint::Configure, &action).await?;
        decode(&body)
    }

    /// Sends one action.
    async fn execute_action(&self, endpoint: Endpoint, action: &Action) -> Result<Vec<u8>, Error> {
        let data = serde_json::to_string(action).map_err(Error::Encode)?;
        self.execute(endpoint, &data).await
    }

    /// Sends several actions in one request, applied in order.
    async fn execute_batch_action(
        &self,
        endpoint: Endpoint,
        actions: &[Action],
    ) -> Result<Vec<u8>, Error> {
        let data = serde_json::to_string(actions).map_err(Error::Encode)?;
        self.execute(endpoint, &data).await
    }

    async fn execute(&self, endpoint: Endpoint, data: &str) -> Result<Vec<u8>, Error> {
        let body = encode_form(data, &self.config.api_key);
        self.post(endpoint, body, FORM_CONTENT_TYPE).await
    }

    /// Posts `body` and returns the raw response body.
    ///
    /// A non-2xx status is an error that still carries the body.
    async fn post(
        &self,
        endpoint: Endpoint,
        body: Vec<u8>,
        content_type: &'static str,
    ) -> Result<Vec<u8>, Error> {
        let url = self.endpoint_url(endpoint)?;
        let request = HttpRequest::post(url)
            .with_header(CONTENT_TYPE, HeaderValue::from_static(content_type))
            .with_body(body);

        let response = self.http.request(request).await?;
        tracing::trace!("{endpoint} answered {}", response.status);

        if !response.is_success() {
            return Err(Error::Status {
                status: response.status,
                body: response.body_lossy(),
            });
        }
        Ok(response.body)
    }
}

#[derive(Debug, Clone, Copy)]
enum NatKind {
    Source,
    Destination,
}

impl NatKind {
    const fn node(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Destination => "destination",
        }
    }
}

/// Builds the three `set` actions that make up a NAT rule.
fn nat_rule_actions(
    kind: NatKind,
    rule: u32,
    (interface_node, interface): (&str, &str),
    (match_node, address): (&str, &str),
    translation: &str,
) -> Vec<Action> {
    let rule = rule.to_string();
    let base = ["nat", kind.node(), "rule", rule.as_str()];
    vec![
        Action::set(base)
            .with_segment(interface_node)
            .with_segment(interface),
        Action::set(base)
            .with_segment(match_node)
            .with_segment("address")
            .with_segment(address),
        Action::set(base)
            .with_segment("translation")
            .with_segment("address")
            .with_segment(translation),
    ]
}
