//! Proxy definitions.

use ron::value::{Map as TagMap, Value as Tag};
use settings::value::{map_get, map_key};
use settings::{
    bool_setting, enum_setting, int_setting, string_setting, Serializable, Setting, Settings,
};
use strum_macros::{Display, EnumIter, EnumString};

use crate::system::System;
use crate::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum ProxyType {
    Socks4,
    Socks5,
}

pub struct Proxy {
    pub settings: Settings,

    pub name: Setting<String>,
    pub kind: Setting<ProxyType>,
    pub address: Setting<String>,
    pub port: Setting<i32>,
    pub enabled: Setting<bool>,

    // Optional credentials
    pub username: Setting<String>,
    pub password: Setting<String>,
}

impl Proxy {
    pub fn new() -> Self {
        let mut settings = Settings::new();
        let sg_general = settings.default_group();
        let sg_optional = settings.create_group("optional");

        let name = sg_general.add(
            string_setting()
                .name("name")
                .description("Name of the proxy.")
                .build(),
        );

        let kind = sg_general.add(
            enum_setting::<ProxyType>()
                .name("type")
                .description("Proxy protocol.")
                .default_value(ProxyType::Socks5)
                .build(),
        );

        let address = sg_general.add(
            string_setting()
                .name("address")
                .description("Address of the proxy server.")
                .filter(util::address_filter)
                .build(),
        );

        let port = sg_general.add(
            int_setting()
                .name("port")
                .description("Port of the proxy server.")
                .range(0, 65535)
                .build(),
        );

        let enabled = sg_general.add(
            bool_setting()
                .name("enabled")
                .description("Whether the proxy is used.")
                .default_value(true)
                .build(),
        );

        let username = sg_optional.add(
            string_setting()
                .name("username")
                .description("Username for the proxy.")
                .build(),
        );

        let password = sg_optional.add(
            string_setting()
                .name("password")
                .description("Password for the proxy.")
                .visible({
                    let kind = kind.clone();
                    move || kind.get() == ProxyType::Socks5
                })
                .build(),
        );

        Self {
            settings,
            name,
            kind,
            address,
            port,
            enabled,
            username,
            password,
        }
    }

    pub fn builder() -> ProxyBuilder {
        ProxyBuilder::default()
    }

    pub fn from_tag_node(tag: &Tag) -> Self {
        let mut proxy = Self::new();
        proxy.from_tag(tag);
        proxy
    }

    /// Syntactic endpoint check; actual reachability is someone else's
    /// problem.
    pub fn valid_endpoint(&self) -> bool {
        self.port.get() > 0 && !self.address.get().trim().is_empty()
    }
}

impl Default for Proxy {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Proxy {
    fn eq(&self, other: &Self) -> bool {
        self.address.get() == other.address.get() && self.port.get() == other.port.get()
    }
}

impl Serializable for Proxy {
    fn to_tag(&self) -> Tag {
        let mut tag = TagMap::new();
        tag.insert(map_key("settings"), self.settings.to_tag());
        Tag::Map(tag)
    }

    fn from_tag(&mut self, tag: &Tag) {
        let Tag::Map(tag) = tag else {
            log::warn!("proxy node is not a map, keeping defaults");
            return;
        };

        if let Some(node) = map_get(tag, "settings") {
            self.settings.from_tag(node);
        }
    }
}

/// Builds a proxy from discrete parameters. Only values that differ from the
/// setting defaults are applied, so a built proxy carries no spurious
/// changes.
pub struct ProxyBuilder {
    kind: ProxyType,
    address: String,
    port: i32,
    name: String,
    username: String,
    enabled: bool,
}

impl Default for ProxyBuilder {
    fn default() -> Self {
        // Builder defaults mirror the setting defaults, so a field that was
        // never overridden is never applied.
        Self {
            kind: ProxyType::Socks5,
            address: String::new(),
            port: 0,
            name: String::new(),
            username: String::new(),
            enabled: true,
        }
    }
}

impl ProxyBuilder {
    pub fn kind(mut self, kind: ProxyType) -> Self {
        self.kind = kind;
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn port(mut self, port: i32) -> Self {
        self.port = port;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn build(self) -> Proxy {
        let proxy = Proxy::new();

        if self.kind != proxy.kind.default_value() {
            let _ = proxy.kind.set(self.kind);
        }
        if self.address != proxy.address.default_value() {
            let _ = proxy.address.set(self.address);
        }
        if self.port != proxy.port.default_value() {
            let _ = proxy.port.set(self.port);
        }
        if self.name != proxy.name.default_value() {
            let _ = proxy.name.set(self.name);
        }
        if self.username != proxy.username.default_value() {
            let _ = proxy.username.set(self.username);
        }
        if self.enabled != proxy.enabled.default_value() {
            let _ = proxy.enabled.set(self.enabled);
        }

        proxy
    }
}

/// All configured proxies, serialized as one sequence.
#[derive(Default)]
pub struct Proxies {
    items: Vec<Proxy>,
}

impl Proxies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a proxy, replacing an existing one with the same endpoint.
    pub fn add(&mut self, proxy: Proxy) {
        self.items.retain(|existing| *existing != proxy);
        self.items.push(proxy);
    }

    /// The enabled proxy, if any. At most one proxy is kept enabled.
    pub fn enabled(&self) -> Option<&Proxy> {
        self.items.iter().find(|proxy| proxy.enabled.get())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Proxy> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Serializable for Proxies {
    fn to_tag(&self) -> Tag {
        let mut tag = TagMap::new();
        tag.insert(
            map_key("proxies"),
            Tag::Seq(self.items.iter().map(Serializable::to_tag).collect()),
        );
        Tag::Map(tag)
    }

    fn from_tag(&mut self, tag: &Tag) {
        let Tag::Map(tag) = tag else { return };
        let Some(Tag::Seq(nodes)) = map_get(tag, "proxies") else {
            return;
        };

        self.items = nodes.iter().map(Proxy::from_tag_node).collect();
    }
}

impl System for Proxies {
    fn name(&self) -> &'static str {
        "proxies"
    }
}
