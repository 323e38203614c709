//! The process-wide owner container.
//!
//! The original design reached every owner through static getters; here the
//! container is an explicit value created once at startup and passed to
//! whoever needs it, so dependencies stay visible at call sites.

use ron::value::{Map as TagMap, Value as Tag};
use settings::value::{map_get, map_key};
use settings::Serializable;

use crate::config::Config;
use crate::profile::Profiles;
use crate::proxy::Proxies;

/// A named, serializable owner of one settings registry.
pub trait System: Serializable {
    fn name(&self) -> &'static str;
}

pub struct Systems {
    pub config: Config,
    pub profiles: Profiles,
    pub proxies: Proxies,
}

impl Systems {
    pub fn new() -> Self {
        Self {
            config: Config::new(),
            profiles: Profiles::new(),
            proxies: Proxies::new(),
        }
    }
}

impl Default for Systems {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializable for Systems {
    fn to_tag(&self) -> Tag {
        let mut tag = TagMap::new();
        tag.insert(map_key(self.config.name()), self.config.to_tag());
        tag.insert(map_key(self.profiles.name()), self.profiles.to_tag());
        tag.insert(map_key(self.proxies.name()), self.proxies.to_tag());
        Tag::Map(tag)
    }

    fn from_tag(&mut self, tag: &Tag) {
        let Tag::Map(tag) = tag else {
            log::warn!("systems node is not a map, keeping defaults");
            return;
        };

        if let Some(node) = map_get(tag, self.config.name()) {
            self.config.from_tag(node);
        }
        if let Some(node) = map_get(tag, self.profiles.name()) {
            self.profiles.from_tag(node);
        }
        if let Some(node) = map_get(tag, self.proxies.name()) {
            self.proxies.from_tag(node);
        }
    }
}
