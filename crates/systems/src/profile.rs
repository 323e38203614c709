//! User profiles: named bundles of saved client state.

use ron::value::{Map as TagMap, Value as Tag};
use settings::value::{map_get, map_key};
use settings::{bool_setting, string_list_setting, string_setting, Serializable, Setting, Settings};

use crate::system::System;
use crate::util;

pub struct Profile {
    pub settings: Settings,

    pub name: Setting<String>,
    /// Server addresses that load this profile automatically on join.
    pub load_on_join: Setting<Vec<String>>,

    // Which subsystems this profile saves.
    pub save_hud: Setting<bool>,
    pub save_macros: Setting<bool>,
    pub save_modules: Setting<bool>,
    pub save_waypoints: Setting<bool>,
}

impl Profile {
    pub fn new() -> Self {
        let mut settings = Settings::new();
        let sg_general = settings.default_group();
        let sg_save = settings.create_group("save");

        let name = sg_general.add(
            string_setting()
                .name("name")
                .description("Name of the profile.")
                .filter(util::name_filter)
                .build(),
        );

        let load_on_join = sg_general.add(
            string_list_setting()
                .name("load-on-join")
                .description("Load this profile when joining one of these servers.")
                .filter(util::address_filter)
                .build(),
        );

        let save_hud = sg_save.add(
            bool_setting()
                .name("hud")
                .description("Save the HUD layout in this profile.")
                .build(),
        );

        let save_macros = sg_save.add(
            bool_setting()
                .name("macros")
                .description("Save macros in this profile.")
                .build(),
        );

        let save_modules = sg_save.add(
            bool_setting()
                .name("modules")
                .description("Save module configuration in this profile.")
                .build(),
        );

        let save_waypoints = sg_save.add(
            bool_setting()
                .name("waypoints")
                .description("Save waypoints in this profile.")
                .build(),
        );

        Self {
            settings,
            name,
            load_on_join,
            save_hud,
            save_macros,
            save_modules,
            save_waypoints,
        }
    }

    pub fn from_tag_node(tag: &Tag) -> Self {
        let mut profile = Self::new();
        profile.from_tag(tag);
        profile
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Profile {
    fn eq(&self, other: &Self) -> bool {
        self.name.get() == other.name.get()
    }
}

impl Serializable for Profile {
    fn to_tag(&self) -> Tag {
        let mut tag = TagMap::new();
        tag.insert(map_key("settings"), self.settings.to_tag());
        Tag::Map(tag)
    }

    fn from_tag(&mut self, tag: &Tag) {
        let Tag::Map(tag) = tag else {
            log::warn!("profile node is not a map, keeping defaults");
            return;
        };

        if let Some(node) = map_get(tag, "settings") {
            self.settings.from_tag(node);
        }
    }
}

/// All known profiles, serialized as one sequence.
#[derive(Default)]
pub struct Profiles {
    items: Vec<Profile>,
}

impl Profiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a profile, replacing an existing one of the same name.
    pub fn add(&mut self, profile: Profile) {
        self.items.retain(|existing| *existing != profile);
        self.items.push(profile);
    }

    pub fn remove(&mut self, name: &str) {
        self.items.retain(|profile| profile.name.get() != name);
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.items.iter().find(|profile| profile.name.get() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Serializable for Profiles {
    fn to_tag(&self) -> Tag {
        let mut tag = TagMap::new();
        tag.insert(
            map_key("profiles"),
            Tag::Seq(self.items.iter().map(Serializable::to_tag).collect()),
        );
        Tag::Map(tag)
    }

    fn from_tag(&mut self, tag: &Tag) {
        let Tag::Map(tag) = tag else { return };
        let Some(Tag::Seq(nodes)) = map_get(tag, "profiles") else {
            return;
        };

        self.items = nodes.iter().map(Profile::from_tag_node).collect();
    }
}

impl System for Profiles {
    fn name(&self) -> &'static str {
        "profiles"
    }
}
