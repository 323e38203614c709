//! Setting groups and the per-owner settings registry.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ron::value::{Map as TagMap, Value as Tag};

use crate::setting::{AnySetting, Setting};
use crate::value::{map_key, Serializable};

/// Name of the implicit group every registry starts with.
pub const DEFAULT_GROUP: &str = "general";

struct GroupInner {
    name: String,
    settings: Vec<Rc<dyn AnySetting>>,
    dirty: Rc<Cell<bool>>,
}

/// Ordered, named collection of settings. Insertion order is display order
/// and is preserved through persistence; lookup is by name.
#[derive(Clone)]
pub struct SettingGroup {
    inner: Rc<RefCell<GroupInner>>,
}

impl SettingGroup {
    fn new(name: String, dirty: Rc<Cell<bool>>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(GroupInner {
                name,
                settings: Vec::new(),
                dirty,
            })),
        }
    }

    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    /// Append a setting and hand the typed handle back for fluent chaining.
    /// A duplicate name within the group is a framework-misuse bug and
    /// panics.
    pub fn add<T: Clone + 'static>(&self, setting: Setting<T>) -> Setting<T> {
        let mut inner = self.inner.borrow_mut();
        assert!(
            inner
                .settings
                .iter()
                .all(|existing| existing.name() != setting.name()),
            "duplicate setting name '{}' in group '{}'",
            setting.name(),
            inner.name
        );

        setting.cell.bind_dirty(inner.dirty.clone());
        let erased: Rc<dyn AnySetting> = setting.cell.clone();
        inner.settings.push(erased);
        drop(inner);

        setting
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn AnySetting>> {
        self.inner
            .borrow()
            .settings
            .iter()
            .find(|setting| setting.name() == name)
            .cloned()
    }

    /// Settings in declared order, for UI construction.
    pub fn settings(&self) -> Vec<Rc<dyn AnySetting>> {
        self.inner.borrow().settings.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().settings.is_empty()
    }

    fn to_tag(&self) -> Tag {
        let inner = self.inner.borrow();
        let mut map = TagMap::new();
        for setting in &inner.settings {
            match setting.to_tag() {
                Some(node) => {
                    map.insert(map_key(setting.name()), node);
                }
                None => log::warn!("could not encode setting '{}', skipping", setting.name()),
            }
        }
        Tag::Map(map)
    }

    fn from_tag(&self, node: &Tag) {
        let Tag::Map(map) = node else {
            log::warn!("group node for '{}' is not a map, ignoring", self.name());
            return;
        };

        let inner = self.inner.borrow();
        for (key, payload) in map.iter() {
            let Tag::String(name) = key else { continue };
            match inner.settings.iter().find(|setting| setting.name() == name) {
                Some(setting) => setting.from_tag(payload),
                None => log::debug!("skipping unknown setting '{name}' in group '{}'", inner.name),
            }
        }
    }

    fn activated(&self) {
        for setting in self.inner.borrow().settings.iter() {
            setting.activated();
        }
    }
}

/// The full set of setting groups belonging to one owner. Always contains
/// one default group, created at construction.
pub struct Settings {
    groups: Vec<SettingGroup>,
    dirty: Rc<Cell<bool>>,
}

impl Settings {
    pub fn new() -> Self {
        let dirty = Rc::new(Cell::new(false));
        let default_group = SettingGroup::new(DEFAULT_GROUP.to_string(), dirty.clone());
        Self {
            groups: vec![default_group],
            dirty,
        }
    }

    pub fn default_group(&self) -> SettingGroup {
        self.groups[0].clone()
    }

    /// Append a new named group. A duplicate group name is a
    /// framework-misuse bug and panics.
    pub fn create_group(&mut self, name: impl Into<String>) -> SettingGroup {
        let name = name.into();
        assert!(
            self.groups.iter().all(|group| group.name() != name),
            "duplicate settings group '{name}'"
        );

        let group = SettingGroup::new(name, self.dirty.clone());
        self.groups.push(group.clone());
        group
    }

    pub fn group(&self, name: &str) -> Option<SettingGroup> {
        self.groups
            .iter()
            .find(|group| group.name() == name)
            .cloned()
    }

    /// Groups in declared order, for UI construction.
    pub fn groups(&self) -> Vec<SettingGroup> {
        self.groups.clone()
    }

    /// True after any setting changed since construction or the last
    /// [`Settings::mark_saved`] / [`Serializable::from_tag`].
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    pub fn mark_saved(&self) {
        self.dirty.set(false);
    }

    /// Fan the owner-activated lifecycle event out to every setting.
    pub fn activated(&self) {
        for group in &self.groups {
            group.activated();
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializable for Settings {
    fn to_tag(&self) -> Tag {
        let mut root = TagMap::new();
        for group in &self.groups {
            root.insert(map_key(&group.name()), group.to_tag());
        }
        Tag::Map(root)
    }

    fn from_tag(&mut self, tag: &Tag) {
        let Tag::Map(root) = tag else {
            log::warn!("settings node is not a map, keeping defaults");
            return;
        };

        for (key, node) in root.iter() {
            let Tag::String(name) = key else { continue };
            match self.group(name) {
                Some(group) => group.from_tag(node),
                None => log::debug!("skipping unknown settings group '{name}'"),
            }
        }

        // A freshly loaded tree is in sync with its persisted form.
        self.dirty.set(false);
    }
}
