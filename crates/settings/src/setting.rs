//! A single named, typed configuration cell and its builder.

use std::cell::{Cell, RefCell};
use std::fmt::Display;
use std::rc::Rc;
use std::str::FromStr;

use ron::value::Value as Tag;
use strum::IntoEnumIterator;

use crate::color::Color;
use crate::errors::SettingError;
use crate::resolver::NameResolver;
use crate::value::Codec;

/// Outcome of applying a constraint to an incoming value: numeric bounds
/// clamp, content filters reject. The policy is fixed per constraint kind in
/// the builder methods, never inferred from the value.
type Constrain<T> = Box<dyn Fn(T) -> Result<T, ()>>;

pub(crate) struct SettingCell<T> {
    name: String,
    description: String,
    default: T,
    value: RefCell<T>,
    choices: Vec<T>,
    codec: Codec<T>,
    constrain: Option<Constrain<T>>,
    visible: Option<Rc<dyn Fn() -> bool>>,
    on_changed: Option<Box<dyn Fn(&T)>>,
    on_activated: Option<Box<dyn Fn(&T)>>,
    dirty: RefCell<Option<Rc<Cell<bool>>>>,
}

impl<T: Clone> SettingCell<T> {
    fn set_value(&self, value: T) -> Result<(), SettingError> {
        let value = match &self.constrain {
            Some(constrain) => constrain(value).map_err(|_| SettingError::Rejected {
                setting: self.name.clone(),
            })?,
            None => value,
        };

        *self.value.borrow_mut() = value;
        if let Some(flag) = self.dirty.borrow().as_ref() {
            flag.set(true);
        }

        // The value is committed before the callback observes it; the borrow
        // is released first so the callback may read or set settings freely.
        if let Some(callback) = &self.on_changed {
            let current = self.value.borrow().clone();
            callback(&current);
        }

        Ok(())
    }

    pub(crate) fn bind_dirty(&self, flag: Rc<Cell<bool>>) {
        *self.dirty.borrow_mut() = Some(flag);
    }
}

/// Object-safe view of a setting, used by groups for persistence and by UI
/// construction code that enumerates settings without knowing their kinds.
pub trait AnySetting {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn is_visible(&self) -> bool;
    /// Encode the current value; `None` means the value could not be encoded
    /// and the caller should skip this setting.
    fn to_tag(&self) -> Option<Tag>;
    /// Decode a persisted payload. Malformed or rejected payloads leave the
    /// current value untouched.
    fn from_tag(&self, node: &Tag);
    fn reset(&self);
    /// Fire the activation lifecycle hook, if any.
    fn activated(&self);
}

impl<T: Clone + 'static> AnySetting for SettingCell<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn is_visible(&self) -> bool {
        self.visible.as_ref().map_or(true, |predicate| predicate())
    }

    fn to_tag(&self) -> Option<Tag> {
        (self.codec.encode)(&self.value.borrow())
    }

    fn from_tag(&self, node: &Tag) {
        match (self.codec.decode)(node) {
            Some(value) => {
                if self.set_value(value).is_err() {
                    log::warn!(
                        "persisted value for setting '{}' rejected by filter, keeping current value",
                        self.name
                    );
                }
            }
            None => log::warn!(
                "could not decode persisted value for setting '{}', keeping current value",
                self.name
            ),
        }
    }

    fn reset(&self) {
        let _ = self.set_value(self.default.clone());
    }

    fn activated(&self) {
        if let Some(callback) = &self.on_activated {
            let current = self.value.borrow().clone();
            callback(&current);
        }
    }
}

/// Cheap-to-clone handle to one configuration cell. Handles are shared
/// between the owning group and whoever needs typed access (owner fields,
/// visibility predicates, composite settings). Single-threaded by contract.
pub struct Setting<T> {
    pub(crate) cell: Rc<SettingCell<T>>,
}

impl<T> Clone for Setting<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<T: Clone + 'static> Setting<T> {
    /// Current value.
    pub fn get(&self) -> T {
        self.cell.value.borrow().clone()
    }

    /// Validate and commit a new value. Out-of-range numeric input is clamped
    /// to the nearest bound; input failing a content filter is rejected and
    /// the prior value retained. On success the change callback fires exactly
    /// once, after the commit, and the owning registry is marked dirty.
    pub fn set(&self, value: T) -> Result<(), SettingError> {
        self.cell.set_value(value)
    }

    pub fn default_value(&self) -> T {
        self.cell.default.clone()
    }

    pub fn name(&self) -> &str {
        &self.cell.name
    }

    pub fn description(&self) -> &str {
        &self.cell.description
    }

    /// Evaluates the visibility predicate against the current values of the
    /// settings it closes over. Defaults to visible.
    pub fn is_visible(&self) -> bool {
        AnySetting::is_visible(&*self.cell)
    }

    pub fn reset(&self) {
        AnySetting::reset(&*self.cell);
    }

    /// Selectable values, populated for enum settings; empty otherwise.
    pub fn choices(&self) -> &[T] {
        &self.cell.choices
    }
}

/// Builder for a [`Setting`]. Obtained through the per-kind constructors
/// (`bool_setting`, `int_setting`, ...) which pre-wire the codec, the kind
/// default and the constraint policy of that kind.
pub struct SettingBuilder<T> {
    name: Option<String>,
    description: String,
    default: Option<T>,
    choices: Vec<T>,
    codec: Codec<T>,
    constrain: Option<Constrain<T>>,
    clamp_min: Option<T>,
    clamp_max: Option<T>,
    visible: Option<Rc<dyn Fn() -> bool>>,
    on_changed: Option<Box<dyn Fn(&T)>>,
    on_activated: Option<Box<dyn Fn(&T)>>,
}

impl<T> SettingBuilder<T> {
    fn with_codec(codec: Codec<T>) -> Self {
        Self {
            name: None,
            description: String::new(),
            default: None,
            choices: Vec::new(),
            codec,
            constrain: None,
            clamp_min: None,
            clamp_max: None,
            visible: None,
            on_changed: None,
            on_activated: None,
        }
    }

    /// Internal name and display label, unique within the group.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn default_value(mut self, default: impl Into<T>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Visibility predicate, evaluated lazily against other settings'
    /// current values. The closed-over settings must belong to the same
    /// registry and must already be constructed when this one is built.
    pub fn visible(mut self, predicate: impl Fn() -> bool + 'static) -> Self {
        self.visible = Some(Rc::new(predicate));
        self
    }

    /// Change callback, fired after every successful `set`.
    pub fn on_changed(mut self, callback: impl Fn(&T) + 'static) -> Self {
        self.on_changed = Some(Box::new(callback));
        self
    }

    /// Lifecycle hook fired when the owner is activated.
    pub fn on_activated(mut self, callback: impl Fn(&T) + 'static) -> Self {
        self.on_activated = Some(Box::new(callback));
        self
    }

    /// Finish the setting. Panics if no name was given; a missing name is a
    /// programming error, not a runtime condition.
    pub fn build(self) -> Setting<T>
    where
        T: Clone + 'static,
    {
        let name = self.name.expect("setting requires a name");
        let default = self.default.expect("setting requires a default value");

        Setting {
            cell: Rc::new(SettingCell {
                name,
                description: self.description,
                value: RefCell::new(default.clone()),
                default,
                choices: self.choices,
                codec: self.codec,
                constrain: self.constrain,
                visible: self.visible,
                on_changed: self.on_changed,
                on_activated: self.on_activated,
                dirty: RefCell::new(None),
            }),
        }
    }
}

macro_rules! numeric_builder {
    ($ty:ty) => {
        impl SettingBuilder<$ty> {
            /// Inclusive lower bound; values below it are clamped up.
            pub fn min(mut self, min: $ty) -> Self {
                self.clamp_min = Some(min);
                self.rebuild_clamp()
            }

            /// Inclusive upper bound; values above it are clamped down.
            pub fn max(mut self, max: $ty) -> Self {
                self.clamp_max = Some(max);
                self.rebuild_clamp()
            }

            pub fn range(mut self, min: $ty, max: $ty) -> Self {
                self.clamp_min = Some(min);
                self.clamp_max = Some(max);
                self.rebuild_clamp()
            }

            fn rebuild_clamp(mut self) -> Self {
                let (min, max) = (self.clamp_min, self.clamp_max);
                self.constrain = Some(Box::new(move |mut value: $ty| {
                    if let Some(min) = min {
                        if value < min {
                            value = min;
                        }
                    }
                    if let Some(max) = max {
                        if value > max {
                            value = max;
                        }
                    }
                    Ok(value)
                }));
                self
            }
        }
    };
}

numeric_builder!(i32);
numeric_builder!(f64);

impl SettingBuilder<String> {
    /// Content filter: input failing the predicate is rejected outright and
    /// the prior value retained.
    pub fn filter(mut self, accept: impl Fn(&str) -> bool + 'static) -> Self {
        self.constrain = Some(Box::new(move |value: String| {
            if accept(&value) {
                Ok(value)
            } else {
                Err(())
            }
        }));
        self
    }
}

impl SettingBuilder<Vec<String>> {
    /// Per-element content filter; a list with any rejected element is
    /// rejected as a whole.
    pub fn filter(mut self, accept: impl Fn(&str) -> bool + 'static) -> Self {
        self.constrain = Some(Box::new(move |values: Vec<String>| {
            if values.iter().all(|value| accept(value)) {
                Ok(values)
            } else {
                Err(())
            }
        }));
        self
    }
}

pub fn bool_setting() -> SettingBuilder<bool> {
    SettingBuilder::with_codec(Codec::standard()).default_value(false)
}

pub fn int_setting() -> SettingBuilder<i32> {
    SettingBuilder::with_codec(Codec::standard()).default_value(0)
}

pub fn float_setting() -> SettingBuilder<f64> {
    SettingBuilder::with_codec(Codec::standard()).default_value(0.0)
}

pub fn string_setting() -> SettingBuilder<String> {
    SettingBuilder::with_codec(Codec::standard()).default_value(String::new())
}

pub fn color_setting() -> SettingBuilder<Color> {
    SettingBuilder::with_codec(Codec::color()).default_value(Color::WHITE)
}

pub fn string_list_setting() -> SettingBuilder<Vec<String>> {
    SettingBuilder::with_codec(Codec::standard()).default_value(Vec::new())
}

/// Enum setting, encoded by case name. Defaults to the first declared
/// variant; the variant list is exposed through [`Setting::choices`].
pub fn enum_setting<T>() -> SettingBuilder<T>
where
    T: IntoEnumIterator + Display + FromStr + Clone + 'static,
{
    let choices: Vec<T> = T::iter().collect();
    let default = choices
        .first()
        .cloned()
        .expect("enum setting requires at least one variant");
    let mut builder = SettingBuilder::with_codec(Codec::enumeration()).default_value(default);
    builder.choices = choices;
    builder
}

/// Collection of references to externally-owned domain objects, persisted by
/// stable identifier through the given resolver. Defaults to empty.
pub fn reference_list_setting<T: Clone + 'static>(
    resolver: impl NameResolver<T> + 'static,
) -> SettingBuilder<Vec<T>> {
    let resolver: Rc<dyn NameResolver<T>> = Rc::new(resolver);
    SettingBuilder::with_codec(Codec::reference_list(resolver)).default_value(Vec::new())
}
