//! Tree node helpers and per-kind codecs.
//!
//! The persisted representation of a settings tree is a `ron::Value`. Typed
//! payloads are converted to and from `ron::Value` with a string round-trip,
//! which keeps the codecs independent of the `Value` internals.

use std::fmt::Display;
use std::rc::Rc;
use std::str::FromStr;

use ron::value::{Map as TagMap, Value as Tag};
use serde::{de::DeserializeOwned, Serialize};

use crate::color::Color;
use crate::resolver::NameResolver;

/// Anything that persists itself into a tree node and restores itself from
/// one. Restoring tolerates partial or missing data: absent keys leave the
/// current state untouched.
pub trait Serializable {
    fn to_tag(&self) -> Tag;
    fn from_tag(&mut self, tag: &Tag);
}

/// Convert any serializable value to a `ron::Value`.
pub fn to_value<T: Serialize>(value: &T) -> Option<Tag> {
    let text = ron::to_string(value).ok()?;
    ron::from_str(&text).ok()
}

/// Convert a `ron::Value` back into a typed value. Returns `None` on any
/// mismatch so callers can fall back to their defaults.
pub fn from_value<T: DeserializeOwned>(value: &Tag) -> Option<T> {
    let text = ron::to_string(value).ok()?;
    ron::from_str(&text).ok()
}

pub fn map_key(name: &str) -> Tag {
    Tag::String(name.to_string())
}

pub fn map_get<'a>(map: &'a TagMap, name: &str) -> Option<&'a Tag> {
    map.get(&map_key(name))
}

/// The encode/decode pair for one value kind.
///
/// Decoding is fail-soft: `None` means the payload could not be interpreted
/// and the setting keeps whatever value it currently holds.
pub struct Codec<T> {
    pub(crate) encode: Box<dyn Fn(&T) -> Option<Tag>>,
    pub(crate) decode: Box<dyn Fn(&Tag) -> Option<T>>,
}

impl<T> Codec<T> {
    /// Codec for kinds whose text form survives a `ron::Value` round-trip
    /// (booleans, numbers, strings, string lists).
    pub fn standard() -> Self
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        Codec {
            encode: Box::new(|value| to_value(value)),
            decode: Box::new(|node| from_value(node)),
        }
    }

    /// Codec for enums, encoded by case name. An unknown case name decodes
    /// to `None` and the setting keeps its default.
    pub fn enumeration() -> Self
    where
        T: Display + FromStr + 'static,
    {
        Codec {
            encode: Box::new(|value| Some(Tag::String(value.to_string()))),
            decode: Box::new(|node| match node {
                Tag::String(name) => T::from_str(name).ok(),
                _ => None,
            }),
        }
    }
}

impl Codec<Color> {
    /// Colors persist as a sequence of the four channel values. Struct-style
    /// map nodes do not reparse into a named struct, so the structural codec
    /// cannot be used here.
    pub fn color() -> Self {
        Codec {
            encode: Box::new(|value| {
                Some(Tag::Seq(vec![
                    to_value(&value.r)?,
                    to_value(&value.g)?,
                    to_value(&value.b)?,
                    to_value(&value.a)?,
                ]))
            }),
            decode: Box::new(|node| {
                let Tag::Seq(channels) = node else { return None };
                match channels.as_slice() {
                    [r, g, b, a] => Some(Color::rgba(
                        from_value(r)?,
                        from_value(g)?,
                        from_value(b)?,
                        from_value(a)?,
                    )),
                    _ => None,
                }
            }),
        }
    }
}

impl<T: 'static> Codec<Vec<T>> {
    /// Codec for collections of externally-owned domain objects. Elements are
    /// encoded by their stable identifier and resolved back through the
    /// injected resolver; identifiers that no longer resolve are dropped so
    /// that content removed between versions cannot corrupt a load.
    pub fn reference_list(resolver: Rc<dyn NameResolver<T>>) -> Self {
        let encoder = resolver.clone();
        Codec {
            encode: Box::new(move |items| {
                Some(Tag::Seq(
                    items
                        .iter()
                        .map(|item| Tag::String(encoder.identify(item)))
                        .collect(),
                ))
            }),
            decode: Box::new(move |node| {
                let Tag::Seq(items) = node else { return None };
                let mut resolved = Vec::with_capacity(items.len());
                for item in items {
                    let Tag::String(id) = item else {
                        log::warn!("reference list entry is not an identifier, skipping");
                        continue;
                    };
                    match resolver.resolve(id) {
                        Some(value) => resolved.push(value),
                        None => log::debug!("dropping unresolved reference '{id}'"),
                    }
                }
                Some(resolved)
            }),
        }
    }
}
