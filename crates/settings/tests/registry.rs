//! Integration tests for the settings registry:
//! - Round-trip through a persisted tree node (via RON text)
//! - Default preservation on partial or malformed data
//! - Constraint policies (clamping vs. rejection)
//! - Reference-collection resolution and drop-on-unresolved
//! - Composite state priority and visibility gating

use std::cell::Cell;
use std::rc::Rc;

use ron::value::Value as Tag;
use settings::value::map_get;
use settings::{
    bool_setting, color_setting, enum_setting, float_setting, int_setting,
    reference_list_setting, string_list_setting, string_setting, AnySetting, Color, NameResolver,
    Serializable, Settings, ThreeStateColorSetting,
};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
enum Mode {
    Flat,
    Rainbow,
    Random,
}

/// Minimal domain object registry standing in for an externally-owned one.
struct Items(Vec<&'static str>);

impl NameResolver<String> for Items {
    fn resolve(&self, id: &str) -> Option<String> {
        self.0.iter().find(|item| **item == id).map(|s| s.to_string())
    }

    fn identify(&self, value: &String) -> String {
        value.clone()
    }
}

fn roundtrip(settings: &Settings) -> Tag {
    let text = ron::to_string(&settings.to_tag()).expect("serialize tree");
    ron::from_str(&text).expect("parse tree")
}

#[test]
fn round_trip_reproduces_values() {
    let build = || {
        let mut settings = Settings::new();
        let sg = settings.default_group();
        let sg_extra = settings.create_group("extra");

        let enabled = sg.add(bool_setting().name("enabled").build());
        let count = sg.add(int_setting().name("count").default_value(3).build());
        let speed = sg.add(float_setting().name("speed").default_value(0.5).build());
        let label = sg.add(string_setting().name("label").default_value("hi").build());
        let tint = sg_extra.add(
            color_setting()
                .name("tint")
                .default_value(Color::rgb(0, 255, 180))
                .build(),
        );
        let mode = sg_extra.add(enum_setting::<Mode>().name("mode").build());
        let tags = sg_extra.add(string_list_setting().name("tags").build());

        (settings, enabled, count, speed, label, tint, mode, tags)
    };

    let (settings, enabled, count, speed, label, tint, mode, tags) = build();
    enabled.set(true).unwrap();
    count.set(42).unwrap();
    speed.set(1.25).unwrap();
    label.set("renamed".to_string()).unwrap();
    tint.set(Color::rgba(1, 2, 3, 4)).unwrap();
    mode.set(Mode::Random).unwrap();
    tags.set(vec!["a".into(), "b".into()]).unwrap();

    let tag = roundtrip(&settings);

    let (mut fresh, enabled, count, speed, label, tint, mode, tags) = build();
    fresh.from_tag(&tag);

    assert_eq!(enabled.get(), true);
    assert_eq!(count.get(), 42);
    assert_eq!(speed.get(), 1.25);
    assert_eq!(label.get(), "renamed");
    assert_eq!(tint.get(), Color::rgba(1, 2, 3, 4));
    assert_eq!(mode.get(), Mode::Random);
    assert_eq!(tags.get(), vec!["a".to_string(), "b".to_string()]);
    assert!(!fresh.is_dirty(), "freshly loaded registry is in sync");
}

#[test]
fn color_settings_survive_the_text_form() {
    let build = || {
        let settings = Settings::new();
        let tint = settings
            .default_group()
            .add(color_setting().name("tint").build());
        (settings, tint)
    };

    let (settings, tint) = build();
    tint.set(Color::rgba(9, 8, 7, 6)).unwrap();
    let tag = roundtrip(&settings);

    // Colors persist as a plain 4-channel sequence.
    let Tag::Map(root) = &tag else { panic!("tree is a map") };
    let Some(Tag::Map(general)) = map_get(root, "general") else {
        panic!("group node is a map")
    };
    assert!(matches!(
        map_get(general, "tint"),
        Some(Tag::Seq(channels)) if channels.len() == 4
    ));

    let (mut fresh, tint) = build();
    fresh.from_tag(&tag);
    assert_eq!(tint.get(), Color::rgba(9, 8, 7, 6));
}

#[test]
fn missing_groups_and_keys_keep_defaults() {
    let mut settings = Settings::new();
    let sg = settings.default_group();
    let sg_other = settings.create_group("other");
    let kept = sg.add(int_setting().name("kept").default_value(7).build());
    let loaded = sg.add(bool_setting().name("loaded").build());
    let orphan = sg_other.add(string_setting().name("orphan").default_value("d").build());

    // Node only mentions one setting of one group.
    let tag: Tag = ron::from_str(r#"{ "general": { "loaded": true } }"#).unwrap();
    settings.from_tag(&tag);

    assert_eq!(loaded.get(), true);
    assert_eq!(kept.get(), 7, "absent key keeps default");
    assert_eq!(orphan.get(), "d", "absent group keeps defaults");
}

#[test]
fn unknown_keys_and_corrupt_payloads_are_tolerated() {
    let mut settings = Settings::new();
    let sg = settings.default_group();
    let count = sg.add(int_setting().name("count").default_value(5).build());
    let label = sg.add(string_setting().name("label").default_value("x").build());

    // "count" has a type-mismatched payload, "ghost" and "misc" don't exist.
    let tag: Tag = ron::from_str(
        r#"{
            "general": { "count": "oops", "ghost": 1, "label": "y" },
            "misc": { "whatever": 3 }
        }"#,
    )
    .unwrap();
    settings.from_tag(&tag);

    assert_eq!(count.get(), 5, "corrupt payload keeps default");
    assert_eq!(label.get(), "y", "siblings of a failing setting still load");
}

#[test]
fn numeric_settings_clamp_to_bounds() {
    let settings = Settings::new();
    let sg = settings.default_group();
    let port = sg.add(int_setting().name("port").range(0, 65535).build());
    let scale = sg.add(float_setting().name("scale").default_value(1.0).min(0.75).build());

    port.set(70000).unwrap();
    assert_eq!(port.get(), 65535);
    port.set(-3).unwrap();
    assert_eq!(port.get(), 0);

    scale.set(0.1).unwrap();
    assert_eq!(scale.get(), 0.75);
    scale.set(2.0).unwrap();
    assert_eq!(scale.get(), 2.0);

    // Clamped-but-committed counts as a change.
    assert!(settings.is_dirty());
}

#[test]
fn filtered_settings_reject_and_retain() {
    let settings = Settings::new();
    let sg = settings.default_group();
    let name = sg.add(
        string_setting()
            .name("name")
            .filter(|text| text.chars().all(|c| c.is_ascii_alphanumeric()))
            .build(),
    );

    name.set("valid1".to_string()).unwrap();
    assert!(name.set("not valid!".to_string()).is_err());
    assert_eq!(name.get(), "valid1", "rejected set keeps prior value");

    let addresses = sg.add(
        string_list_setting()
            .name("addresses")
            .filter(|text| !text.contains(' '))
            .build(),
    );
    addresses.set(vec!["a.example".into()]).unwrap();
    assert!(addresses
        .set(vec!["ok.example".into(), "has space".into()])
        .is_err());
    assert_eq!(addresses.get(), vec!["a.example".to_string()]);
}

#[test]
fn unresolved_references_are_dropped_in_order() {
    let build = |known: Vec<&'static str>| {
        let settings = Settings::new();
        let selected = settings.default_group().add(
            reference_list_setting(Items(known))
                .name("selected")
                .build(),
        );
        (settings, selected)
    };

    let (settings, selected) = build(vec!["alpha", "beta", "gamma"]);
    selected
        .set(vec!["alpha".into(), "beta".into(), "gamma".into()])
        .unwrap();
    let tag = roundtrip(&settings);

    // "beta" no longer exists in the target registry.
    let (mut fresh, selected) = build(vec!["alpha", "gamma"]);
    fresh.from_tag(&tag);

    assert_eq!(selected.get(), vec!["alpha".to_string(), "gamma".to_string()]);
}

#[test]
fn composite_state_priority() {
    let mut settings = Settings::new();
    let sg = settings.default_group();
    let disable_hover = sg.add(bool_setting().name("disable-hover-color").build());

    let resting = Color::rgb(10, 10, 10);
    let hovered = Color::rgb(20, 20, 20);
    let pressed = Color::rgb(30, 30, 30);
    let background = ThreeStateColorSetting::new(
        &settings.create_group("background"),
        "background",
        resting,
        hovered,
        pressed,
        Some(disable_hover.clone()),
    );

    assert_eq!(background.get(), resting);
    assert_eq!(background.get_state(true, true, false), pressed);
    assert_eq!(background.get_state(false, true, false), hovered);

    disable_hover.set(true).unwrap();
    assert_eq!(background.get_state(false, true, false), resting);
    assert_eq!(background.get_state(false, true, true), hovered);
    assert_eq!(background.get_state(true, true, false), pressed);
}

#[test]
fn visibility_tracks_controlling_setting() {
    let settings = Settings::new();
    let sg = settings.default_group();
    let enabled = sg.add(bool_setting().name("enabled").build());
    let label = sg.add(string_setting().name("label").visible({
        let enabled = enabled.clone();
        move || enabled.get()
    }).build());

    assert!(!label.is_visible());
    enabled.set(true).unwrap();
    assert!(label.is_visible());
    enabled.set(false).unwrap();
    assert!(!label.is_visible());
}

#[test]
fn on_changed_fires_once_after_commit() {
    let settings = Settings::new();
    let observed = Rc::new(Cell::new((0usize, 0i32)));
    let count = settings.default_group().add(
        int_setting()
            .name("count")
            .range(0, 10)
            .on_changed({
                let observed = observed.clone();
                move |value| observed.set((observed.get().0 + 1, *value))
            })
            .build(),
    );

    count.set(25).unwrap();
    let (calls, seen) = observed.get();
    assert_eq!(calls, 1);
    assert_eq!(seen, 10, "callback observes the committed (clamped) value");
}

#[test]
fn activation_hook_fans_out() {
    let settings = Settings::new();
    let fired = Rc::new(Cell::new(false));
    settings.default_group().add(
        bool_setting()
            .name("custom-title")
            .on_activated({
                let fired = fired.clone();
                move |_| fired.set(true)
            })
            .build(),
    );

    settings.activated();
    assert!(fired.get());
}

#[test]
fn dirty_tracking() {
    let settings = Settings::new();
    let flag = settings.default_group().add(bool_setting().name("flag").build());
    assert!(!settings.is_dirty());

    flag.set(true).unwrap();
    assert!(settings.is_dirty());

    settings.mark_saved();
    assert!(!settings.is_dirty());

    flag.reset();
    assert!(!flag.get(), "reset restores the default");
    assert!(settings.is_dirty(), "reset counts as a change");
}

#[test]
#[should_panic(expected = "duplicate settings group")]
fn duplicate_group_name_panics() {
    let mut settings = Settings::new();
    settings.create_group("colors");
    settings.create_group("colors");
}

#[test]
#[should_panic(expected = "duplicate setting name")]
fn duplicate_setting_name_panics() {
    let settings = Settings::new();
    let sg = settings.default_group();
    sg.add(bool_setting().name("twin").build());
    sg.add(int_setting().name("twin").build());
}

#[test]
fn enum_settings_expose_their_variants() {
    let settings = Settings::new();
    let mode = settings
        .default_group()
        .add(enum_setting::<Mode>().name("mode").build());

    assert_eq!(mode.choices(), &[Mode::Flat, Mode::Rainbow, Mode::Random]);
    assert_eq!(mode.default_value(), Mode::Flat);
}

#[test]
fn groups_and_settings_enumerate_in_declared_order() {
    let mut settings = Settings::new();
    let sg_colors = settings.create_group("colors");
    let sg_misc = settings.create_group("misc");
    sg_colors.add(bool_setting().name("b").build());
    sg_colors.add(bool_setting().name("a").build());
    sg_misc.add(int_setting().name("n").build());

    let names: Vec<String> = settings.groups().iter().map(|g| g.name()).collect();
    assert_eq!(names, vec!["general", "colors", "misc"]);

    let colors: Vec<String> = sg_colors
        .settings()
        .iter()
        .map(|s| s.name().to_string())
        .collect();
    assert_eq!(colors, vec!["b", "a"], "insertion order, not name order");
    assert!(sg_colors.get("a").is_some());
    assert!(sg_colors.get("missing").is_none());
}

#[test]
fn end_to_end_dependent_setting_scenario() {
    let build = || {
        let settings = Settings::new();
        let sg = settings.default_group();
        let enabled = sg.add(bool_setting().name("enabled").build());
        let label = sg.add(
            string_setting()
                .name("label")
                .default_value("default label")
                .visible({
                    let enabled = enabled.clone();
                    move || enabled.get()
                })
                .build(),
        );
        (settings, enabled, label)
    };

    let (settings, enabled, _) = build();
    enabled.set(true).unwrap();
    let tag = roundtrip(&settings);

    let (mut fresh, enabled, label) = build();
    fresh.from_tag(&tag);

    assert_eq!(enabled.get(), true);
    assert_eq!(label.get(), "default label");
    assert!(label.is_visible());
}
