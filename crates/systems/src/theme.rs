//! GUI theme: every visual knob of the widget toolkit, including the
//! three-state color bundles used by interactive widgets.

use ron::value::{Map as TagMap, Value as Tag};
use settings::value::{map_get, map_key};
use settings::{
    bool_setting, color_setting, enum_setting, float_setting, Color, Serializable, Setting,
    SettingGroup, Settings, ThreeStateColorSetting,
};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum AlignmentX {
    Left,
    Center,
    Right,
}

pub struct Theme {
    pub settings: Settings,

    // General
    pub scale: Setting<f64>,
    pub module_alignment: Setting<AlignmentX>,
    pub category_icons: Setting<bool>,
    pub hide_hud: Setting<bool>,
    pub disable_hover_color: Setting<bool>,

    // Colors
    pub accent_color: Setting<Color>,
    pub checkbox_color: Setting<Color>,
    pub plus_color: Setting<Color>,
    pub minus_color: Setting<Color>,
    pub favorite_color: Setting<Color>,

    // Text
    pub text_color: Setting<Color>,
    pub text_secondary_color: Setting<Color>,
    pub text_highlight_color: Setting<Color>,
    pub title_text_color: Setting<Color>,

    // Interactive surfaces
    pub background_color: ThreeStateColorSetting,
    pub module_background: Setting<Color>,
    pub outline_color: ThreeStateColorSetting,
    pub scrollbar_color: ThreeStateColorSetting,
    pub slider_handle: ThreeStateColorSetting,
    pub slider_left: Setting<Color>,
    pub slider_right: Setting<Color>,
}

fn color(group: &SettingGroup, name: &str, description: &str, default: Color) -> Setting<Color> {
    group.add(
        color_setting()
            .name(name)
            .description(description)
            .default_value(default)
            .build(),
    )
}

impl Theme {
    pub fn new() -> Self {
        let mut settings = Settings::new();
        let sg_general = settings.default_group();
        let sg_colors = settings.create_group("colors");
        let sg_text = settings.create_group("text");
        let sg_background = settings.create_group("background");
        let sg_outline = settings.create_group("outline");
        let sg_scrollbar = settings.create_group("scrollbar");
        let sg_slider = settings.create_group("slider");

        let scale = sg_general.add(
            float_setting()
                .name("scale")
                .description("Scale of the GUI.")
                .default_value(1.0)
                .min(0.75)
                .build(),
        );

        let module_alignment = sg_general.add(
            enum_setting::<AlignmentX>()
                .name("module-alignment")
                .description("How module names are aligned.")
                .build(),
        );

        let category_icons = sg_general.add(
            bool_setting()
                .name("category-icons")
                .description("Show icons in module category headers.")
                .default_value(true)
                .build(),
        );

        let hide_hud = sg_general.add(
            bool_setting()
                .name("hide-hud")
                .description("Hide the game HUD while a screen is open.")
                .build(),
        );

        let disable_hover_color = sg_general.add(
            bool_setting()
                .name("disable-hover-color")
                .description("Do not change widget colors on hover.")
                .build(),
        );

        let accent_color = color(&sg_colors, "accent", "Main accent color.", Color::rgb(145, 61, 226));
        let checkbox_color = color(&sg_colors, "checkbox", "Checkbox color.", Color::rgb(145, 61, 226));
        let plus_color = color(&sg_colors, "plus", "Color of + buttons.", Color::rgb(50, 255, 50));
        let minus_color = color(&sg_colors, "minus", "Color of - buttons.", Color::rgb(255, 50, 50));
        let favorite_color = color(&sg_colors, "favorite", "Color of the favorite star.", Color::rgb(250, 215, 0));

        let text_color = color(&sg_text, "text", "Text color.", Color::rgb(255, 255, 255));
        let text_secondary_color = color(&sg_text, "text-secondary", "Secondary text color.", Color::rgb(150, 150, 150));
        let text_highlight_color = color(&sg_text, "text-highlight", "Text selection color.", Color::rgba(45, 125, 245, 100));
        let title_text_color = color(&sg_text, "title-text", "Title text color.", Color::rgb(255, 255, 255));

        let background_color = ThreeStateColorSetting::new(
            &sg_background,
            "background",
            Color::rgba(20, 20, 20, 200),
            Color::rgba(30, 30, 30, 200),
            Color::rgba(40, 40, 40, 200),
            Some(disable_hover_color.clone()),
        );

        let module_background = color(
            &sg_background,
            "module-background",
            "Background of enabled module entries.",
            Color::rgb(50, 50, 50),
        );

        let outline_color = ThreeStateColorSetting::new(
            &sg_outline,
            "outline",
            Color::rgb(0, 0, 0),
            Color::rgb(10, 10, 10),
            Color::rgb(20, 20, 20),
            Some(disable_hover_color.clone()),
        );

        let scrollbar_color = ThreeStateColorSetting::new(
            &sg_scrollbar,
            "scrollbar",
            Color::rgba(30, 30, 30, 200),
            Color::rgba(40, 40, 40, 200),
            Color::rgba(50, 50, 50, 200),
            Some(disable_hover_color.clone()),
        );

        let slider_handle = ThreeStateColorSetting::new(
            &sg_slider,
            "handle",
            Color::rgb(130, 0, 255),
            Color::rgb(140, 30, 255),
            Color::rgb(150, 60, 255),
            Some(disable_hover_color.clone()),
        );

        let slider_left = color(&sg_slider, "left", "Color of the filled slider part.", Color::rgb(100, 35, 170));
        let slider_right = color(&sg_slider, "right", "Color of the empty slider part.", Color::rgb(50, 50, 50));

        Self {
            settings,
            scale,
            module_alignment,
            category_icons,
            hide_hud,
            disable_hover_color,
            accent_color,
            checkbox_color,
            plus_color,
            minus_color,
            favorite_color,
            text_color,
            text_secondary_color,
            text_highlight_color,
            title_text_color,
            background_color,
            module_background,
            outline_color,
            scrollbar_color,
            slider_handle,
            slider_left,
            slider_right,
        }
    }

    /// Scale a GUI length by the configured factor.
    pub fn scaled(&self, value: f64) -> f64 {
        value * self.scale.get()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializable for Theme {
    fn to_tag(&self) -> Tag {
        let mut tag = TagMap::new();
        tag.insert(map_key("settings"), self.settings.to_tag());
        Tag::Map(tag)
    }

    fn from_tag(&mut self, tag: &Tag) {
        let Tag::Map(tag) = tag else {
            log::warn!("theme node is not a map, keeping defaults");
            return;
        };

        if let Some(node) = map_get(tag, "settings") {
            self.settings.from_tag(node);
        }
    }
}
