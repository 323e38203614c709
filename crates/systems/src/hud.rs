//! HUD element showing the currently active modules.

use std::rc::Rc;

use ron::value::{Map as TagMap, Value as Tag};
use settings::value::{map_get, map_key};
use settings::{
    bool_setting, color_setting, enum_setting, float_setting, int_setting,
    reference_list_setting, Color, Serializable, Setting, Settings,
};
use strum_macros::{Display, EnumIter, EnumString};

use crate::module::{Module, Modules};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum Sort {
    Biggest,
    Smallest,
    Alphabetical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum ColorMode {
    Rainbow,
    Flat,
    Random,
}

pub struct ActiveModulesHud {
    pub settings: Settings,

    pub hidden_modules: Setting<Vec<Rc<Module>>>,
    pub sort: Setting<Sort>,
    pub active_info: Setting<bool>,
    pub module_info_color: Setting<Color>,
    pub color_mode: Setting<ColorMode>,
    pub flat_color: Setting<Color>,
    pub outlines: Setting<bool>,
    pub outline_width: Setting<i32>,
    pub custom_scale: Setting<bool>,
    pub scale: Setting<f64>,
    pub rainbow_speed: Setting<f64>,

    modules: Modules,
    // Runtime layout state, recomputed every frame and never persisted.
    size: (f64, f64),
}

impl ActiveModulesHud {
    pub fn new(modules: &Modules) -> Self {
        let settings = Settings::new();
        let sg = settings.default_group();

        let hidden_modules = sg.add(
            reference_list_setting(modules.clone())
                .name("hidden-modules")
                .description("Modules that are never shown in the list.")
                .build(),
        );

        let sort = sg.add(
            enum_setting::<Sort>()
                .name("sort")
                .description("How the module list is sorted.")
                .default_value(Sort::Biggest)
                .build(),
        );

        let active_info = sg.add(
            bool_setting()
                .name("active-info")
                .description("Show additional module info, e.g. the selected mode.")
                .default_value(true)
                .build(),
        );

        let module_info_color = sg.add(
            color_setting()
                .name("info-color")
                .description("Color of the module info text.")
                .default_value(Color::rgb(175, 175, 175))
                .visible({
                    let active_info = active_info.clone();
                    move || active_info.get()
                })
                .build(),
        );

        let color_mode = sg.add(
            enum_setting::<ColorMode>()
                .name("color-mode")
                .description("How module entries are colored.")
                .build(),
        );

        let flat_color = sg.add(
            color_setting()
                .name("flat-color")
                .description("Color used in flat mode.")
                .default_value(Color::rgb(225, 25, 25))
                .visible({
                    let color_mode = color_mode.clone();
                    move || color_mode.get() == ColorMode::Flat
                })
                .build(),
        );

        let outlines = sg.add(
            bool_setting()
                .name("outlines")
                .description("Draw an outline behind the text.")
                .build(),
        );

        let outline_width = sg.add(
            int_setting()
                .name("outline-width")
                .description("Outline width in pixels.")
                .default_value(2)
                .min(1)
                .visible({
                    let outlines = outlines.clone();
                    move || outlines.get()
                })
                .build(),
        );

        let custom_scale = sg.add(
            bool_setting()
                .name("custom-scale")
                .description("Use a custom text scale instead of the HUD scale.")
                .build(),
        );

        let scale = sg.add(
            float_setting()
                .name("scale")
                .description("Custom text scale.")
                .default_value(1.0)
                .range(0.5, 3.0)
                .visible({
                    let custom_scale = custom_scale.clone();
                    move || custom_scale.get()
                })
                .build(),
        );

        let rainbow_speed = sg.add(
            float_setting()
                .name("rainbow-speed")
                .description("Cycle speed in rainbow mode.")
                .default_value(0.05)
                .range(0.0, 0.2)
                .visible({
                    let color_mode = color_mode.clone();
                    move || color_mode.get() == ColorMode::Rainbow
                })
                .build(),
        );

        Self {
            settings,
            hidden_modules,
            sort,
            active_info,
            module_info_color,
            color_mode,
            flat_color,
            outlines,
            outline_width,
            custom_scale,
            scale,
            rainbow_speed,
            modules: modules.clone(),
            size: (0.0, 0.0),
        }
    }

    /// Active modules minus the hidden ones, in the configured sort order.
    pub fn visible_modules(&self) -> Vec<Rc<Module>> {
        let hidden = self.hidden_modules.get();
        let mut shown: Vec<Rc<Module>> = self
            .modules
            .active()
            .into_iter()
            .filter(|module| !hidden.iter().any(|h| h.id == module.id))
            .collect();

        match self.sort.get() {
            Sort::Biggest => shown.sort_by(|a, b| b.name.len().cmp(&a.name.len())),
            Sort::Smallest => shown.sort_by(|a, b| a.name.len().cmp(&b.name.len())),
            Sort::Alphabetical => shown.sort_by(|a, b| a.name.cmp(&b.name)),
        }

        shown
    }

    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = (width, height);
    }
}

impl Serializable for ActiveModulesHud {
    fn to_tag(&self) -> Tag {
        let mut tag = TagMap::new();
        tag.insert(map_key("settings"), self.settings.to_tag());
        Tag::Map(tag)
    }

    fn from_tag(&mut self, tag: &Tag) {
        let Tag::Map(tag) = tag else {
            log::warn!("hud element node is not a map, keeping defaults");
            return;
        };

        if let Some(node) = map_get(tag, "settings") {
            self.settings.from_tag(node);
        }
    }
}
