//! Global client configuration.

use ron::value::{Map as TagMap, Value as Tag};
use settings::value::{from_value, map_get, map_key, to_value};
use settings::{
    bool_setting, color_setting, float_setting, int_setting, string_setting, Color, Serializable,
    Setting, Settings,
};

use crate::system::System;

/// Schema tag written next to the settings tree so external tools can tell
/// which client generation wrote the document. Loading ignores it.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Config {
    pub settings: Settings,

    // Visual
    pub custom_window_title: Setting<bool>,
    pub custom_window_title_text: Setting<String>,
    pub rainbow_speed: Setting<f64>,
    pub title_screen_credits: Setting<bool>,
    pub title_screen_splashes: Setting<bool>,
    pub friend_color: Setting<Color>,

    // Chat
    pub prefix: Setting<String>,
    pub chat_feedback: Setting<bool>,
    pub delete_chat_feedback: Setting<bool>,

    // Misc
    pub rotation_hold_ticks: Setting<i32>,
    pub use_team_color: Setting<bool>,
    pub module_search_count: Setting<i32>,

    /// Prompt ids the user dismissed permanently. Plain state, not a
    /// setting; persisted as a sibling of the settings tree.
    pub dont_show_again_prompts: Vec<String>,
}

impl Config {
    pub fn new() -> Self {
        let mut settings = Settings::new();
        let sg_visual = settings.create_group("visual");
        let sg_chat = settings.create_group("chat");
        let sg_misc = settings.create_group("misc");

        let custom_window_title = sg_visual.add(
            bool_setting()
                .name("custom-window-title")
                .description("Show a custom text in the window title.")
                // The title embeds the active module count, so it goes stale
                // whenever module activation changes.
                .on_activated(|enabled| {
                    if *enabled {
                        log::debug!("window title needs a refresh");
                    }
                })
                .build(),
        );

        let custom_window_title_text = sg_visual.add(
            string_setting()
                .name("window-title-text")
                .description("The text shown in the window title.")
                .default_value("Game {version}")
                .visible({
                    let custom_window_title = custom_window_title.clone();
                    move || custom_window_title.get()
                })
                .build(),
        );

        let rainbow_speed = sg_visual.add(
            float_setting()
                .name("rainbow-speed")
                .description("Global rainbow cycle speed.")
                .default_value(0.5)
                .range(0.0, 10.0)
                .build(),
        );

        let title_screen_credits = sg_visual.add(
            bool_setting()
                .name("title-screen-credits")
                .description("Show the watermark on the title screen.")
                .default_value(true)
                .build(),
        );

        let title_screen_splashes = sg_visual.add(
            bool_setting()
                .name("title-screen-splashes")
                .description("Show custom splash texts on the title screen.")
                .default_value(true)
                .build(),
        );

        let friend_color = sg_visual.add(
            color_setting()
                .name("friend-color")
                .description("Color used to highlight friends.")
                .default_value(Color::rgb(0, 255, 180))
                .build(),
        );

        let prefix = sg_chat.add(
            string_setting()
                .name("prefix")
                .description("Command prefix.")
                .default_value(".")
                .build(),
        );

        let chat_feedback = sg_chat.add(
            bool_setting()
                .name("chat-feedback")
                .description("Print feedback in chat when the client does something.")
                .default_value(true)
                .build(),
        );

        let delete_chat_feedback = sg_chat.add(
            bool_setting()
                .name("delete-chat-feedback")
                .description("Delete previous matching feedback lines.")
                .default_value(true)
                .visible({
                    let chat_feedback = chat_feedback.clone();
                    move || chat_feedback.get()
                })
                .build(),
        );

        let rotation_hold_ticks = sg_misc.add(
            int_setting()
                .name("rotation-hold-ticks")
                .description("How long to hold server-side rotations when not sending packets.")
                .default_value(4)
                .build(),
        );

        let use_team_color = sg_misc.add(
            bool_setting()
                .name("use-team-color")
                .description("Use player team colors for render effects.")
                .default_value(true)
                .build(),
        );

        let module_search_count = sg_misc.add(
            int_setting()
                .name("module-search-count")
                .description("Amount of results shown in the module search bar.")
                .default_value(12)
                .min(1)
                .build(),
        );

        Self {
            settings,
            custom_window_title,
            custom_window_title_text,
            rainbow_speed,
            title_screen_credits,
            title_screen_splashes,
            friend_color,
            prefix,
            chat_feedback,
            delete_chat_feedback,
            rotation_hold_ticks,
            use_team_color,
            module_search_count,
            dont_show_again_prompts: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializable for Config {
    fn to_tag(&self) -> Tag {
        let mut tag = TagMap::new();
        tag.insert(map_key("version"), Tag::String(VERSION.to_string()));
        tag.insert(map_key("settings"), self.settings.to_tag());
        if let Some(prompts) = to_value(&self.dont_show_again_prompts) {
            tag.insert(map_key("dont_show_again_prompts"), prompts);
        }
        Tag::Map(tag)
    }

    fn from_tag(&mut self, tag: &Tag) {
        let Tag::Map(tag) = tag else {
            log::warn!("config node is not a map, keeping defaults");
            return;
        };

        if let Some(node) = map_get(tag, "settings") {
            self.settings.from_tag(node);
        }
        if let Some(node) = map_get(tag, "dont_show_again_prompts") {
            if let Some(prompts) = from_value(node) {
                self.dont_show_again_prompts = prompts;
            }
        }
    }
}

impl System for Config {
    fn name(&self) -> &'static str {
        "config"
    }
}
