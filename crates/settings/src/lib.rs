mod color;
mod composite;
mod errors;
mod group;
mod resolver;
mod setting;
pub mod value;

pub use color::Color;
pub use composite::ThreeStateColorSetting;
pub use errors::SettingError;
pub use group::{SettingGroup, Settings, DEFAULT_GROUP};
pub use resolver::NameResolver;
pub use setting::{
    bool_setting, color_setting, enum_setting, float_setting, int_setting,
    reference_list_setting, string_list_setting, string_setting, AnySetting, Setting,
    SettingBuilder,
};
pub use value::{Codec, Serializable};
