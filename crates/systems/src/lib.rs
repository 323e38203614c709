mod config;
mod hud;
mod module;
mod profile;
mod proxy;
mod system;
mod theme;
pub mod util;

pub use config::Config;
pub use hud::{ActiveModulesHud, ColorMode, Sort};
pub use module::{Module, Modules};
pub use profile::{Profile, Profiles};
pub use proxy::{Proxy, ProxyBuilder, ProxyType, Proxies};
pub use system::{System, Systems};
pub use theme::{AlignmentX, Theme};
