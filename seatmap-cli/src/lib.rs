pub mod app_config;
pub mod error;
pub mod menu;

pub use app_config::Config;
pub use menu::Menu;
