pub mod app_settings;
pub mod app_state;
pub mod messages;
pub mod network;
pub mod presentation;
pub mod refresher;
pub mod selection;
pub mod team_stats;
