pub mod loading_overlay;
pub mod notice;
pub mod settings_panel;
pub mod status_bar;
