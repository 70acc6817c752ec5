pub mod components;
pub mod export;
pub mod i18n;
pub mod icons;
pub mod list_utils;
pub mod modal_frame;
pub mod popup;
pub mod state;
pub mod table_model;
