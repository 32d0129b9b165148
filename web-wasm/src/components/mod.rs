pub mod about;
pub mod alert_banner;
pub mod header;
pub mod login_button;
pub mod login_prompt;
pub mod method_buttons;
pub mod playlist_card;
pub mod playlist_panel;
