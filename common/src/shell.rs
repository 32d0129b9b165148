//! Navigation and login gating

use crate::session::Session;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Home,
    About,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Home, Tab::About];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::About => "About",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::About => "about",
        }
    }
}

/// What the Home tab shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeView {
    LoginPrompt,
    Playlists,
}

pub fn home_view(session: &Session) -> HomeView {
    if session.logged_in {
        HomeView::Playlists
    } else {
        HomeView::LoginPrompt
    }
}

/// What the persistent login control shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginControl {
    LoginButton,
    Account,
}

pub fn login_control(session: &Session) -> LoginControl {
    if session.logged_in {
        LoginControl::Account
    } else {
        LoginControl::LoginButton
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::session::SessionStore;
    use futures::executor::block_on;

    #[test]
    fn test_logged_out_session_shows_login_prompt() {
        let api = FakeApi {
            logged_in: Some(false),
            ..Default::default()
        };
        let store = SessionStore::new();
        let session = block_on(store.initialize(&api));

        assert_eq!(home_view(&session), HomeView::LoginPrompt);
        assert_eq!(login_control(&session), LoginControl::LoginButton);
    }

    #[test]
    fn test_logged_in_session_shows_playlists() {
        let store = SessionStore::new();
        let session = block_on(store.initialize(&FakeApi::logged_in()));

        assert_eq!(home_view(&session), HomeView::Playlists);
        assert_eq!(login_control(&session), LoginControl::Account);
    }

    #[test]
    fn test_tabs() {
        assert_eq!(Tab::default(), Tab::Home);
        let labels: Vec<&str> = Tab::ALL.iter().map(Tab::label).collect();
        assert_eq!(labels, vec!["Home", "About"]);
        assert_eq!(Tab::About.slug(), "about");
    }
}
