//! Simmer the Toads common library
//!
//! Types, backend contract and the playlist selection workflow shared by the
//! terminal client and the web app.

pub mod api;
pub mod endpoint;
pub mod error;
pub mod login;
pub mod method;
pub mod selection;
pub mod session;
pub mod shell;
pub mod types;
pub mod workflow;

pub use api::SimmerApi;
pub use endpoint::{Endpoint, HttpMethod};
pub use error::{Error, Result};
pub use login::{wait_for_login, CancelToken, LoginPoll, LoginWait, LOGIN_COMPLETE_MESSAGE};
pub use method::TransformationMethod;
pub use selection::PendingSelection;
pub use session::{Session, SessionReader, SessionStore};
pub use shell::{home_view, login_control, HomeView, LoginControl, Tab};
pub use types::{
    parse_track_list, parse_transformation_ack, ActivePlaylist, AuthUrl, LoginStatus, Playlist,
    PlaylistPage, PlaylistRef, Profile, Track,
};
pub use workflow::{
    run_batch, Batch, BatchReport, Notice, Outcome, Severity, Workflow, WorkflowState,
    ALERT_TIMEOUT,
};
