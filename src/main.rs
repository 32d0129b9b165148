use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use simmer_common::{Outcome, SessionStore, SimmerApi, Workflow};
use simmer_toads::{cli, client, config, error, logging, login, picker};
use cli::{Cli, Commands};
use client::HttpClient;
use config::Config;
use error::{Result, SimmerError};
use std::process::ExitCode;
use std::time::Duration;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(line) = e.report() {
                eprintln!("{}", line);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let base_url = cli.base_url.clone().unwrap_or_else(|| config.base_url.clone());
    let connect = |config: &Config| {
        HttpClient::new(
            &base_url,
            config.get_session_cookie().as_deref(),
            config.request_timeout(),
        )
    };

    match cli.command {
        Commands::Status => {
            let client = connect(&config)?;
            let session = SessionStore::new();
            let state = session.initialize(&client).await;
            if state.logged_in {
                println!("✔ logged in ({})", client.base_url());
            } else {
                println!("not logged in ({}). Run `simmer login`", client.base_url());
            }
        }

        Commands::Login { session, no_wait } => {
            let mut config = config;
            let client = connect(&config)?;
            if client.check_session().await {
                println!("✔ already logged in ({})", client.base_url());
                return Ok(());
            }

            let cookie = match session {
                Some(cookie) => cookie,
                None => {
                    let auth = client.login().await?;
                    println!("🐸 Open this page to log in:\n\n  {}\n", auth.auth_url);
                    if no_wait {
                        println!("Then run `simmer login --session <COOKIE>`");
                        return Ok(());
                    }
                    println!(
                        "After logging in, copy the `{}` cookie for {} from your browser.",
                        login::SESSION_COOKIE_NAME,
                        client.base_url().host_str().unwrap_or("the backend")
                    );
                    login::prompt_session_cookie()?
                }
            };

            login::adopt_browser_session(&base_url, &mut config, &cookie).await?;
            config.save()?;
            println!("✅ logged in");
        }

        Commands::Logout => {
            let mut config = config;
            let client = connect(&config)?;
            let session = SessionStore::new();
            let result = session.logout(&client).await;

            config.set_session_cookie(None);
            config.save()?;

            match result {
                Ok(redirect) => println!("✔ logged out (redirected to {})", redirect),
                Err(e) => println!("logged out locally; the backend said: {}", e),
            }
        }

        Commands::Me => {
            let client = connect(&config)?;
            let profile = client.me().await.map_err(|e| SimmerError::from(e).or_login_hint())?;
            println!("{}", profile.display_name_or_default());
            if let Some(url) = profile.profile_url() {
                println!("  profile: {}", url);
            }
            if let Some(url) = profile.avatar_url() {
                println!("  avatar:  {}", url);
            }
        }

        Commands::Playlists => {
            let client = connect(&config)?;
            let playlists = client
                .list_playlists()
                .await
                .map_err(|e| SimmerError::from(e).or_login_hint())?;

            if playlists.is_empty() {
                println!("No playlists found");
            }
            for playlist in &playlists {
                println!("{:<24} {}", playlist.id, picker::playlist_label(playlist));
            }
        }

        Commands::Tracks { playlist_id } => {
            let client = connect(&config)?;
            let tracks = client
                .playlist_tracks(&playlist_id)
                .await
                .map_err(|e| SimmerError::from(e).or_login_hint())?;

            for (i, track) in tracks.iter().enumerate() {
                println!("{:>3}. {}", i + 1, track);
            }
        }

        Commands::Cook { playlist_ids, method, to_spotify } => {
            println!("🍲 simmer - {}\n", method.description());

            let client = connect(&config)?;
            if !client.check_session().await {
                return Err(SimmerError::NotLoggedIn);
            }

            let playlists = client
                .list_playlists()
                .await
                .map_err(|e| SimmerError::from(e).or_login_hint())?;

            let mut workflow = Workflow::new();
            workflow.set_write_back(to_spotify);

            if playlist_ids.is_empty() {
                picker::pick_playlists(&mut workflow, &playlists)?;
            } else {
                let unknown = picker::select_by_ids(&mut workflow, &playlists, &playlist_ids)?;
                for id in unknown {
                    println!("- {} is not in your playlist listing, sending it anyway", id);
                }
            }

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message(format!(
                "{}: {} playlist(s)...",
                method,
                workflow.selection().len()
            ));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let outcome = workflow.submit(&client, method).await?;
            spinner.finish_and_clear();

            let notice = outcome.notice();
            match &outcome {
                Outcome::Success { .. } => println!("✅ {}", notice.text),
                Outcome::NoSelection => println!("{}", notice.text),
                Outcome::Failure { failed, succeeded, .. } => {
                    println!("❌ {}", notice.text);
                    if failed.iter().any(|f| f.requires_login) {
                        println!("   The session has expired. Run `simmer login`");
                    }
                    return Err(SimmerError::BatchFailed {
                        failed: failed.len(),
                        total: failed.len() + succeeded.len(),
                    });
                }
            }
        }

        Commands::Active { set } => {
            let client = connect(&config)?;
            let active = match set {
                Some(id) => client.set_active_playlist(&id).await,
                None => client.active_playlist().await,
            }
            .map_err(|e| SimmerError::from(e).or_login_hint())?;

            match active.playlist_id {
                Some(id) => println!("active playlist: {}", id),
                None => println!("no active playlist"),
            }
        }

        Commands::Config { set_base_url, set_session, clear_session, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(url) = set_base_url {
                config.set_base_url(&url)?;
                changed = true;
                println!("✔ base URL set");
            }

            if let Some(cookie) = set_session {
                config.set_session_cookie(Some(cookie));
                changed = true;
                println!("✔ session saved");
            }

            if clear_session {
                config.set_session_cookie(None);
                changed = true;
                println!("✔ session cleared");
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("settings ({}):", Config::config_path()?.display());
                println!("  base URL: {}", config.base_url);
                println!("  session: {}", if config.get_session_cookie().is_some() { "saved" } else { "none" });
                println!("  request timeout: {}s", config.timeout_seconds);
            }
        }
    }

    Ok(())
}
