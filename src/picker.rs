//! Playlist selection for `simmer cook`
//!
//! The terminal counterpart of the playlist cards: membership always comes
//! from the workflow's pending selection.

use crate::error::Result;
use dialoguer::MultiSelect;
use simmer_common::{Playlist, PlaylistRef, Workflow};
use tracing::debug;

/// Card-like one-line label
pub fn playlist_label(playlist: &Playlist) -> String {
    let description = playlist.description.trim();
    if description.is_empty() {
        playlist.name.clone()
    } else {
        format!("{} - {}", playlist.name, truncate(description, 60))
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut)
}

/// Selects the given ids. Ids missing from the listing are still selected
/// (the listing may be paginated) and returned so the caller can mention them.
pub fn select_by_ids(
    workflow: &mut Workflow,
    playlists: &[Playlist],
    ids: &[String],
) -> Result<Vec<String>> {
    let mut unknown = Vec::new();
    for id in ids {
        let playlist = match playlists.iter().find(|p| &p.id == id) {
            Some(playlist) => playlist.to_ref(),
            None => {
                debug!(playlist = %id, "id not in listing");
                unknown.push(id.clone());
                PlaylistRef::new(id, id)
            }
        };
        workflow.select(true, &playlist.id, &playlist.name)?;
    }
    Ok(unknown)
}

/// Interactive multi-select over the listing.
pub fn pick_playlists(workflow: &mut Workflow, playlists: &[Playlist]) -> Result<()> {
    let labels: Vec<String> = playlists.iter().map(playlist_label).collect();
    let defaults: Vec<bool> = playlists
        .iter()
        .map(|p| workflow.is_selected(&p.id))
        .collect();

    let chosen = MultiSelect::new()
        .with_prompt("Select playlists (space to toggle, enter to confirm)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    for (index, playlist) in playlists.iter().enumerate() {
        workflow.select(chosen.contains(&index), &playlist.id, &playlist.name)?;
    }
    Ok(())
}
