//! Playlist synthesis prompt

pub const PLAYLIST_PROMPT: &str = "You are Playlist Builder. Use the track suggestions to craft a final playlist. \
Output format: Title line, short one-sentence description, then a numbered list of 10 tracks in \
'Artist - Title \u{2014} reason' format. Keep it concise.";

/// User content for the synthesis call
///
/// Without suggestions the prompt states that Track Scout was not consulted.
pub fn synthesis_prompt(request: &str, suggestions: Option<&str>) -> String {
    match suggestions {
        Some(tracks) => format!(
            "User request: {}\n\nTrack suggestions from Track Scout:\n{}\n\nCreate the final playlist now.",
            request, tracks
        ),
        None => format!(
            "User request: {}\n\nTrack Scout was not used for this request.\n\nCreate the final playlist now.",
            request
        ),
    }
}
