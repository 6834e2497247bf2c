//! Deterministic fallback descriptions.
//!
//! Templates use `{field}` placeholders. The template is picked from the song
//! title and artist so the same song always gets the same text.

use super::synthesis::SongSynthesis;
use super::SongDetails;

const DEFAULT_GENRE: &str = "music";
const DEFAULT_MOOD: &str = "evocative";
const DEFAULT_SECONDARY_THEME: &str = "personal growth";
const DEFAULT_ARTIST_JOURNEY: &str = "a steady creative evolution";
const DEFAULT_MOOD_AND_GENRE: &str = "a carefully crafted soundscape";
const DEFAULT_PLAYLIST_KEYWORDS: &str = "discovery and new music";

const SONG_TEMPLATES: &[&str] = &[
    "{title} by {artist} brings {mood} energy to {genre} and makes its intentions clear from the opening bars. The arrangement leaves room for every part to breathe, while the production keeps the focus on feeling rather than flash. As the track unfolds it builds with patience, rewarding listeners who stay until the final moments. There is a real sense of identity here, the sound of an artist who knows exactly what they want to say. {title} is an easy recommendation for anyone who loves honest, carefully made {genre}.",
    "With {title}, {artist} delivers a confident take on {genre} shaped by {mood} textures and a clear emotional core. Each layer of the mix has been placed with care, so the song feels full without ever becoming crowded. The writing moves naturally from verse to hook, and the melodies stay with you long after the track ends. It is the kind of release that reveals something new on every listen. {title} shows {artist} growing in confidence and points toward an exciting road ahead.",
    "{artist} returns with {title}, a release rooted in {genre} and carried by {mood} tones from start to finish. The production is polished yet warm, giving the performance room to land with real weight. Small details reward close attention, from the way the rhythm shifts to the subtle touches in the final section. The song balances accessibility with a distinct personal voice, which is harder than it sounds. {title} is a standout moment for {artist} and a welcome addition to any {genre} playlist.",
    "{title} captures {artist} at their most focused, blending {mood} feeling with the textures of modern {genre}. The track opens with restraint before settling into a groove that feels both familiar and fresh. Careful production keeps every element in balance, letting the hook do its work without forcing it. Lyrically and sonically, the song carries a sense of honesty that is easy to connect with. For listeners who value craft and character in equal measure, {title} is well worth a place on repeat.",
    "On {title}, {artist} turns {mood} emotion into {genre} that feels lived in and sincere. The arrangement grows steadily, adding color and movement without losing sight of the song at its center. Production choices are thoughtful throughout, with a mix that sounds clear on headphones and full on larger speakers. The result is a track that rewards both casual listening and closer attention. {title} adds another strong chapter to the story {artist} has been building, and it leaves you curious about what comes next.",
];

const SYNTHESIS_TEMPLATES: &[&str] = &[
    "{unique_angle}. {title} by {artist} explores {primary_theme} alongside {secondary_theme}, set against {mood_and_genre}. The release marks a meaningful point in the artist's journey: {artist_journey}. A natural fit for playlists built around {playlist_keywords}, it offers a deeply resonant listening experience that rewards repeat plays and shows a clear artistic vision.",
    "{title} finds {artist} at a turning point. At its heart the song is about {primary_theme}, with {secondary_theme} running underneath. What sets it apart: {unique_angle}. Sonically it lives in {mood_and_genre}, and it reflects where the artist has been: {artist_journey}. Expect to hear it on playlists shaped by {playlist_keywords}, where its honesty and craft will find the audience they deserve.",
];

/// A non-empty set of fallback templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackTemplates {
    templates: Vec<String>,
}

impl FallbackTemplates {
    /// Templates filled from the song fields (`title`, `artist`, `genre`, `mood`).
    pub fn song() -> Self {
        Self::from_static(SONG_TEMPLATES)
    }

    /// Templates filled from a [`SongSynthesis`] plus `title` and `artist`.
    pub fn synthesis() -> Self {
        Self::from_static(SYNTHESIS_TEMPLATES)
    }

    fn from_static(templates: &[&str]) -> Self {
        Self {
            templates: templates.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The template chosen for a song.
    pub fn select(&self, title: &str, artist: &str) -> &str {
        &self.templates[template_index(title, artist, self.templates.len())]
    }

    /// Render the selected template with song fields.
    pub fn render_song(&self, details: &SongDetails) -> String {
        let genre = or_default(&details.genre, DEFAULT_GENRE);
        let mood = or_default(&details.mood, DEFAULT_MOOD);
        fill(
            self.select(&details.title, &details.artist),
            &[
                ("title", details.title.trim()),
                ("artist", details.artist.trim()),
                ("genre", genre),
                ("mood", mood),
            ],
        )
    }

    /// Render the selected template with synthesis fields.
    pub fn render_synthesis(&self, details: &SongDetails, synthesis: &SongSynthesis) -> String {
        fill(
            self.select(&details.title, &details.artist),
            &[
                ("title", details.title.trim()),
                ("artist", details.artist.trim()),
                ("primary_theme", synthesis.primary_theme.as_str()),
                (
                    "secondary_theme",
                    or_default(&synthesis.secondary_theme, DEFAULT_SECONDARY_THEME),
                ),
                ("unique_angle", synthesis.unique_angle.as_str()),
                (
                    "artist_journey",
                    or_default(&synthesis.artist_journey, DEFAULT_ARTIST_JOURNEY),
                ),
                (
                    "mood_and_genre",
                    or_default(&synthesis.mood_and_genre, DEFAULT_MOOD_AND_GENRE),
                ),
                (
                    "playlist_keywords",
                    or_default(&synthesis.playlist_keywords, DEFAULT_PLAYLIST_KEYWORDS),
                ),
            ],
        )
    }
}

/// Sum of the code points of `title + artist`, modulo `count`.
pub fn template_index(title: &str, artist: &str, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let sum: u64 = title
        .chars()
        .chain(artist.chars())
        .map(|c| u64::from(u32::from(c)))
        .sum();
    (sum % count as u64) as usize
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default
    } else {
        trimmed
    }
}

fn fill(template: &str, fields: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (key, value) in fields {
        let value = value.trim().trim_end_matches(['.', '!', '?']);
        rendered = rendered.replace(&format!("{{{key}}}"), value);
    }
    rendered
}
