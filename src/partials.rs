use crate::data::audience_label;
use crate::session::SessionProfile;
use crate::storage::{Storage, keys};
use chrono::{Datelike, Local};
use once_cell::sync::Lazy;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Fixed relative paths the fragments are fetched from, under the site root.
pub const HEADER_PATH: &str = "partials/header.html";
pub const FOOTER_PATH: &str = "partials/footer.html";

/// The two shared markup fragments injected into every page.
#[derive(Debug, Clone)]
pub struct PartialSet {
    pub header: String,
    pub footer: String,
}

#[derive(Debug)]
pub enum PartialsError {
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for PartialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartialsError::Io { path, source } => {
                write!(f, "failed to load fragment {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for PartialsError {}

static BUILTIN: Lazy<PartialSet> = Lazy::new(|| PartialSet {
    header: include_str!("../partials/header.html").to_string(),
    footer: include_str!("../partials/footer.html").to_string(),
});

impl PartialSet {
    /// Load both fragments from their fixed paths under `root`. There is no
    /// fallback and no retry; a missing fragment is the caller's problem.
    pub fn load_from(root: &Path) -> Result<Self, PartialsError> {
        Ok(Self {
            header: read_fragment(root.join(HEADER_PATH))?,
            footer: read_fragment(root.join(FOOTER_PATH))?,
        })
    }

    /// The compiled-in copy of the fragments shipped with the crate.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }
}

fn read_fragment(path: PathBuf) -> Result<String, PartialsError> {
    fs::read_to_string(&path).map_err(|source| PartialsError::Io { path, source })
}

/// Site theme, persisted under the `theme` key. Anything but `"dark"`
/// (including a missing or unreadable key) is light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn load_theme(storage: &dyn Storage) -> Theme {
    match storage.get(keys::THEME) {
        Ok(Some(raw)) if raw == "dark" => Theme::Dark,
        _ => Theme::Light,
    }
}

/// Flip and persist the theme, returning the new value.
pub fn toggle_theme(storage: &dyn Storage) -> Theme {
    let next = load_theme(storage).toggled();
    if let Err(err) = storage.set(keys::THEME, next.as_str()) {
        warn!(error = %err, "failed to persist theme");
    }
    next
}

/// Session-scoped mobile-nav open flag. Not persisted beyond the session.
pub fn nav_open(session: &dyn Storage) -> bool {
    matches!(session.get(keys::NAV_OPEN), Ok(Some(raw)) if raw == "true")
}

pub fn toggle_nav(session: &dyn Storage) -> bool {
    let next = !nav_open(session);
    if let Err(err) = session.set(keys::NAV_OPEN, if next { "true" } else { "false" }) {
        warn!(error = %err, "failed to record nav state");
    }
    next
}

pub fn aria_expanded(open: bool) -> &'static str {
    if open { "true" } else { "false" }
}

/// Header greeting slot text, when a profile exists.
pub fn header_greeting(profile: Option<&SessionProfile>) -> Option<String> {
    profile.map(|p| format!("Hi, {} — {}", p.name, audience_label(p.category)))
}

/// "Tailored for" profile line, when a category was chosen.
pub fn active_profile_line(profile: Option<&SessionProfile>) -> Option<String> {
    profile
        .and_then(|p| p.category)
        .map(|category| format!("Tailored for: {category}"))
}

/// Prepare the header fragment for one page render: mark the nav link whose
/// `data-nav` matches the current document name active, paint the greeting
/// and profile slots, and reflect the mobile-nav open state.
pub fn paint_header(
    header: &str,
    current_file: &str,
    profile: Option<&SessionProfile>,
    nav_open: bool,
) -> String {
    let mut out = mark_active_nav(header, current_file);
    if let Some(greeting) = header_greeting(profile) {
        out = fill_slot(&out, "headerGreeting", &greeting);
    }
    if let Some(line) = active_profile_line(profile) {
        out = fill_slot(&out, "activeProfile", &line);
    }
    if nav_open {
        out = out
            .replace("aria-expanded=\"false\"", "aria-expanded=\"true\"")
            .replace("class=\"site-nav\"", "class=\"site-nav is-open\"");
    }
    out
}

/// Add the `is-active` class to the nav link matching `current_file`.
/// Nav links in the fragment carry `data-nav` and no class of their own.
pub fn mark_active_nav(header: &str, current_file: &str) -> String {
    let needle = format!("data-nav=\"{current_file}\"");
    let replacement = format!("data-nav=\"{current_file}\" class=\"is-active\"");
    header.replace(&needle, &replacement)
}

/// Stamp the current year into the footer's `#year` slot.
pub fn stamp_year(footer: &str) -> String {
    fill_slot(footer, "year", &Local::now().year().to_string())
}

/// Insert escaped text just inside the element carrying `id`. Slots in the
/// fragments are empty elements, possibly with extra attributes.
fn fill_slot(fragment: &str, id: &str, text: &str) -> String {
    let marker = format!("id=\"{id}\"");
    let Some(start) = fragment.find(&marker) else {
        return fragment.to_string();
    };
    let Some(open_end) = fragment[start..].find('>').map(|off| start + off + 1) else {
        return fragment.to_string();
    };
    let mut out = String::with_capacity(fragment.len() + text.len());
    out.push_str(&fragment[..open_end]);
    out.push_str(&escape_html(text));
    out.push_str(&fragment[open_end..]);
    out
}

/// Minimal HTML escaping for text painted into raw fragments.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Category;
    use crate::storage::MemoryStore;

    #[test]
    fn load_from_missing_root_propagates_the_error() {
        let err = PartialSet::load_from(Path::new("/definitely/not/here")).unwrap_err();
        assert!(err.to_string().contains("partials/header.html"));
    }

    #[test]
    fn load_from_reads_both_fragments() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("partials")).unwrap();
        fs::write(dir.path().join(HEADER_PATH), "<header></header>").unwrap();
        fs::write(dir.path().join(FOOTER_PATH), "<footer></footer>").unwrap();
        let set = PartialSet::load_from(dir.path()).unwrap();
        assert_eq!(set.header, "<header></header>");
        assert_eq!(set.footer, "<footer></footer>");
    }

    #[test]
    fn theme_defaults_to_light_and_toggle_round_trips() {
        let store = MemoryStore::new();
        assert_eq!(load_theme(&store), Theme::Light);
        assert_eq!(toggle_theme(&store), Theme::Dark);
        assert_eq!(store.get(keys::THEME).unwrap().as_deref(), Some("dark"));
        assert_eq!(toggle_theme(&store), Theme::Light);
        assert_eq!(load_theme(&store), Theme::Light);
    }

    #[test]
    fn unknown_stored_theme_reads_as_light() {
        let store = MemoryStore::new();
        store.set(keys::THEME, "sepia").unwrap();
        assert_eq!(load_theme(&store), Theme::Light);
    }

    #[test]
    fn active_nav_marking_targets_the_matching_link() {
        let header = PartialSet::builtin().header;
        let painted = mark_active_nav(&header, "careers.html");
        assert!(painted.contains("data-nav=\"careers.html\" class=\"is-active\""));
        assert!(!painted.contains("data-nav=\"quiz.html\" class=\"is-active\""));
    }

    #[test]
    fn header_greeting_uses_the_audience_label() {
        let profile = SessionProfile {
            name: "Maya".into(),
            category: Some(Category::Graduate),
        };
        assert_eq!(
            header_greeting(Some(&profile)).unwrap(),
            "Hi, Maya — Rising Graduate"
        );
        assert_eq!(header_greeting(None), None);
    }

    #[test]
    fn fill_slot_handles_extra_attributes_on_the_slot() {
        let profile = SessionProfile {
            name: "Ira".into(),
            category: Some(Category::Student),
        };
        let painted = paint_header(
            &PartialSet::builtin().header,
            "index.html",
            Some(&profile),
            false,
        );
        assert!(painted.contains("id=\"activeProfile\" class=\"text-muted\">Tailored for: student<"));
    }

    #[test]
    fn paint_header_escapes_the_visitor_name() {
        let profile = SessionProfile {
            name: "<script>".into(),
            category: None,
        };
        let painted = paint_header(&PartialSet::builtin().header, "index.html", Some(&profile), false);
        assert!(painted.contains("&lt;script&gt;"));
        assert!(!painted.contains("<span id=\"headerGreeting\"><script>"));
    }

    #[test]
    fn paint_header_reflects_nav_state() {
        let header = PartialSet::builtin().header;
        let open = paint_header(&header, "index.html", None, true);
        assert!(open.contains("aria-expanded=\"true\""));
        assert!(open.contains("site-nav is-open"));
        let closed = paint_header(&header, "index.html", None, false);
        assert!(closed.contains("aria-expanded=\"false\""));
    }

    #[test]
    fn nav_toggle_flips_the_session_flag() {
        let session = MemoryStore::new();
        assert!(!nav_open(&session));
        assert!(toggle_nav(&session));
        assert!(nav_open(&session));
        assert!(!toggle_nav(&session));
    }

    #[test]
    fn stamp_year_fills_the_footer_slot() {
        let stamped = stamp_year(&PartialSet::builtin().footer);
        assert!(!stamped.contains("<span id=\"year\"></span>"));
        assert!(stamped.contains("<span id=\"year\">2"));
    }
}
