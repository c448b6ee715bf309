use crate::storage::{Storage, StorageError, keys};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Recently-viewed entries retained.
pub const RECENT_CAP: usize = 8;
/// Bookmarks retained.
pub const BOOKMARK_CAP: usize = 200;

const PLACEHOLDER_HREF: &str = "#";
const UNTITLED_LABEL: &str = "Untitled";

/// One navigation-history entry. Unique by `(label, href)`, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub label: String,
    pub href: String,
    /// Epoch milliseconds.
    pub ts: i64,
}

/// One saved entry. Unique by `id` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkEntry {
    pub id: String,
    pub href: String,
    pub label: String,
}

pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Sanitize a raw persisted list: drop entries with an empty trimmed label,
/// default blank hrefs, coerce bad timestamps to `now_ms`, deduplicate by
/// `(label, href)` keeping the newest occurrence, truncate to `cap`.
/// Malformed raw data yields an empty list, never an error.
pub fn sanitize_entries(raw: &str, cap: usize, now_ms: i64) -> Vec<ListEntry> {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => return Vec::new(),
    };
    let Some(items) = parsed.as_array() else {
        return Vec::new();
    };
    let mut clean = Vec::new();
    let mut seen = HashSet::new();
    for item in items {
        let label = item
            .get("label")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or("");
        if label.is_empty() {
            continue;
        }
        let href = item
            .get("href")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .unwrap_or(PLACEHOLDER_HREF);
        if !seen.insert((label.to_string(), href.to_string())) {
            continue;
        }
        let ts = item
            .get("ts")
            .and_then(Value::as_i64)
            .filter(|&ts| ts > 0)
            .unwrap_or(now_ms);
        clean.push(ListEntry {
            label: label.to_string(),
            href: href.to_string(),
            ts,
        });
    }
    clean.truncate(cap);
    clean
}

/// Same policy for the bookmark list: entries without an id are dropped,
/// missing href/label get placeholders, duplicates by id are collapsed.
pub fn sanitize_bookmarks(raw: &str, cap: usize) -> Vec<BookmarkEntry> {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => return Vec::new(),
    };
    let Some(items) = parsed.as_array() else {
        return Vec::new();
    };
    let mut clean = Vec::new();
    let mut seen = HashSet::new();
    for item in items {
        let id = item
            .get("id")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or("");
        if id.is_empty() || !seen.insert(id.to_string()) {
            continue;
        }
        clean.push(BookmarkEntry {
            id: id.to_string(),
            href: non_empty_or(item.get("href").and_then(Value::as_str), PLACEHOLDER_HREF),
            label: non_empty_or(item.get("label").and_then(Value::as_str), UNTITLED_LABEL),
        });
    }
    clean.truncate(cap);
    clean
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.to_string(),
        None => fallback.to_string(),
    }
}

/// Human relative-time string for a recent entry timestamp.
pub fn time_ago(ts_ms: i64, now_ms: i64) -> String {
    let seconds = ((now_ms - ts_ms) / 1000).max(1);
    if seconds < 60 {
        return format!("{seconds}s ago");
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

/// The recently-viewed list, capped at [`RECENT_CAP`]. Mutations return the
/// new state; rendering is the caller's concern.
pub struct RecentList {
    storage: Arc<dyn Storage>,
}

impl RecentList {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Read, sanitize, and write the sanitized form back (self-repair).
    /// A storage failure degrades to an empty list.
    pub fn read(&self) -> Vec<ListEntry> {
        let raw = match self.storage.get(keys::RECENT) {
            Ok(Some(raw)) => raw,
            Ok(None) => String::from("[]"),
            Err(err) => {
                warn!(error = %err, "failed to read recent items");
                return Vec::new();
            }
        };
        let entries = sanitize_entries(&raw, RECENT_CAP, now_ms());
        self.persist(&entries);
        entries
    }

    /// Record a visit. A blank label is a no-op. An existing `(label, href)`
    /// entry moves to the front with a fresh timestamp.
    pub fn push(&self, label: &str, href: &str) -> Vec<ListEntry> {
        let label = label.trim();
        if label.is_empty() {
            return self.read();
        }
        let href = match href.trim() {
            "" => PLACEHOLDER_HREF,
            trimmed => trimmed,
        };
        let mut entries = self.read();
        entries.retain(|entry| !(entry.label == label && entry.href == href));
        entries.insert(
            0,
            ListEntry {
                label: label.to_string(),
                href: href.to_string(),
                ts: now_ms(),
            },
        );
        entries.truncate(RECENT_CAP);
        self.persist(&entries);
        entries
    }

    fn persist(&self, entries: &[ListEntry]) {
        if let Err(err) = persist_json(self.storage.as_ref(), keys::RECENT, entries) {
            warn!(error = %err, "failed to persist recent items");
        }
    }
}

/// The bookmark list, capped at [`BOOKMARK_CAP`].
pub struct BookmarkList {
    storage: Arc<dyn Storage>,
}

/// A rendered export: one line per bookmark, 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkExport {
    pub filename: &'static str,
    pub body: String,
}

impl BookmarkList {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn read(&self) -> Vec<BookmarkEntry> {
        let raw = match self.storage.get(keys::BOOKMARKS) {
            Ok(Some(raw)) => raw,
            Ok(None) => String::from("[]"),
            Err(err) => {
                warn!(error = %err, "failed to read bookmarks");
                return Vec::new();
            }
        };
        let entries = sanitize_bookmarks(&raw, BOOKMARK_CAP);
        self.persist(&entries);
        entries
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().iter().any(|entry| entry.id == id)
    }

    /// Remove the entry whose id matches, or prepend a normalized copy.
    /// An empty id is a no-op.
    pub fn toggle(&self, entry: &BookmarkEntry) -> Vec<BookmarkEntry> {
        let id = entry.id.trim();
        if id.is_empty() {
            return self.read();
        }
        let mut list = self.read();
        if let Some(pos) = list.iter().position(|existing| existing.id == id) {
            list.remove(pos);
        } else {
            list.insert(
                0,
                BookmarkEntry {
                    id: id.to_string(),
                    href: non_empty_or(Some(&entry.href), PLACEHOLDER_HREF),
                    label: non_empty_or(Some(&entry.label), UNTITLED_LABEL),
                },
            );
        }
        list.truncate(BOOKMARK_CAP);
        self.persist(&list);
        list
    }

    /// `None` when there is nothing to export.
    pub fn export(&self) -> Option<BookmarkExport> {
        let list = self.read();
        if list.is_empty() {
            return None;
        }
        let lines: Vec<String> = list
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                if entry.href.is_empty() {
                    format!("{}. {}", idx + 1, entry.label)
                } else {
                    format!("{}. {} — {}", idx + 1, entry.label, entry.href)
                }
            })
            .collect();
        Some(BookmarkExport {
            filename: "Bookmarks.txt",
            body: lines.join("\n"),
        })
    }

    /// Delete the persisted key entirely and return the empty state.
    pub fn clear(&self) -> Vec<BookmarkEntry> {
        if let Err(err) = self.storage.remove(keys::BOOKMARKS) {
            warn!(error = %err, "failed to clear bookmarks");
        }
        Vec::new()
    }

    fn persist(&self, entries: &[BookmarkEntry]) {
        if let Err(err) = persist_json(self.storage.as_ref(), keys::BOOKMARKS, entries) {
            warn!(error = %err, "failed to persist bookmarks");
        }
    }
}

fn persist_json<T: Serialize + ?Sized>(storage: &dyn Storage, key: &str, value: &T) -> Result<(), StorageError> {
    let body = serde_json::to_string(value)?;
    storage.set(key, &body)
}
