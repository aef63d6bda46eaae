//! Window lookup by title.

use callmap_common::config::MatchPolicy;
use callmap_common::error::{CallmapError, CallmapResult};
use callmap_model::ScreenRect;

use crate::window::{short_key, WindowBackend, WindowEntry, WindowHandle};

/// Finds windows by title and raises them for capture.
pub struct WindowLocator<B> {
    backend: B,
    policy: MatchPolicy,
}

impl<B: WindowBackend> WindowLocator<B> {
    pub fn new(backend: B, policy: MatchPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Selection list of visible windows keyed by truncated title.
    ///
    /// Titles sharing a key collapse into one entry at the position of the
    /// first, holding the most recently listed full title.
    pub fn enumerate(&self) -> CallmapResult<Vec<WindowEntry>> {
        let mut entries: Vec<WindowEntry> = Vec::new();
        for window in self.backend.list_windows()? {
            let key = short_key(&window.title);
            match entries.iter_mut().find(|e| e.short_key == key) {
                Some(entry) => entry.title = window.title,
                None => entries.push(WindowEntry {
                    short_key: key,
                    title: window.title,
                }),
            }
        }
        Ok(entries)
    }

    /// Resolve a title to a window without raising it.
    pub fn find(&self, title: &str) -> CallmapResult<WindowHandle> {
        if title.trim().is_empty() {
            return Err(CallmapError::EmptyTitle);
        }

        let windows = self.backend.list_windows()?;
        if let Some(exact) = windows.iter().find(|w| w.title == title) {
            return Ok(exact.clone());
        }

        let loose = match self.policy {
            MatchPolicy::Exact => None,
            MatchPolicy::Prefix => windows.iter().find(|w| w.title.starts_with(title)),
            MatchPolicy::Substring => {
                let needle = title.to_lowercase();
                windows
                    .iter()
                    .find(|w| w.title.to_lowercase().contains(&needle))
            }
        };

        match loose {
            Some(window) => Ok(window.clone()),
            None => {
                tracing::warn!(title, policy = ?self.policy, "No visible window matches title");
                Err(CallmapError::WindowNotFound {
                    title: title.to_string(),
                    available: windows.into_iter().map(|w| w.title).collect(),
                })
            }
        }
    }

    /// Resolve a title and bring that window to the foreground.
    pub fn locate(&self, title: &str) -> CallmapResult<WindowHandle> {
        let handle = self.find(title)?;
        self.backend.foreground(&handle)?;
        tracing::info!(id = handle.id, title = %handle.title, "Window brought to foreground");
        Ok(handle)
    }

    pub fn bounding_rect(&self, handle: &WindowHandle) -> CallmapResult<ScreenRect> {
        self.backend.bounding_rect(handle)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::DisplayServer;

    struct FakeBackend {
        windows: Vec<WindowHandle>,
        raised: Mutex<Vec<u64>>,
    }

    impl FakeBackend {
        fn with_titles(titles: &[&str]) -> Self {
            Self {
                windows: titles
                    .iter()
                    .enumerate()
                    .map(|(i, t)| WindowHandle {
                        id: i as u64 + 1,
                        title: t.to_string(),
                    })
                    .collect(),
                raised: Mutex::new(Vec::new()),
            }
        }
    }

    impl WindowBackend for FakeBackend {
        fn list_windows(&self) -> CallmapResult<Vec<WindowHandle>> {
            Ok(self.windows.clone())
        }

        fn foreground(&self, handle: &WindowHandle) -> CallmapResult<()> {
            self.raised.lock().unwrap().push(handle.id);
            Ok(())
        }

        fn bounding_rect(&self, _handle: &WindowHandle) -> CallmapResult<ScreenRect> {
            Ok(ScreenRect::new(0, 0, 800, 600).unwrap())
        }

        fn capture_identity(&self, handle: &WindowHandle) -> CallmapResult<String> {
            Ok(handle.title.clone())
        }

        fn display_server(&self) -> DisplayServer {
            DisplayServer::Unknown
        }
    }

    fn locator(titles: &[&str], policy: MatchPolicy) -> WindowLocator<FakeBackend> {
        WindowLocator::new(FakeBackend::with_titles(titles), policy)
    }

    #[test]
    fn locate_raises_matching_window() {
        let locator = locator(&["Terminal", "Zoom Meeting"], MatchPolicy::Exact);
        let handle = locator.locate("Zoom Meeting").unwrap();
        assert_eq!(handle.id, 2);
        assert_eq!(*locator.backend().raised.lock().unwrap(), vec![2]);
    }

    #[test]
    fn missing_window_lists_alternatives_without_side_effects() {
        let locator = locator(&["Terminal", "Zoom Meeting"], MatchPolicy::Exact);
        let before = locator.enumerate().unwrap();

        let err = locator.locate("NoSuchWindow").unwrap_err();
        match err {
            CallmapError::WindowNotFound { title, available } => {
                assert_eq!(title, "NoSuchWindow");
                assert_eq!(available, vec!["Terminal", "Zoom Meeting"]);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert_eq!(locator.enumerate().unwrap(), before);
        assert!(locator.backend().raised.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_title_is_rejected() {
        let locator = locator(&["Terminal"], MatchPolicy::Substring);
        assert!(matches!(locator.locate(""), Err(CallmapError::EmptyTitle)));
        assert!(matches!(locator.locate("   "), Err(CallmapError::EmptyTitle)));
    }

    #[test]
    fn loose_policies_match_partial_titles() {
        let titles = ["Meeting notes", "Zoom Meeting - 4 participants"];
        let prefix = locator(&titles, MatchPolicy::Prefix);
        assert_eq!(prefix.find("Zoom").unwrap().id, 2);
        assert!(prefix.find("participants").is_err());

        let substring = locator(&titles, MatchPolicy::Substring);
        assert_eq!(substring.find("PARTICIPANTS").unwrap().id, 2);

        let exact = locator(&titles, MatchPolicy::Exact);
        assert!(exact.find("Zoom").is_err());
    }

    #[test]
    fn exact_match_wins_over_loose_match() {
        let titles = ["Zoom Meeting - 4 participants", "Zoom"];
        let prefix = locator(&titles, MatchPolicy::Prefix);
        assert_eq!(prefix.find("Zoom").unwrap().id, 2);
    }

    #[test]
    fn enumerate_dedups_on_short_key() {
        let locator = locator(
            &[
                "#general | BeeWare - Discord (1)",
                "Terminal",
                "#general | BeeWare - Discord (2)",
            ],
            MatchPolicy::Exact,
        );
        let entries = locator.enumerate().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].short_key, "#general | BeeWare - Discord");
        assert_eq!(entries[0].title, "#general | BeeWare - Discord (2)");
        assert_eq!(entries[1].title, "Terminal");
    }
}
