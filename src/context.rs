//! Service context bundling the port implementations for a run.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::native_search::NativeSearcher;
use crate::adapters::live::silver_searcher::SilverSearcher;
use crate::adapters::recording::RecordingSearchOracle;
use crate::adapters::replaying::ReplayingSearchOracle;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::SearcherKind;
use crate::error::SweepError;
use crate::ports::{FileSystem, SearchOracle};

/// The external collaborators a sweep talks to.
#[derive(Clone)]
pub struct ServiceContext {
    /// Text search over the source tree.
    pub search: Arc<dyn SearchOracle>,
    /// Disk access.
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContext {
    /// Context backed by the real disk and the chosen search backend.
    #[must_use]
    pub fn live(searcher: SearcherKind) -> Self {
        let search: Arc<dyn SearchOracle> = match searcher {
            SearcherKind::Ag => Arc::new(SilverSearcher::new()),
            SearcherKind::Native => Arc::new(NativeSearcher),
        };
        Self { search, fs: Arc::new(LiveFileSystem) }
    }

    /// Context built from explicit adapters.
    #[must_use]
    pub fn new(search: Arc<dyn SearchOracle>, fs: Arc<dyn FileSystem>) -> Self {
        Self { search, fs }
    }

    /// Context that answers searches from a recorded cassette.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::Cassette`] if the cassette cannot be loaded.
    pub fn replaying(cassette: &Path) -> Result<Self, SweepError> {
        let replayer = CassetteReplayer::load(cassette)
            .map_err(|message| SweepError::Cassette { path: cassette.to_path_buf(), message })?;
        Ok(Self {
            search: Arc::new(ReplayingSearchOracle::new(replayer)),
            fs: Arc::new(LiveFileSystem),
        })
    }

    /// Wraps the search backend so every answer is recorded.
    ///
    /// Call [`CassetteRecorder::write`] on the returned recorder once the
    /// command has finished.
    #[must_use]
    pub fn recording_to(self, cassette: &Path) -> (Self, Arc<Mutex<CassetteRecorder>>) {
        let name = format!("sweep-{}", Utc::now().format("%Y-%m-%dT%H-%M-%S"));
        let recorder =
            Arc::new(Mutex::new(CassetteRecorder::new(cassette, name, self.search.name())));
        let search = Arc::new(RecordingSearchOracle::new(self.search, Arc::clone(&recorder)));
        (Self { search, fs: self.fs }, recorder)
    }

    /// Checks that the search backend can run.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::SearchOracleUnavailable`] if the probe fails.
    pub fn probe_search(&self) -> Result<(), SweepError> {
        self.search.probe().map_err(|e| SweepError::SearchOracleUnavailable {
            oracle: self.search.name().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scripted::{ScriptedFileSystem, ScriptedSearchOracle};

    #[test]
    fn probe_failure_names_backend() {
        let ctx = ServiceContext::new(
            Arc::new(ScriptedSearchOracle::new().unavailable("missing")),
            Arc::new(ScriptedFileSystem::new()),
        );
        let err = ctx.probe_search().unwrap_err();
        assert_eq!(err.to_string(), "search backend `scripted` is unavailable: missing");
    }

    #[test]
    fn recorded_answers_replay_identically() {
        let dir = tempfile::tempdir().unwrap();
        let cassette = dir.path().join("run.cassette.yaml");

        let ctx = ServiceContext::new(
            Arc::new(ScriptedSearchOracle::new().with_hit("a.png")),
            Arc::new(ScriptedFileSystem::new()),
        );
        let (ctx, recorder) = ctx.recording_to(&cassette);
        assert!(ctx.search.found("a.png", Path::new("src")));
        assert!(!ctx.search.found(":/images/a.png", Path::new("src")));
        recorder.lock().unwrap().write().unwrap();

        let replay = ServiceContext::replaying(&cassette).unwrap();
        assert_eq!(replay.search.name(), "scripted");
        assert!(replay.search.found("a.png", Path::new("src")));
        assert!(!replay.search.found(":/images/a.png", Path::new("src")));
    }

    #[test]
    fn missing_cassette_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServiceContext::replaying(&dir.path().join("none.yaml")).err().unwrap();
        assert!(matches!(err, SweepError::Cassette { .. }));
    }

    #[test]
    fn live_native_context_probes_ok() {
        let ctx = ServiceContext::live(SearcherKind::Native);
        assert_eq!(ctx.search.name(), "native");
        assert!(ctx.probe_search().is_ok());
    }
}
