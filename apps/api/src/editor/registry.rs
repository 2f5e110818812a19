use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::editor::session::{EditingSession, SessionSnapshot};
use crate::models::resume::ResumeDocument;
use crate::scratch::{ScratchMirror, ScratchStore};
use crate::templates::Template;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

struct LiveSession {
    session: EditingSession,
    last_used: Instant,
}

/// Live editing sessions keyed by id.
///
/// Sessions idle for longer than the idle timeout are dropped from memory on
/// the next `open` or `with_session`. Their scratch mirror stays behind, so a
/// later request for the same id restores them.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, LiveSession>>,
    scratch: Arc<dyn ScratchStore>,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub fn new(scratch: Arc<dyn ScratchStore>, idle_timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            scratch,
            idle_timeout,
        }
    }

    /// Opens a new session and returns its initial state.
    pub async fn open(
        &self,
        document: ResumeDocument,
        template: Template,
        record_id: Option<Uuid>,
    ) -> SessionSnapshot {
        let id = Uuid::new_v4();
        let mirror = ScratchMirror::new(self.scratch.clone(), id);
        let session = EditingSession::new(id, document, template, record_id, mirror);
        let snapshot = session.snapshot();

        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;
        self.evict_idle(&mut sessions, now);
        sessions.insert(
            session.id(),
            LiveSession {
                session,
                last_used: now,
            },
        );
        info!("Opened editing session {id} (record: {record_id:?})");
        snapshot
    }

    /// Runs `f` against the session, restoring it from scratch storage if it
    /// is not in memory. `None` when the session is unknown everywhere.
    pub async fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut EditingSession) -> R,
    ) -> Option<R> {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;
        self.evict_idle(&mut sessions, now);
        if !sessions.contains_key(&id) {
            let mirror = ScratchMirror::new(self.scratch.clone(), id);
            let session = EditingSession::restore(id, mirror)?;
            debug!("Restored editing session {id} from scratch storage");
            sessions.insert(
                id,
                LiveSession {
                    session,
                    last_used: now,
                },
            );
        }
        sessions.get_mut(&id).map(|live| {
            live.last_used = now;
            f(&mut live.session)
        })
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    fn evict_idle(&self, sessions: &mut HashMap<Uuid, LiveSession>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, live| now.duration_since(live.last_used) < self.idle_timeout);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!("Evicted {evicted} idle editing sessions from memory");
        }
    }
}
