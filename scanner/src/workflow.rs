use shared::{PredictionResult, TreatmentAdvice};
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::api::{AdviceSource, Classifier};
use crate::error::ScanError;
use crate::session::{Outcome, ScanSession, ScanState, SessionToken};
use crate::upload::UploadedImage;

enum Completion {
    Detection {
        token: SessionToken,
        result: Result<PredictionResult, ScanError>,
    },
    Advice {
        token: SessionToken,
        result: Result<TreatmentAdvice, ScanError>,
    },
}

/// Drives a [`ScanSession`] against real endpoints. Requests run as spawned
/// tasks; their results come back through `next_completion`, which is the
/// only place the session is updated with network results. A request that
/// panics still completes, as a network error tagged with its token.
pub struct ScanController<C: Classifier, A: AdviceSource> {
    session: ScanSession,
    classifier: Arc<C>,
    advisor: Arc<A>,
    pending: JoinSet<Completion>,
}

impl<C: Classifier, A: AdviceSource> ScanController<C, A> {
    pub fn new(session: ScanSession, classifier: Arc<C>, advisor: Arc<A>) -> Self {
        Self {
            session,
            classifier,
            advisor,
            pending: JoinSet::new(),
        }
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ScanSession {
        &mut self.session
    }

    pub fn state(&self) -> ScanState {
        self.session.state()
    }

    /// Requests already in flight are left running; their results will be discarded.
    pub fn select_image(&mut self, image: UploadedImage) -> Result<SessionToken, ScanError> {
        Ok(self.session.select_image(image)?)
    }

    pub fn request_detection(&mut self) -> Result<SessionToken, ScanError> {
        let ticket = self.session.begin_detection()?;
        let classifier = Arc::clone(&self.classifier);
        let token = ticket.token;

        self.pending.spawn(async move {
            let request = tokio::spawn(async move { classifier.detect(ticket.image).await });
            let result = request.await.unwrap_or_else(|e| {
                log::error!("Detection task failed: {}", e);
                Err(ScanError::Network(format!("Detection task failed: {}", e)))
            });
            Completion::Detection { token, result }
        });
        Ok(token)
    }

    pub fn request_advice(&mut self) -> Result<SessionToken, ScanError> {
        let ticket = self.session.begin_advice()?;
        let advisor = Arc::clone(&self.advisor);
        let token = ticket.token;

        self.pending.spawn(async move {
            let request = tokio::spawn(async move { advisor.fetch_advice(ticket.prediction).await });
            let result = request.await.unwrap_or_else(|e| {
                log::error!("Advice task failed: {}", e);
                Err(ScanError::Network(format!("Advice task failed: {}", e)))
            });
            Completion::Advice { token, result }
        });
        Ok(token)
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Waits for the next request to finish and applies it. `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<Outcome> {
        loop {
            match self.pending.join_next().await? {
                Ok(Completion::Detection { token, result }) => {
                    return Some(self.session.finish_detection(token, result));
                }
                Ok(Completion::Advice { token, result }) => {
                    return Some(self.session.finish_advice(token, result));
                }
                Err(e) => {
                    log::error!("Request task failed: {}", e);
                }
            }
        }
    }

    /// Applies completions until the current image has no request outstanding.
    pub async fn settle(&mut self) -> ScanState {
        while self.session.is_busy() {
            if self.next_completion().await.is_none() {
                break;
            }
        }
        self.session.state()
    }
}
