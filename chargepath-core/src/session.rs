//! Last-request-wins planning for interactive callers.
//!
//! A [`PlanSession`] numbers every submitted request. Submitting a new
//! request aborts the one still in flight, and a request whose result arrives
//! after a newer request was submitted is reported as superseded instead of
//! being delivered.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use futures_util::future::{AbortHandle, Abortable, Aborted};

use crate::{PlanError, PlanRequest, RoutePlan, RoutePlanner, RouteProvider, StationDirectory, VehicleParams};

/// Monotonically increasing identifier of a submitted request.
pub type RequestId = u64;

/// What happened to a submitted request.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// The request was the latest one when it finished.
    Completed {
        /// Identifier assigned at submission.
        request_id: RequestId,
        /// Planner result.
        result: Result<RoutePlan, PlanError>,
    },
    /// A newer request was submitted, or the request was cancelled, before
    /// this one finished. Any partial result was discarded.
    Superseded {
        /// Identifier assigned at submission.
        request_id: RequestId,
    },
}

impl PlanOutcome {
    /// Identifier of the request this outcome belongs to.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        match self {
            Self::Completed { request_id, .. } | Self::Superseded { request_id } => *request_id,
        }
    }

    /// Consume the outcome, returning the planner result if it was delivered.
    #[must_use]
    pub fn into_result(self) -> Option<Result<RoutePlan, PlanError>> {
        match self {
            Self::Completed { result, .. } => Some(result),
            Self::Superseded { .. } => None,
        }
    }
}

/// Wraps a [`RoutePlanner`] with last-request-wins semantics.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use chargepath_core::test_support::{StubRouteProvider, StubStationDirectory};
/// use chargepath_core::{
///     BatteryState, PlanOutcome, PlanRequest, PlanSession, RoutePlanner, Trip, VehicleParams,
/// };
///
/// let session = PlanSession::new(RoutePlanner::new(
///     StubRouteProvider::new(),
///     StubStationDirectory::empty(),
/// ));
/// let request = PlanRequest {
///     trip: Trip::new(Coord { x: 77.2, y: 28.6 }, Coord { x: 77.3, y: 28.7 }),
///     battery: BatteryState::new(90.0)?,
/// };
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let outcome = runtime.block_on(session.submit(request, VehicleParams::default()));
/// assert!(matches!(outcome, PlanOutcome::Completed { request_id: 1, .. }));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct PlanSession<R, S> {
    planner: RoutePlanner<R, S>,
    latest: AtomicU64,
    in_flight: Mutex<Option<(RequestId, AbortHandle)>>,
}

impl<R, S> PlanSession<R, S>
where
    R: RouteProvider,
    S: StationDirectory,
{
    /// Create a session around `planner`.
    #[must_use]
    pub const fn new(planner: RoutePlanner<R, S>) -> Self {
        Self {
            planner,
            latest: AtomicU64::new(0),
            in_flight: Mutex::new(None),
        }
    }

    /// The wrapped planner.
    #[must_use]
    pub const fn planner(&self) -> &RoutePlanner<R, S> {
        &self.planner
    }

    /// Identifier of the most recently submitted request, or `0` if none.
    #[must_use]
    pub fn latest_request_id(&self) -> RequestId {
        self.latest.load(Ordering::SeqCst)
    }

    /// Submit a request, superseding any request still in flight.
    ///
    /// The identifier is assigned and the previous request aborted when this
    /// method is called, not when the returned future is first polled.
    pub fn submit(
        &self,
        request: PlanRequest,
        vehicle: VehicleParams,
    ) -> impl Future<Output = PlanOutcome> + '_ {
        let request_id = self.latest.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        let (handle, registration) = AbortHandle::new_pair();
        if let Some((previous, previous_handle)) = self.slot().replace((request_id, handle)) {
            log::debug!("request {request_id} supersedes request {previous}");
            previous_handle.abort();
        }

        async move {
            let planning = Abortable::new(
                async move { self.planner.plan_request(&request, &vehicle).await },
                registration,
            );
            let finished = planning.await;
            self.release(request_id);
            match finished {
                Ok(result) if self.latest_request_id() == request_id => PlanOutcome::Completed {
                    request_id,
                    result,
                },
                Ok(_) => {
                    log::debug!("discarding stale result of request {request_id}");
                    PlanOutcome::Superseded { request_id }
                }
                Err(Aborted) => {
                    log::debug!("request {request_id} was aborted before finishing");
                    PlanOutcome::Superseded { request_id }
                }
            }
        }
    }

    /// Abort the request in flight, if any. It resolves as superseded.
    pub fn cancel_in_flight(&self) {
        if let Some((request_id, handle)) = self.slot().take() {
            log::debug!("cancelling request {request_id}");
            handle.abort();
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<(RequestId, AbortHandle)>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self, request_id: RequestId) {
        let mut slot = self.slot();
        if slot.as_ref().is_some_and(|(current, _)| *current == request_id) {
            *slot = None;
        }
    }
}
