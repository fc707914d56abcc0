use std::str::FromStr;

use crate::error::{ApiError, QueryError};
use crate::model::{ImageDescriptor, QueryMode, SearchRequest, StoredImage, Ticket};
use crate::notify::NotificationSink;

fn valid_parameter(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// The search the user is composing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuerySpec {
    pub mode: QueryMode,
    /// k for KNN, radius for range search.
    pub parameter: f64,
}

impl QuerySpec {
    pub fn check(&self) -> Result<(), QueryError> {
        if !valid_parameter(self.parameter) {
            return Err(QueryError::NegativeParameter(self.parameter));
        }
        if self.mode == QueryMode::Knn && self.parameter.fract() != 0.0 {
            return Err(QueryError::FractionalK(self.parameter));
        }
        if self.mode == QueryMode::Knn && self.parameter >= u64::MAX as f64 {
            return Err(QueryError::KTooLarge(self.parameter));
        }
        Ok(())
    }

    /// Wire form of the parameter: `5` rather than `5.0`, `0.25` as is.
    pub fn query_string(&self) -> String {
        match self.mode {
            QueryMode::Knn => format!("{}", self.parameter as u64),
            QueryMode::RangeSearch => format!("{}", self.parameter),
        }
    }

    fn freeze(&self, image: &StoredImage) -> SearchRequest {
        SearchRequest {
            query: self.query_string(),
            image: image.path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Composing(QuerySpec),
    Submitting { ticket: Ticket, spec: QuerySpec },
    Completed(Vec<ImageDescriptor>),
}

impl Default for QueryState {
    fn default() -> Self {
        QueryState::Composing(QuerySpec::default())
    }
}

/// A frozen search the caller must POST to `mode.endpoint()`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingQuery {
    pub ticket: Ticket,
    pub mode: QueryMode,
    pub request: SearchRequest,
}

impl PendingQuery {
    pub fn endpoint(&self) -> &'static str {
        self.mode.endpoint()
    }
}

#[derive(Debug)]
pub struct QueryController {
    state: QueryState,
    notification_ms: u32,
    tickets: u64,
}

impl QueryController {
    pub fn new(notification_ms: u32) -> Self {
        Self {
            state: QueryState::default(),
            notification_ms,
            tickets: 0,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, QueryState::Submitting { .. })
    }

    /// The spec being edited, if the form is open.
    pub fn draft(&self) -> Option<&QuerySpec> {
        match &self.state {
            QueryState::Composing(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn results(&self) -> Option<&[ImageDescriptor]> {
        match &self.state {
            QueryState::Completed(results) => Some(results),
            _ => None,
        }
    }

    fn draft_mut(&mut self) -> Result<&mut QuerySpec, QueryError> {
        match &mut self.state {
            QueryState::Composing(spec) => Ok(spec),
            _ => Err(QueryError::NotComposing),
        }
    }

    pub fn update_mode(&mut self, mode: QueryMode) -> Result<(), QueryError> {
        self.draft_mut()?.mode = mode;
        Ok(())
    }

    /// Mode by its form label. Labels that name no known mode are ignored.
    pub fn update_mode_str(&mut self, label: &str) -> Result<(), QueryError> {
        match QueryMode::from_str(label) {
            Ok(mode) => self.update_mode(mode),
            Err(_) => {
                log::debug!("ignoring unknown query mode {:?}", label);
                Ok(())
            }
        }
    }

    pub fn update_parameter(&mut self, value: f64) -> Result<(), QueryError> {
        if !valid_parameter(value) {
            return Err(QueryError::NegativeParameter(value));
        }
        // normalises -0.0
        self.draft_mut()?.parameter = value + 0.0;
        Ok(())
    }

    /// Parameter as typed into the form. Blank or partial input such as
    /// `"1e"` leaves the draft alone and returns `Ok(false)`.
    pub fn update_parameter_str(&mut self, raw: &str) -> Result<bool, QueryError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(false);
        }
        match raw.parse::<f64>() {
            Ok(value) => self.update_parameter(value).map(|()| true),
            Err(_) => {
                log::debug!("ignoring non-numeric query input {:?}", raw);
                Ok(false)
            }
        }
    }

    /// Freezes the draft against `image` and moves to `Submitting`.
    pub fn submit(
        &mut self,
        image: &StoredImage,
        sink: &mut dyn NotificationSink,
    ) -> Result<PendingQuery, QueryError> {
        let spec = *self.draft_mut()?;
        if let Err(err) = spec.check() {
            sink.show(&err.to_string(), self.notification_ms);
            return Err(err);
        }

        let ticket = Ticket::next(&mut self.tickets);
        let request = spec.freeze(image);
        log::debug!(
            "query {:?}: Composing -> Submitting ({} {})",
            ticket,
            spec.mode,
            request.query
        );
        self.state = QueryState::Submitting { ticket, spec };
        Ok(PendingQuery {
            ticket,
            mode: spec.mode,
            request,
        })
    }

    /// Applies the outcome of the search identified by `ticket`. A failure
    /// reopens the form with the spec that was submitted.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<ImageDescriptor>, ApiError>,
        sink: &mut dyn NotificationSink,
    ) -> bool {
        let spec = match &self.state {
            QueryState::Submitting {
                ticket: current,
                spec,
            } if *current == ticket => *spec,
            _ => {
                log::warn!("dropping stale query completion {:?}", ticket);
                return false;
            }
        };

        match outcome {
            Ok(results) => {
                log::info!("query {:?} returned {} images", ticket, results.len());
                self.state = QueryState::Completed(results);
            }
            Err(err) => {
                log::debug!("query {:?} failed: {}", ticket, err);
                sink.show(&err.user_message(), self.notification_ms);
                self.state = QueryState::Composing(spec);
            }
        }
        true
    }

    pub fn reset(&mut self) {
        log::debug!("query reset -> Composing");
        self.state = QueryState::default();
    }
}
