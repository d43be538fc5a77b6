//! Event handler: runs every rule set over every record payload

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::event::Event;
use crate::config::{ProjectorConfig, Validator};
use crate::error::{ProjectionError, ProjectionResult, RuleFailure};
use crate::manifest::Manifest;
use crate::projection::Projector;
use crate::resources::ResourceStore;

/// Projection of one record through one rule set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Position of the record in the event
    pub record: usize,
    pub source: Option<String>,
    pub resource: String,
    pub document: Value,
    pub failures: Vec<RuleFailure>,
}

/// Everything produced for one event
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HandlerResponse {
    pub reports: Vec<Report>,
}

impl HandlerResponse {
    /// Reports for one resource, in record order
    pub fn for_resource<'a>(&'a self, resource: &'a str) -> impl Iterator<Item = &'a Report> + 'a {
        self.reports.iter().filter(move |r| r.resource == resource)
    }

    /// The response as a JSON document
    ///
    /// # Errors
    ///
    /// Propagates a `serde_json` failure to represent a report.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Applies a resource store to inbound events
#[derive(Debug, Clone)]
pub struct EventHandler {
    store: ResourceStore,
    projector: Projector,
}

impl EventHandler {
    /// # Errors
    ///
    /// Returns `Config` when `config` fails validation.
    pub fn new(store: ResourceStore, config: ProjectorConfig) -> ProjectionResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            projector: Projector::new(config),
        })
    }

    #[must_use]
    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    /// Project every record payload through every rule set
    ///
    /// Records whose detail cannot be decoded are skipped.
    ///
    /// # Errors
    ///
    /// `Event` when `event` is not a `Records` envelope; with `fail_fast`,
    /// the first rule failure.
    pub fn handle(&self, event: &Value) -> ProjectionResult<HandlerResponse> {
        let event: Event = serde_json::from_value(event.clone())
            .map_err(|e| ProjectionError::event(format!("malformed event: {e}")))?;

        let mut response = HandlerResponse::default();
        for (position, record) in event.records.iter().enumerate() {
            let payload = match record.payload() {
                Ok(payload) => payload,
                Err(reason) => {
                    warn!(record = position, "skipping record: {reason}");
                    continue;
                }
            };

            for (resource, rules) in self.store.iter() {
                let manifest = Manifest::new(payload.clone(), rules.to_vec());
                let (document, failures) = self.projector.project(&manifest)?.into_parts();
                debug!(
                    record = position,
                    resource,
                    failures = failures.len(),
                    "record projected"
                );
                response.reports.push(Report {
                    record: position,
                    source: record.source.clone(),
                    resource: resource.to_string(),
                    document,
                    failures,
                });
            }
        }

        info!(
            records = event.records.len(),
            reports = response.reports.len(),
            "event handled"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handler::generate_event;
    use crate::manifest::Rule;

    fn handler() -> EventHandler {
        let store = ResourceStore::from_rule_sets([
            ("loans.summary", vec![Rule::new("$.loan.id", "$.summary.loan")]),
            ("loans.fees", vec![Rule::new("$.fee", "$.fees[?(@.type=='late')].amount")]),
        ]);
        EventHandler::new(store, ProjectorConfig::default()).expect("default config is valid")
    }

    #[test]
    fn test_every_rule_set_runs() {
        let event = generate_event(&json!({"loan": {"id": "L-9"}, "fee": 25}));
        let response = handler().handle(&event).expect("event should be handled");

        assert_eq!(response.reports.len(), 2);
        let fees = response.for_resource("loans.fees").next().expect("fees report");
        assert_eq!(fees.document, json!({"fees": [{"type": "late", "amount": 25}]}));
        let summary = response.for_resource("loans.summary").next().expect("summary report");
        assert_eq!(summary.document, json!({"summary": {"loan": "L-9"}}));
        assert_eq!(summary.source.as_deref(), Some("testing.local"));
    }

    #[test]
    fn test_missing_records_is_an_error() {
        let err = handler().handle(&json!({"detail": "{}"})).expect_err("no Records envelope");
        assert!(matches!(err, ProjectionError::Event(_)));
    }

    #[test]
    fn test_undecodable_record_is_skipped() {
        let event = json!({"Records": [{"detail": "{oops"}, {"detail": {"fee": 1}}]});
        let response = handler().handle(&event).expect("event should be handled");
        assert!(response.reports.iter().all(|r| r.record == 1));
        assert_eq!(response.reports.len(), 2);
    }

    #[test]
    fn test_response_serializes() {
        let event = generate_event(&json!({"fee": 3}));
        let value = handler()
            .handle(&event)
            .expect("event should be handled")
            .to_json()
            .expect("response should serialize");
        assert_eq!(value["reports"][0]["resource"], json!("loans.fees"));
        assert_eq!(value["reports"][1]["document"], json!({}));
        assert_eq!(value["reports"][1]["failures"], json!([]));
    }
}
