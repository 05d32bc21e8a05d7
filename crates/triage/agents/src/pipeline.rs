//! Assembly of the reference triage pipeline
//!
//! classify → dispatch branch → one specialist handler → score →
//! escalation branch → human_review | finalize. The provider handle is
//! injected here and shared by the handler stages; swap it to run the
//! same topology over different data.

use crate::classify::ClassifyStage;
use crate::handlers::{BillingStage, GeneralStage, ReturnsStage, TechStage};
use crate::review::{FinalizeStage, HumanReviewStage, ScoreStage};
use crate::routers::{DispatchRouter, EscalationRouter};
use flow_types::{FlowGraph, FlowResult, OutcomeKey, StageKey};
use std::sync::Arc;
use triage_core::{Intent, ReviewOutcome, TicketRecord};
use triage_directory::DataProvider;

pub const CLASSIFY: &str = "classify";
pub const BILLING_AGENT: &str = "billing_agent";
pub const TECH_AGENT: &str = "tech_agent";
pub const RETURNS_AGENT: &str = "returns_agent";
pub const GENERAL_AGENT: &str = "general_agent";
pub const SCORE: &str = "score";
pub const HUMAN_REVIEW: &str = "human_review";
pub const FINALIZE: &str = "finalize";

/// Build and validate the support-triage graph over the given provider.
pub fn support_pipeline(
    provider: Arc<dyn DataProvider>,
) -> FlowResult<FlowGraph<TicketRecord>> {
    let mut graph = FlowGraph::new();

    graph.register_stage(CLASSIFY, ClassifyStage)?;
    graph.register_stage(BILLING_AGENT, BillingStage::new(Arc::clone(&provider)))?;
    graph.register_stage(TECH_AGENT, TechStage::new(Arc::clone(&provider)))?;
    graph.register_stage(RETURNS_AGENT, ReturnsStage::new(Arc::clone(&provider)))?;
    graph.register_stage(GENERAL_AGENT, GeneralStage::new(provider))?;
    graph.register_stage(SCORE, ScoreStage)?;
    graph.register_stage(HUMAN_REVIEW, HumanReviewStage)?;
    graph.register_stage(FINALIZE, FinalizeStage)?;

    graph.set_entry(CLASSIFY)?;

    graph.register_conditional_edge(
        CLASSIFY,
        DispatchRouter,
        [
            (OutcomeKey::from(Intent::Returns), StageKey::from(RETURNS_AGENT)),
            (OutcomeKey::from(Intent::Billing), StageKey::from(BILLING_AGENT)),
            (OutcomeKey::from(Intent::TechSupport), StageKey::from(TECH_AGENT)),
            (OutcomeKey::from(Intent::OrderStatus), StageKey::from(GENERAL_AGENT)),
            (OutcomeKey::from(Intent::General), StageKey::from(GENERAL_AGENT)),
        ],
    )?;

    graph.register_edge(BILLING_AGENT, SCORE)?;
    graph.register_edge(TECH_AGENT, SCORE)?;
    graph.register_edge(RETURNS_AGENT, SCORE)?;
    graph.register_edge(GENERAL_AGENT, SCORE)?;

    graph.register_conditional_edge(
        SCORE,
        EscalationRouter,
        [
            (OutcomeKey::from(ReviewOutcome::Escalate), StageKey::from(HUMAN_REVIEW)),
            (OutcomeKey::from(ReviewOutcome::Finalize), StageKey::from(FINALIZE)),
        ],
    )?;

    graph.mark_terminal(HUMAN_REVIEW)?;
    graph.mark_terminal(FINALIZE)?;

    graph.validate()?;
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_engine::FlowExecutor;
    use triage_core::{SubjectId, TicketId};
    use triage_directory::InMemoryProvider;

    fn demo_graph() -> FlowGraph<TicketRecord> {
        support_pipeline(Arc::new(InMemoryProvider::with_demo_data()))
            .expect("reference topology must validate")
    }

    fn ticket(subject: &str, query: &str) -> TicketRecord {
        TicketRecord::new(TicketId::new("TKT1"), SubjectId::new(subject), query)
    }

    fn visited_keys(visited: &[StageKey]) -> Vec<&str> {
        visited.iter().map(|key| key.as_str()).collect()
    }

    #[test]
    fn test_pipeline_validates() {
        let graph = demo_graph();
        assert_eq!(graph.stage_count(), 8);
        assert!(graph.is_terminal(&StageKey::from(HUMAN_REVIEW)));
        assert!(graph.is_terminal(&StageKey::from(FINALIZE)));
    }

    #[test]
    fn test_dispatch_covers_every_intent() {
        let graph = demo_graph();
        let branch = graph.branch(&StageKey::from(CLASSIFY)).unwrap();
        for intent in Intent::ALL {
            assert!(branch.target(&OutcomeKey::from(intent)).is_some());
        }
    }

    #[test]
    fn test_returns_ticket_end_to_end() {
        let graph = demo_graph();
        let run = FlowExecutor::new(&graph)
            .run(ticket("S1", "I want to return this, it's broken!"))
            .unwrap();

        assert_eq!(
            visited_keys(&run.visited),
            ["classify", "returns_agent", "score", "finalize"]
        );
        let record = &run.state;
        assert_eq!(record.classification(), Some(Intent::Returns));
        assert_eq!(record.escalated(), Some(false));
        assert!(record.final_response().is_some_and(|text| !text.is_empty()));
        // one audit entry per stage visited
        assert_eq!(record.audit().len(), run.visited.len());
    }

    #[test]
    fn test_high_priority_billing_still_finalizes() {
        // billing drafts are rich enough to clear the 0.8 bar
        let graph = demo_graph();
        let run = FlowExecutor::new(&graph)
            .run(ticket(
                "CUST004",
                "Why am I being charged late fees? This is ridiculous! I paid on time!",
            ))
            .unwrap();

        let record = &run.state;
        assert_eq!(record.classification(), Some(Intent::Billing));
        assert!(record.is_high_priority());
        assert!(record.quality().unwrap() >= 0.8);
        assert_eq!(record.escalated(), Some(false));
        assert_eq!(run.terminal.as_str(), "finalize");
    }

    #[test]
    fn test_order_status_routes_to_general_handler() {
        let graph = demo_graph();
        let run = FlowExecutor::new(&graph)
            .run(ticket("CUST002", "My headphones haven't arrived yet. Where is my order ORD12346?"))
            .unwrap();

        assert_eq!(
            visited_keys(&run.visited),
            ["classify", "general_agent", "score", "finalize"]
        );
        assert_eq!(run.state.classification(), Some(Intent::OrderStatus));
    }

    #[test]
    fn test_runs_are_deterministic() {
        let graph = demo_graph();
        let query = "My WiFi keeps disconnecting. Can you help me troubleshoot?";

        let first = FlowExecutor::new(&graph).run(ticket("CUST003", query)).unwrap();
        let second = FlowExecutor::new(&graph).run(ticket("CUST003", query)).unwrap();

        assert_eq!(first.visited, second.visited);
        assert_eq!(first.state.audit(), second.state.audit());
        assert_eq!(first.state.final_response(), second.state.final_response());
        assert_eq!(first.state.quality(), second.state.quality());
    }

    #[test]
    fn test_curt_handler_escalates_high_priority_ticket() {
        // same stages, but the handler drafts a bare reply that scores
        // 0.75, under the 0.8 high-priority bar
        let mut graph: FlowGraph<TicketRecord> = FlowGraph::new();
        graph.register_stage(CLASSIFY, ClassifyStage).unwrap();
        graph
            .register_stage("curt_agent", |record: &mut TicketRecord| {
                record.attach_response("No.");
                record.note("Curt agent replied");
            })
            .unwrap();
        graph.register_stage(SCORE, ScoreStage).unwrap();
        graph.register_stage(HUMAN_REVIEW, HumanReviewStage).unwrap();
        graph.register_stage(FINALIZE, FinalizeStage).unwrap();

        graph.set_entry(CLASSIFY).unwrap();
        graph.register_edge(CLASSIFY, "curt_agent").unwrap();
        graph.register_edge("curt_agent", SCORE).unwrap();
        graph
            .register_conditional_edge(
                SCORE,
                EscalationRouter,
                [
                    (OutcomeKey::from(ReviewOutcome::Escalate), StageKey::from(HUMAN_REVIEW)),
                    (OutcomeKey::from(ReviewOutcome::Finalize), StageKey::from(FINALIZE)),
                ],
            )
            .unwrap();
        graph.mark_terminal(HUMAN_REVIEW).unwrap();
        graph.mark_terminal(FINALIZE).unwrap();
        graph.validate().unwrap();

        let run = FlowExecutor::new(&graph)
            .run(ticket("CUST001", "This is urgent!"))
            .unwrap();

        let record = &run.state;
        assert_eq!(run.terminal.as_str(), "human_review");
        assert_eq!(record.escalated(), Some(true));
        assert!(record
            .final_response()
            .is_some_and(|text| text.starts_with("[PENDING HUMAN REVIEW]")));
    }
}
