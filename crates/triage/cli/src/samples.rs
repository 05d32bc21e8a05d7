//! The demo batch bundled with the binary
//!
//! Eight tickets against the demo dataset, chosen to exercise every
//! handler: one return, two billing, two tech, two order-status, and one
//! that classifies as nothing in particular.

use crate::batch::QueryInput;

/// The bundled demo tickets, in processing order
pub fn demo_batch() -> Vec<QueryInput> {
    [
        (
            "CUST001",
            "I received my laptop but it's not what I ordered. I want to return it and get a refund immediately!",
        ),
        (
            "CUST002",
            "My headphones haven't arrived yet. Where is my order ORD12346?",
        ),
        (
            "CUST004",
            "Why am I being charged late fees? This is ridiculous! I paid on time!",
        ),
        (
            "CUST003",
            "My WiFi keeps disconnecting. Can you help me troubleshoot?",
        ),
        (
            "CUST005",
            "When will my monitor ship? I ordered it 2 days ago and it's still processing.",
        ),
        (
            "CUST006",
            "The mouse I received is defective. The left click doesn't work properly.",
        ),
        (
            "CUST007",
            "My app keeps crashing every time I try to log in. Please help!",
        ),
        (
            "CUST008",
            "I can't afford to pay $200 right now. Can I set up a payment plan?",
        ),
    ]
    .into_iter()
    .map(|(subject_id, query)| QueryInput {
        subject_id: subject_id.to_owned(),
        query: query.to_owned(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_batch_subjects_exist_in_demo_data() {
        use triage_core::SubjectId;
        use triage_directory::{DataProvider, InMemoryProvider};

        let provider = InMemoryProvider::with_demo_data();
        for input in demo_batch() {
            let subject = provider.lookup_subject(&SubjectId::new(input.subject_id.as_str()));
            assert_ne!(subject.name, "Unknown", "{} should be seeded", input.subject_id);
        }
    }
}
