//! Reference data for the triage pipeline
//!
//! Subject accounts, orders, policy documents, and the known-issue list
//! live behind the [`DataProvider`] trait. Stages receive a shared
//! provider handle and read from it; lookups degrade to defaults instead
//! of failing, so a missing record never aborts a run.
//!
//! # Key principle
//!
//! **Absent data is an answer, not an error.** An unknown subject resolves
//! to [`SubjectRecord::unknown`], an unknown order to `None`, and policies
//! always resolve. The pipeline stays total over whatever dataset it is
//! given.
//!
//! # Example
//!
//! ```
//! use triage_directory::{DataProvider, InMemoryProvider};
//! use triage_core::SubjectId;
//!
//! let provider = InMemoryProvider::with_demo_data();
//! let record = provider.lookup_subject(&SubjectId::new("CUST001"));
//! assert_eq!(record.name, "Alice Johnson");
//!
//! // Misses yield the default record, not an error
//! let unknown = provider.lookup_subject(&SubjectId::new("CUST999"));
//! assert_eq!(unknown.name, "Unknown");
//! ```

#![deny(unsafe_code)]

pub mod provider;
pub mod records;

pub use provider::{DataProvider, InMemoryProvider};
pub use records::{
    BillingPolicy, OrderRecord, OrderStatus, PolicyKind, PolicyRecord, ReturnPolicy,
    SubjectRecord, SupportPolicy, Tier,
};
