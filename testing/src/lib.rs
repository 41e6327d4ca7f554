//! # Helpdesk Testing
//!
//! Testing utilities for the helpdesk service.
//!
//! This crate provides:
//! - A fixed clock for deterministic timestamps
//! - Ticket fixtures in every status
//! - [`SpyTicketStore`], which counts mutating store calls
//! - [`GuardTest`], a Given-When-Then harness for the transition guard
//! - proptest strategies for domain types
//!
//! ## Example
//!
//! ```
//! use helpdesk_core::{TicketError, TicketPatch, TicketStatus};
//! use helpdesk_testing::{fixtures, GuardTest};
//!
//! GuardTest::enforced()
//!     .given_ticket(fixtures::ticket_in(TicketStatus::Created, None))
//!     .when_patch(TicketPatch::new().with_status(TicketStatus::InProgress))
//!     .then_rejected_with(TicketError::MissingAssignee)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use helpdesk_core::environment::Clock;

pub mod spy;

/// Mock implementations of environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use helpdesk_testing::mocks::FixedClock;
    /// use helpdesk_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Ready-made tickets and payloads
pub mod fixtures {
    use super::mocks::test_clock;
    use helpdesk_core::environment::Clock;
    use helpdesk_core::{
        ActorId, CreateTicket, InMemoryTicketStore, NewTicket, Ticket, TicketId, TicketPriority,
        TicketStatus, TicketTopic,
    };
    use std::sync::Arc;

    /// The "Printer jam" creation request used throughout the scenarios
    #[must_use]
    pub fn printer_jam() -> CreateTicket {
        CreateTicket {
            title: "Printer jam".to_string(),
            description: "Paper stuck in tray 2".to_string(),
            requester_id: ActorId::new(1),
            assignee_id: None,
            priority: TicketPriority::Low,
            topic: TicketTopic::Other,
            status: None,
        }
    }

    /// A stored ticket in `status` with the given assignee
    ///
    /// Bypasses the guard, so any combination can be built, including ones the
    /// rules would never produce.
    #[must_use]
    pub fn ticket_in(status: TicketStatus, assignee: Option<u64>) -> Ticket {
        let mut ticket = Ticket::from_new(
            TicketId::new(),
            NewTicket {
                title: "Printer jam".to_string(),
                description: "Paper stuck in tray 2".to_string(),
                requester_id: ActorId::new(1),
                assignee_id: assignee.map(ActorId::new),
                priority: TicketPriority::Low,
                topic: TicketTopic::Other,
            },
            test_clock().now(),
        );
        ticket.status = status;
        ticket
    }

    /// A fresh in-memory store on the fixed test clock
    #[must_use]
    pub fn memory_store() -> Arc<InMemoryTicketStore> {
        Arc::new(InMemoryTicketStore::new(Arc::new(test_clock())))
    }
}

/// proptest strategies for domain types
pub mod properties {
    use helpdesk_core::{ActorId, TicketPatch, TicketPriority, TicketStatus, TicketTopic};
    use proptest::prelude::*;

    /// Any status
    pub fn any_status() -> impl Strategy<Value = TicketStatus> {
        proptest::sample::select(TicketStatus::ALL.to_vec())
    }

    /// Any priority
    pub fn any_priority() -> impl Strategy<Value = TicketPriority> {
        proptest::sample::select(TicketPriority::ALL.to_vec())
    }

    /// Any topic
    pub fn any_topic() -> impl Strategy<Value = TicketTopic> {
        proptest::sample::select(TicketTopic::ALL.to_vec())
    }

    /// A real (non-zero) actor
    pub fn any_actor() -> impl Strategy<Value = ActorId> {
        (1..=10_000_u64).prop_map(ActorId::new)
    }

    /// Tri-state assignee field: absent, explicit clear, zero, or a real actor
    pub fn any_assignee_field() -> impl Strategy<Value = Option<Option<ActorId>>> {
        prop_oneof![
            Just(None),
            Just(Some(None)),
            Just(Some(Some(ActorId::new(0)))),
            any_actor().prop_map(|a| Some(Some(a))),
        ]
    }

    /// A patch touching an arbitrary subset of fields
    pub fn any_patch() -> impl Strategy<Value = TicketPatch> {
        (
            proptest::option::of("[a-z]{1,12}"),
            proptest::option::of(any_priority()),
            proptest::option::of(any_topic()),
            proptest::option::of(any_status()),
            any_assignee_field(),
        )
            .prop_map(|(title, priority, topic, status, assignee_id)| TicketPatch {
                title,
                priority,
                topic,
                status,
                assignee_id,
                ..TicketPatch::default()
            })
    }
}

// Re-export commonly used items
pub use guard_test::GuardTest;
pub use mocks::{test_clock, FixedClock};
pub use spy::SpyTicketStore;
