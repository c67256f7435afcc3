//! Roster domain models.
//!
//! Provides the immutable facts a roster is planned from (tasks,
//! participants, existing assignments) and the materialized result.
//!
//! # Domain Mappings
//!
//! | u-roster | Festival | Conference | Sports event |
//! |----------|----------|------------|--------------|
//! | Task | Bar shift | Session chair | Marshal post |
//! | Participant | Volunteer | Staff member | Steward |
//! | Obligation | Contracted shift | Assigned talk | Briefed post |
//! | Roster | Volunteer plan | Staffing sheet | Duty rota |

mod calendar;
mod clock;
mod participant;
mod roster;
mod task;

pub use calendar::{
    parse_availability, Availability, AvailabilityWarning, CoveragePolicy, EventCalendar,
    EventDay, TimeWindow, UnknownDatePolicy,
};
pub use clock::{format_time_of_day, parse_duration, parse_time_of_day, MINUTES_PER_DAY};
pub use participant::{Participant, WorkloadCategory};
pub use roster::{Assignment, ExistingAssignment, Roster};
pub use task::Task;
