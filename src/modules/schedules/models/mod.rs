mod schedule_entry;

pub use schedule_entry::{PaymentScheduleEntry, ScheduleEntryStatus, ScheduleInput, ScheduleSummary};
