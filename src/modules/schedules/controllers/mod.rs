mod schedule_controller;

pub use schedule_controller::{
    configure, get_contract_schedule, preview_schedule, PreviewScheduleRequest, ScheduleResponse,
};
