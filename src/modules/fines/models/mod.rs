mod late_fine;

pub use late_fine::{
    FineType, LateFineAssessment, LateFineInput, LateFineSettings, SaveFineSettingsRequest,
};
