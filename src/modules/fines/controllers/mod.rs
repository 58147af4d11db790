mod fine_controller;

pub use fine_controller::{
    configure, get_contract_fine, get_settings, preview_fine, update_settings,
    PreviewFineRequest,
};
