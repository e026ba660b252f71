use std::sync::Arc;

use kerbside_core::{
    model::{AddressCandidate, Collection, CouncilId},
    service::KerbsideService,
};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Screen {
    CouncilSelect,
    AddressSearch,
    ScheduleView,
}

pub(crate) struct App {
    pub service: Arc<KerbsideService>,

    pub screen: Screen,
    pub councils: Vec<(CouncilId, String)>,
    pub council_list_index: usize,
    pub selected_council: Option<CouncilId>,

    pub address_input: String,
    pub address_results: Vec<AddressCandidate>,
    pub address_list_index: usize,
    pub selected_address: Option<AddressCandidate>,

    pub collections: Vec<Collection>,

    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(service: Arc<KerbsideService>) -> Self {
        let councils = service.councils();
        Self {
            service,
            screen: Screen::CouncilSelect,
            councils,
            council_list_index: 0,
            selected_council: None,
            address_input: String::new(),
            address_results: Vec::new(),
            address_list_index: 0,
            selected_address: None,
            collections: Vec::new(),
            is_loading: false,
            error_message: None,
        }
    }

    pub(crate) fn select_current_council(&mut self) {
        if let Some((id, _name)) = self.councils.get(self.council_list_index) {
            self.selected_council = Some(id.clone());
            self.screen = Screen::AddressSearch;
        }
    }

    pub(crate) fn select_current_address(&mut self) -> Option<AddressCandidate> {
        let address = self.address_results.get(self.address_list_index).cloned()?;
        self.selected_address = Some(address.clone());
        self.screen = Screen::ScheduleView;
        Some(address)
    }
}
