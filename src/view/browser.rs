use super::{Dataset, FetchRequest, Resource, ViewState};
use crate::client::{ClientError, StudentInfoClient};

/// Fetch the data behind `request`.
pub async fn fetch(
    client: &StudentInfoClient,
    request: FetchRequest,
) -> Result<Dataset, ClientError> {
    tracing::debug!("Fetching {}, page {}", request.resource, request.page);
    match request.resource {
        Resource::Students => client
            .list_students(request.page)
            .await
            .map(|page| Dataset::from_student_page(&page)),
        Resource::Courses => client
            .list_courses()
            .await
            .map(|courses| Dataset::from_records(&courses)),
        Resource::Departments => client
            .list_departments()
            .await
            .map(|departments| Dataset::from_records(&departments)),
    }
}

/// A [`ViewState`] driven by a live API client.
#[derive(Debug, Clone)]
pub struct Browser {
    client: StudentInfoClient,
    state: ViewState,
}

impl Browser {
    pub fn new(client: StudentInfoClient) -> Self {
        Self {
            client,
            state: ViewState::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub async fn select_tab(&mut self, resource: Resource) -> &ViewState {
        let request = self.state.select_tab(resource);
        self.run(request).await
    }

    /// Open a specific students page directly.
    pub async fn open_students_page(&mut self, page: u32) -> &ViewState {
        let request = self.state.request(Resource::Students, page);
        self.run(request).await
    }

    pub async fn go_to_page(&mut self, page: u32) -> &ViewState {
        match self.state.go_to_page(page) {
            Some(request) => self.run(request).await,
            None => &self.state,
        }
    }

    pub async fn next_page(&mut self) -> &ViewState {
        match self.state.next_page() {
            Some(request) => self.run(request).await,
            None => &self.state,
        }
    }

    pub async fn previous_page(&mut self) -> &ViewState {
        match self.state.previous_page() {
            Some(request) => self.run(request).await,
            None => &self.state,
        }
    }

    async fn run(&mut self, request: FetchRequest) -> &ViewState {
        let outcome = fetch(&self.client, request).await;
        self.state.apply(request, outcome);
        &self.state
    }
}
