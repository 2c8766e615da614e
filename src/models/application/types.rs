/// For the per-project application list page.
#[derive(Debug, Clone)]
pub struct ApplicationListItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub status: String,
    pub question_count: i64,
    pub updated_at: String,
}

/// For the editor, preview and publish pages.
#[derive(Debug, Clone)]
pub struct ApplicationDetail {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub description: String,
    pub status: String,
    pub opens_at: String,
    pub closes_at: String,
    pub created_at: String,
    pub updated_at: String,
}

impl ApplicationDetail {
    pub fn is_published(&self) -> bool {
        self.status == "published"
    }
}

/// The availability window collected by the publish confirmation step.
#[derive(Debug, Clone)]
pub struct ConfirmationValues {
    pub opens_at: String,
    pub closes_at: String,
}
