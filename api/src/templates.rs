use askama::Template;
use shared::StockOption;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Stock picker plus whatever the selection produced
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: String,
    pub available_stocks: Vec<StockOption>,
    pub selected_key: String,
    pub view: DashboardView,
}

pub enum DashboardView {
    Picker,
    Comparison { stats: String },
    Stock { summary: String, plots: Vec<String> },
}

impl DashboardTemplate {
    pub fn new(username: String, available_stocks: Vec<StockOption>) -> Self {
        Self {
            username,
            available_stocks,
            selected_key: String::new(),
            view: DashboardView::Picker,
        }
    }

    pub fn with_view(mut self, selected_key: &str, view: DashboardView) -> Self {
        self.selected_key = selected_key.to_string();
        self.view = view;
        self
    }
}
