use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    CreateApp,
    SchedulePost,
    Monetization,
    Help,
    Settings,
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::CreateApp => "create_app",
            Intent::SchedulePost => "schedule_post",
            Intent::Monetization => "monetization",
            Intent::Help => "help",
            Intent::Settings => "settings",
            Intent::General => "general",
        }
    }
}
