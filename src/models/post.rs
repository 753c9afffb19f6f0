use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const POST_TIME_SLOTS: [&str; 18] = [
    "06:00", "07:00", "08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00",
    "16:00", "17:00", "18:00", "19:00", "20:00", "21:00", "22:00", "23:00",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Platform {
    Instagram,
    TikTok,
    Facebook,
    #[serde(rename = "Shopify Blog")]
    ShopifyBlog,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Instagram,
        Platform::TikTok,
        Platform::Facebook,
        Platform::ShopifyBlog,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::Facebook => "Facebook",
            Platform::ShopifyBlog => "Shopify Blog",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Upper-case prefix used when looking up the platform's secret in the environment.
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Platform::Instagram => "INSTAGRAM",
            Platform::TikTok => "TIKTOK",
            Platform::Facebook => "FACEBOOK",
            Platform::ShopifyBlog => "SHOPIFY_BLOG",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSchedule {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub platform: Platform,
    pub content_type: String,
    pub time_slots: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_serializes_display_name() {
        let json = serde_json::to_string(&Platform::ShopifyBlog).unwrap();
        assert_eq!(json, "\"Shopify Blog\"");
        assert_eq!(Platform::parse("shopify blog"), Some(Platform::ShopifyBlog));
        assert_eq!(Platform::parse("tiktok"), Some(Platform::TikTok));
        assert_eq!(Platform::parse("Orkut"), None);
    }
}
