//! Generated content, one shape per platform.

use serde::{Deserialize, Serialize};

/// Publishing platform a piece of content targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    LinkedIn,
    Twitter,
    YouTube,
    Blog,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::LinkedIn,
        Platform::Twitter,
        Platform::YouTube,
        Platform::Blog,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::LinkedIn => "linkedin",
            Platform::Twitter => "twitter",
            Platform::YouTube => "youtube",
            Platform::Blog => "blog",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown platform '{s}'"))
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// Long-form blog post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub outline: Vec<String>,
    #[serde(default)]
    pub blog: String,
    /// Set when the model reply was kept as raw text or had no blog body.
    #[serde(default, skip_serializing_if = "is_false")]
    pub low_confidence: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkedInContent {
    pub id: i64,
    pub title: String,
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub low_confidence: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwitterContent {
    pub id: i64,
    pub title: String,
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub low_confidence: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YouTubeContent {
    pub id: i64,
    pub title: String,
    pub script_intro: String,
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub low_confidence: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_names_match_file_names() {
        assert_eq!(serde_json::to_string(&Platform::LinkedIn).unwrap(), "\"linkedin\"");
        assert_eq!(serde_json::to_string(&Platform::YouTube).unwrap(), "\"youtube\"");
        assert_eq!("twitter".parse::<Platform>().unwrap(), Platform::Twitter);
        assert!("tiktok".parse::<Platform>().is_err());
    }

    #[test]
    fn blog_round_trips_identically() {
        let blog = BlogContent {
            title: "Rewiring SaaS GTM".to_string(),
            outline: vec!["Intro".to_string(), "Conclusion".to_string()],
            blog: "Full text".to_string(),
            low_confidence: false,
        };
        let text = serde_json::to_string_pretty(&blog).unwrap();
        assert!(!text.contains("low_confidence"));
        let back: BlogContent = serde_json::from_str(&text).unwrap();
        assert_eq!(back, blog);
    }

    #[test]
    fn social_content_round_trips_identically() {
        let linkedin = LinkedInContent {
            id: 3,
            title: "t".to_string(),
            caption: "c".to_string(),
            hashtags: vec!["#saas".to_string()],
            low_confidence: true,
        };
        let back: LinkedInContent =
            serde_json::from_str(&serde_json::to_string(&linkedin).unwrap()).unwrap();
        assert_eq!(back, linkedin);

        let youtube = YouTubeContent {
            id: 3,
            title: "t".to_string(),
            script_intro: "hook".to_string(),
            caption: "desc".to_string(),
            hashtags: vec!["gtm".to_string()],
            low_confidence: false,
        };
        let back: YouTubeContent =
            serde_json::from_str(&serde_json::to_string(&youtube).unwrap()).unwrap();
        assert_eq!(back, youtube);

        let twitter = TwitterContent {
            id: 1,
            title: "t".to_string(),
            caption: "tweet".to_string(),
            hashtags: vec![],
            low_confidence: false,
        };
        let back: TwitterContent =
            serde_json::from_str(&serde_json::to_string(&twitter).unwrap()).unwrap();
        assert_eq!(back, twitter);
    }
}
