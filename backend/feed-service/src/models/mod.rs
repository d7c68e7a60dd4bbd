use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Raw engagement counters for a post.
///
/// Every counter defaults to zero, so a post whose views/likes/saves were
/// never recorded simply contributes nothing to the interaction score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngagementCounts {
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub saves: u64,
    /// Posts have no follower concept; kept for the interaction API.
    #[serde(default)]
    pub follows: u64,
}

/// Candidate post as loaded from the post store
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub engagement: EngagementCounts,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Tokens describing the post: skills, technologies, then category.
    /// Empty entries are dropped.
    pub fn content_tokens(&self) -> Vec<&str> {
        self.skills
            .iter()
            .chain(self.technologies.iter())
            .chain(self.category.iter())
            .map(String::as_str)
            .filter(|token| !token.trim().is_empty())
            .collect()
    }
}

/// Viewer profile as stored by the user directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerProfile {
    pub user_id: Uuid,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Viewer whose identity was verified before ranking starts.
///
/// Built only from an authenticated user id plus the profile resolved for it.
#[derive(Debug, Clone)]
pub struct ViewerContext {
    pub viewer_id: Uuid,
    tokens: Vec<String>,
}

impl ViewerContext {
    pub fn new(viewer_id: Uuid, skills: Vec<String>, interests: Vec<String>) -> Self {
        let mut tokens = skills;
        tokens.extend(interests);
        Self { viewer_id, tokens }
    }

    /// Skills followed by interests, duplicates preserved.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl From<ViewerProfile> for ViewerContext {
    fn from(profile: ViewerProfile) -> Self {
        Self::new(profile.user_id, profile.skills, profile.interests)
    }
}

/// Per-request scoring breakdown attached to a ranked post.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    /// Cosine similarity in [0, 1]
    pub content_similarity: f64,
    /// Weighted engagement sum, unbounded
    pub interaction_score: f64,
    pub base_score: f64,
    pub days_old: f64,
    /// Decayed score used for ordering
    pub final_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankedPost {
    #[serde(flatten)]
    pub post: Post,
    /// Absent when the feed fell back to recency ordering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreRecord>,
}

impl RankedPost {
    pub fn final_score(&self) -> Option<f64> {
        self.score.map(|s| s.final_score)
    }
}

/// Which ordering produced a feed page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    Personalized,
    Recency,
}

impl RankingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingMode::Personalized => "personalized",
            RankingMode::Recency => "recency",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub posts: Vec<RankedPost>,
    pub cursor: Option<String>,
    pub has_more: bool,
    pub total_count: usize,
    pub ranking: RankingMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_with(skills: &[&str], technologies: &[&str], category: Option<&str>) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            content: String::new(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            technologies: technologies.iter().map(|s| s.to_string()).collect(),
            category: category.map(str::to_string),
            engagement: EngagementCounts::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_content_tokens_order_and_filtering() {
        let post = post_with(&["Rust", ""], &["Tokio", "  "], Some("Backend"));
        assert_eq!(post.content_tokens(), vec!["Rust", "Tokio", "Backend"]);
    }

    #[test]
    fn test_content_tokens_skips_empty_category() {
        let post = post_with(&["Rust"], &[], Some(""));
        assert_eq!(post.content_tokens(), vec!["Rust"]);

        let post = post_with(&[], &[], None);
        assert!(post.content_tokens().is_empty());
    }

    #[test]
    fn test_viewer_context_concatenates_skills_then_interests() {
        let viewer = ViewerContext::new(
            Uuid::new_v4(),
            vec!["React".into(), "Node".into()],
            vec!["react".into(), "AI".into()],
        );
        assert_eq!(viewer.tokens(), &["React", "Node", "react", "AI"]);
    }

    #[test]
    fn test_engagement_counts_default_to_zero_when_missing() {
        let counts: EngagementCounts = serde_json::from_str(r#"{"likes": 4}"#).unwrap();
        assert_eq!(
            counts,
            EngagementCounts {
                views: 0,
                likes: 4,
                saves: 0,
                follows: 0
            }
        );
    }

    #[test]
    fn test_ranked_post_serializes_flat_and_omits_missing_score() {
        let ranked = RankedPost {
            post: post_with(&["Rust"], &[], None),
            score: None,
        };
        let json = serde_json::to_value(&ranked).unwrap();
        assert!(json.get("score").is_none());
        assert_eq!(json["skills"][0], "Rust");
        assert!(json.get("createdAt").is_some());
    }
}
