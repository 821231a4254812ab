use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteArguments, Sqlite};
use sqlx::query::QueryAs;
use sqlx::FromRow;

use crate::db::records::{require, Draft, Record};
use crate::error::AppError;
use crate::listing::Listable;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub image_url: Option<String>,
    pub published: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPostDraft {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
}

impl Record for BlogPost {
    const TABLE: &'static str = "blog_posts";
    const ORDER_BY: &'static str = "created_at DESC, rowid DESC";
    type Draft = BlogPostDraft;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draft for BlogPostDraft {
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "excerpt",
        "content",
        "author",
        "category",
        "image_url",
        "published",
    ];

    fn validate(&self) -> Result<(), AppError> {
        require("title", &self.title)?;
        require("category", &self.category)
    }

    fn bind<'q, O>(
        &self,
        query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
        query
            .bind(self.title.clone())
            .bind(self.excerpt.clone())
            .bind(self.content.clone())
            .bind(self.author.clone())
            .bind(self.category.clone())
            .bind(self.image_url.clone())
            .bind(self.published)
    }
}

impl Listable for BlogPost {
    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> &str {
        &self.excerpt
    }

    fn category(&self) -> &str {
        &self.category
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub event_date: String,
    pub event_time: String,
    pub location: String,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub event_date: String,
    #[serde(default)]
    pub event_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Record for Event {
    const TABLE: &'static str = "events";
    const ORDER_BY: &'static str = "event_date ASC, event_time ASC, rowid ASC";
    type Draft = EventDraft;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draft for EventDraft {
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "category",
        "event_date",
        "event_time",
        "location",
        "image_url",
    ];

    fn validate(&self) -> Result<(), AppError> {
        require("title", &self.title)?;
        require("category", &self.category)?;
        require("event_date", &self.event_date)
    }

    fn bind<'q, O>(
        &self,
        query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
        query
            .bind(self.title.clone())
            .bind(self.description.clone())
            .bind(self.category.clone())
            .bind(self.event_date.clone())
            .bind(self.event_time.clone())
            .bind(self.location.clone())
            .bind(self.image_url.clone())
    }
}

impl Listable for Event {
    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImageDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub image_url: String,
}

impl Record for GalleryImage {
    const TABLE: &'static str = "gallery";
    const ORDER_BY: &'static str = "created_at DESC, rowid DESC";
    type Draft = GalleryImageDraft;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draft for GalleryImageDraft {
    const COLUMNS: &'static [&'static str] = &["title", "description", "category", "image_url"];

    fn validate(&self) -> Result<(), AppError> {
        require("title", &self.title)?;
        require("category", &self.category)?;
        require("image_url", &self.image_url)
    }

    fn bind<'q, O>(
        &self,
        query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
        query
            .bind(self.title.clone())
            .bind(self.description.clone())
            .bind(self.category.clone())
            .bind(self.image_url.clone())
    }
}

impl Listable for GalleryImage {
    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PrayerTime {
    pub id: String,
    pub prayer_name: String,
    pub adhan_time: String,
    pub iqamah_time: String,
    pub display_order: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerTimeDraft {
    pub prayer_name: String,
    pub adhan_time: String,
    #[serde(default)]
    pub iqamah_time: String,
    #[serde(default)]
    pub display_order: i64,
}

impl Record for PrayerTime {
    const TABLE: &'static str = "prayer_times";
    const ORDER_BY: &'static str = "display_order ASC, rowid ASC";
    type Draft = PrayerTimeDraft;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draft for PrayerTimeDraft {
    const COLUMNS: &'static [&'static str] =
        &["prayer_name", "adhan_time", "iqamah_time", "display_order"];

    fn validate(&self) -> Result<(), AppError> {
        require("prayer_name", &self.prayer_name)?;
        require("adhan_time", &self.adhan_time)
    }

    fn bind<'q, O>(
        &self,
        query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
        query
            .bind(self.prayer_name.clone())
            .bind(self.adhan_time.clone())
            .bind(self.iqamah_time.clone())
            .bind(self.display_order)
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ContactInfo {
    pub id: String,
    pub info_type: String,
    pub label: String,
    pub value: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfoDraft {
    pub info_type: String,
    #[serde(default)]
    pub label: String,
    pub value: String,
}

impl Record for ContactInfo {
    const TABLE: &'static str = "contact_info";
    const ORDER_BY: &'static str = "info_type ASC, rowid ASC";
    type Draft = ContactInfoDraft;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draft for ContactInfoDraft {
    const COLUMNS: &'static [&'static str] = &["info_type", "label", "value"];

    fn validate(&self) -> Result<(), AppError> {
        require("info_type", &self.info_type)?;
        require("value", &self.value)
    }

    fn bind<'q, O>(
        &self,
        query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
        query
            .bind(self.info_type.clone())
            .bind(self.label.clone())
            .bind(self.value.clone())
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct DonationOption {
    pub id: String,
    pub title: String,
    pub description: String,
    pub amount: Option<f64>,
    pub payment_link: Option<String>,
    pub is_active: bool,
    pub display_order: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationOptionDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub payment_link: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i64,
}

fn default_true() -> bool {
    true
}

impl Record for DonationOption {
    const TABLE: &'static str = "donation_options";
    const ORDER_BY: &'static str = "display_order ASC, rowid ASC";
    type Draft = DonationOptionDraft;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draft for DonationOptionDraft {
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "amount",
        "payment_link",
        "is_active",
        "display_order",
    ];

    fn validate(&self) -> Result<(), AppError> {
        require("title", &self.title)?;
        match self.amount {
            Some(amount) if !amount.is_finite() || amount < 0.0 => Err(AppError::Validation(
                "amount must be a non-negative number".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn bind<'q, O>(
        &self,
        query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
        query
            .bind(self.title.clone())
            .bind(self.description.clone())
            .bind(self.amount)
            .bind(self.payment_link.clone())
            .bind(self.is_active)
            .bind(self.display_order)
    }
}

/// Row of `admin_users`. The password hash never leaves the server.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminUser {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_draft_requires_title_and_category() {
        let mut draft: BlogPostDraft =
            serde_json::from_value(serde_json::json!({"title": "Eid", "category": "Events"}))
                .unwrap();
        assert!(draft.validate().is_ok());
        assert!(!draft.published);

        draft.title = "  ".to_string();
        assert!(matches!(draft.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_donation_draft_defaults_to_active() {
        let draft: DonationOptionDraft =
            serde_json::from_value(serde_json::json!({"title": "Zakat"})).unwrap();
        assert!(draft.is_active);
        assert!(draft.validate().is_ok());

        let negative = DonationOptionDraft {
            amount: Some(-5.0),
            ..draft
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_admin_user_hides_secrets() {
        let user = AdminUser {
            id: "1".to_string(),
            username: "admin".to_string(),
            email: "admin@example.org".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            role: "admin".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "admin");
    }
}
