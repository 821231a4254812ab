use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::state::AppState;
use crate::db::{
    BlogPost, ContactInfo, DonationOption, Event, GalleryImage, PrayerTime, Repository, Selection,
};
use crate::error::AppError;
use crate::listing::{ListPage, ListView, Listable, ALL_CATEGORIES, LOAD_MORE_STEP};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: String,
    pub category: Option<String>,
    /// How many times "load more" was pressed.
    #[serde(default)]
    pub loads: usize,
}

fn list_page<T: Listable + Clone>(items: Vec<T>, query: &ListQuery) -> ListPage<T> {
    let mut view = ListView::new(items);
    view.set_search(&query.search);
    view.set_category(query.category.as_deref().unwrap_or(ALL_CATEGORIES));

    let steps = query.loads.min(view.total_matches() / LOAD_MORE_STEP + 1);
    for _ in 0..steps {
        view.load_more();
    }

    view.page()
}

/// GET /api/blog
pub async fn blog(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListPage<BlogPost>>, AppError> {
    let published = Selection::all().eq("published", true);
    let posts = Repository::select::<BlogPost>(&state.db, &published).await?;
    Ok(Json(list_page(posts, &query)))
}

/// GET /api/events
pub async fn events(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListPage<Event>>, AppError> {
    let events = Repository::select::<Event>(&state.db, &Selection::all()).await?;
    Ok(Json(list_page(events, &query)))
}

/// GET /api/gallery
pub async fn gallery(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListPage<GalleryImage>>, AppError> {
    let images = Repository::select::<GalleryImage>(&state.db, &Selection::all()).await?;
    Ok(Json(list_page(images, &query)))
}

/// GET /api/prayer-times
pub async fn prayer_times(State(state): State<AppState>) -> Result<Json<Vec<PrayerTime>>, AppError> {
    Ok(Json(Repository::select::<PrayerTime>(&state.db, &Selection::all()).await?))
}

/// GET /api/donation-options
pub async fn donation_options(
    State(state): State<AppState>,
) -> Result<Json<Vec<DonationOption>>, AppError> {
    let active = Selection::all().eq("is_active", true);
    let options = Repository::select::<DonationOption>(&state.db, &active).await?;
    Ok(Json(options))
}

/// GET /api/contact-info
pub async fn contact_info(State(state): State<AppState>) -> Result<Json<Vec<ContactInfo>>, AppError> {
    Ok(Json(Repository::select::<ContactInfo>(&state.db, &Selection::all()).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::INITIAL_VISIBLE;

    #[derive(Debug, Clone)]
    struct Item(String);

    impl Listable for Item {
        fn title(&self) -> &str {
            &self.0
        }

        fn summary(&self) -> &str {
            ""
        }

        fn category(&self) -> &str {
            "News"
        }
    }

    fn items(count: usize) -> Vec<Item> {
        (0..count).map(|i| Item(format!("item {}", i))).collect()
    }

    #[test]
    fn test_loads_reveal_more() {
        let query = ListQuery {
            loads: 1,
            ..ListQuery::default()
        };
        let page = list_page(items(10), &query);
        assert_eq!(page.visible_count, INITIAL_VISIBLE + LOAD_MORE_STEP);
        assert!(page.has_more);
    }

    #[test]
    fn test_huge_loads_are_clamped() {
        let query = ListQuery {
            loads: usize::MAX,
            ..ListQuery::default()
        };
        let page = list_page(items(10), &query);
        assert_eq!(page.items.len(), 10);
        assert!(!page.has_more);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let query = ListQuery {
            category: Some("Sports".to_string()),
            ..ListQuery::default()
        };
        let page = list_page(items(3), &query);
        assert!(page.items.is_empty());
        assert_eq!(page.categories, vec!["All", "News"]);
    }
}
