use async_trait::async_trait;
use std::cmp::Reverse;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::category::Category;
use crate::domain::page::Page;
use crate::domain::repositories::{
    CategoryRepository, PageRepository, RepositoryError, RepositoryResult, UserRepository,
};
use crate::domain::user::{User, UserProfile, Username};

/// In-process store implementing every repository trait
///
/// Rows are kept in insertion order. Each write takes the single write
/// lock, so a registration inserts its user and profile atomically.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    pages: Vec<Page>,
    users: Vec<User>,
    profiles: Vec<UserProfile>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users and profiles
    pub async fn account_counts(&self) -> (usize, usize) {
        let tables = self.tables.read().await;
        (tables.users.len(), tables.profiles.len())
    }

    /// Number of stored categories and pages
    pub async fn content_counts(&self) -> (usize, usize) {
        let tables = self.tables.read().await;
        (tables.categories.len(), tables.pages.len())
    }

    /// Flips the `is_active` flag of a stored user
    pub async fn set_user_active(&self, user_id: Uuid, active: bool) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(RepositoryError::MissingReference("user"))?;
        user.is_active = active;
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn create(&self, category: &Category) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;

        for existing in &tables.categories {
            if existing.name() == category.name() {
                return Err(RepositoryError::Conflict {
                    field: "name",
                    value: category.name().to_string(),
                });
            }
            if existing.slug() == category.slug() {
                return Err(RepositoryError::Conflict {
                    field: "slug",
                    value: category.slug().to_string(),
                });
            }
        }

        tables.categories.push(category.clone());
        Ok(())
    }

    async fn find_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.slug() == slug).cloned())
    }

    async fn top_by_likes(&self, limit: usize) -> RepositoryResult<Vec<Category>> {
        let tables = self.tables.read().await;
        let mut categories = tables.categories.clone();
        // Stable sort keeps insertion order among ties
        categories.sort_by_key(|c| Reverse(c.likes()));
        categories.truncate(limit);
        Ok(categories)
    }
}

#[async_trait]
impl PageRepository for MemoryStore {
    async fn create(&self, page: &Page) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;

        if !tables.categories.iter().any(|c| c.id() == page.category_id()) {
            return Err(RepositoryError::MissingReference("category"));
        }

        tables.pages.push(page.clone());
        Ok(())
    }

    async fn find_by_category(&self, category_id: Uuid) -> RepositoryResult<Vec<Page>> {
        let tables = self.tables.read().await;
        Ok(tables
            .pages
            .iter()
            .filter(|p| p.category_id() == category_id)
            .cloned()
            .collect())
    }

    async fn top_by_views(&self, limit: usize) -> RepositoryResult<Vec<Page>> {
        let tables = self.tables.read().await;
        let mut pages = tables.pages.clone();
        pages.sort_by_key(|p| Reverse(p.views()));
        pages.truncate(limit);
        Ok(pages)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_with_profile(
        &self,
        user: &User,
        profile: &UserProfile,
    ) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict {
                field: "username",
                value: user.username.to_string(),
            });
        }

        if profile.user_id != user.id {
            return Err(RepositoryError::MissingReference("user"));
        }

        tables.users.push(user.clone());
        tables.profiles.push(profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> RepositoryResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| &u.username == username).cloned())
    }

    async fn find_profile(&self, user_id: Uuid) -> RepositoryResult<Option<UserProfile>> {
        let tables = self.tables.read().await;
        Ok(tables.profiles.iter().find(|p| p.user_id == user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn category(name: &str, likes: i32) -> Category {
        Category::new(name).unwrap().with_counters(0, likes)
    }

    fn page(category: &Category, title: &str, views: i32) -> Page {
        Page::new(category, title, Url::parse("http://example.com/").unwrap()).with_views(views)
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_conflict() {
        let store = MemoryStore::new();
        CategoryRepository::create(&store, &category("Other Frameworks", 0))
            .await
            .unwrap();

        let err = CategoryRepository::create(&store, &category("other  frameworks", 0))
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Conflict { field: "slug", .. }));
        assert_eq!(store.content_counts().await, (1, 0));
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let store = MemoryStore::new();
        CategoryRepository::create(&store, &category("Python", 0))
            .await
            .unwrap();

        let err = CategoryRepository::create(&store, &category("Python", 0))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { field: "name", .. }));
    }

    #[tokio::test]
    async fn top_by_likes_orders_and_limits() {
        let store = MemoryStore::new();
        for (name, likes) in [("a", 1), ("b", 5), ("c", 3), ("d", 5), ("e", 0), ("f", 2)] {
            CategoryRepository::create(&store, &category(name, likes))
                .await
                .unwrap();
        }

        let top = store.top_by_likes(5).await.unwrap();
        let names: Vec<_> = top.iter().map(|c| c.name()).collect();

        assert_eq!(names, vec!["b", "d", "c", "f", "a"]);
    }

    #[tokio::test]
    async fn page_requires_existing_category() {
        let store = MemoryStore::new();
        let orphan = page(&category("Ghost", 0), "Nowhere", 0);

        let err = PageRepository::create(&store, &orphan).await.unwrap_err();
        assert!(matches!(err, RepositoryError::MissingReference("category")));
    }

    #[tokio::test]
    async fn pages_filter_by_category_in_insertion_order() {
        let store = MemoryStore::new();
        let python = category("Python", 0);
        let django = category("Django", 0);
        CategoryRepository::create(&store, &python).await.unwrap();
        CategoryRepository::create(&store, &django).await.unwrap();

        PageRepository::create(&store, &page(&python, "first", 9)).await.unwrap();
        PageRepository::create(&store, &page(&django, "other", 0)).await.unwrap();
        PageRepository::create(&store, &page(&python, "second", 1)).await.unwrap();

        let pages = store.find_by_category(python.id()).await.unwrap();
        let titles: Vec<_> = pages.iter().map(|p| p.title()).collect();
        assert_eq!(titles, vec!["first", "second"]);

        let top = store.top_by_views(1).await.unwrap();
        assert_eq!(top[0].title(), "first");
    }

    #[tokio::test]
    async fn taken_username_writes_nothing() {
        let store = MemoryStore::new();
        let username = Username::new("leifos").unwrap();
        let first = User::new(username.clone(), None, "hash".to_string());
        let profile = UserProfile {
            user_id: first.id,
            website: None,
            picture: None,
        };
        store.create_with_profile(&first, &profile).await.unwrap();

        let second = User::new(username, None, "hash".to_string());
        let second_profile = UserProfile {
            user_id: second.id,
            website: None,
            picture: None,
        };
        let err = store
            .create_with_profile(&second, &second_profile)
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Conflict { field: "username", .. }));
        assert_eq!(store.account_counts().await, (1, 1));
    }

    #[tokio::test]
    async fn find_by_id_sees_deactivation() {
        let store = MemoryStore::new();
        let user = User::new(Username::new("leifos").unwrap(), None, "hash".to_string());
        let profile = UserProfile {
            user_id: user.id,
            website: None,
            picture: None,
        };
        store.create_with_profile(&user, &profile).await.unwrap();

        assert!(store.find_by_id(user.id).await.unwrap().unwrap().is_active);

        store.set_user_active(user.id, false).await.unwrap();
        assert!(!store.find_by_id(user.id).await.unwrap().unwrap().is_active);
        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }
}
