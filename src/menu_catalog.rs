//! The restaurant menu as last fetched from the backend.
//!
//! Toggles and category creation patch the local copy; every other edit is
//! followed by a refetch.

use tracing::{info, instrument, warn};

use crate::backend::BackendClient;
use crate::domain::{CategoryDraft, ItemDraft, MenuCategory};
use crate::error::DeskError;

pub struct MenuCatalog {
    backend: BackendClient,
    categories: Vec<MenuCategory>,
}

impl MenuCatalog {
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            categories: Vec::new(),
        }
    }

    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    pub fn category(&self, category_id: &str) -> Option<&MenuCategory> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    fn category_mut(&mut self, category_id: &str) -> Result<&mut MenuCategory, DeskError> {
        self.categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or_else(|| DeskError::NotFound(format!("Category {category_id}")))
    }

    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<usize, DeskError> {
        let categories = self.backend.fetch_menu().await.map_err(|e| {
            warn!(error = %e, "Failed to fetch menu");
            DeskError::FetchFailed(e.to_string())
        })?;
        self.categories = categories;
        Ok(self.categories.len())
    }

    /// Flips the category's own flag. Its items keep theirs.
    #[instrument(skip(self))]
    pub async fn toggle_category(&mut self, category_id: &str) -> Result<bool, DeskError> {
        self.category_mut(category_id)?;
        self.backend.toggle_category(category_id.to_string()).await?;

        let category = self.category_mut(category_id)?;
        category.is_enabled = !category.is_enabled;
        info!(enabled = category.is_enabled, "Category toggled");
        Ok(category.is_enabled)
    }

    #[instrument(skip(self))]
    pub async fn toggle_item(&mut self, category_id: &str, item_id: &str) -> Result<bool, DeskError> {
        let category = self.category_mut(category_id)?;
        if !category.is_enabled {
            return Err(DeskError::ValidationError(format!(
                "Enable {} before changing its items",
                category.name
            )));
        }
        if category.item(item_id).is_none() {
            return Err(DeskError::NotFound(format!("Item {item_id}")));
        }

        self.backend
            .toggle_item(category_id.to_string(), item_id.to_string())
            .await?;

        let item = self
            .category_mut(category_id)?
            .item_mut(item_id)
            .ok_or_else(|| DeskError::NotFound(format!("Item {item_id}")))?;
        item.is_enabled = !item.is_enabled;
        info!(enabled = item.is_enabled, "Item toggled");
        Ok(item.is_enabled)
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_category(&mut self, draft: CategoryDraft) -> Result<String, DeskError> {
        draft.validate_new()?;
        let category = self.backend.create_category(draft).await?;
        let id = category.id.clone();
        self.categories.push(category);
        info!(category_id = %id, "Category created");
        Ok(id)
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn update_category(
        &mut self,
        category_id: &str,
        draft: CategoryDraft,
    ) -> Result<(), DeskError> {
        draft.validate_update()?;
        self.backend
            .update_category(category_id.to_string(), draft)
            .await?;
        self.refresh().await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&mut self, category_id: &str) -> Result<(), DeskError> {
        self.backend.delete_category(category_id.to_string()).await?;
        self.refresh().await?;
        Ok(())
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add_item(&mut self, category_id: &str, draft: ItemDraft) -> Result<(), DeskError> {
        draft.validate_new()?;
        self.backend.add_item(category_id.to_string(), draft).await?;
        self.refresh().await?;
        Ok(())
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn update_item(
        &mut self,
        category_id: &str,
        item_id: &str,
        draft: ItemDraft,
    ) -> Result<(), DeskError> {
        draft.validate_update()?;
        self.backend
            .update_item(category_id.to_string(), item_id.to_string(), draft)
            .await?;
        self.refresh().await?;
        Ok(())
    }

    /// Deletes an item wherever it is listed.
    #[instrument(skip(self))]
    pub async fn delete_item(&mut self, item_id: &str) -> Result<(), DeskError> {
        let category_id = self
            .categories
            .iter()
            .find(|c| c.item(item_id).is_some())
            .map(|c| c.id.clone())
            .ok_or_else(|| DeskError::NotFound(format!("Item {item_id}")))?;

        self.backend
            .delete_item(category_id, item_id.to_string())
            .await?;
        self.refresh().await?;
        Ok(())
    }
}
