use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DeskError;

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryType {
    #[default]
    #[serde(rename = "Veg")]
    Veg,
    #[serde(rename = "Non-Veg")]
    NonVeg,
}

impl CategoryType {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryType::Veg => "Veg",
            CategoryType::NonVeg => "Non-Veg",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "_id", deserialize_with = "super::wire::id")]
    pub id: String,
    #[serde(rename = "itemName")]
    pub name: String,
    #[serde(rename = "itemCost", default)]
    pub cost: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "isEnabled", default = "enabled")]
    pub is_enabled: bool,
}

/// A menu section. Its `is_enabled` flag is stored on its own; switching a
/// category off does not rewrite the flags of its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCategory {
    #[serde(rename = "_id", deserialize_with = "super::wire::id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "categoryType", default)]
    pub category_type: CategoryType,
    #[serde(rename = "cateimage", default)]
    pub image: Option<String>,
    #[serde(rename = "isEnabled", default = "enabled")]
    pub is_enabled: bool,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl MenuCategory {
    /// An item is orderable only while both it and its category are on.
    pub fn is_item_available(&self, item: &MenuItem) -> bool {
        self.is_enabled && item.is_enabled
    }

    pub fn available_items(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(|item| self.is_item_available(item))
    }

    pub fn item(&self, item_id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut MenuItem> {
        self.items.iter_mut().find(|item| item.id == item_id)
    }
}

/// Image bytes attached to a multipart menu form.
#[derive(Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub category_type: CategoryType,
    pub image: Option<ImageUpload>,
}

impl CategoryDraft {
    /// New categories need a name and a picture.
    pub fn validate_new(&self) -> Result<(), DeskError> {
        if self.name.trim().is_empty() || self.image.is_none() {
            return Err(DeskError::ValidationError(
                "Please enter a name and pick an image.".to_string(),
            ));
        }
        Ok(())
    }

    /// Edits may keep the current picture.
    pub fn validate_update(&self) -> Result<(), DeskError> {
        if self.name.trim().is_empty() {
            return Err(DeskError::ValidationError("Category name is required.".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub cost: Option<f64>,
    pub image: Option<ImageUpload>,
}

impl ItemDraft {
    pub fn validate_new(&self) -> Result<(), DeskError> {
        self.validate_update()?;
        if self.image.is_none() {
            return Err(DeskError::ValidationError("All item fields are required.".to_string()));
        }
        Ok(())
    }

    pub fn validate_update(&self) -> Result<(), DeskError> {
        match self.cost {
            Some(cost) if cost > 0.0 && !self.name.trim().is_empty() => Ok(()),
            _ => Err(DeskError::ValidationError("All item fields are required.".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: &str = r#"[
        {
            "_id": "c1",
            "name": "Veg Biryanis",
            "categoryType": "Veg",
            "cateimage": "/uploads/veg.jpg",
            "items": [
                {"_id": "i1", "itemName": "Veg Biryani", "itemCost": 180, "image": "/uploads/vb.jpg"},
                {"_id": "i2", "itemName": "Mushroom Biryani", "itemCost": 200, "isEnabled": false}
            ]
        },
        {
            "_id": "c2",
            "name": "Non-Veg Biryanis",
            "categoryType": "Non-Veg",
            "isEnabled": false,
            "items": [
                {"_id": "i3", "itemName": "Chicken Biryani", "itemCost": 250}
            ]
        }
    ]"#;

    #[test]
    fn decodes_menu_with_default_flags() {
        let menu: Vec<MenuCategory> = serde_json::from_str(MENU).unwrap();
        assert_eq!(menu.len(), 2);
        assert!(menu[0].is_enabled);
        assert_eq!(menu[1].category_type, CategoryType::NonVeg);
        assert!(menu[0].items[0].is_enabled);
        assert!(!menu[0].items[1].is_enabled);
    }

    #[test]
    fn disabled_category_hides_items_without_touching_their_flags() {
        let menu: Vec<MenuCategory> = serde_json::from_str(MENU).unwrap();

        let veg: Vec<_> = menu[0].available_items().map(|i| i.id.as_str()).collect();
        assert_eq!(veg, vec!["i1"]);

        let non_veg = &menu[1];
        assert_eq!(non_veg.available_items().count(), 0);
        assert!(non_veg.item("i3").unwrap().is_enabled);
    }

    #[test]
    fn category_drafts_need_a_picture_only_on_create() {
        let mut draft = CategoryDraft {
            name: "Desserts".to_string(),
            ..CategoryDraft::default()
        };
        assert!(draft.validate_new().is_err());
        assert!(draft.validate_update().is_ok());

        draft.image = Some(ImageUpload::new("desserts.jpg", vec![0xFF, 0xD8]));
        assert!(draft.validate_new().is_ok());
    }

    #[test]
    fn item_drafts_need_a_positive_cost() {
        let draft = ItemDraft {
            name: "Gulab Jamun".to_string(),
            cost: Some(0.0),
            image: Some(ImageUpload::new("gj.jpg", vec![1])),
        };
        assert!(draft.validate_new().is_err());

        let draft = ItemDraft { cost: Some(60.0), ..draft };
        assert!(draft.validate_new().is_ok());
        assert!(ItemDraft { image: None, ..draft }.validate_update().is_ok());
    }

    #[test]
    fn image_debug_hides_bytes() {
        let image = ImageUpload::new("a.jpg", vec![0; 4096]);
        assert_eq!(format!("{image:?}"), "ImageUpload { file_name: \"a.jpg\", len: 4096 }");
    }
}
