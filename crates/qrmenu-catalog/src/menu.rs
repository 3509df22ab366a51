//! Menu service: menus and their category / sub-category / item tree.
//!
//! The whole tree lives inside the menu document. Every tree mutation
//! loads the menu, edits it in memory and merge-writes it back, so
//! concurrent edits of the same menu are last-writer-wins.

use qrmenu_core::error::{QrMenuError, QrMenuResult};
use qrmenu_core::models::menu::{
    COLLECTION, CreateMenu, CreateMenuCategory, CreateMenuItem, CreateMenuSubCategory,
    FIELD_ESTABLISHMENT_ID, Menu, MenuCategory, MenuItem, MenuSubCategory, UpdateMenu,
    UpdateMenuCategory, UpdateMenuItem, UpdateMenuSubCategory,
};
use qrmenu_core::repository::{DocumentStore, Repository};
use tracing::info;

const MENU: &str = "Menu";
const CATEGORY: &str = "MenuCategory";
const SUB_CATEGORY: &str = "MenuSubCategory";
const ITEM: &str = "MenuItem";

/// Menu operations.
#[derive(Debug, Clone)]
pub struct MenuService<S> {
    repository: Repository<S>,
}

impl<S: DocumentStore> MenuService<S> {
    pub fn new(repository: Repository<S>) -> Self {
        Self { repository }
    }

    // -----------------------------------------------------------------------
    // Menus
    // -----------------------------------------------------------------------

    /// Create an empty menu. The owning establishment is not checked.
    pub async fn create(&self, input: CreateMenu) -> QrMenuResult<Menu> {
        input.validate()?;

        let mut menu = Menu::new(input);
        let id = self.repository.create(COLLECTION, &mut menu).await?;

        info!(menu_id = %id, establishment_id = %menu.establishment_id, "Menu created");
        Ok(menu)
    }

    /// Load a menu with every level ordered by `displayOrder`.
    pub async fn get(&self, id: &str) -> QrMenuResult<Menu> {
        let mut menu = self.load(id).await?;
        menu.sort_by_display_order();
        Ok(menu)
    }

    pub async fn list_for_establishment(&self, establishment_id: &str) -> QrMenuResult<Vec<Menu>> {
        let mut menus: Vec<Menu> = self
            .repository
            .get_by_field(COLLECTION, FIELD_ESTABLISHMENT_ID, establishment_id)
            .await?;
        for menu in &mut menus {
            menu.sort_by_display_order();
        }
        Ok(menus)
    }

    pub async fn update(&self, id: &str, input: UpdateMenu) -> QrMenuResult<Menu> {
        input.validate()?;

        let mut menu = self
            .edit(id, |menu| {
                menu.apply_update(input);
                Ok(())
            })
            .await
            .map(|(menu, ())| menu)?;
        menu.sort_by_display_order();
        Ok(menu)
    }

    pub async fn delete(&self, id: &str) -> QrMenuResult<()> {
        if !self.repository.delete(COLLECTION, id).await? {
            return Err(QrMenuError::not_found(MENU, id));
        }
        info!(menu_id = %id, "Menu deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Categories
    // -----------------------------------------------------------------------

    pub async fn add_category(
        &self,
        menu_id: &str,
        input: CreateMenuCategory,
    ) -> QrMenuResult<MenuCategory> {
        input.validate()?;

        let category = MenuCategory::from(input);
        let added = category.clone();
        self.edit(menu_id, move |menu| {
            menu.categories.push(category);
            Ok(())
        })
        .await?;

        info!(menu_id, category_id = %added.id, "Category added");
        Ok(added)
    }

    pub async fn update_category(
        &self,
        menu_id: &str,
        category_id: &str,
        input: UpdateMenuCategory,
    ) -> QrMenuResult<MenuCategory> {
        input.validate()?;

        let (_, category) = self
            .edit(menu_id, |menu| {
                let category = find_category(menu, category_id)?;
                category.apply_update(input);
                Ok(category.clone())
            })
            .await?;
        Ok(category)
    }

    pub async fn remove_category(&self, menu_id: &str, category_id: &str) -> QrMenuResult<()> {
        self.edit(menu_id, |menu| {
            if menu.remove_category(category_id) {
                Ok(())
            } else {
                Err(QrMenuError::not_found(CATEGORY, category_id))
            }
        })
        .await?;

        info!(menu_id, category_id, "Category removed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Sub-categories
    // -----------------------------------------------------------------------

    pub async fn add_sub_category(
        &self,
        menu_id: &str,
        category_id: &str,
        input: CreateMenuSubCategory,
    ) -> QrMenuResult<MenuSubCategory> {
        input.validate()?;

        let sub_category = MenuSubCategory::from(input);
        let added = sub_category.clone();
        self.edit(menu_id, move |menu| {
            find_category(menu, category_id)?
                .sub_categories
                .push(sub_category);
            Ok(())
        })
        .await?;

        info!(menu_id, category_id, sub_category_id = %added.id, "Sub-category added");
        Ok(added)
    }

    pub async fn update_sub_category(
        &self,
        menu_id: &str,
        category_id: &str,
        sub_category_id: &str,
        input: UpdateMenuSubCategory,
    ) -> QrMenuResult<MenuSubCategory> {
        input.validate()?;

        let (_, sub_category) = self
            .edit(menu_id, |menu| {
                let sub_category = find_sub_category(menu, category_id, sub_category_id)?;
                sub_category.apply_update(input);
                Ok(sub_category.clone())
            })
            .await?;
        Ok(sub_category)
    }

    pub async fn remove_sub_category(
        &self,
        menu_id: &str,
        category_id: &str,
        sub_category_id: &str,
    ) -> QrMenuResult<()> {
        self.edit(menu_id, |menu| {
            if find_category(menu, category_id)?.remove_sub_category(sub_category_id) {
                Ok(())
            } else {
                Err(QrMenuError::not_found(SUB_CATEGORY, sub_category_id))
            }
        })
        .await?;

        info!(menu_id, category_id, sub_category_id, "Sub-category removed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    pub async fn add_item(
        &self,
        menu_id: &str,
        category_id: &str,
        sub_category_id: &str,
        input: CreateMenuItem,
    ) -> QrMenuResult<MenuItem> {
        input.validate()?;

        let item = MenuItem::from(input);
        let added = item.clone();
        self.edit(menu_id, move |menu| {
            find_sub_category(menu, category_id, sub_category_id)?
                .items
                .push(item);
            Ok(())
        })
        .await?;

        info!(menu_id, sub_category_id, item_id = %added.id, "Item added");
        Ok(added)
    }

    pub async fn update_item(
        &self,
        menu_id: &str,
        category_id: &str,
        sub_category_id: &str,
        item_id: &str,
        input: UpdateMenuItem,
    ) -> QrMenuResult<MenuItem> {
        input.validate()?;

        let (_, item) = self
            .edit(menu_id, |menu| {
                let item = find_sub_category(menu, category_id, sub_category_id)?
                    .item_mut(item_id)
                    .ok_or_else(|| QrMenuError::not_found(ITEM, item_id))?;
                item.apply_update(input);
                Ok(item.clone())
            })
            .await?;
        Ok(item)
    }

    pub async fn remove_item(
        &self,
        menu_id: &str,
        category_id: &str,
        sub_category_id: &str,
        item_id: &str,
    ) -> QrMenuResult<()> {
        self.edit(menu_id, |menu| {
            if find_sub_category(menu, category_id, sub_category_id)?.remove_item(item_id) {
                Ok(())
            } else {
                Err(QrMenuError::not_found(ITEM, item_id))
            }
        })
        .await?;

        info!(menu_id, sub_category_id, item_id, "Item removed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn load(&self, id: &str) -> QrMenuResult<Menu> {
        self.repository
            .get_by_id(COLLECTION, id)
            .await?
            .ok_or_else(|| QrMenuError::not_found(MENU, id))
    }

    /// Load `id`, apply `change` and merge-write the result. Nothing is
    /// written when `change` fails.
    async fn edit<R>(
        &self,
        id: &str,
        change: impl FnOnce(&mut Menu) -> QrMenuResult<R>,
    ) -> QrMenuResult<(Menu, R)> {
        let mut menu = self.load(id).await?;
        let outcome = change(&mut menu)?;

        if !self.repository.update(COLLECTION, id, &mut menu).await? {
            return Err(QrMenuError::not_found(MENU, id));
        }
        Ok((menu, outcome))
    }
}

fn find_category<'a>(menu: &'a mut Menu, category_id: &str) -> QrMenuResult<&'a mut MenuCategory> {
    menu.category_mut(category_id)
        .ok_or_else(|| QrMenuError::not_found(CATEGORY, category_id))
}

fn find_sub_category<'a>(
    menu: &'a mut Menu,
    category_id: &str,
    sub_category_id: &str,
) -> QrMenuResult<&'a mut MenuSubCategory> {
    find_category(menu, category_id)?
        .sub_category_mut(sub_category_id)
        .ok_or_else(|| QrMenuError::not_found(SUB_CATEGORY, sub_category_id))
}
