//! Categories, manufacturers and device models

use validator::Validate;

use super::referenced;
use crate::{
    error::{AppError, AppResult},
    models::{
        device_model::{CreateDeviceModel, DeviceModel, UpdateDeviceModel},
        master_data::{
            Category, CreateCategory, CreateManufacturer, Manufacturer, UpdateCategory,
            UpdateManufacturer,
        },
        PageQuery,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // ---- Categories ----

    pub async fn list_categories(&self, page: &PageQuery) -> AppResult<(Vec<Category>, i64)> {
        self.repository.categories.list(page.per_page(), page.offset()).await
    }

    pub async fn get_category(&self, id: i32) -> AppResult<Category> {
        self.repository.categories.get_by_id(id).await
    }

    pub async fn create_category(&self, data: &CreateCategory) -> AppResult<Category> {
        data.validate()?;
        if self.repository.categories.name_exists(&data.name, None).await? {
            return Err(AppError::Conflict(format!("Category '{}' already exists", data.name)));
        }
        let category = self.repository.categories.create(data).await?;
        tracing::info!(category_id = category.id, "Category created");
        Ok(category)
    }

    pub async fn update_category(&self, id: i32, data: &UpdateCategory) -> AppResult<Category> {
        data.validate()?;
        if let Some(ref name) = data.name {
            if self.repository.categories.name_exists(name, Some(id)).await? {
                return Err(AppError::Conflict(format!("Category '{}' already exists", name)));
            }
        }
        self.repository.categories.update(id, data).await
    }

    pub async fn delete_category(&self, id: i32) -> AppResult<()> {
        self.repository.categories.get_by_id(id).await?;
        if self.repository.device_models.exists_for_category(id).await? {
            return Err(AppError::BusinessRule(
                "Cannot delete category: device models still belong to it".to_string(),
            ));
        }
        self.repository.categories.delete(id).await?;
        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }

    // ---- Manufacturers ----

    pub async fn list_manufacturers(&self, page: &PageQuery) -> AppResult<(Vec<Manufacturer>, i64)> {
        self.repository.manufacturers.list(page.per_page(), page.offset()).await
    }

    pub async fn get_manufacturer(&self, id: i32) -> AppResult<Manufacturer> {
        self.repository.manufacturers.get_by_id(id).await
    }

    pub async fn create_manufacturer(&self, data: &CreateManufacturer) -> AppResult<Manufacturer> {
        data.validate()?;
        if self.repository.manufacturers.name_exists(&data.name, None).await? {
            return Err(AppError::Conflict(format!("Manufacturer '{}' already exists", data.name)));
        }
        let manufacturer = self.repository.manufacturers.create(data).await?;
        tracing::info!(manufacturer_id = manufacturer.id, "Manufacturer created");
        Ok(manufacturer)
    }

    pub async fn update_manufacturer(&self, id: i32, data: &UpdateManufacturer) -> AppResult<Manufacturer> {
        data.validate()?;
        if let Some(ref name) = data.name {
            if self.repository.manufacturers.name_exists(name, Some(id)).await? {
                return Err(AppError::Conflict(format!("Manufacturer '{}' already exists", name)));
            }
        }
        self.repository.manufacturers.update(id, data).await
    }

    pub async fn delete_manufacturer(&self, id: i32) -> AppResult<()> {
        self.repository.manufacturers.get_by_id(id).await?;
        if self.repository.device_models.exists_for_manufacturer(id).await? {
            return Err(AppError::BusinessRule(
                "Cannot delete manufacturer: device models still reference it".to_string(),
            ));
        }
        self.repository.manufacturers.delete(id).await?;
        tracing::info!(manufacturer_id = id, "Manufacturer deleted");
        Ok(())
    }

    // ---- Device models ----

    pub async fn list_device_models(&self, page: &PageQuery) -> AppResult<(Vec<DeviceModel>, i64)> {
        self.repository.device_models.list(page.per_page(), page.offset()).await
    }

    pub async fn get_device_model(&self, id: i32) -> AppResult<DeviceModel> {
        self.repository.device_models.get_by_id(id).await
    }

    pub async fn create_device_model(&self, data: &CreateDeviceModel) -> AppResult<DeviceModel> {
        data.validate()?;
        if self.repository.device_models.name_exists(&data.name, None).await? {
            return Err(AppError::Conflict(format!("Device model '{}' already exists", data.name)));
        }
        referenced(self.repository.manufacturers.get_by_id(data.manufacturer_id).await)?;
        referenced(self.repository.categories.get_by_id(data.category_id).await)?;

        let model = self.repository.device_models.create(data).await?;
        tracing::info!(model_id = model.id, "Device model created");
        Ok(model)
    }

    pub async fn update_device_model(&self, id: i32, data: &UpdateDeviceModel) -> AppResult<DeviceModel> {
        data.validate()?;
        if let Some(ref name) = data.name {
            if self.repository.device_models.name_exists(name, Some(id)).await? {
                return Err(AppError::Conflict(format!("Device model '{}' already exists", name)));
            }
        }
        if let Some(manufacturer_id) = data.manufacturer_id {
            referenced(self.repository.manufacturers.get_by_id(manufacturer_id).await)?;
        }
        if let Some(category_id) = data.category_id {
            referenced(self.repository.categories.get_by_id(category_id).await)?;
        }
        self.repository.device_models.update(id, data).await
    }

    pub async fn delete_device_model(&self, id: i32) -> AppResult<()> {
        self.repository.device_models.get_by_id(id).await?;
        if self.repository.assets.exists_for_model(id).await? {
            return Err(AppError::BusinessRule(
                "Cannot delete device model: assets still use it".to_string(),
            ));
        }
        self.repository.device_models.delete(id).await?;
        tracing::info!(model_id = id, "Device model deleted");
        Ok(())
    }
}
