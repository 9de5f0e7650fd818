//! Suppliers, locations and departments

use validator::Validate;

use super::referenced;
use crate::{
    error::{AppError, AppResult},
    models::{
        department::{CreateDepartment, Department, UpdateDepartment},
        location::{CreateLocation, Location, UpdateLocation},
        supplier::{CreateSupplier, Supplier, UpdateSupplier},
        PageQuery,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct OrganizationService {
    repository: Repository,
}

impl OrganizationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // ---- Suppliers ----

    pub async fn list_suppliers(&self, page: &PageQuery) -> AppResult<(Vec<Supplier>, i64)> {
        self.repository.suppliers.list(page.per_page(), page.offset()).await
    }

    pub async fn get_supplier(&self, id: i32) -> AppResult<Supplier> {
        self.repository.suppliers.get_by_id(id).await
    }

    pub async fn create_supplier(&self, data: &CreateSupplier) -> AppResult<Supplier> {
        data.validate()?;
        if self.repository.suppliers.name_exists(&data.name, None).await? {
            return Err(AppError::Conflict(format!("Supplier '{}' already exists", data.name)));
        }
        let supplier = self.repository.suppliers.create(data).await?;
        tracing::info!(supplier_id = supplier.id, "Supplier created");
        Ok(supplier)
    }

    pub async fn update_supplier(&self, id: i32, data: &UpdateSupplier) -> AppResult<Supplier> {
        data.validate()?;
        if let Some(ref name) = data.name {
            if self.repository.suppliers.name_exists(name, Some(id)).await? {
                return Err(AppError::Conflict(format!("Supplier '{}' already exists", name)));
            }
        }
        self.repository.suppliers.update(id, data).await
    }

    pub async fn delete_supplier(&self, id: i32) -> AppResult<()> {
        self.repository.suppliers.get_by_id(id).await?;
        if self.repository.assets.exists_for_supplier(id).await? {
            return Err(AppError::BusinessRule(
                "Cannot delete supplier: assets were bought from it".to_string(),
            ));
        }
        if self.repository.maintenances.exists_for_supplier(id).await? {
            return Err(AppError::BusinessRule(
                "Cannot delete supplier: maintenance records reference it".to_string(),
            ));
        }
        self.repository.suppliers.delete(id).await?;
        tracing::info!(supplier_id = id, "Supplier deleted");
        Ok(())
    }

    // ---- Locations ----

    pub async fn list_locations(&self, page: &PageQuery) -> AppResult<(Vec<Location>, i64)> {
        self.repository.locations.list(page.per_page(), page.offset()).await
    }

    pub async fn get_location(&self, id: i32) -> AppResult<Location> {
        self.repository.locations.get_by_id(id).await
    }

    pub async fn create_location(&self, data: &CreateLocation) -> AppResult<Location> {
        data.validate()?;
        if let Some(parent_id) = data.parent_id {
            referenced(self.repository.locations.get_by_id(parent_id).await)?;
        }
        let location = self.repository.locations.create(data).await?;
        tracing::info!(location_id = location.id, "Location created");
        Ok(location)
    }

    pub async fn update_location(&self, id: i32, data: &UpdateLocation) -> AppResult<Location> {
        data.validate()?;
        if let Some(parent_id) = data.parent_id {
            if parent_id == id {
                return Err(AppError::Validation("A location cannot be its own parent".to_string()));
            }
            referenced(self.repository.locations.get_by_id(parent_id).await)?;
        }
        self.repository.locations.update(id, data).await
    }

    pub async fn delete_location(&self, id: i32) -> AppResult<()> {
        self.repository.locations.get_by_id(id).await?;
        if self.repository.users.exists_for_location(id).await? {
            return Err(AppError::BusinessRule(
                "Cannot delete location: users are based there".to_string(),
            ));
        }
        if self.repository.locations.has_children(id).await? {
            return Err(AppError::BusinessRule(
                "Cannot delete location: it has child locations".to_string(),
            ));
        }
        self.repository.locations.delete(id).await?;
        tracing::info!(location_id = id, "Location deleted");
        Ok(())
    }

    // ---- Departments ----

    pub async fn list_departments(&self, page: &PageQuery) -> AppResult<(Vec<Department>, i64)> {
        self.repository.departments.list(page.per_page(), page.offset()).await
    }

    pub async fn get_department(&self, id: i32) -> AppResult<Department> {
        self.repository.departments.get_by_id(id).await
    }

    pub async fn create_department(&self, data: &CreateDepartment) -> AppResult<Department> {
        data.validate()?;
        if let Some(manager_id) = data.manager_id {
            referenced(self.repository.users.get_by_id(manager_id).await)?;
        }
        let department = self.repository.departments.create(data).await?;
        tracing::info!(department_id = department.id, "Department created");
        Ok(department)
    }

    pub async fn update_department(&self, id: i32, data: &UpdateDepartment) -> AppResult<Department> {
        data.validate()?;
        if let Some(manager_id) = data.manager_id {
            referenced(self.repository.users.get_by_id(manager_id).await)?;
        }
        self.repository.departments.update(id, data).await
    }

    pub async fn delete_department(&self, id: i32) -> AppResult<()> {
        self.repository.departments.get_by_id(id).await?;
        if self.repository.users.exists_for_department(id).await? {
            return Err(AppError::BusinessRule(
                "Cannot delete department: users still belong to it".to_string(),
            ));
        }
        self.repository.departments.delete(id).await?;
        tracing::info!(department_id = id, "Department deleted");
        Ok(())
    }
}
