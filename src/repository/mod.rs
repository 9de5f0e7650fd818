//! Repository layer for database operations

pub mod asset_histories;
pub mod assets;
pub mod categories;
pub mod dashboard;
pub mod departments;
pub mod device_models;
pub mod locations;
pub mod maintenances;
pub mod manufacturers;
pub mod status_labels;
pub mod suppliers;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub assets: assets::AssetsRepository,
    pub asset_histories: asset_histories::AssetHistoriesRepository,
    pub categories: categories::CategoriesRepository,
    pub manufacturers: manufacturers::ManufacturersRepository,
    pub device_models: device_models::DeviceModelsRepository,
    pub suppliers: suppliers::SuppliersRepository,
    pub locations: locations::LocationsRepository,
    pub departments: departments::DepartmentsRepository,
    pub status_labels: status_labels::StatusLabelsRepository,
    pub maintenances: maintenances::MaintenancesRepository,
    pub users: users::UsersRepository,
    pub dashboard: dashboard::DashboardRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            assets: assets::AssetsRepository::new(pool.clone()),
            asset_histories: asset_histories::AssetHistoriesRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            manufacturers: manufacturers::ManufacturersRepository::new(pool.clone()),
            device_models: device_models::DeviceModelsRepository::new(pool.clone()),
            suppliers: suppliers::SuppliersRepository::new(pool.clone()),
            locations: locations::LocationsRepository::new(pool.clone()),
            departments: departments::DepartmentsRepository::new(pool.clone()),
            status_labels: status_labels::StatusLabelsRepository::new(pool.clone()),
            maintenances: maintenances::MaintenancesRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            dashboard: dashboard::DashboardRepository::new(pool.clone()),
            pool,
        }
    }
}
