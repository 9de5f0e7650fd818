//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    assets, auth, categories, dashboard, departments, depreciation, device_models, health,
    locations, maintenances, manufacturers, status_labels, suppliers, transactions, users,
};

/// Registers the JWT bearer scheme referenced by `security(("bearer_auth" = []))`
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "ITAM Server API",
        version = "0.3.0",
        description = "IT asset inventory, assignment and depreciation REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::logout,
        auth::me,
        // Assets
        assets::list_assets,
        assets::get_asset,
        assets::create_asset,
        assets::update_asset,
        assets::delete_asset,
        assets::asset_history,
        // Transactions
        transactions::checkout,
        transactions::checkin,
        transactions::handover,
        // Maintenance
        maintenances::list_maintenances,
        maintenances::get_maintenance,
        maintenances::create_maintenance,
        maintenances::update_maintenance,
        maintenances::delete_maintenance,
        // Master data
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        manufacturers::list_manufacturers,
        manufacturers::get_manufacturer,
        manufacturers::create_manufacturer,
        manufacturers::update_manufacturer,
        manufacturers::delete_manufacturer,
        device_models::list_models,
        device_models::get_device_model,
        device_models::create_device_model,
        device_models::update_device_model,
        device_models::delete_device_model,
        status_labels::list_labels,
        status_labels::get_status_label,
        status_labels::create_status_label,
        status_labels::update_status_label,
        status_labels::delete_status_label,
        // Organization
        suppliers::list_suppliers,
        suppliers::get_supplier,
        suppliers::create_supplier,
        suppliers::update_supplier,
        suppliers::delete_supplier,
        locations::list_locations,
        locations::get_location,
        locations::create_location,
        locations::update_location,
        locations::delete_location,
        departments::list_departments,
        departments::get_department,
        departments::create_department,
        departments::update_department,
        departments::delete_department,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Reporting
        dashboard::get_stats,
        depreciation::run_depreciation,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::LoginRequest,
            crate::models::user::LoginResponse,
            // Assets
            crate::models::asset::AssetDetails,
            crate::models::asset::CreateAsset,
            crate::models::asset::UpdateAsset,
            crate::models::asset_history::AssetHistory,
            crate::models::asset_history::AssetHistoryEntry,
            crate::models::asset_history::CheckoutRequest,
            crate::models::asset_history::CheckinRequest,
            crate::models::asset_history::HandoverDocument,
            // Maintenance
            crate::models::maintenance::Maintenance,
            crate::models::maintenance::CreateMaintenance,
            crate::models::maintenance::UpdateMaintenance,
            // Master data
            crate::models::master_data::Category,
            crate::models::master_data::CreateCategory,
            crate::models::master_data::UpdateCategory,
            crate::models::master_data::Manufacturer,
            crate::models::master_data::CreateManufacturer,
            crate::models::master_data::UpdateManufacturer,
            crate::models::device_model::DeviceModel,
            crate::models::device_model::CreateDeviceModel,
            crate::models::device_model::UpdateDeviceModel,
            crate::models::status_label::StatusLabel,
            crate::models::status_label::CreateStatusLabel,
            crate::models::status_label::UpdateStatusLabel,
            // Organization
            crate::models::supplier::Supplier,
            crate::models::supplier::CreateSupplier,
            crate::models::supplier::UpdateSupplier,
            crate::models::location::Location,
            crate::models::location::CreateLocation,
            crate::models::location::UpdateLocation,
            crate::models::department::Department,
            crate::models::department::CreateDepartment,
            crate::models::department::UpdateDepartment,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Enums
            crate::models::enums::StatusKind,
            crate::models::enums::CategoryKind,
            crate::models::enums::ActionType,
            crate::models::enums::Role,
            // Reporting
            crate::models::dashboard::DashboardStats,
            crate::models::dashboard::StatusCount,
            crate::services::depreciation::DepreciationReport,
            // Health
            health::HealthResponse,
            // Responses
            crate::api::StatusMessage,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "assets", description = "Asset registry"),
        (name = "transactions", description = "Checkout, checkin and handover"),
        (name = "maintenances", description = "Maintenance records"),
        (name = "categories", description = "Asset categories"),
        (name = "manufacturers", description = "Manufacturers"),
        (name = "device-models", description = "Device models"),
        (name = "status-labels", description = "Asset status labels"),
        (name = "suppliers", description = "Suppliers"),
        (name = "locations", description = "Locations"),
        (name = "departments", description = "Departments"),
        (name = "users", description = "User management"),
        (name = "dashboard", description = "Dashboard statistics"),
        (name = "depreciation", description = "Book value recalculation")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_core_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/assets",
            "/assets/{id}/history",
            "/assets/checkout",
            "/assets/checkin",
            "/dashboard-stats",
            "/depreciation/run",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
