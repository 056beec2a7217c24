use crate::handlers::{
    confirm_transaction::__path_confirm_transaction,
    create_transaction::__path_create_transaction, current_user::__path_current_user,
    delete_transaction::__path_delete_transaction, get_transaction::__path_get_transaction,
    health::__path_health_check, link_transaction::__path_link_transaction,
    list_transactions::__path_list_transactions, list_users::__path_list_users,
    login::__path_login, register::__path_register, supply_chain::__path_supply_chain,
    update_profile::__path_update_profile, update_transaction::__path_update_transaction,
};
use agritrack_primitives::error::ErrorBody;
use agritrack_primitives::models::*;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        register, login, current_user, update_profile, list_users, health_check,
        create_transaction, list_transactions, get_transaction, update_transaction,
        delete_transaction, confirm_transaction, link_transaction, supply_chain
    ),
    components(schemas(
        ErrorBody, RegisterRequest, LoginRequest, UserResponse, AuthResponse,
        CreateTransactionRequest, UpdateTransactionRequest, TransactionResponse,
        TransactionListResponse, SupplyChainResponse, LinkTransactionRequest,
        UserRole, CropQuality, EntityType, SupplyChainStage, TransactionStatus
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and profile endpoints"),
        (name = "Transactions", description = "Crop transaction lifecycle"),
        (name = "Supply Chain", description = "Linking and traversing transaction chains"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "bearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
