//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::purchase_handler::PurchaseReceipt;
use domain::{Credentials, PublicUser, RegisterUser};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::register,
        crate::handlers::user_handler::login,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::clear_users,
        crate::handlers::purchase_handler::record_purchases,
    ),
    components(
        schemas(
            RegisterUser,
            Credentials,
            PublicUser,
            PurchaseReceipt,
        )
    ),
    tags(
        (name = "Users", description = "User directory endpoints"),
        (name = "Purchases", description = "Purchase log endpoints"),
    )
)]
pub struct ApiDoc;
