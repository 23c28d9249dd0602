//! Permission menu

use crate::http::{ApiError, HttpClient, HttpRequest, Method};
use crate::menu::{parse_menu_tree, MenuNode};

pub const USER_PERMISSION_PATH: &str = "/menu/getUserPermission";

/// Menu tree of the signed-in user, validated and depth-bounded
pub async fn fetch_menu_tree(client: &HttpClient) -> Result<Vec<MenuNode>, ApiError> {
    let data = client
        .execute(HttpRequest::new(Method::Get, USER_PERMISSION_PATH))
        .await?;
    let roots = parse_menu_tree(&data, client.config().max_menu_depth);
    log::debug!("[API] menu tree loaded: {} top-level nodes", roots.len());
    Ok(roots)
}
