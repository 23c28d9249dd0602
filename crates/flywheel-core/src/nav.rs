//! Navigation State
//!
//! Owns the fetched menu tree and derives the sidebar model from it and the
//! session's active team. Selecting a team persists it through the session.

use std::rc::Rc;

use crate::api::fetch_menu_tree;
use crate::config::ClientConfig;
use crate::http::{ApiError, HttpClient};
use crate::menu::{build_nav, MenuId, MenuNode, NavModel, Team};
use crate::session::Session;

pub struct Navigation {
    session: Rc<Session>,
    common_routes: Vec<String>,
    site_name: String,
    roots: Vec<MenuNode>,
    loading: bool,
    model: NavModel,
}

impl Navigation {
    pub fn new(session: Rc<Session>, config: &ClientConfig) -> Self {
        let model = NavModel {
            active_team_id: session.active_team_id(),
            ..NavModel::default()
        };
        Self {
            session,
            common_routes: config.common_routes.clone(),
            site_name: config.site_name.clone(),
            roots: Vec::new(),
            loading: true,
            model,
        }
    }

    /// Mark a menu fetch as started
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Apply a finished menu fetch. A failure leaves the current menu.
    pub fn finish_load(&mut self, result: Result<Vec<MenuNode>, ApiError>) {
        self.loading = false;
        match result {
            Ok(roots) => self.set_tree(roots),
            Err(e) => log::error!("[NAV] Failed to load menu: {}", e),
        }
    }

    /// Fetch the menu tree and rebuild
    pub async fn load(&mut self, client: &HttpClient) {
        self.begin_load();
        let result = fetch_menu_tree(client).await;
        self.finish_load(result);
    }

    /// Replace the tree and re-resolve the active team
    pub fn set_tree(&mut self, roots: Vec<MenuNode>) {
        self.roots = roots;
        self.loading = false;
        self.rebuild(self.session.active_team_id());
    }

    pub fn select_team(&mut self, id: MenuId) {
        if id == self.model.active_team_id {
            return;
        }
        log::info!("[NAV] Switching team {} -> {}", self.model.active_team_id, id);
        self.rebuild(id);
    }

    fn rebuild(&mut self, selected: MenuId) {
        self.model = build_nav(&self.roots, selected, &self.common_routes, &self.site_name);
        self.session.set_active_team_id(self.model.active_team_id);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn model(&self) -> &NavModel {
        &self.model
    }

    /// Team shown in the switcher: the active one, else the first
    pub fn active_team(&self) -> Option<&Team> {
        self.model
            .teams
            .iter()
            .find(|t| t.id == self.model.active_team_id)
            .or_else(|| self.model.teams.first())
    }
}
