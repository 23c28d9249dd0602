//! Menu Tree Transform
//!
//! Turns the backend permission tree into the two-level sidebar model:
//! teams (department nodes) with their menus, plus the shared system menu.
//!
//! Raw JSON is validated into [`MenuNode`] first. Nodes that fail the shape
//! check are skipped together with their subtree, and nesting is bounded by
//! the configured maximum depth.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::icon::Icon;
use crate::value::{as_flag, as_id, as_text, present};

/// Normalised menu id. `0` means "nothing selected".
pub type MenuId = i64;

/// Placeholder link for nodes without a route
pub const PLACEHOLDER_URL: &str = "#";

/// Key some backends wrap the tree in
const WRAPPED_TREE_KEY: &str = "menuTreeVOs";

/// Node kind as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuType {
    /// 0: directory
    Directory,
    /// 1: page
    Menu,
    /// Buttons, permissions and anything else
    Other(i64),
}

impl MenuType {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => MenuType::Directory,
            1 => MenuType::Menu,
            other => MenuType::Other(other),
        }
    }
}

/// Validated menu node
#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode {
    pub id: Option<MenuId>,
    pub title: String,
    pub route_path: Option<String>,
    pub icon: Option<String>,
    pub menu_type: Option<MenuType>,
    pub is_visible: Option<bool>,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Validate one raw node. Returns `None` for non-objects and untitled nodes.
    ///
    /// `depth` is the level of this node (top level = 0). Children beyond
    /// `max_depth` are dropped.
    pub fn from_value(value: &Value, depth: usize, max_depth: usize) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let Some(title) = present(value, "title").and_then(as_text) else {
            log::debug!("[MENU] Skipping untitled node at depth {}", depth);
            return None;
        };

        let children = match present(value, "children").and_then(Value::as_array) {
            Some(raw) if depth < max_depth => raw
                .iter()
                .filter_map(|child| MenuNode::from_value(child, depth + 1, max_depth))
                .collect(),
            Some(raw) if !raw.is_empty() => {
                log::warn!("[MENU] '{}' exceeds depth {}, children dropped", title, max_depth);
                Vec::new()
            }
            _ => Vec::new(),
        };

        Some(Self {
            id: present(value, "menuId").and_then(as_id),
            title,
            route_path: present(value, "routePath").and_then(as_text),
            icon: present(value, "icon").and_then(as_text),
            menu_type: present(value, "menuType")
                .and_then(Value::as_i64)
                .map(MenuType::from_code),
            is_visible: present(value, "isVisible").and_then(as_flag),
            children,
        })
    }

    /// Directory or page, and explicitly visible. Missing fields mean "no".
    pub fn is_eligible(&self) -> bool {
        matches!(self.menu_type, Some(MenuType::Directory) | Some(MenuType::Menu))
            && self.is_visible == Some(true)
    }
}

/// Validate the permission response; accepts both the bare array and the
/// `{ menuTreeVOs: [...] }` wrapper. Anything else yields an empty tree.
pub fn parse_menu_tree(data: &Value, max_depth: usize) -> Vec<MenuNode> {
    let roots = match data {
        Value::Array(nodes) => nodes,
        Value::Object(_) => match present(data, WRAPPED_TREE_KEY).and_then(Value::as_array) {
            Some(nodes) => nodes,
            None => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    roots
        .iter()
        .filter_map(|node| MenuNode::from_value(node, 0, max_depth))
        .collect()
}

/// Sidebar entry. `items` is `None` for leaf links, never `Some(vec![])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub title: String,
    pub url: String,
    pub icon: Icon,
    pub items: Option<Vec<MenuItem>>,
}

/// Team (department) shown in the switcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: MenuId,
    pub name: String,
    pub logo: Icon,
    pub plan: String,
    pub agent: String,
}

/// Filter and convert a list of sibling nodes. Excluded nodes are not
/// descended into.
pub fn to_menu_items<'a>(nodes: impl IntoIterator<Item = &'a MenuNode>) -> Vec<MenuItem> {
    nodes
        .into_iter()
        .filter(|node| node.is_eligible())
        .map(|node| {
            let children = to_menu_items(&node.children);
            MenuItem {
                title: node.title.clone(),
                url: node
                    .route_path
                    .clone()
                    .unwrap_or_else(|| PLACEHOLDER_URL.to_string()),
                icon: Icon::resolve(node.icon.as_deref()),
                items: if children.is_empty() { None } else { Some(children) },
            }
        })
        .collect()
}

/// Whether a top-level route belongs to the shared menu
pub fn is_common_route(route_path: Option<&str>, common_routes: &[String]) -> bool {
    route_path.is_some_and(|path| common_routes.iter().any(|prefix| path.starts_with(prefix.as_str())))
}

/// Top-level nodes split by route prefix
#[derive(Debug, Clone, Default)]
pub struct Partition<'a> {
    pub team_nodes: Vec<&'a MenuNode>,
    pub common_nodes: Vec<&'a MenuNode>,
}

pub fn partition<'a>(roots: &'a [MenuNode], common_routes: &[String]) -> Partition<'a> {
    let mut result = Partition::default();
    for node in roots {
        if is_common_route(node.route_path.as_deref(), common_routes) {
            result.common_nodes.push(node);
        } else {
            result.team_nodes.push(node);
        }
    }
    result
}

/// Keep the selection if it names a team, else fall back to the first team.
/// With no teams at all the selection is returned unchanged.
pub fn resolve_active_team(teams: &[Team], selected: MenuId) -> MenuId {
    if selected != 0 && teams.iter().any(|t| t.id == selected) {
        return selected;
    }
    teams.first().map(|t| t.id).unwrap_or(selected)
}

/// Everything the sidebar renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavModel {
    pub teams: Vec<Team>,
    pub active_team_id: MenuId,
    pub current_team_menu: Vec<MenuItem>,
    pub common_menu: Vec<MenuItem>,
}

/// Build the navigation model for `roots` with `selected` as the requested
/// team. The returned `active_team_id` is the resolved selection.
pub fn build_nav(roots: &[MenuNode], selected: MenuId, common_routes: &[String], agent: &str) -> NavModel {
    let Partition { team_nodes, common_nodes } = partition(roots, common_routes);

    let teams: Vec<Team> = team_nodes
        .iter()
        .filter_map(|node| {
            let Some(id) = node.id else {
                log::warn!("[MENU] Team node '{}' has no usable id", node.title);
                return None;
            };
            Some(Team {
                id,
                name: node.title.clone(),
                logo: Icon::resolve(node.icon.as_deref()),
                plan: node.title.clone(),
                agent: agent.to_string(),
            })
        })
        .collect();

    let active_team_id = resolve_active_team(&teams, selected);

    let current_team_menu = match team_nodes.iter().find(|n| n.id == Some(active_team_id)) {
        Some(node) if active_team_id != 0 => to_menu_items(&node.children),
        _ => {
            if active_team_id != 0 {
                log::warn!("[MENU] No team menu with id {}", active_team_id);
            }
            Vec::new()
        }
    };

    let common_menu = to_menu_items(common_nodes);

    NavModel {
        teams,
        active_team_id,
        current_team_menu,
        common_menu,
    }
}

/// Titled group of sidebar entries
#[derive(Debug, Clone, PartialEq)]
pub struct NavGroup {
    pub title: &'static str,
    pub items: Vec<MenuItem>,
}

/// "General" then "System"; empty groups are left out.
pub fn nav_groups(model: &NavModel) -> Vec<NavGroup> {
    [
        ("General", &model.current_team_menu),
        ("System", &model.common_menu),
    ]
    .into_iter()
    .filter(|(_, items)| !items.is_empty())
    .map(|(title, items)| NavGroup {
        title,
        items: items.clone(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn common() -> Vec<String> {
        vec!["/system".to_string(), "/member".to_string(), "/user".to_string()]
    }

    fn all_items(items: &[MenuItem]) -> Vec<&MenuItem> {
        let mut out = Vec::new();
        for item in items {
            out.push(item);
            if let Some(children) = &item.items {
                out.extend(all_items(children));
            }
        }
        out
    }

    #[test]
    fn test_single_team_with_leaf_child() {
        let raw = json!([{
            "menuId": 1, "title": "Dept A", "routePath": "/deptA", "menuType": 0, "isVisible": true,
            "children": [{"menuId": 2, "title": "Sub", "routePath": "/deptA/sub", "menuType": 1, "isVisible": true, "children": []}]
        }]);
        let tree = parse_menu_tree(&raw, 16);
        let nav = build_nav(&tree, 1, &common(), "Flywheel");

        assert_eq!(nav.active_team_id, 1);
        assert_eq!(nav.current_team_menu.len(), 1);
        let sub = &nav.current_team_menu[0];
        assert_eq!(sub.title, "Sub");
        assert_eq!(sub.url, "/deptA/sub");
        assert!(sub.items.is_none());
    }

    #[test]
    fn test_hidden_node_drops_whole_subtree() {
        let raw = json!([{
            "menuId": 1, "title": "Dept", "routePath": "/dept", "menuType": 0, "isVisible": true,
            "children": [{
                "menuId": 2, "title": "Hidden", "routePath": "/dept/h", "menuType": 0, "isVisible": false,
                "children": [
                    {"menuId": 3, "title": "A", "routePath": "/dept/h/a", "menuType": 1, "isVisible": true},
                    {"menuId": 4, "title": "B", "routePath": "/dept/h/b", "menuType": 1, "isVisible": true}
                ]
            }]
        }]);
        let nav = build_nav(&parse_menu_tree(&raw, 16), 1, &common(), "x");
        assert!(nav.current_team_menu.is_empty());
        assert!(nav.common_menu.is_empty());
    }

    #[test]
    fn test_missing_flags_are_ineligible() {
        let raw = json!([
            {"menuId": 1, "title": "No type", "routePath": "/system/a", "isVisible": true},
            {"menuId": 2, "title": "No flag", "routePath": "/system/b", "menuType": 1},
            {"menuId": 3, "title": "Button", "routePath": "/system/c", "menuType": 2, "isVisible": true},
            {"menuId": 4, "title": "Ok", "routePath": "/system/d", "menuType": 1, "isVisible": true}
        ]);
        let nav = build_nav(&parse_menu_tree(&raw, 16), 0, &common(), "x");
        let titles: Vec<_> = nav.common_menu.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Ok"]);
    }

    #[test]
    fn test_empty_children_collapse_to_none() {
        let raw = json!([{
            "menuId": 9, "title": "Settings", "routePath": "/system", "menuType": 0, "isVisible": true,
            "children": [{"menuId": 10, "title": "Btn", "menuType": 2, "isVisible": true}]
        }]);
        let nav = build_nav(&parse_menu_tree(&raw, 16), 0, &common(), "x");
        assert_eq!(nav.common_menu.len(), 1);
        assert_eq!(nav.common_menu[0].items, None);
    }

    #[test]
    fn test_missing_route_uses_placeholder() {
        let raw = json!([{
            "menuId": 1, "title": "Dept", "menuType": 0, "isVisible": true,
            "children": [{"menuId": 2, "title": "Page", "menuType": 1, "isVisible": true}]
        }]);
        let nav = build_nav(&parse_menu_tree(&raw, 16), 1, &common(), "x");
        assert_eq!(nav.current_team_menu[0].url, PLACEHOLDER_URL);
    }

    #[test]
    fn test_every_item_has_title_and_url() {
        let raw = json!([{
            "menuId": "1", "title": "Dept", "menuType": 0, "isVisible": true,
            "children": [
                {"menuId": 2, "title": "", "routePath": "/x", "menuType": 1, "isVisible": true},
                {"menuId": 3, "title": "Dir", "routePath": "", "menuType": 0, "isVisible": 1, "children": [
                    {"menuId": 4, "title": "Leaf", "menuType": 1, "isVisible": true},
                    "garbage",
                    null
                ]}
            ]
        }]);
        let nav = build_nav(&parse_menu_tree(&raw, 16), 1, &common(), "x");
        let items = all_items(&nav.current_team_menu);
        assert_eq!(items.len(), 2);
        for item in items {
            assert!(!item.title.is_empty());
            assert!(!item.url.is_empty());
        }
    }

    #[test]
    fn test_unknown_selection_picks_first_team() {
        let raw = json!([
            {"menuId": 5, "title": "System", "routePath": "/system", "menuType": 0, "isVisible": true},
            {"menuId": 7, "title": "Strategy", "routePath": "/strategy", "menuType": 0, "isVisible": true},
            {"menuId": 8, "title": "Tech", "routePath": "/tech", "menuType": 0, "isVisible": true}
        ]);
        let tree = parse_menu_tree(&raw, 16);
        assert_eq!(build_nav(&tree, 99, &common(), "x").active_team_id, 7);
        assert_eq!(build_nav(&tree, 0, &common(), "x").active_team_id, 7);
        assert_eq!(build_nav(&tree, 8, &common(), "x").active_team_id, 8);
        // A common node is never a team
        assert_eq!(build_nav(&tree, 5, &common(), "x").active_team_id, 7);
    }

    #[test]
    fn test_string_ids_are_normalised() {
        let raw = json!([{"menuId": "12", "title": "Dept", "routePath": "/d", "menuType": 0, "isVisible": true}]);
        let nav = build_nav(&parse_menu_tree(&raw, 16), 12, &common(), "Site");
        assert_eq!(nav.teams[0].id, 12);
        assert_eq!(nav.teams[0].agent, "Site");
        assert_eq!(nav.teams[0].plan, "Dept");
    }

    #[test]
    fn test_wrapped_and_malformed_responses() {
        let wrapped = json!({"menuTreeVOs": [{"menuId": 1, "title": "A", "routePath": "/a"}]});
        assert_eq!(parse_menu_tree(&wrapped, 16).len(), 1);
        assert!(parse_menu_tree(&json!({"other": 1}), 16).is_empty());
        assert!(parse_menu_tree(&json!("nope"), 16).is_empty());
        assert!(parse_menu_tree(&Value::Null, 16).is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_model() {
        let nav = build_nav(&[], 3, &common(), "x");
        assert!(nav.teams.is_empty());
        assert!(nav.current_team_menu.is_empty());
        assert!(nav.common_menu.is_empty());
        assert_eq!(nav.active_team_id, 3);
    }

    #[test]
    fn test_depth_bound_truncates() {
        let raw = json!([{
            "menuId": 1, "title": "L0", "menuType": 0, "isVisible": true,
            "children": [{"menuId": 2, "title": "L1", "menuType": 0, "isVisible": true,
                "children": [{"menuId": 3, "title": "L2", "menuType": 1, "isVisible": true}]}]
        }]);
        let tree = parse_menu_tree(&raw, 1);
        assert_eq!(tree[0].children.len(), 1);
        assert!(tree[0].children[0].children.is_empty());
    }

    #[test]
    fn test_nav_groups_hide_empty() {
        let model = NavModel {
            common_menu: vec![MenuItem {
                title: "Users".into(),
                url: "/user".into(),
                icon: Icon::User,
                items: None,
            }],
            ..Default::default()
        };
        let groups = nav_groups(&model);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title, "System");
    }
}
