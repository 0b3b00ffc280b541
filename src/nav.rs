//! Navigation tree, page titles and breadcrumbs

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub path: &'static str,
    /// Font Awesome class
    pub icon: &'static str,
    pub children: &'static [NavItem],
}

const fn leaf(id: &'static str, label: &'static str, path: &'static str, icon: &'static str) -> NavItem {
    NavItem { id, label, path, icon, children: &[] }
}

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const FORMS_PATH: &str = "/quality/forms";
pub const LIBRARY_PATH: &str = "/quality/library";
pub const INDICATORS_PATH: &str = "/quality/indicators";
pub const PROJECTS_PATH: &str = "/quality/projects";
pub const REPORTS_PATH: &str = "/reports";

pub const NAV_ITEMS: &[NavItem] = &[
    leaf("dashboard", "Dashboard Principal", DASHBOARD_PATH, "fas fa-tachometer-alt"),
    NavItem {
        id: "quality",
        label: "Calidad",
        path: "/quality",
        icon: "fas fa-check-circle",
        children: &[
            leaf("forms", "Formularios", FORMS_PATH, "fas fa-clipboard-list"),
            leaf("library", "Biblioteca", LIBRARY_PATH, "fas fa-folder-open"),
            leaf("indicators", "Indicadores", INDICATORS_PATH, "fas fa-chart-line"),
            leaf("projects", "Proyectos", PROJECTS_PATH, "fas fa-tasks"),
        ],
    },
    leaf("reports", "Reportes", REPORTS_PATH, "fas fa-file-alt"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: &'static str,
    /// None for the current page
    pub path: Option<&'static str>,
}

/// Known paths resolve to themselves; anything else lands on the dashboard
pub fn resolve(path: &str) -> &'static str {
    NAV_ITEMS
        .iter()
        .flat_map(|item| std::iter::once(item).chain(item.children.iter()))
        .find(|item| item.children.is_empty() && item.path == path)
        .map_or(DASHBOARD_PATH, |item| item.path)
}

/// Exact match on top-level items, prefix match on children
pub fn page_title(path: &str) -> &'static str {
    for item in NAV_ITEMS {
        if item.path == path {
            return item.label;
        }
        if let Some(child) = item.children.iter().find(|c| path.starts_with(c.path)) {
            return child.label;
        }
    }
    "Dashboard"
}

pub fn breadcrumbs(path: &str) -> Vec<Crumb> {
    for item in NAV_ITEMS {
        if item.path == path {
            return vec![Crumb { label: item.label, path: None }];
        }
        if let Some(child) = item.children.iter().find(|c| path.starts_with(c.path)) {
            return vec![
                Crumb { label: item.label, path: Some(item.path) },
                Crumb { label: child.label, path: None },
            ];
        }
    }
    vec![Crumb { label: "Dashboard", path: None }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_titles() {
        assert_eq!(page_title("/dashboard"), "Dashboard Principal");
        assert_eq!(page_title("/quality/library"), "Biblioteca");
        assert_eq!(page_title("/quality/projects/board"), "Proyectos");
        assert_eq!(page_title("/reports"), "Reportes");
        assert_eq!(page_title("/nowhere"), "Dashboard");
    }

    #[test]
    fn test_breadcrumbs() {
        let crumbs = breadcrumbs(FORMS_PATH);
        assert_eq!(crumbs.len(), 2);
        assert_eq!(crumbs[0], Crumb { label: "Calidad", path: Some("/quality") });
        assert_eq!(crumbs[1], Crumb { label: "Formularios", path: None });
        assert_eq!(breadcrumbs(REPORTS_PATH), vec![Crumb { label: "Reportes", path: None }]);
    }

    #[test]
    fn test_resolve_redirects_unknown() {
        assert_eq!(resolve(PROJECTS_PATH), PROJECTS_PATH);
        assert_eq!(resolve("/quality"), DASHBOARD_PATH);
        assert_eq!(resolve("/foo"), DASHBOARD_PATH);
    }
}
