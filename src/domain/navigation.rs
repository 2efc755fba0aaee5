// Breadcrumb navigation model
use super::dashboard::DashboardDefinition;
use serde::{Deserialize, Serialize};

/// One folder in the ancestry of a dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderCrumb {
    pub uid: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavCrumb {
    pub text: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavModel {
    pub crumbs: Vec<NavCrumb>,
}

/// Build breadcrumbs from root folder down to the dashboard itself.
///
/// `ancestry` is ordered root first.
pub fn build_nav_model(
    base_path: &str,
    definition: &DashboardDefinition,
    ancestry: &[FolderCrumb],
) -> NavModel {
    let mut crumbs: Vec<NavCrumb> = ancestry
        .iter()
        .map(|folder| NavCrumb {
            text: folder.title.clone(),
            url: Some(format!("{}/dashboards/f/{}", base_path, folder.uid)),
        })
        .collect();

    crumbs.push(NavCrumb {
        text: definition.title().unwrap_or("Untitled").to_string(),
        url: definition.meta.url.clone(),
    });

    NavModel { crumbs }
}
