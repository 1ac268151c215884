// Endpoint templates, built once per server connection context

use std::fmt;
use std::str::FromStr;

use super::context::ServerConnectionContext;
use super::template::{Template, TemplateParser};
use crate::error::{LocatorError, Result};

const PAGING: &str = "?pageSize=%%pageSize%%&pageNumber=%%pageNumber%%";
const PDF_OPTIONS: &str = "?type=%%pageType%%&orientation=%%pageOrientation%%";

/// Query fragment selecting one value of one view field
pub const VIEW_FILTER_TEMPLATE: &str = "vf_%%fieldName%%=%%fieldValue%%";

/// Every addressable server endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    SignIn,
    SiteInfo,
    WorkbooksForUser,
    ViewsForSite,
    ViewsForWorkbook,
    ViewThumbnail,
    ViewData,
    ViewImage,
    ViewPdf,
    Workbook,
    WorkbookConnections,
    WorkbookPdf,
    WorkbookDownload,
    Datasources,
    Datasource,
    QueryDatasources,
    DatasourceConnections,
    DatasourceDownload,
    Flows,
    FlowRuns,
    FlowDownload,
    Projects,
    CreateProject,
    Groups,
    GroupsForUser,
    Users,
    UsersInGroup,
    CreateUser,
    UpdateUser,
    DeleteWorkbookTag,
    DeleteDatasourceTag,
    InitiateUpload,
    AppendUploadChunk,
    FinalizeDatasourcePublish,
    FinalizeWorkbookPublish,
    AddToFavorites,
    FavoritesForUser,
    DeleteWorkbookFromFavorites,
    DeleteViewFromFavorites,
    OrderFavoritesForUser,
    Schedule,
    Schedules,
    ExtractRefreshTasks,
    GraphqlMetadata,
}

/// Where an operation's path is rooted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Root {
    /// `scheme://host/api/{apiVersion}`
    Versioned,
    /// `scheme://host/api`
    Unversioned,
}

impl Operation {
    pub fn all() -> &'static [Operation] {
        use Operation::*;
        &[
            SignIn,
            SiteInfo,
            WorkbooksForUser,
            ViewsForSite,
            ViewsForWorkbook,
            ViewThumbnail,
            ViewData,
            ViewImage,
            ViewPdf,
            Workbook,
            WorkbookConnections,
            WorkbookPdf,
            WorkbookDownload,
            Datasources,
            Datasource,
            QueryDatasources,
            DatasourceConnections,
            DatasourceDownload,
            Flows,
            FlowRuns,
            FlowDownload,
            Projects,
            CreateProject,
            Groups,
            GroupsForUser,
            Users,
            UsersInGroup,
            CreateUser,
            UpdateUser,
            DeleteWorkbookTag,
            DeleteDatasourceTag,
            InitiateUpload,
            AppendUploadChunk,
            FinalizeDatasourcePublish,
            FinalizeWorkbookPublish,
            AddToFavorites,
            FavoritesForUser,
            DeleteWorkbookFromFavorites,
            DeleteViewFromFavorites,
            OrderFavoritesForUser,
            Schedule,
            Schedules,
            ExtractRefreshTasks,
            GraphqlMetadata,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::SignIn => "sign-in",
            Operation::SiteInfo => "site-info",
            Operation::WorkbooksForUser => "workbooks-for-user",
            Operation::ViewsForSite => "views-for-site",
            Operation::ViewsForWorkbook => "views-for-workbook",
            Operation::ViewThumbnail => "view-thumbnail",
            Operation::ViewData => "view-data",
            Operation::ViewImage => "view-image",
            Operation::ViewPdf => "view-pdf",
            Operation::Workbook => "workbook",
            Operation::WorkbookConnections => "workbook-connections",
            Operation::WorkbookPdf => "workbook-pdf",
            Operation::WorkbookDownload => "workbook-download",
            Operation::Datasources => "datasources",
            Operation::Datasource => "datasource",
            Operation::QueryDatasources => "query-datasources",
            Operation::DatasourceConnections => "datasource-connections",
            Operation::DatasourceDownload => "datasource-download",
            Operation::Flows => "flows",
            Operation::FlowRuns => "flow-runs",
            Operation::FlowDownload => "flow-download",
            Operation::Projects => "projects",
            Operation::CreateProject => "create-project",
            Operation::Groups => "groups",
            Operation::GroupsForUser => "groups-for-user",
            Operation::Users => "users",
            Operation::UsersInGroup => "users-in-group",
            Operation::CreateUser => "create-user",
            Operation::UpdateUser => "update-user",
            Operation::DeleteWorkbookTag => "delete-workbook-tag",
            Operation::DeleteDatasourceTag => "delete-datasource-tag",
            Operation::InitiateUpload => "initiate-upload",
            Operation::AppendUploadChunk => "append-upload-chunk",
            Operation::FinalizeDatasourcePublish => "finalize-datasource-publish",
            Operation::FinalizeWorkbookPublish => "finalize-workbook-publish",
            Operation::AddToFavorites => "add-to-favorites",
            Operation::FavoritesForUser => "favorites-for-user",
            Operation::DeleteWorkbookFromFavorites => "delete-workbook-from-favorites",
            Operation::DeleteViewFromFavorites => "delete-view-from-favorites",
            Operation::OrderFavoritesForUser => "order-favorites-for-user",
            Operation::Schedule => "schedule",
            Operation::Schedules => "schedules",
            Operation::ExtractRefreshTasks => "extract-refresh-tasks",
            Operation::GraphqlMetadata => "graphql-metadata",
        }
    }

    fn root(&self) -> Root {
        match self {
            Operation::GraphqlMetadata => Root::Unversioned,
            _ => Root::Versioned,
        }
    }

    /// Path below the operation's root, with placeholders unresolved
    fn path(&self) -> String {
        let path = match self {
            Operation::SignIn => "/auth/signin",
            Operation::SiteInfo => "/sites/%%siteId%%",
            Operation::WorkbooksForUser => {
                return format!("/sites/%%siteId%%/users/%%userId%%/workbooks{}", PAGING)
            }
            Operation::ViewsForSite => return format!("/sites/%%siteId%%/views{}", PAGING),
            Operation::ViewsForWorkbook => "/sites/%%siteId%%/workbooks/%%workbookId%%/views",
            Operation::ViewThumbnail => {
                "/sites/%%siteId%%/workbooks/%%workbookId%%/views/%%viewId%%/previewImage"
            }
            Operation::ViewData => "/sites/%%siteId%%/views/%%viewId%%/data?%%filterValue%%",
            Operation::ViewImage => {
                "/sites/%%siteId%%/views/%%viewId%%/image?maxAge=%%maxAge%%&%%filterValue%%"
            }
            Operation::ViewPdf => {
                return format!("/sites/%%siteId%%/views/%%viewId%%/pdf{}", PDF_OPTIONS)
            }
            Operation::Workbook => "/sites/%%siteId%%/workbooks/%%workbookId%%",
            Operation::WorkbookConnections => {
                "/sites/%%siteId%%/workbooks/%%workbookId%%/connections"
            }
            Operation::WorkbookPdf => {
                return format!("/sites/%%siteId%%/workbooks/%%workbookId%%/pdf{}", PDF_OPTIONS)
            }
            Operation::WorkbookDownload => "/sites/%%siteId%%/workbooks/%%repositoryId%%/content",
            Operation::Datasources => return format!("/sites/%%siteId%%/datasources{}", PAGING),
            Operation::Datasource => "/sites/%%siteId%%/datasources/%%datasourceId%%",
            Operation::QueryDatasources => "/sites/%%siteId%%/datasources",
            Operation::DatasourceConnections => {
                "/sites/%%siteId%%/datasources/%%repositoryId%%/connections"
            }
            Operation::DatasourceDownload => {
                "/sites/%%siteId%%/datasources/%%repositoryId%%/content"
            }
            Operation::Flows => return format!("/sites/%%siteId%%/flows{}", PAGING),
            Operation::FlowRuns => "/sites/%%siteId%%/flows/runs?filter=startedAt:gt:%%startedAt%%",
            Operation::FlowDownload => "/sites/%%siteId%%/flows/%%repositoryId%%/content",
            Operation::Projects => return format!("/sites/%%siteId%%/projects{}", PAGING),
            Operation::CreateProject => "/sites/%%siteId%%/projects",
            Operation::Groups => return format!("/sites/%%siteId%%/groups{}", PAGING),
            Operation::GroupsForUser => {
                return format!("/sites/%%siteId%%/users/%%userId%%/groups{}", PAGING)
            }
            Operation::Users => return format!("/sites/%%siteId%%/users{}", PAGING),
            Operation::UsersInGroup => {
                return format!("/sites/%%siteId%%/groups/%%groupId%%/users{}", PAGING)
            }
            Operation::CreateUser => "/sites/%%siteId%%/users",
            Operation::UpdateUser => "/sites/%%siteId%%/users/%%userId%%",
            Operation::DeleteWorkbookTag => {
                "/sites/%%siteId%%/workbooks/%%workbookId%%/tags/%%tagText%%"
            }
            Operation::DeleteDatasourceTag => {
                "/sites/%%siteId%%/datasources/%%datasourceId%%/tags/%%tagText%%"
            }
            Operation::InitiateUpload => "/sites/%%siteId%%/fileUploads",
            Operation::AppendUploadChunk => "/sites/%%siteId%%/fileUploads/%%uploadSession%%",
            Operation::FinalizeDatasourcePublish => {
                "/sites/%%siteId%%/datasources?uploadSessionId=%%uploadSession%%&datasourceType=%%datasourceType%%&overwrite=true"
            }
            Operation::FinalizeWorkbookPublish => {
                "/sites/%%siteId%%/workbooks?uploadSessionId=%%uploadSession%%&workbookType=%%workbookType%%&overwrite=true"
            }
            Operation::AddToFavorites | Operation::FavoritesForUser => {
                "/sites/%%siteId%%/favorites/%%userId%%"
            }
            Operation::DeleteWorkbookFromFavorites => {
                "/sites/%%siteId%%/favorites/%%userId%%/workbooks/%%workbookId%%"
            }
            Operation::DeleteViewFromFavorites => {
                "/sites/%%siteId%%/favorites/%%userId%%/views/%%viewId%%"
            }
            Operation::OrderFavoritesForUser => "/sites/%%siteId%%/orderFavorites/%%userId%%",
            Operation::Schedule => "/schedules/%%scheduleId%%",
            Operation::Schedules => "/schedules",
            Operation::ExtractRefreshTasks => "/sites/%%siteId%%/tasks/extractRefreshes",
            Operation::GraphqlMetadata => "/metadata/graphql",
        };
        path.to_string()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Operation::all()
            .iter()
            .copied()
            .find(|op| op.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| LocatorError::UnknownOperation(s.to_string()))
    }
}

/// Cached templates for one context. Read-only after construction.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
    view_filter: Template,
}

impl TemplateRegistry {
    pub fn new(context: &ServerConnectionContext) -> Result<Self> {
        let versioned_root = context.api_root();
        let unversioned_root = format!("{}/api", context.server_url());

        let templates = Operation::all()
            .iter()
            .map(|op| {
                let root = match op.root() {
                    Root::Versioned => &versioned_root,
                    Root::Unversioned => &unversioned_root,
                };
                TemplateParser::parse(&format!("{}{}", root, op.path()))
            })
            .collect::<Result<Vec<_>>>()?;

        let view_filter = TemplateParser::parse(VIEW_FILTER_TEMPLATE)?;

        tracing::debug!(
            root = %versioned_root,
            count = templates.len(),
            "built endpoint templates"
        );

        Ok(Self {
            templates,
            view_filter,
        })
    }

    pub fn template(&self, operation: Operation) -> &Template {
        &self.templates[operation as usize]
    }

    pub fn view_filter(&self) -> &Template {
        &self.view_filter
    }

    pub fn iter(&self) -> impl Iterator<Item = (Operation, &Template)> {
        Operation::all().iter().copied().zip(self.templates.iter())
    }
}
