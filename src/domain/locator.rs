// Typed, per-operation endpoint resolution

use chrono::{DateTime, Utc};

use super::context::ServerConnectionContext;
use super::filter::{self, ViewFilter};
use super::params::{Page, PageOrientation, PageType};
use super::registry::{Operation, TemplateRegistry};
use super::template::{Bindings, Placeholder, Template, TemplateResolver};
use super::upload::{self, UploadCoordinator};
use crate::error::{LocatorError, Result};

/// Resolves logical operations into fully qualified request URLs.
///
/// Owns the context and the templates built from it; both are read-only, so a
/// locator can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    context: ServerConnectionContext,
    registry: TemplateRegistry,
}

impl ResourceLocator {
    pub fn new(context: ServerConnectionContext) -> Result<Self> {
        let registry = TemplateRegistry::new(&context)?;
        Ok(Self { context, registry })
    }

    pub fn from_content_url(content_url: &str, page_size: u32) -> Result<Self> {
        Self::new(ServerConnectionContext::from_content_url(content_url, page_size)?)
    }

    pub fn context(&self) -> &ServerConnectionContext {
        &self.context
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn template(&self, operation: Operation) -> &Template {
        self.registry.template(operation)
    }

    /// First page of a listing, sized by the context
    pub fn first_page(&self) -> Page {
        Page::first(&self.context)
    }

    /// Resolve any operation from loose bindings.
    ///
    /// A `fieldName`/`fieldValue` pair is composed into `filterValue` when the
    /// operation takes a filter and none was bound directly.
    pub fn resolve_operation(&self, operation: Operation, bindings: &Bindings) -> Result<String> {
        let template = self.registry.template(operation);

        if template.requires(Placeholder::UploadSession) {
            match bindings.get(Placeholder::UploadSession) {
                Some(session_id) => upload::validate_session_id(session_id)?,
                None => {
                    return Err(LocatorError::invalid_session(format!(
                        "{} needs an upload session id",
                        operation
                    )))
                }
            }
        }

        if template.requires(Placeholder::FilterValue)
            && !bindings.contains(Placeholder::FilterValue)
        {
            if let (Some(name), Some(value)) = (
                bindings.get(Placeholder::FieldName),
                bindings.get(Placeholder::FieldValue),
            ) {
                let fragment =
                    ViewFilter::new(name, value).to_fragment(self.registry.view_filter())?;
                let composed = bindings.clone().bind(Placeholder::FilterValue, fragment);
                return TemplateResolver::resolve(template, &composed);
            }
        }

        TemplateResolver::resolve(template, bindings)
    }

    fn resolve(&self, operation: Operation, bindings: Bindings) -> Result<String> {
        TemplateResolver::resolve(self.registry.template(operation), &bindings)
    }

    fn site(site_id: &str) -> Bindings {
        Bindings::new().bind(Placeholder::SiteId, site_id)
    }

    fn paged(site_id: &str, page: Page) -> Bindings {
        Self::site(site_id)
            .bind(Placeholder::PageSize, page.size)
            .bind(Placeholder::PageNumber, page.number)
    }

    /// Coordinator for the three-phase upload protocol on one site
    pub fn upload<'a>(&'a self, site_id: &'a str) -> UploadCoordinator<'a> {
        UploadCoordinator::new(self, site_id)
    }

    pub fn sign_in(&self) -> Result<String> {
        self.resolve(Operation::SignIn, Bindings::new())
    }

    pub fn site_info(&self, site_id: &str) -> Result<String> {
        self.resolve(Operation::SiteInfo, Self::site(site_id))
    }

    pub fn workbooks_for_user(&self, site_id: &str, user_id: &str, page: Page) -> Result<String> {
        self.resolve(
            Operation::WorkbooksForUser,
            Self::paged(site_id, page).bind(Placeholder::UserId, user_id),
        )
    }

    pub fn views_for_site(&self, site_id: &str, page: Page) -> Result<String> {
        self.resolve(Operation::ViewsForSite, Self::paged(site_id, page))
    }

    pub fn views_for_workbook(&self, site_id: &str, workbook_id: &str) -> Result<String> {
        self.resolve(
            Operation::ViewsForWorkbook,
            Self::site(site_id).bind(Placeholder::WorkbookId, workbook_id),
        )
    }

    pub fn view_thumbnail(
        &self,
        site_id: &str,
        workbook_id: &str,
        view_id: &str,
    ) -> Result<String> {
        self.resolve(
            Operation::ViewThumbnail,
            Self::site(site_id)
                .bind(Placeholder::WorkbookId, workbook_id)
                .bind(Placeholder::ViewId, view_id),
        )
    }

    /// View data export, optionally restricted to one field value
    pub fn view_data(
        &self,
        site_id: &str,
        view_id: &str,
        filter: Option<&ViewFilter>,
    ) -> Result<String> {
        let fragment = filter::compose(filter, self.registry.view_filter())?;
        self.resolve(
            Operation::ViewData,
            Self::site(site_id)
                .bind(Placeholder::ViewId, view_id)
                .bind(Placeholder::FilterValue, fragment),
        )
    }

    pub fn view_image(
        &self,
        site_id: &str,
        view_id: &str,
        max_age: u32,
        filter: Option<&ViewFilter>,
    ) -> Result<String> {
        let fragment = filter::compose(filter, self.registry.view_filter())?;
        self.resolve(
            Operation::ViewImage,
            Self::site(site_id)
                .bind(Placeholder::ViewId, view_id)
                .bind(Placeholder::MaxAge, max_age)
                .bind(Placeholder::FilterValue, fragment),
        )
    }

    pub fn view_pdf(
        &self,
        site_id: &str,
        view_id: &str,
        page_type: PageType,
        orientation: PageOrientation,
    ) -> Result<String> {
        self.resolve(
            Operation::ViewPdf,
            Self::site(site_id)
                .bind(Placeholder::ViewId, view_id)
                .bind(Placeholder::PageType, page_type)
                .bind(Placeholder::PageOrientation, orientation),
        )
    }

    pub fn workbook(&self, site_id: &str, workbook_id: &str) -> Result<String> {
        self.resolve(
            Operation::Workbook,
            Self::site(site_id).bind(Placeholder::WorkbookId, workbook_id),
        )
    }

    pub fn workbook_connections(&self, site_id: &str, workbook_id: &str) -> Result<String> {
        self.resolve(
            Operation::WorkbookConnections,
            Self::site(site_id).bind(Placeholder::WorkbookId, workbook_id),
        )
    }

    pub fn workbook_pdf(
        &self,
        site_id: &str,
        workbook_id: &str,
        page_type: PageType,
        orientation: PageOrientation,
    ) -> Result<String> {
        self.resolve(
            Operation::WorkbookPdf,
            Self::site(site_id)
                .bind(Placeholder::WorkbookId, workbook_id)
                .bind(Placeholder::PageType, page_type)
                .bind(Placeholder::PageOrientation, orientation),
        )
    }

    pub fn workbook_download(&self, site_id: &str, workbook_id: &str) -> Result<String> {
        self.resolve(
            Operation::WorkbookDownload,
            Self::site(site_id).bind(Placeholder::RepositoryId, workbook_id),
        )
    }

    pub fn datasources(&self, site_id: &str, page: Page) -> Result<String> {
        self.resolve(Operation::Datasources, Self::paged(site_id, page))
    }

    pub fn datasource(&self, site_id: &str, datasource_id: &str) -> Result<String> {
        self.resolve(
            Operation::Datasource,
            Self::site(site_id).bind(Placeholder::DatasourceId, datasource_id),
        )
    }

    /// Unpaged datasource query
    pub fn query_datasources(&self, site_id: &str) -> Result<String> {
        self.resolve(Operation::QueryDatasources, Self::site(site_id))
    }

    pub fn datasource_connections(&self, site_id: &str, datasource_id: &str) -> Result<String> {
        self.resolve(
            Operation::DatasourceConnections,
            Self::site(site_id).bind(Placeholder::RepositoryId, datasource_id),
        )
    }

    pub fn datasource_download(&self, site_id: &str, datasource_id: &str) -> Result<String> {
        self.resolve(
            Operation::DatasourceDownload,
            Self::site(site_id).bind(Placeholder::RepositoryId, datasource_id),
        )
    }

    pub fn flows(&self, site_id: &str, page: Page) -> Result<String> {
        self.resolve(Operation::Flows, Self::paged(site_id, page))
    }

    /// Flow runs started strictly after `started_after`
    pub fn flow_runs(&self, site_id: &str, started_after: DateTime<Utc>) -> Result<String> {
        self.resolve(
            Operation::FlowRuns,
            Self::site(site_id).bind(Placeholder::StartedAt, started_after),
        )
    }

    pub fn flow_download(&self, site_id: &str, flow_id: &str) -> Result<String> {
        self.resolve(
            Operation::FlowDownload,
            Self::site(site_id).bind(Placeholder::RepositoryId, flow_id),
        )
    }

    pub fn projects(&self, site_id: &str, page: Page) -> Result<String> {
        self.resolve(Operation::Projects, Self::paged(site_id, page))
    }

    pub fn create_project(&self, site_id: &str) -> Result<String> {
        self.resolve(Operation::CreateProject, Self::site(site_id))
    }

    pub fn groups(&self, site_id: &str, page: Page) -> Result<String> {
        self.resolve(Operation::Groups, Self::paged(site_id, page))
    }

    pub fn groups_for_user(&self, site_id: &str, user_id: &str, page: Page) -> Result<String> {
        self.resolve(
            Operation::GroupsForUser,
            Self::paged(site_id, page).bind(Placeholder::UserId, user_id),
        )
    }

    pub fn users(&self, site_id: &str, page: Page) -> Result<String> {
        self.resolve(Operation::Users, Self::paged(site_id, page))
    }

    pub fn users_in_group(&self, site_id: &str, group_id: &str, page: Page) -> Result<String> {
        self.resolve(
            Operation::UsersInGroup,
            Self::paged(site_id, page).bind(Placeholder::GroupId, group_id),
        )
    }

    pub fn create_user(&self, site_id: &str) -> Result<String> {
        self.resolve(Operation::CreateUser, Self::site(site_id))
    }

    pub fn update_user(&self, site_id: &str, user_id: &str) -> Result<String> {
        self.resolve(
            Operation::UpdateUser,
            Self::site(site_id).bind(Placeholder::UserId, user_id),
        )
    }

    pub fn delete_workbook_tag(
        &self,
        site_id: &str,
        workbook_id: &str,
        tag_text: &str,
    ) -> Result<String> {
        self.resolve(
            Operation::DeleteWorkbookTag,
            Self::site(site_id)
                .bind(Placeholder::WorkbookId, workbook_id)
                .bind(Placeholder::TagText, tag_text),
        )
    }

    pub fn delete_datasource_tag(
        &self,
        site_id: &str,
        datasource_id: &str,
        tag_text: &str,
    ) -> Result<String> {
        self.resolve(
            Operation::DeleteDatasourceTag,
            Self::site(site_id)
                .bind(Placeholder::DatasourceId, datasource_id)
                .bind(Placeholder::TagText, tag_text),
        )
    }

    pub fn add_to_favorites(&self, site_id: &str, user_id: &str) -> Result<String> {
        self.resolve(
            Operation::AddToFavorites,
            Self::site(site_id).bind(Placeholder::UserId, user_id),
        )
    }

    pub fn favorites_for_user(&self, site_id: &str, user_id: &str) -> Result<String> {
        self.resolve(
            Operation::FavoritesForUser,
            Self::site(site_id).bind(Placeholder::UserId, user_id),
        )
    }

    pub fn delete_workbook_from_favorites(
        &self,
        site_id: &str,
        user_id: &str,
        workbook_id: &str,
    ) -> Result<String> {
        self.resolve(
            Operation::DeleteWorkbookFromFavorites,
            Self::site(site_id)
                .bind(Placeholder::UserId, user_id)
                .bind(Placeholder::WorkbookId, workbook_id),
        )
    }

    pub fn delete_view_from_favorites(
        &self,
        site_id: &str,
        user_id: &str,
        view_id: &str,
    ) -> Result<String> {
        self.resolve(
            Operation::DeleteViewFromFavorites,
            Self::site(site_id)
                .bind(Placeholder::UserId, user_id)
                .bind(Placeholder::ViewId, view_id),
        )
    }

    pub fn order_favorites_for_user(&self, site_id: &str, user_id: &str) -> Result<String> {
        self.resolve(
            Operation::OrderFavoritesForUser,
            Self::site(site_id).bind(Placeholder::UserId, user_id),
        )
    }

    pub fn schedule(&self, schedule_id: &str) -> Result<String> {
        self.resolve(
            Operation::Schedule,
            Bindings::new().bind(Placeholder::ScheduleId, schedule_id),
        )
    }

    pub fn schedules(&self) -> Result<String> {
        self.resolve(Operation::Schedules, Bindings::new())
    }

    pub fn extract_refresh_tasks(&self, site_id: &str) -> Result<String> {
        self.resolve(Operation::ExtractRefreshTasks, Self::site(site_id))
    }

    pub fn graphql_metadata(&self) -> Result<String> {
        self.resolve(Operation::GraphqlMetadata, Bindings::new())
    }
}
