use crate::client::api::{CatalogClient, ClientResult};
use crate::client::filter::Filters;
use crate::client::form::PropertyForm;
use crate::client::view::CatalogView;
use crate::models::{ListingStatus, PropertyId};
use std::fmt;
use tracing::{error, info};

/// User-facing outcome of a catalog action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
    /// The user declined a confirmation, nothing was sent
    Cancelled,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(msg) | Notice::Error(msg) => f.write_str(msg),
            Notice::Cancelled => f.write_str("Cancelled"),
        }
    }
}

/// Client-side catalog: the API client plus the current view snapshot.
/// Every successful mutation is followed by a full re-fetch.
pub struct CatalogSession {
    client: CatalogClient,
    view: CatalogView,
}

impl CatalogSession {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            view: CatalogView::loading(),
        }
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    pub fn set_filters(&mut self, filters: Filters) {
        self.view = std::mem::take(&mut self.view).with_filters(filters);
    }

    /// Replace the held list with a fresh copy from the server
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let properties = self.client.list().await?;
        self.view = std::mem::take(&mut self.view).with_properties(properties);
        Ok(())
    }

    /// Initial load, reported as a notice only on failure
    pub async fn load(&mut self) -> Option<Notice> {
        self.refresh().await.err().map(|e| {
            error!("Error fetching properties: {}", e);
            Notice::Error(format!("Error fetching properties: {}", e))
        })
    }

    /// Submit the form; on success the form is cleared and the list re-fetched
    pub async fn submit(&mut self, form: &mut PropertyForm) -> Notice {
        let result = match form.to_new_property() {
            Ok(new) => self.client.create(&new).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(property) => {
                info!("Property added: {}", property.id);
                form.clear();
                self.after_mutation("Property added successfully!").await
            }
            Err(e) => failure("Error adding property", e),
        }
    }

    /// Delete after `confirm` agrees; a declined confirmation sends nothing
    pub async fn delete<F>(&mut self, id: &PropertyId, confirm: F) -> Notice
    where
        F: FnOnce(&PropertyId) -> bool,
    {
        if !confirm(id) {
            return Notice::Cancelled;
        }

        match self.client.delete(id).await {
            Ok(_) => self.after_mutation("Property deleted successfully!").await,
            Err(e) => failure("Error deleting property", e),
        }
    }

    pub async fn set_status(&mut self, id: &PropertyId, status: ListingStatus) -> Notice {
        match self.client.update_status(id, status).await {
            Ok(_) => self.after_mutation("Status updated successfully!").await,
            Err(e) => failure("Error updating status", e),
        }
    }

    async fn after_mutation(&mut self, success: &str) -> Notice {
        match self.load().await {
            Some(notice) => notice,
            None => Notice::Success(success.to_string()),
        }
    }
}

fn failure(context: &str, err: impl fmt::Display) -> Notice {
    error!("{}: {}", context, err);
    Notice::Error(format!("{}: {}", context, err))
}
