use log::info;

use crate::api::ContactsApi;
use crate::error::{ReportError, ReportResult};
use crate::model::Label;
use crate::validation;

/// Id→name resolution for contact groups, built once per run from a full
/// listing.
pub struct LabelDirectory {
    labels: Vec<Label>,
}

impl LabelDirectory {
    /// Lists all groups and batch-gets their details.
    pub fn fetch(api: &dyn ContactsApi) -> ReportResult<Self> {
        let groups = api.list_groups()?;
        let resource_names: Vec<String> =
            groups.iter().map(|g| g.resource_name.clone()).collect();

        let detailed = if resource_names.is_empty() {
            Vec::new()
        } else {
            api.batch_get_groups(&resource_names)?
        };

        let labels: Vec<Label> = detailed
            .into_iter()
            .map(|g| Label::new(g.resource_name, g.name))
            .collect();

        info!("loaded {} contact labels", labels.len());
        Ok(Self { labels })
    }

    /// Directory over a fixed label list, for tests and offline use.
    pub fn from_labels(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Resolves one group id to its display name. Reserved and unknown ids
    /// resolve to nothing.
    pub fn name_by_id(&self, id: &str) -> Option<&str> {
        if Label::is_reserved_id(id) {
            return None;
        }
        self.labels
            .iter()
            .find(|l| l.matches_id(id))
            .map(|l| l.name.as_str())
    }

    /// Resolves group ids to names, silently dropping any that don't resolve.
    pub fn names_by_ids<'a, I>(&self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter()
            .filter_map(|id| self.name_by_id(id))
            .map(|name| name.to_string())
            .collect()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.labels.iter().any(|l| l.matches_id(id))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }

    /// Creates a new group and appends it to the in-memory directory.
    pub fn create(&mut self, api: &dyn ContactsApi, name: &str) -> ReportResult<Label> {
        let name = validation::non_blank(name, "label name")?;
        if self.contains_name(&name) {
            return Err(ReportError::LabelAlreadyExists { name });
        }

        let group = api.create_group(&name)?;
        let label = Label::new(group.resource_name, group.name);
        self.labels.push(label.clone());
        Ok(label)
    }
}
