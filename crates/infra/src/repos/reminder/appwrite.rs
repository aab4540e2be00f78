use super::IReminderRepo;
use crate::repos::shared::timestamp::{format_timestamp, parse_timestamp};
use crate::services::appwrite::{AppwriteQuery, AppwriteRestApi, UNIQUE_DOCUMENT_ID};
use crate::{poll_changes, StoreError, Subscription};
use companion_reminders_domain::{NewReminder, Reminder, ReminderPatch, ID};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReminderAttributes<'a> {
    patient_id: &'a str,
    added_by: &'a str,
    title: &'a str,
    description: Option<&'a str>,
    due_date: String,
    is_completed: bool,
    is_acknowledged: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReminderPatchAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    is_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_acknowledged: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReminderDocument {
    #[serde(rename = "$id")]
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    due_date: String,
    #[serde(default)]
    is_completed: bool,
    #[serde(default)]
    is_acknowledged: bool,
    patient_id: String,
    added_by: String,
}

impl TryFrom<ReminderDocument> for Reminder {
    type Error = StoreError;

    fn try_from(doc: ReminderDocument) -> Result<Self, Self::Error> {
        let parse_id = |raw: &str| {
            raw.parse::<ID>()
                .map_err(|_| StoreError::Decode(format!("Invalid id in reminder document: {}", raw)))
        };
        Ok(Self {
            id: parse_id(&doc.id)?,
            title: doc.title,
            description: doc.description,
            due_date: parse_timestamp(&doc.due_date)?,
            is_completed: doc.is_completed,
            is_acknowledged: doc.is_acknowledged,
            patient_id: parse_id(&doc.patient_id)?,
            added_by: parse_id(&doc.added_by)?,
        })
    }
}

#[derive(Clone)]
pub struct AppwriteReminderRepo {
    api: Arc<AppwriteRestApi>,
    collection_id: String,
    poll_interval: Duration,
}

impl AppwriteReminderRepo {
    pub fn new(api: Arc<AppwriteRestApi>, collection_id: String, poll_interval: Duration) -> Self {
        Self {
            api,
            collection_id,
            poll_interval,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for AppwriteReminderRepo {
    async fn create(&self, reminder: NewReminder) -> Result<Reminder, StoreError> {
        let attributes = ReminderAttributes {
            patient_id: reminder.patient_id.as_str(),
            added_by: reminder.added_by.as_str(),
            title: &reminder.title,
            description: reminder.description.as_deref(),
            due_date: format_timestamp(&reminder.due_date),
            is_completed: false,
            is_acknowledged: false,
        };
        let doc: ReminderDocument = self
            .api
            .create_document(&self.collection_id, UNIQUE_DOCUMENT_ID, &attributes)
            .await?;
        doc.try_into()
    }

    async fn find(&self, reminder_id: &ID) -> Result<Option<Reminder>, StoreError> {
        let doc: Option<ReminderDocument> = self
            .api
            .get_document(&self.collection_id, reminder_id.as_str())
            .await?;
        doc.map(Reminder::try_from).transpose()
    }

    async fn find_by_patient(&self, patient_id: &ID) -> Result<Vec<Reminder>, StoreError> {
        let docs: Vec<ReminderDocument> = self
            .api
            .list_documents(
                &self.collection_id,
                &[
                    AppwriteQuery::equal("patientId", patient_id.as_str()),
                    AppwriteQuery::OrderAsc("dueDate".into()),
                ],
            )
            .await?;
        docs.into_iter().map(Reminder::try_from).collect()
    }

    async fn update(&self, reminder_id: &ID, patch: &ReminderPatch) -> Result<Reminder, StoreError> {
        let attributes = ReminderPatchAttributes {
            is_completed: patch.is_completed,
            is_acknowledged: patch.is_acknowledged,
        };
        let doc: ReminderDocument = self
            .api
            .update_document(&self.collection_id, reminder_id.as_str(), &attributes)
            .await?;
        doc.try_into()
    }

    async fn subscribe(&self, patient_id: &ID) -> Subscription<Reminder> {
        let repo = self.clone();
        let patient_id = patient_id.clone();
        poll_changes(self.poll_interval, move || {
            let repo = repo.clone();
            let patient_id = patient_id.clone();
            async move { repo.find_by_patient(&patient_id).await }
        })
        .await
    }
}
