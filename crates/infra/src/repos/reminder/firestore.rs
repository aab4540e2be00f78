use super::IReminderRepo;
use crate::services::firestore::{
    Direction, FieldOperator, FirestoreDocument, FirestoreRestApi, StructuredQuery, Value,
};
use crate::{poll_changes, StoreError, Subscription};
use companion_reminders_domain::{NewReminder, Reminder, ReminderPatch, ID};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

fn to_fields(reminder: &NewReminder) -> HashMap<String, Value> {
    let mut fields = HashMap::new();
    fields.insert("title".to_string(), Value::string(&reminder.title));
    fields.insert(
        "description".to_string(),
        Value::optional_string(reminder.description.as_deref()),
    );
    fields.insert("dueDate".to_string(), Value::timestamp(&reminder.due_date));
    fields.insert("isCompleted".to_string(), Value::BooleanValue(false));
    fields.insert("isAcknowledged".to_string(), Value::BooleanValue(false));
    fields.insert("patientId".to_string(), Value::string(reminder.patient_id.as_str()));
    fields.insert("addedBy".to_string(), Value::string(reminder.added_by.as_str()));
    fields
}

fn patch_fields(patch: &ReminderPatch) -> HashMap<String, Value> {
    let mut fields = HashMap::new();
    if let Some(is_completed) = patch.is_completed {
        fields.insert("isCompleted".to_string(), Value::BooleanValue(is_completed));
    }
    if let Some(is_acknowledged) = patch.is_acknowledged {
        fields.insert("isAcknowledged".to_string(), Value::BooleanValue(is_acknowledged));
    }
    fields
}

fn from_document(doc: &FirestoreDocument) -> Result<Reminder, StoreError> {
    Ok(Reminder {
        id: doc.id()?,
        title: doc.get_string("title")?,
        description: doc.get_optional_string("description"),
        due_date: doc.get_timestamp("dueDate")?,
        is_completed: doc.get_bool("isCompleted")?,
        is_acknowledged: doc.get_bool("isAcknowledged")?,
        patient_id: doc.get_id("patientId")?,
        added_by: doc.get_id("addedBy")?,
    })
}

#[derive(Clone)]
pub struct FirestoreReminderRepo {
    api: Arc<FirestoreRestApi>,
    collection: String,
    poll_interval: Duration,
}

impl FirestoreReminderRepo {
    pub fn new(api: Arc<FirestoreRestApi>, collection: String, poll_interval: Duration) -> Self {
        Self {
            api,
            collection,
            poll_interval,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for FirestoreReminderRepo {
    async fn create(&self, reminder: NewReminder) -> Result<Reminder, StoreError> {
        let doc = self
            .api
            .create_document(&self.collection, None, &to_fields(&reminder))
            .await?;
        from_document(&doc)
    }

    async fn find(&self, reminder_id: &ID) -> Result<Option<Reminder>, StoreError> {
        self.api
            .get_document(&self.collection, reminder_id.as_str())
            .await?
            .as_ref()
            .map(from_document)
            .transpose()
    }

    async fn find_by_patient(&self, patient_id: &ID) -> Result<Vec<Reminder>, StoreError> {
        let query = StructuredQuery::new(&self.collection)
            .filter(
                "patientId",
                FieldOperator::Equal,
                Value::string(patient_id.as_str()),
            )
            .order_by("dueDate", Direction::Ascending);
        self.api
            .run_query(&query)
            .await?
            .iter()
            .map(from_document)
            .collect()
    }

    async fn update(&self, reminder_id: &ID, patch: &ReminderPatch) -> Result<Reminder, StoreError> {
        let doc = self
            .api
            .patch_document(&self.collection, reminder_id.as_str(), &patch_fields(patch))
            .await?;
        from_document(&doc)
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn new_reminder_fields_start_unflagged() {
        let patient = ID::new();
        let fields = to_fields(&NewReminder {
            title: "Pills".into(),
            description: None,
            due_date: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            patient_id: patient.clone(),
            added_by: patient,
        });

        assert_eq!(fields.get("isCompleted"), Some(&Value::BooleanValue(false)));
        assert_eq!(fields.get("description"), Some(&Value::NullValue(())));
        assert_eq!(
            fields.get("dueDate"),
            Some(&Value::TimestampValue("2024-03-01T09:00:00.000Z".into()))
        );
    }

    #[test]
    fn patch_fields_only_contain_set_flags() {
        let fields = patch_fields(&ReminderPatch::completed(false));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("isCompleted"), Some(&Value::BooleanValue(false)));
    }
}
