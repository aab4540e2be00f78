use super::get_reminders::GetRemindersUseCase;
use crate::error::CompanionError;
use crate::shared::live::{ndjson_response, subscription_stream};
use crate::shared::usecase::execute;
use actix_web::{web, HttpResponse};
use companion_reminders_api_structs::dtos::ReminderDTO;
use companion_reminders_api_structs::sync_reminders::*;
use companion_reminders_domain::{Reminder, ID};
use companion_reminders_infra::{Change, CompanionContext, StoreError};
use futures::stream::{self, LocalBoxStream};
use futures::StreamExt;
use tracing::warn;

/// The rendered reminder list of one patient, kept in due order while
/// store changes come in
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderListSync {
    patient_id: ID,
    reminders: Vec<Reminder>,
    error: Option<String>,
}

impl ReminderListSync {
    pub fn new(patient_id: ID, reminders: Vec<Reminder>) -> Self {
        let mut sync = Self {
            patient_id,
            reminders: Vec::with_capacity(reminders.len()),
            error: None,
        };
        for reminder in reminders {
            sync.upsert(reminder);
        }
        sync
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_stopped(&self) -> bool {
        self.error.is_some()
    }

    fn upsert(&mut self, reminder: Reminder) {
        self.reminders.retain(|r| r.id != reminder.id);
        let index = self
            .reminders
            .partition_point(|r| r.due_date <= reminder.due_date);
        self.reminders.insert(index, reminder);
    }

    /// Returns whether the list changed
    pub fn apply(&mut self, change: Result<Change<Reminder>, StoreError>) -> bool {
        if self.is_stopped() {
            return false;
        }
        match change {
            Ok(change) => {
                let reminder = change.into_record();
                if reminder.patient_id != self.patient_id {
                    return false;
                }
                self.upsert(reminder);
            }
            Err(e) => {
                warn!(
                    "Reminder subscription of patient {} failed: {:?}",
                    self.patient_id, e
                );
                self.error = Some(e.readable_message());
            }
        }
        true
    }

    pub fn snapshot(&self) -> APIResponse {
        APIResponse {
            reminders: self.reminders.iter().cloned().map(ReminderDTO::new).collect(),
            error: self.error.clone(),
        }
    }
}

/// The current reminder list of the patient followed by a new snapshot after
/// every change
async fn reminder_snapshots(
    ctx: &CompanionContext,
    patient_id: ID,
) -> Result<LocalBoxStream<'static, APIResponse>, CompanionError> {
    // Subscribe first so no change between the listing and the subscription is lost
    let subscription = ctx.repos.reminders.subscribe(&patient_id).await;

    let usecase = GetRemindersUseCase {
        patient_id: patient_id.clone(),
    };
    let reminders = execute(usecase, ctx)
        .await
        .map_err(|e| CompanionError::from(e.0))?;

    let sync = ReminderListSync::new(patient_id, reminders);
    let initial = sync.snapshot();
    let updates = subscription_stream(subscription)
        .scan(sync, |sync, change| {
            if sync.is_stopped() {
                return futures::future::ready(None);
            }
            let snapshot = sync.apply(change).then(|| sync.snapshot());
            futures::future::ready(Some(snapshot))
        })
        .filter_map(futures::future::ready);

    Ok(stream::once(async { initial }).chain(updates).boxed_local())
}

/// Streams the reminder list of the patient, one snapshot per line
pub async fn sync_reminders_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<CompanionContext>,
) -> Result<HttpResponse, CompanionError> {
    let patient_id = path_params.into_inner().user_id;
    let snapshots = reminder_snapshots(&ctx, patient_id).await?;
    Ok(ndjson_response(snapshots))
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use companion_reminders_domain::{NewReminder, ReminderPatch};
    use companion_reminders_infra::{poll_changes, IReminderRepo, Subscription};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Remote style store whose realtime updates come from polling. A write
    /// queued in `after_listing` commits right after the next listing.
    #[derive(Default)]
    struct PollingReminderRepo {
        reminders: Arc<Mutex<Vec<Reminder>>>,
        after_listing: Mutex<Option<Reminder>>,
    }

    #[async_trait::async_trait]
    impl IReminderRepo for PollingReminderRepo {
        async fn create(&self, _reminder: NewReminder) -> Result<Reminder, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn find(&self, _reminder_id: &ID) -> Result<Option<Reminder>, StoreError> {
            Ok(None)
        }

        async fn find_by_patient(&self, _patient_id: &ID) -> Result<Vec<Reminder>, StoreError> {
            let listing = self.reminders.lock().unwrap().clone();
            if let Some(write) = self.after_listing.lock().unwrap().take() {
                *self.reminders.lock().unwrap() = vec![write];
            }
            Ok(listing)
        }

        async fn update(
            &self,
            _reminder_id: &ID,
            _patch: &ReminderPatch,
        ) -> Result<Reminder, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn subscribe(&self, _patient_id: &ID) -> Subscription<Reminder> {
            let source = self.reminders.clone();
            poll_changes(Duration::from_millis(10), move || {
                let records = source.lock().unwrap().clone();
                async move { Ok(records) }
            })
            .await
        }
    }

    fn reminder(patient_id: &ID, hour: u32) -> Reminder {
        Reminder {
            id: ID::new(),
            title: format!("At {}", hour),
            description: None,
            due_date: Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap(),
            is_completed: false,
            is_acknowledged: false,
            patient_id: patient_id.clone(),
            added_by: patient_id.clone(),
        }
    }

    #[actix_web::main]
    #[test]
    async fn polled_change_right_after_listing_reaches_the_stream() {
        let patient = ID::new();
        let pills = reminder(&patient, 9);
        let mut pills_done = pills.clone();
        pills_done.is_completed = true;

        let repo = PollingReminderRepo::default();
        *repo.reminders.lock().unwrap() = vec![pills];
        *repo.after_listing.lock().unwrap() = Some(pills_done);
        let mut ctx = CompanionContext::create_inmemory();
        ctx.repos.reminders = Arc::new(repo);

        let mut snapshots = reminder_snapshots(&ctx, patient).await.unwrap();

        let initial = snapshots.next().await.unwrap();
        assert!(!initial.reminders[0].is_completed);
        let updated = snapshots.next().await.unwrap();
        assert_eq!(updated.reminders.len(), 1);
        assert!(updated.reminders[0].is_completed);
    }

    #[test]
    fn keeps_due_order_while_applying_changes() {
        let patient = ID::new();
        let (nine, twelve) = (reminder(&patient, 9), reminder(&patient, 12));
        let mut sync = ReminderListSync::new(patient.clone(), vec![twelve.clone(), nine.clone()]);
        assert_eq!(sync.reminders(), &[nine.clone(), twelve.clone()]);

        let ten = reminder(&patient, 10);
        assert!(sync.apply(Ok(Change::Created(ten.clone()))));
        let mut nine_done = nine.clone();
        nine_done.is_completed = true;
        assert!(sync.apply(Ok(Change::Updated(nine_done.clone()))));

        assert_eq!(sync.reminders(), &[nine_done, ten, twelve]);
    }

    #[test]
    fn ignores_other_patients_and_duplicates() {
        let patient = ID::new();
        let own = reminder(&patient, 9);
        let mut sync = ReminderListSync::new(patient, vec![own.clone()]);

        assert!(!sync.apply(Ok(Change::Created(reminder(&ID::new(), 8)))));
        assert!(sync.apply(Ok(Change::Created(own.clone()))));
        assert_eq!(sync.reminders(), &[own]);
    }

    #[test]
    fn stops_after_subscription_error() {
        let patient = ID::new();
        let mut sync = ReminderListSync::new(patient.clone(), vec![]);

        assert!(sync.apply(Err(StoreError::Backend {
            code: 429,
            message: "".into()
        })));
        assert_eq!(sync.error(), Some("Too many requests. Please try again later"));
        assert!(!sync.apply(Ok(Change::Created(reminder(&patient, 9)))));
        assert!(sync.reminders().is_empty());
        assert_eq!(
            sync.snapshot().error.as_deref(),
            Some("Too many requests. Please try again later")
        );
    }
}
