mod helpers;

use companion_reminders_sdk::{
    APIError, AlertOutcome, AlertState, CompanionSDK, CreateReminderInput, OpenAlertInput,
    RegisterUserInput, SendMessageInput, StatusCode, TriggerKind, UpdateReminderInput, User,
};
use helpers::setup::spawn_app;

async fn register(sdk: &CompanionSDK, name: &str) -> User {
    sdk.user
        .register(RegisterUserInput {
            name: name.into(),
            email: format!("{}@example.com", name),
            username: None,
        })
        .await
        .expect("Expected to register user")
        .user
}

fn reminder_input(user: &User, title: &str) -> CreateReminderInput {
    CreateReminderInput {
        user_id: user.id.clone(),
        title: title.into(),
        description: None,
        time: "9:00 AM".into(),
        added_by: None,
    }
}

fn assert_status<T: std::fmt::Debug>(res: Result<T, APIError>, status: StatusCode) {
    match res {
        Err(APIError::UnexpectedStatusCode(code)) => assert_eq!(code, status),
        other => panic!("Expected status {}, got {:?}", status, other),
    }
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    let res = sdk.status.check_health().await.expect("Expected health");
    assert!(res
        .jobs
        .iter()
        .any(|job| job.name == "notification-delivery" && job.running));
}

#[actix_web::main]
#[test]
async fn test_reset_jobs_keeps_running_jobs() {
    let (_, sdk, _) = spawn_app().await;
    let res = sdk.status.reset_jobs().await.expect("Expected reset");
    assert!(res.jobs.iter().all(|job| job.running && job.fault.is_none()));
}

#[actix_web::main]
#[test]
async fn test_register_and_pair_by_shareable_id() {
    let (_, sdk, _) = spawn_app().await;
    let patient = register(&sdk, "ada").await;
    assert_eq!(patient.shareable_id.len(), 6);
    assert!(!patient.can_companion_add_task);

    let found = sdk
        .user
        .get_by_shareable_id(&patient.shareable_id.to_lowercase())
        .await
        .expect("Expected to find user by shareable id");
    assert_eq!(found.user, patient);

    assert_status(
        sdk.user.get_by_shareable_id("NOPE00").await,
        StatusCode::NOT_FOUND,
    );
}

#[actix_web::main]
#[test]
async fn test_create_reminder_schedules_one_notification() {
    let (_, sdk, _) = spawn_app().await;
    let patient = register(&sdk, "ada").await;

    let res = sdk
        .reminder
        .create(reminder_input(&patient, "Take pills"))
        .await
        .expect("Expected to create reminder");
    assert_eq!(res.reminder.patient_id, patient.id);
    assert_eq!(res.trigger.reminder_id, res.reminder.id);
    assert_eq!(res.trigger.kind, TriggerKind::Initial);
    assert_eq!(res.trigger.fire_at, res.reminder.due_date.timestamp_millis());

    let pending = sdk
        .notification
        .get_pending(res.reminder.id.clone())
        .await
        .expect("Expected pending notification");
    assert_eq!(pending.trigger, res.trigger);

    let reminders = sdk
        .reminder
        .get_by_user(patient.id.clone())
        .await
        .expect("Expected reminders")
        .reminders;
    assert_eq!(reminders, vec![res.reminder]);
}

#[actix_web::main]
#[test]
async fn test_create_reminder_rejects_invalid_input() {
    let (_, sdk, _) = spawn_app().await;
    let patient = register(&sdk, "ada").await;

    assert_status(
        sdk.reminder.create(reminder_input(&patient, "  ")).await,
        StatusCode::BAD_REQUEST,
    );
    let mut input = reminder_input(&patient, "Take pills");
    input.time = "13:99".into();
    assert_status(sdk.reminder.create(input).await, StatusCode::BAD_REQUEST);

    let reminders = sdk
        .reminder
        .get_by_user(patient.id.clone())
        .await
        .expect("Expected reminders")
        .reminders;
    assert!(reminders.is_empty());
}

#[actix_web::main]
#[test]
async fn test_companion_needs_permission_to_add_reminders() {
    let (_, sdk, _) = spawn_app().await;
    let patient = register(&sdk, "ada").await;
    let companion = register(&sdk, "bob").await;

    let mut input = reminder_input(&patient, "Drink water");
    input.added_by = Some(companion.id.clone());
    assert_status(sdk.reminder.create(input).await, StatusCode::FORBIDDEN);

    let updated = sdk
        .user
        .set_companion_can_add_task(patient.id.clone(), true)
        .await
        .expect("Expected to update settings");
    assert!(updated.user.can_companion_add_task);

    let mut input = reminder_input(&patient, "Drink water");
    input.added_by = Some(companion.id.clone());
    let res = sdk
        .reminder
        .create(input)
        .await
        .expect("Expected companion to create reminder");
    assert_eq!(res.reminder.added_by, companion.id);
}

#[actix_web::main]
#[test]
async fn test_toggle_completion_twice_restores_value() {
    let (_, sdk, _) = spawn_app().await;
    let patient = register(&sdk, "ada").await;
    let reminder = sdk
        .reminder
        .create(reminder_input(&patient, "Take pills"))
        .await
        .expect("Expected to create reminder")
        .reminder;

    let toggled = sdk
        .reminder
        .toggle_completion(reminder.id.clone())
        .await
        .expect("Expected to toggle");
    assert!(toggled.reminder.is_completed);
    let toggled = sdk
        .reminder
        .toggle_completion(reminder.id.clone())
        .await
        .expect("Expected to toggle");
    assert_eq!(toggled.reminder.is_completed, reminder.is_completed);

    let updated = sdk
        .reminder
        .update(UpdateReminderInput {
            reminder_id: reminder.id.clone(),
            is_completed: None,
            is_acknowledged: Some(true),
        })
        .await
        .expect("Expected to update reminder");
    assert!(updated.reminder.is_acknowledged);
    let fetched = sdk
        .reminder
        .get(reminder.id)
        .await
        .expect("Expected reminder");
    assert_eq!(fetched.reminder, updated.reminder);
}

#[actix_web::main]
#[test]
async fn test_not_completed_alert_escalates_to_companion() {
    let (app, sdk, _) = spawn_app().await;
    let patient = register(&sdk, "ada").await;
    let companion = register(&sdk, "bob").await;
    sdk.user
        .set_companion_can_add_task(patient.id.clone(), true)
        .await
        .expect("Expected to update settings");

    let mut input = reminder_input(&patient, "Take pills");
    input.added_by = Some(companion.id.clone());
    let created = sdk
        .reminder
        .create(input)
        .await
        .expect("Expected to create reminder");

    let data = created.trigger.content.data;
    let alert = sdk
        .alert
        .open(OpenAlertInput {
            reminder_id: data.reminder_id,
            reminder_text: data.reminder_text,
            reminder_time: data.reminder_time,
        })
        .await
        .expect("Expected to open alert")
        .alert;
    assert_eq!(alert.state, AlertState::Initial);

    let completed = sdk
        .alert
        .complete(created.reminder.id.clone())
        .await
        .expect("Expected to complete");
    assert_eq!(completed.alert.state, AlertState::AwaitingConfirmation);

    let res = sdk
        .alert
        .confirm(created.reminder.id.clone(), false)
        .await
        .expect("Expected to confirm");
    assert!(res.escalated);
    assert!(res.reschedule_error.is_none());
    assert_eq!(
        res.alert.state,
        AlertState::Closed(AlertOutcome::NotCompleted)
    );
    let trigger = res.trigger.expect("Expected escalation trigger");
    assert_eq!(trigger.kind, TriggerKind::Escalation);
    let escalation_ms = app.config.escalation_minutes * 60 * 1000;
    assert!(trigger.fire_at >= res.alert.opened_at + escalation_ms);
    assert!(!res.reminder.expect("Expected reminder").is_completed);

    let messages = sdk
        .message
        .get_conversation(patient.id.clone(), companion.id.clone())
        .await
        .expect("Expected conversation")
        .messages;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender_id, patient.id);
    assert_eq!(messages[0].receiver_id, companion.id);

    assert_status(
        sdk.alert.snooze(created.reminder.id).await,
        StatusCode::CONFLICT,
    );
}

#[actix_web::main]
#[test]
async fn test_snooze_replaces_notification() {
    let (_, sdk, _) = spawn_app().await;
    let patient = register(&sdk, "ada").await;
    let created = sdk
        .reminder
        .create(reminder_input(&patient, "Take pills"))
        .await
        .expect("Expected to create reminder");

    let data = created.trigger.content.data.clone();
    sdk.alert
        .open(OpenAlertInput {
            reminder_id: data.reminder_id,
            reminder_text: data.reminder_text,
            reminder_time: data.reminder_time,
        })
        .await
        .expect("Expected to open alert");
    let res = sdk
        .alert
        .snooze(created.reminder.id.clone())
        .await
        .expect("Expected to snooze");
    assert!(!res.escalated);
    assert_eq!(res.alert.state, AlertState::Closed(AlertOutcome::Snoozed));

    let pending = sdk
        .notification
        .get_pending(created.reminder.id)
        .await
        .expect("Expected pending notification")
        .trigger;
    assert_eq!(pending.kind, TriggerKind::Snooze);
    assert_eq!(Some(pending), res.trigger);
}

#[actix_web::main]
#[test]
async fn test_reminder_sync_streams_snapshots() {
    let (_, sdk, _) = spawn_app().await;
    let patient = register(&sdk, "ada").await;
    sdk.reminder
        .create(reminder_input(&patient, "Take pills"))
        .await
        .expect("Expected to create reminder");

    let mut live = sdk
        .reminder
        .sync(patient.id.clone())
        .await
        .expect("Expected live reminders");
    let snapshot = live.next().await.expect("Expected snapshot").unwrap();
    assert_eq!(snapshot.reminders.len(), 1);
    assert!(snapshot.error.is_none());

    let mut input = reminder_input(&patient, "Evening walk");
    input.time = "11:59 PM".into();
    sdk.reminder
        .create(input)
        .await
        .expect("Expected to create reminder");
    let snapshot = live.next().await.expect("Expected snapshot").unwrap();
    assert_eq!(snapshot.reminders.len(), 2);
}

#[actix_web::main]
#[test]
async fn test_messages_live_and_companion_status() {
    let (_, sdk, _) = spawn_app().await;
    let patient = register(&sdk, "ada").await;
    let companion = register(&sdk, "bob").await;

    let status = sdk.status.companion().await.expect("Expected status");
    assert!(status.connected);
    assert!(status.latest_message.is_none());

    let mut live = sdk
        .message
        .live(patient.id.clone(), companion.id.clone())
        .await
        .expect("Expected live messages");
    let sent = sdk
        .message
        .send(SendMessageInput {
            sender_id: companion.id.clone(),
            receiver_id: patient.id.clone(),
            message: "Did you take your pills?".into(),
        })
        .await
        .expect("Expected to send message")
        .message;
    let received = live.next().await.expect("Expected message").unwrap();
    assert_eq!(received, sent);

    assert_status(
        sdk.message
            .send(SendMessageInput {
                sender_id: companion.id.clone(),
                receiver_id: patient.id.clone(),
                message: "   ".into(),
            })
            .await,
        StatusCode::BAD_REQUEST,
    );

    let test_message = sdk
        .status
        .send_test_message(patient.id.clone())
        .await
        .expect("Expected test message")
        .message;
    assert_eq!(test_message.sender_id, patient.id);
    assert_eq!(test_message.receiver_id, patient.id);
    let status = sdk.status.companion().await.expect("Expected status");
    assert_eq!(status.latest_message, Some(test_message));
}
