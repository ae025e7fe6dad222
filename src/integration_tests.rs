#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::app_system::FormSystem;
    use crate::config::FormConfig;
    use crate::domain::{UserId, UserPayload, UserRecord};
    use crate::error::SubmissionError;
    use crate::form::{DismissReason, RequestKind};
    use crate::messages::SubmitStatus;
    use crate::mock_framework::{create_mock_api, expect_create, expect_update};

    fn save_counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let hook = Arc::clone(&count);
        (count, move || {
            hook.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test]
    async fn test_create_flow_calls_on_save_once() {
        // 1. Mount with no user
        let (api, mut calls) = create_mock_api(10);
        let (saves, on_save) = save_counter();
        let system = FormSystem::mount_with_api(&FormConfig::default(), Arc::new(api), None, on_save);
        let form = system.form_client.clone();

        let view = form.view().await.unwrap();
        assert_eq!((view.username.as_str(), view.email.as_str()), ("", ""));
        assert_eq!(view.title(), "Add User");

        // 2. Type and submit
        form.set_username("bob").await.unwrap();
        form.set_email("b@x.com").await.unwrap();
        assert_eq!(form.submit().await.unwrap(), SubmitStatus::Started(RequestKind::Create));

        // 3. Server acknowledges
        let (payload, responder) = expect_create(&mut calls).await.expect("Expected Create request");
        assert_eq!(
            payload,
            UserPayload {
                username: "bob".to_string(),
                email: "b@x.com".to_string()
            }
        );
        responder.send(Ok(())).unwrap();

        // 4. Verify
        let view = form.settled().await.unwrap();
        assert_eq!(saves.load(Ordering::SeqCst), 1);
        assert!(!view.notification.visible);
        assert_eq!(view.username, "bob");

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_update_failure_shows_notification() {
        let (api, mut calls) = create_mock_api(10);
        let (saves, on_save) = save_counter();
        let carol = Arc::new(UserRecord::new(3u64, "carol", "c@x.com"));
        let system = FormSystem::mount_with_api(&FormConfig::default(), Arc::new(api), Some(carol), on_save);
        let form = system.form_client.clone();

        form.submit().await.unwrap();

        let (id, payload, responder) = expect_update(&mut calls).await.expect("Expected Update request");
        assert_eq!(id, UserId::from(3u64));
        assert_eq!(payload.username, "carol");
        assert_eq!(payload.email, "c@x.com");
        responder.send(Err(SubmissionError::Transport("connection refused".to_string()))).unwrap();

        let view = form.settled().await.unwrap();
        assert!(view.notification.visible);
        assert_eq!(view.notification.message, "Error updating user");
        assert_eq!(view.username, "carol");
        assert_eq!(saves.load(Ordering::SeqCst), 0);

        // Click-away leaves it up, the close button does not
        assert!(!form.dismiss_notification(DismissReason::from("clickaway")).await.unwrap());
        assert!(form.view().await.unwrap().notification.visible);
        assert!(form.dismiss_notification(DismissReason::from("button")).await.unwrap());
        assert!(!form.view().await.unwrap().notification.visible);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_failure_preserves_input_then_retry_succeeds() {
        let (api, mut calls) = create_mock_api(10);
        let (saves, on_save) = save_counter();
        let system = FormSystem::mount_with_api(&FormConfig::default(), Arc::new(api), None, on_save);
        let form = system.form_client.clone();

        form.set_username("alice").await.unwrap();
        form.set_email("a@x.com").await.unwrap();
        form.submit().await.unwrap();
        let (_, responder) = expect_create(&mut calls).await.unwrap();
        responder.send(Err(SubmissionError::Rejected { status: 400 })).unwrap();

        let view = form.settled().await.unwrap();
        assert_eq!(view.notification.message, "Error creating user");
        assert_eq!((view.username.as_str(), view.email.as_str()), ("alice", "a@x.com"));

        // Retry supersedes the notification
        form.submit().await.unwrap();
        assert!(!form.view().await.unwrap().notification.visible);
        let (payload, responder) = expect_create(&mut calls).await.unwrap();
        assert_eq!(payload.username, "alice");
        responder.send(Ok(())).unwrap();

        form.settled().await.unwrap();
        assert_eq!(saves.load(Ordering::SeqCst), 1);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_new_record_discards_unsaved_edits() {
        let (api, mut calls) = create_mock_api(10);
        let (_, on_save) = save_counter();
        let system = FormSystem::mount_with_api(&FormConfig::default(), Arc::new(api), None, on_save);
        let form = system.form_client.clone();

        form.set_username("draft").await.unwrap();
        let dave = Arc::new(UserRecord::new(7u64, "dave", "d@x.com"));
        assert!(form.set_user(Some(dave.clone())).await.unwrap());

        let view = form.view().await.unwrap();
        assert_eq!(view.username, "dave");
        assert_eq!(view.title(), "Edit User");

        // Same record again keeps the edit
        form.set_email("dave@x.com").await.unwrap();
        assert!(!form.set_user(Some(dave)).await.unwrap());
        assert_eq!(form.view().await.unwrap().email, "dave@x.com");

        form.submit().await.unwrap();
        let (id, payload, responder) = expect_update(&mut calls).await.unwrap();
        assert_eq!(id, UserId::from(7u64));
        assert_eq!(payload.email, "dave@x.com");
        responder.send(Ok(())).unwrap();
        form.settled().await.unwrap();

        // Back to an empty form
        assert!(form.set_user(None).await.unwrap());
        let view = form.view().await.unwrap();
        assert_eq!((view.username.as_str(), view.email.as_str()), ("", ""));
        assert_eq!(view.title(), "Add User");

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_reset_clears_existing_record_fields() {
        let (api, _calls) = create_mock_api(10);
        let (_, on_save) = save_counter();
        let erin = Arc::new(UserRecord::new(9u64, "erin", "e@x.com"));
        let system = FormSystem::mount_with_api(&FormConfig::default(), Arc::new(api), Some(erin), on_save);
        let form = system.form_client.clone();

        form.reset().await.unwrap();
        let once = form.view().await.unwrap();
        form.reset().await.unwrap();
        assert_eq!(form.view().await.unwrap(), once);
        assert_eq!((once.username.as_str(), once.email.as_str()), ("", ""));
        // Still editing record 9
        assert!(once.editing);

        system.shutdown().await.unwrap();
    }
}
