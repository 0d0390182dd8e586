//! Invitation endpoint integration tests
//!
//! Drives `POST /api/invite` through the full router against the mock
//! GitHub service and checks both the redirect and the GitHub calls made.

mod common;

use axum::http::StatusCode;
use pit_github::mock::{GitHubEndpoint, MockReply};
use pit_github::InvitationPayload;
use serde_json::json;

use crate::common::{membership_conflict_422, TestApp};

mod input_validation {
    use super::*;

    #[tokio::test]
    async fn test_missing_identifier_field() {
        let app = TestApp::new();
        let (status, location) = app.invite(None).await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location, "/invite?error=missing-identifier");
        assert!(app.github.recorded_calls().is_empty());
    }

    #[tokio::test]
    async fn test_blank_identifiers_make_no_github_calls() {
        let app = TestApp::new();
        for blank in ["", " ", "   ", "\t", " \n "] {
            let (_, location) = app.invite(Some(blank)).await;
            assert_eq!(
                location, "/invite?error=missing-identifier",
                "blank identifier {:?}",
                blank
            );
        }
        assert!(app.github.recorded_calls().is_empty());
    }

    #[tokio::test]
    async fn test_multipart_form_is_accepted() {
        let app = TestApp::new();
        let (status, location) = app
            .invite_multipart(&[("name", "Alice"), ("identifier", " alice@example.com ")])
            .await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location, "/invite?success=true");
        assert_eq!(
            app.github.recorded_calls()[0].payload,
            Some(InvitationPayload::Email {
                email: "alice@example.com".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_multipart_blank_identifier() {
        let app = TestApp::new();
        let (_, location) = app.invite_multipart(&[("identifier", "  ")]).await;

        assert_eq!(location, "/invite?error=missing-identifier");
        assert!(app.github.recorded_calls().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_identifier_uses_first_value() {
        let app = TestApp::new();
        let (_, location) = app
            .post_invite(
                "application/x-www-form-urlencoded",
                "identifier=alice%40example.com&identifier=bobdev".to_string(),
            )
            .await;

        assert_eq!(location, "/invite?success=true");
        assert_eq!(
            app.github.called_endpoints(),
            vec![GitHubEndpoint::CreateInvitation]
        );
        assert_eq!(
            app.github.recorded_calls()[0].payload,
            Some(InvitationPayload::Email {
                email: "alice@example.com".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_unreadable_body_is_unexpected() {
        let app = TestApp::new();
        let (status, location) = app
            .post_invite("application/json", r#"{"identifier":"bobdev"}"#.to_string())
            .await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location, "/invite?error=unexpected");
        assert!(app.github.recorded_calls().is_empty());
    }
}

mod configuration {
    use super::*;

    #[tokio::test]
    async fn test_missing_token_is_server_config() {
        let app = TestApp::without_token();
        let (status, location) = app.invite(Some("alice@example.com")).await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location, "/invite?error=server-config");
        assert!(app.github.recorded_calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_token_with_username_makes_no_calls() {
        let app = TestApp::without_token();
        let (_, location) = app.invite(Some("bobdev")).await;

        assert_eq!(location, "/invite?error=server-config");
        assert!(app.github.recorded_calls().is_empty());
    }

    #[tokio::test]
    async fn test_blank_identifier_without_token_is_missing_identifier() {
        let app = TestApp::without_token();
        for blank in [None, Some(""), Some("  ")] {
            let (status, location) = app.invite(blank).await;
            assert_eq!(status, StatusCode::SEE_OTHER);
            assert_eq!(location, "/invite?error=missing-identifier");
        }
        assert!(app.github.recorded_calls().is_empty());
    }
}

mod payload_resolution {
    use super::*;

    #[tokio::test]
    async fn test_email_sent_as_trimmed_email_payload() {
        let app = TestApp::new();
        let (_, location) = app.invite(Some("  alice@example.com  ")).await;

        assert_eq!(location, "/invite?success=true");
        let calls = app.github.recorded_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].endpoint, GitHubEndpoint::CreateInvitation);
        assert_eq!(
            calls[0].payload,
            Some(InvitationPayload::Email {
                email: "alice@example.com".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_username_looked_up_exactly_once_before_invitation() {
        let app = TestApp::new().reply(
            GitHubEndpoint::GetUser,
            MockReply::ok(json!({"id": 42, "login": "bobdev"})),
        );
        let (_, location) = app.invite(Some(" bobdev ")).await;

        assert_eq!(location, "/invite?success=true");
        let calls = app.github.recorded_calls();
        assert_eq!(
            app.github.called_endpoints(),
            vec![GitHubEndpoint::GetUser, GitHubEndpoint::CreateInvitation]
        );
        assert_eq!(calls[0].login.as_deref(), Some("bobdev"));
        assert_eq!(
            calls[1].payload,
            Some(InvitationPayload::Invitee { invitee_id: 42 })
        );
    }

    #[tokio::test]
    async fn test_unknown_username_is_user_not_found() {
        let app = TestApp::new().reply(
            GitHubEndpoint::GetUser,
            MockReply::status(404, json!({"message": "Not Found"})),
        );
        let (_, location) = app.invite(Some("no-such-user")).await;

        assert_eq!(location, "/invite?error=user-not-found");
        assert_eq!(app.github.call_count(GitHubEndpoint::CreateInvitation), 0);
    }

    #[tokio::test]
    async fn test_user_lookup_outage_is_unexpected() {
        let app = TestApp::new().reply(
            GitHubEndpoint::GetUser,
            MockReply::transport_error("connection refused"),
        );
        let (_, location) = app.invite(Some("bobdev")).await;

        assert_eq!(location, "/invite?error=unexpected");
        assert_eq!(app.github.call_count(GitHubEndpoint::CreateInvitation), 0);
    }
}

mod submission {
    use super::*;

    #[tokio::test]
    async fn test_2xx_is_success() {
        for status in [200, 201, 202] {
            let app = TestApp::new().reply(
                GitHubEndpoint::CreateInvitation,
                MockReply::status(status, json!({"id": 1})),
            );
            let (_, location) = app.invite(Some("alice@example.com")).await;
            assert_eq!(location, "/invite?success=true", "status {}", status);
        }
    }

    #[tokio::test]
    async fn test_non_membership_422_is_validation_failed() {
        let app = TestApp::new().reply(
            GitHubEndpoint::CreateInvitation,
            membership_conflict_422("Email is not a valid address"),
        );
        let (_, location) = app.invite(Some("alice@example.com")).await;

        assert_eq!(location, "/invite?error=validation-failed");
        assert_eq!(app.github.call_count(GitHubEndpoint::CheckMembership), 0);
        assert_eq!(app.github.call_count(GitHubEndpoint::ListInvitations), 0);
    }

    #[tokio::test]
    async fn test_403_admin_required_is_need_org_admin() {
        let app = TestApp::new().reply(
            GitHubEndpoint::CreateInvitation,
            MockReply::status(
                403,
                json!({
                    "message": "You must be an admin to create an invitation to an organization.",
                    "documentation_url": "https://docs.github.com/rest"
                }),
            ),
        );
        let (_, location) = app.invite(Some("alice@example.com")).await;

        assert_eq!(location, "/invite?error=need-org-admin");
    }

    #[tokio::test]
    async fn test_other_403_is_permission_denied() {
        let app = TestApp::new().reply(
            GitHubEndpoint::CreateInvitation,
            MockReply::status(403, json!({"message": "Resource not accessible by integration"})),
        );
        let (_, location) = app.invite(Some("alice@example.com")).await;

        assert_eq!(location, "/invite?error=permission-denied");
    }

    #[tokio::test]
    async fn test_other_statuses_are_github_api() {
        for status in [400, 401, 404, 500, 503] {
            let app = TestApp::new().reply(
                GitHubEndpoint::CreateInvitation,
                MockReply::status(status, json!({"message": "nope"})),
            );
            let (_, location) = app.invite(Some("alice@example.com")).await;
            assert_eq!(location, "/invite?error=github-api", "status {}", status);
        }
    }

    #[tokio::test]
    async fn test_submission_timeout_is_unexpected() {
        let app = TestApp::new().reply(
            GitHubEndpoint::CreateInvitation,
            MockReply::transport_error("GitHub request timed out"),
        );
        let (status, location) = app.invite(Some("alice@example.com")).await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location, "/invite?error=unexpected");
    }
}

mod disambiguation {
    use super::*;

    #[tokio::test]
    async fn test_confirmed_member_is_already_member() {
        let app = TestApp::new()
            .reply(GitHubEndpoint::GetUser, MockReply::ok(json!({"id": 7, "login": "carol"})))
            .reply(
                GitHubEndpoint::CreateInvitation,
                membership_conflict_422("User is already a member"),
            )
            .reply(GitHubEndpoint::CheckMembership, MockReply::ok(json!(null)));
        let (_, location) = app.invite(Some("carol")).await;

        assert_eq!(location, "/invite?error=already-member");
        assert_eq!(app.github.call_count(GitHubEndpoint::ListInvitations), 0);
        let membership_call = &app.github.recorded_calls()[2];
        assert_eq!(membership_call.endpoint, GitHubEndpoint::CheckMembership);
        assert_eq!(membership_call.login.as_deref(), Some("carol"));
    }

    #[tokio::test]
    async fn test_pending_invite_by_login_is_pending_invitation() {
        let app = TestApp::new()
            .reply(GitHubEndpoint::GetUser, MockReply::ok(json!({"id": 7, "login": "carol"})))
            .reply(
                GitHubEndpoint::CreateInvitation,
                membership_conflict_422("Invitee already has a pending invitation"),
            )
            .reply(
                GitHubEndpoint::ListInvitations,
                MockReply::ok(json!([
                    {"id": 10, "login": "dave", "email": null},
                    {"id": 11, "login": "carol", "email": null, "role": "direct_member"}
                ])),
            );
        let (_, location) = app.invite(Some("carol")).await;

        assert_eq!(location, "/invite?error=pending-invitation");
        assert_eq!(
            app.github.called_endpoints(),
            vec![
                GitHubEndpoint::GetUser,
                GitHubEndpoint::CreateInvitation,
                GitHubEndpoint::CheckMembership,
                GitHubEndpoint::ListInvitations,
            ]
        );
    }

    #[tokio::test]
    async fn test_pending_invite_by_email_is_pending_invitation() {
        let app = TestApp::new()
            .reply(
                GitHubEndpoint::CreateInvitation,
                membership_conflict_422("Invitee is already a part of this organization"),
            )
            .reply(
                GitHubEndpoint::ListInvitations,
                MockReply::ok(json!([{"id": 12, "login": null, "email": "erin@example.com"}])),
            );
        let (_, location) = app.invite(Some("erin@example.com")).await;

        assert_eq!(location, "/invite?error=pending-invitation");
    }

    // Invitation emails compare without regard to ASCII case
    #[tokio::test]
    async fn test_pending_invite_email_case_differs() {
        let app = TestApp::new()
            .reply(
                GitHubEndpoint::CreateInvitation,
                membership_conflict_422("Invitee already has a pending invitation"),
            )
            .reply(
                GitHubEndpoint::ListInvitations,
                MockReply::ok(json!([{"id": 13, "login": null, "email": "frank@example.com"}])),
            );
        let (_, location) = app.invite(Some("Frank@Example.com")).await;

        assert_eq!(location, "/invite?error=pending-invitation");
        assert_eq!(
            app.github.called_endpoints(),
            vec![
                GitHubEndpoint::CreateInvitation,
                GitHubEndpoint::CheckMembership,
                GitHubEndpoint::ListInvitations,
            ]
        );
    }

    #[tokio::test]
    async fn test_neither_member_nor_invited_is_membership_conflict() {
        let app = TestApp::new().reply(
            GitHubEndpoint::CreateInvitation,
            membership_conflict_422("User is already a member"),
        );
        let (_, location) = app.invite(Some("frank@example.com")).await;

        assert_eq!(location, "/invite?error=membership-conflict");
    }

    #[tokio::test]
    async fn test_both_followups_failing_is_membership_conflict() {
        let app = TestApp::new()
            .reply(
                GitHubEndpoint::CreateInvitation,
                membership_conflict_422("User is already a member"),
            )
            .reply(
                GitHubEndpoint::CheckMembership,
                MockReply::transport_error("connection reset"),
            )
            .reply(
                GitHubEndpoint::ListInvitations,
                MockReply::status(500, json!({"message": "Server Error"})),
            );
        let (status, location) = app.invite(Some("frank@example.com")).await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location, "/invite?error=membership-conflict");
    }

    #[tokio::test]
    async fn test_invitation_list_failure_after_404_is_membership_conflict() {
        let app = TestApp::new()
            .reply(
                GitHubEndpoint::CreateInvitation,
                membership_conflict_422("User is already a member"),
            )
            .reply(
                GitHubEndpoint::ListInvitations,
                MockReply::status(403, json!({"message": "Forbidden"})),
            );
        let (_, location) = app.invite(Some("frank@example.com")).await;

        assert_eq!(location, "/invite?error=membership-conflict");
        assert_eq!(app.github.call_count(GitHubEndpoint::ListInvitations), 1);
    }
}
