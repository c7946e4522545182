//! Application handler
//!
//! Orchestrates one submission: validate, optionally auto-approve against the
//! group API, then notify the administrator. All failures are converted into an
//! `ApplicationFormState`; nothing escapes to the HTTP layer from `handle`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::clients::telegram::{ParseMode, SendMessage};
use crate::clients::{ClientError, DiscourseClient, TelegramClient};

use super::policy::ApprovalPolicy;
use super::types::{ApplicationFormState, ApplicationRequest};

/// Visitor-facing messages, verbatim from the form copy
pub const MSG_MISSING_USER_ID: &str = "请填写您的用户 ID";
pub const MSG_MISSING_REASON: &str = "请填写申请理由";
pub const MSG_SYSTEM_CONFIG: &str = "系统配置错误，请联系管理员";
pub const MSG_SUBMITTED: &str = "申请已提交，请等待审核！";
pub const MSG_AUTO_APPROVED: &str = "申请已自动通过，欢迎加入板块！";
pub const MSG_MANUAL_REVIEW: &str = "申请已提交，请等待管理员审核！";
pub const MSG_APPROVE_RETRY: &str =
    "自动审批失败，可能是网络问题或权限不足。请稍后重新提交申请，或退出登录后重新填写 ID 提交管理员进行手动审核。";
pub const MSG_SUBMIT_FALLBACK: &str = "提交失败，请稍后再试。";

const STATUS_AUTO_APPROVED: &str = "\n✅ *已自动通过审批*";
const STATUS_APPROVAL_DEGRADED: &str = "\n⚠️ 自动审批失败，需要手动处理";

/// Seam for the group membership call, mockable in tests
#[async_trait]
pub trait GroupApprover: Send + Sync {
    async fn approve_group_member(
        &self,
        usernames: &[String],
        group_id: &str,
    ) -> Result<(), ClientError>;
}

/// Seam for the administrator notification, mockable in tests
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, message: SendMessage) -> Result<(), ClientError>;
}

#[async_trait]
impl GroupApprover for DiscourseClient {
    async fn approve_group_member(
        &self,
        usernames: &[String],
        group_id: &str,
    ) -> Result<(), ClientError> {
        DiscourseClient::approve_group_member(self, usernames, group_id).await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn send_message(&self, message: SendMessage) -> Result<(), ClientError> {
        TelegramClient::send_message(self, message).await
    }
}

/// Handler for membership applications
#[derive(Clone)]
pub struct ApplicationHandler {
    /// Administrator recipient; submissions are rejected without one
    admin_chat_id: Option<String>,
    policy: ApprovalPolicy,
    approver: Arc<dyn GroupApprover>,
    notifier: Arc<dyn Notifier>,
}

impl ApplicationHandler {
    pub fn new(
        admin_chat_id: Option<String>,
        policy: ApprovalPolicy,
        approver: Arc<dyn GroupApprover>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            admin_chat_id,
            policy,
            approver,
            notifier,
        }
    }

    /// Process one submission
    pub async fn handle(&self, request: ApplicationRequest) -> ApplicationFormState {
        // Validation: first failure wins, no network calls happen past this
        // point unless the request is fully valid.
        if request.user_id.is_empty() {
            return ApplicationFormState::error(MSG_MISSING_USER_ID);
        }
        if request.reason.is_empty() {
            return ApplicationFormState::error(MSG_MISSING_REASON);
        }
        let Some(admin_chat_id) = self.admin_chat_id.as_deref() else {
            return ApplicationFormState::error(MSG_SYSTEM_CONFIG);
        };

        let mut approval_status = "";
        let mut success_message = MSG_SUBMITTED;

        if let Some(group_id) = self.policy.auto_approval_group(&request) {
            match self
                .approver
                .approve_group_member(std::slice::from_ref(&request.user_id), group_id)
                .await
            {
                Ok(()) => {
                    info!(user_id = %request.user_id, group_id, "Application auto-approved");
                    approval_status = STATUS_AUTO_APPROVED;
                    success_message = MSG_AUTO_APPROVED;
                }
                // The platform itself rejected the call: stop here and ask the
                // visitor to retry or fall back to manual review. The
                // administrator is NOT notified for this failure class.
                Err(err) if err.is_remote_rejection() => {
                    error!("Auto-approve failed: {}", err);
                    return ApplicationFormState::error(MSG_APPROVE_RETRY);
                }
                // Configuration or network trouble: degrade to manual review
                // and still notify.
                Err(err) => {
                    error!("Auto-approve failed: {}", err);
                    approval_status = STATUS_APPROVAL_DEGRADED;
                    success_message = MSG_MANUAL_REVIEW;
                }
            }
        }

        let message = SendMessage::new(compose_notification(&request, approval_status))
            .with_user_id(admin_chat_id)
            .with_parse_mode(ParseMode::Markdown);

        match self.notifier.send_message(message).await {
            Ok(()) => ApplicationFormState::success(success_message),
            Err(err) => {
                error!("Failed to send application notification: {}", err);
                let detail = err.to_string();
                if detail.is_empty() {
                    ApplicationFormState::error(MSG_SUBMIT_FALLBACK)
                } else {
                    ApplicationFormState::error(format!("错误信息：{}", detail))
                }
            }
        }
    }
}

/// Structured administrator notification for one submission
fn compose_notification(request: &ApplicationRequest, approval_status: &str) -> String {
    let auth_status = if request.is_authenticated {
        "✅ 已通过 CONNECT 验证"
    } else {
        "⚠️ 未通过 OIDC 验证"
    };
    let trust_info = request
        .trust_level
        .map(|level| format!(" (TL{})", level))
        .unwrap_or_default();

    format!(
        "*入组申请*\n\n用户 ID: `{}`\n认证状态: {}{}{}\n\n申请理由:\n{}",
        request.user_id, auth_status, trust_info, approval_status, request.reason
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Approver mock recording calls, answering from a canned result
    struct MockApprover {
        result: Option<ClientError>,
        calls: Mutex<Vec<(Vec<String>, String)>>,
    }

    impl MockApprover {
        fn ok() -> Self {
            Self {
                result: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: ClientError) -> Self {
            Self {
                result: Some(err),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl GroupApprover for MockApprover {
        async fn approve_group_member(
            &self,
            usernames: &[String],
            group_id: &str,
        ) -> Result<(), ClientError> {
            self.calls
                .lock()
                .unwrap()
                .push((usernames.to_vec(), group_id.to_string()));
            match &self.result {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    /// Notifier mock recording sent messages
    struct MockNotifier {
        result: Option<ClientError>,
        sent: Mutex<Vec<SendMessage>>,
    }

    impl MockNotifier {
        fn ok() -> Self {
            Self {
                result: None,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: ClientError) -> Self {
            Self {
                result: Some(err),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }

        fn last_text(&self) -> String {
            self.sent.lock().unwrap().last().unwrap().compose_text()
        }
    }

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn send_message(&self, message: SendMessage) -> Result<(), ClientError> {
            self.sent.lock().unwrap().push(message);
            match &self.result {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    fn auto_approve_policy() -> ApprovalPolicy {
        ApprovalPolicy {
            auto_approve: true,
            min_trust_level: 1,
            group_id: Some("g1".to_string()),
        }
    }

    fn eligible_request() -> ApplicationRequest {
        ApplicationRequest {
            user_id: "alice".to_string(),
            reason: "常驻论坛，想加入板块".to_string(),
            is_authenticated: true,
            trust_level: Some(2),
        }
    }

    fn handler(
        admin_chat_id: Option<&str>,
        policy: ApprovalPolicy,
        approver: Arc<MockApprover>,
        notifier: Arc<MockNotifier>,
    ) -> ApplicationHandler {
        ApplicationHandler::new(
            admin_chat_id.map(|s| s.to_string()),
            policy,
            approver,
            notifier,
        )
    }

    #[tokio::test]
    async fn test_empty_user_id_rejected_without_calls() {
        let approver = Arc::new(MockApprover::ok());
        let notifier = Arc::new(MockNotifier::ok());
        let handler = handler(
            Some("42"),
            auto_approve_policy(),
            approver.clone(),
            notifier.clone(),
        );

        let result = handler
            .handle(ApplicationRequest {
                user_id: String::new(),
                ..eligible_request()
            })
            .await;

        assert_eq!(result, ApplicationFormState::error(MSG_MISSING_USER_ID));
        assert_eq!(approver.call_count(), 0);
        assert_eq!(notifier.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_reason_rejected_without_calls() {
        let approver = Arc::new(MockApprover::ok());
        let notifier = Arc::new(MockNotifier::ok());
        let handler = handler(
            Some("42"),
            auto_approve_policy(),
            approver.clone(),
            notifier.clone(),
        );

        let result = handler
            .handle(ApplicationRequest {
                reason: String::new(),
                ..eligible_request()
            })
            .await;

        assert_eq!(result, ApplicationFormState::error(MSG_MISSING_REASON));
        assert_eq!(approver.call_count(), 0);
        assert_eq!(notifier.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_recipient_is_configuration_error() {
        let approver = Arc::new(MockApprover::ok());
        let notifier = Arc::new(MockNotifier::ok());
        let handler = handler(
            None,
            auto_approve_policy(),
            approver.clone(),
            notifier.clone(),
        );

        let result = handler.handle(eligible_request()).await;

        assert_eq!(result, ApplicationFormState::error(MSG_SYSTEM_CONFIG));
        assert_eq!(approver.call_count(), 0);
        assert_eq!(notifier.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_auto_approval_success() {
        let approver = Arc::new(MockApprover::ok());
        let notifier = Arc::new(MockNotifier::ok());
        let handler = handler(
            Some("42"),
            auto_approve_policy(),
            approver.clone(),
            notifier.clone(),
        );

        let result = handler.handle(eligible_request()).await;

        assert_eq!(result, ApplicationFormState::success(MSG_AUTO_APPROVED));
        assert_eq!(approver.call_count(), 1);
        let text = notifier.last_text();
        assert!(text.contains("已自动通过审批"));
        assert!(text.contains("用户 ID: `alice`"));
        assert!(text.contains("(TL2)"));
        assert!(text.contains("已通过 CONNECT 验证"));
    }

    #[tokio::test]
    async fn test_remote_rejection_short_circuits_without_notification() {
        let approver = Arc::new(MockApprover::failing(ClientError::remote_api(
            "discourse",
            403,
            "not allowed",
        )));
        let notifier = Arc::new(MockNotifier::ok());
        let handler = handler(
            Some("42"),
            auto_approve_policy(),
            approver.clone(),
            notifier.clone(),
        );

        let result = handler.handle(eligible_request()).await;

        assert_eq!(result, ApplicationFormState::error(MSG_APPROVE_RETRY));
        assert_eq!(notifier.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_soft_approval_failure_degrades_to_manual_review() {
        let approver = Arc::new(MockApprover::failing(ClientError::configuration(
            "discourse",
            "LINUX_DO_COOKIE missing",
        )));
        let notifier = Arc::new(MockNotifier::ok());
        let handler = handler(
            Some("42"),
            auto_approve_policy(),
            approver.clone(),
            notifier.clone(),
        );

        let result = handler.handle(eligible_request()).await;

        assert_eq!(result, ApplicationFormState::success(MSG_MANUAL_REVIEW));
        assert_eq!(notifier.sent_count(), 1);
        assert!(notifier.last_text().contains("自动审批失败"));
    }

    #[tokio::test]
    async fn test_network_approval_failure_also_degrades() {
        let approver = Arc::new(MockApprover::failing(ClientError::network(
            "discourse",
            "connection reset",
        )));
        let notifier = Arc::new(MockNotifier::ok());
        let handler = handler(
            Some("42"),
            auto_approve_policy(),
            approver.clone(),
            notifier.clone(),
        );

        let result = handler.handle(eligible_request()).await;

        assert_eq!(result, ApplicationFormState::success(MSG_MANUAL_REVIEW));
        assert_eq!(notifier.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_ineligible_request_skips_approval() {
        for request in [
            ApplicationRequest {
                is_authenticated: false,
                ..eligible_request()
            },
            ApplicationRequest {
                trust_level: Some(0),
                ..eligible_request()
            },
        ] {
            let approver = Arc::new(MockApprover::ok());
            let notifier = Arc::new(MockNotifier::ok());
            let handler = handler(
                Some("42"),
                auto_approve_policy(),
                approver.clone(),
                notifier.clone(),
            );

            let result = handler.handle(request).await;

            assert_eq!(result, ApplicationFormState::success(MSG_SUBMITTED));
            assert_eq!(approver.call_count(), 0);
            assert_eq!(notifier.sent_count(), 1);
            assert!(!notifier.last_text().contains("自动通过审批"));
        }
    }

    #[tokio::test]
    async fn test_flag_off_skips_approval() {
        let approver = Arc::new(MockApprover::ok());
        let notifier = Arc::new(MockNotifier::ok());
        let handler = handler(
            Some("42"),
            ApprovalPolicy {
                auto_approve: false,
                ..auto_approve_policy()
            },
            approver.clone(),
            notifier.clone(),
        );

        let result = handler.handle(eligible_request()).await;

        assert_eq!(result, ApplicationFormState::success(MSG_SUBMITTED));
        assert_eq!(approver.call_count(), 0);
        assert_eq!(notifier.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_notify_failure_surfaces_error_message() {
        let approver = Arc::new(MockApprover::ok());
        let notifier = Arc::new(MockNotifier::failing(ClientError::remote_api(
            "telegram",
            400,
            "chat not found",
        )));
        let handler = handler(
            Some("42"),
            ApprovalPolicy::default(),
            approver.clone(),
            notifier.clone(),
        );

        let result = handler.handle(eligible_request()).await;

        assert_eq!(result.status, crate::core::application::ApplicationStatus::Error);
        let message = result.message.unwrap();
        assert!(message.starts_with("错误信息："));
        assert!(message.contains("chat not found"));
    }

    #[tokio::test]
    async fn test_two_submissions_issue_two_notifications() {
        let approver = Arc::new(MockApprover::ok());
        let notifier = Arc::new(MockNotifier::ok());
        let handler = handler(
            Some("42"),
            auto_approve_policy(),
            approver.clone(),
            notifier.clone(),
        );

        handler.handle(eligible_request()).await;
        handler.handle(eligible_request()).await;

        // No dedup: same request twice means two downstream calls
        assert_eq!(approver.call_count(), 2);
        assert_eq!(notifier.sent_count(), 2);
    }

    #[tokio::test]
    async fn test_unauthenticated_notification_wording() {
        let approver = Arc::new(MockApprover::ok());
        let notifier = Arc::new(MockNotifier::ok());
        let handler = handler(
            Some("42"),
            ApprovalPolicy::default(),
            approver,
            notifier.clone(),
        );

        handler
            .handle(ApplicationRequest {
                is_authenticated: false,
                trust_level: None,
                ..eligible_request()
            })
            .await;

        let text = notifier.last_text();
        assert!(text.contains("未通过 OIDC 验证"));
        assert!(!text.contains("(TL"));
    }
}
