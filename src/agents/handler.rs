//! Request handler contract shared by every agent

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::agents::error::{HandlerError, HandlerResult};
use crate::domain::{
    DeleteTaskPushNotificationConfigParams, GetTaskPushNotificationConfigParams,
    ListTaskPushNotificationConfigParams, Message, MessageSendParams, Task, TaskIdParams,
    TaskPushNotificationConfig, TaskQueryParams,
};

/// Stream of reply messages for the streaming operations.
///
/// No handler in this system ever produces one; the operations that
/// would return it refuse synchronously, before any stream is opened.
pub type MessageStream = BoxStream<'static, HandlerResult<Message>>;

/// The fixed operation set every agent answers.
///
/// `on_message_send` is the only operation with real behavior. The task
/// queries default to reporting absent, and every streaming and
/// push-notification operation defaults to an explicit
/// [`HandlerError::UnsupportedOperation`] refusal, so a caller cannot
/// mistake "not implemented" for "empty result".
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Answer a single message with a single reply.
    ///
    /// Must not fail on malformed input; a message with no text part is
    /// handled as the empty string.
    async fn on_message_send(&self, params: MessageSendParams) -> HandlerResult<Message>;

    /// Look up a task by id. No task tracking exists here.
    async fn on_get_task(&self, _params: TaskQueryParams) -> HandlerResult<Option<Task>> {
        Ok(None)
    }

    /// Cancel a task by id. No task tracking exists here.
    async fn on_cancel_task(&self, _params: TaskIdParams) -> HandlerResult<Option<Task>> {
        Ok(None)
    }

    /// Streaming variant of `on_message_send`.
    async fn on_message_send_stream(
        &self,
        _params: MessageSendParams,
    ) -> HandlerResult<MessageStream> {
        Err(HandlerError::UnsupportedOperation("message/stream"))
    }

    async fn on_set_task_push_notification_config(
        &self,
        _params: TaskPushNotificationConfig,
    ) -> HandlerResult<TaskPushNotificationConfig> {
        Err(HandlerError::UnsupportedOperation(
            "tasks/pushNotificationConfig/set",
        ))
    }

    async fn on_get_task_push_notification_config(
        &self,
        _params: GetTaskPushNotificationConfigParams,
    ) -> HandlerResult<TaskPushNotificationConfig> {
        Err(HandlerError::UnsupportedOperation(
            "tasks/pushNotificationConfig/get",
        ))
    }

    async fn on_list_task_push_notification_config(
        &self,
        _params: ListTaskPushNotificationConfigParams,
    ) -> HandlerResult<Vec<TaskPushNotificationConfig>> {
        Err(HandlerError::UnsupportedOperation(
            "tasks/pushNotificationConfig/list",
        ))
    }

    async fn on_delete_task_push_notification_config(
        &self,
        _params: DeleteTaskPushNotificationConfigParams,
    ) -> HandlerResult<()> {
        Err(HandlerError::UnsupportedOperation(
            "tasks/pushNotificationConfig/delete",
        ))
    }

    /// Re-attach to a task's stream.
    async fn on_resubscribe_to_task(&self, _params: TaskIdParams) -> HandlerResult<MessageStream> {
        Err(HandlerError::UnsupportedOperation("tasks/resubscribe"))
    }
}
