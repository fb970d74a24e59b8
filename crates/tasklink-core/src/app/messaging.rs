//! MessagingService - 権限ゲート付きのメッセージ送受信
//!
//! メッセージ作成の前に必ず `RelationshipAuthorizer::can_message` を通します。
//! false の場合は `MessagingError::PermissionDenied` で拒否します。
//!
//! task を指定した送信は、その task 上の関係だけで判定します。
//!
//! # Task thread
//! `task_thread` / `send_in_task` は 1 つの task の customer と、
//! その task で agreement を結んだ tasker の間のやり取りです。
//! - 閲覧: 最初の agreement（status は問わない）の当事者だけ
//! - 送信: accepted の agreement が必要。宛先は agreement から決まる

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::app::authorizer::RelationshipAuthorizer;
use crate::domain::{
    AgreementLink, Message, MessageDraft, MessageId, MessagingError, PairLink, StoreError, TaskId,
    TaskRelations, UserId,
};
use crate::ports::{Clock, MessageStore, RelationshipFacts};

pub struct MessagingService<F: ?Sized> {
    authorizer: RelationshipAuthorizer<F>,
    store: Arc<dyn MessageStore>,
    clock: Arc<dyn Clock>,
}

impl<F: RelationshipFacts + ?Sized> MessagingService<F> {
    pub fn new(
        authorizer: RelationshipAuthorizer<F>,
        store: Arc<dyn MessageStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            authorizer,
            store,
            clock,
        }
    }

    pub fn authorizer(&self) -> &RelationshipAuthorizer<F> {
        &self.authorizer
    }

    /// `sender`（認証済みの呼び出し元）から draft を送信する
    ///
    /// # エラー
    /// - 本文が空白のみ: `EmptyContent`（facts は読まない）
    /// - 関係が無い: `PermissionDenied`
    /// - task 指定あり: task が無ければ `TaskNotFound`、その task 上に関係が無ければ
    ///   `TaskPermissionDenied`
    /// - ストア障害: `Facts` / `Store`
    #[instrument(level = "info", skip_all, fields(sender = %sender, receiver = %draft.receiver_id))]
    pub async fn send(&self, sender: UserId, draft: MessageDraft) -> Result<Message, MessagingError> {
        if draft.content.trim().is_empty() {
            return Err(MessagingError::EmptyContent);
        }

        let receiver = draft.receiver_id;
        match draft.task_id {
            Some(task) => {
                let relations = self.relations_of(task).await?;
                if relations.grant_between(sender, receiver).is_none() {
                    warn!(task = %task, "message rejected: the pair shares nothing on this task");
                    return Err(MessagingError::TaskPermissionDenied {
                        sender,
                        receiver,
                        task,
                    });
                }
            }
            None => {
                if !self.authorizer.can_message(sender, receiver).await? {
                    warn!("message rejected: no bid, offer, or agreement connects the pair");
                    return Err(MessagingError::PermissionDenied { sender, receiver });
                }
            }
        }

        let message = self.store.insert(sender, draft, self.clock.now()).await?;
        info!(message_id = %message.id, "message sent");
        Ok(message)
    }

    /// `user` が送った / 受け取ったメッセージ（新しい順）
    pub async fn inbox(&self, user: UserId) -> Result<Vec<Message>, MessagingError> {
        Ok(self.store.list_for_user(user).await?)
    }

    /// 受信者だけが既読にできる
    pub async fn mark_read(&self, user: UserId, id: MessageId) -> Result<(), MessagingError> {
        let message = self
            .store
            .get(id)
            .await?
            .ok_or(MessagingError::NotFound(id))?;
        if message.receiver_id != user {
            return Err(MessagingError::NotRecipient { user, message: id });
        }
        self.store.mark_read(id).await.map_err(|e| match e {
            StoreError::NotFound(_) => MessagingError::NotFound(id),
            other => MessagingError::Store(other),
        })
    }

    /// task thread のメッセージ（古い順）
    ///
    /// # エラー
    /// - task が無い: `TaskNotFound`
    /// - agreement が無い: `NoAgreement`
    /// - customer でも agreement の tasker でもない: `NotTaskParticipant`
    #[instrument(level = "debug", skip_all, fields(user = %user, task = %task))]
    pub async fn task_thread(
        &self,
        user: UserId,
        task: TaskId,
    ) -> Result<Vec<Message>, MessagingError> {
        let relations = self.relations_of(task).await?;
        let agreement = relations
            .first_agreement()
            .ok_or(MessagingError::NoAgreement(task))?;
        Self::counterpart_in(agreement, user, task)?;
        Ok(self.store.list_for_task(task).await?)
    }

    /// task thread に投稿する。宛先は accepted の agreement の相手側
    ///
    /// # エラー
    /// - 本文が空白のみ: `EmptyContent`
    /// - task が無い: `TaskNotFound`
    /// - accepted の agreement が無い: `AgreementNotAccepted`
    /// - 当事者でない: `NotTaskParticipant`
    #[instrument(level = "info", skip_all, fields(sender = %sender, task = %task))]
    pub async fn send_in_task(
        &self,
        sender: UserId,
        task: TaskId,
        content: impl Into<String>,
    ) -> Result<Message, MessagingError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(MessagingError::EmptyContent);
        }

        let relations = self.relations_of(task).await?;
        let agreement = relations
            .first_accepted_agreement()
            .ok_or(MessagingError::AgreementNotAccepted(task))?;
        let receiver = Self::counterpart_in(agreement, sender, task)?;

        let draft = MessageDraft::new(receiver, content).about_task(task);
        let message = self.store.insert(sender, draft, self.clock.now()).await?;
        info!(message_id = %message.id, receiver = %receiver, "task message sent");
        Ok(message)
    }

    /// 宛先選択用: `user` がメッセージを送れる相手
    pub async fn recipients(&self, user: UserId) -> Result<BTreeSet<UserId>, MessagingError> {
        Ok(self.authorizer.messageable_users(user).await?)
    }

    async fn relations_of(&self, task: TaskId) -> Result<TaskRelations, MessagingError> {
        self.authorizer
            .facts()
            .task_relations(task)
            .await?
            .ok_or(MessagingError::TaskNotFound(task))
    }

    fn counterpart_in(
        agreement: &AgreementLink,
        user: UserId,
        task: TaskId,
    ) -> Result<UserId, MessagingError> {
        agreement
            .counterpart_of(user)
            .filter(|other| *other != user)
            .ok_or(MessagingError::NotTaskParticipant { user, task })
    }
}
