// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation state machine.
//!
//! One inbound message drives at most one transition. The current step lives
//! in the session store under `step:{chat_id}`; collected fields live under
//! `task:{chat_id}:{field}`. Absence of the step key means idle, so TTL
//! expiry passively reverts a stalled chat to idle without any timer of our
//! own.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use metrics::counter;
use strum::IntoEnumIterator;
use tokio::sync::Mutex;
use tracing::{debug, info};

use opsdesk_core::{
    NewTask, Notifier, OpsdeskError, SessionStore, TaskStatus, TaskStore, UserDirectory,
};

use crate::coerce::coerce_id;
use crate::keys::{Field, field_key, step_key};
use crate::parser::parse_seed;
use crate::prompts;
use crate::report::render_open_tasks;
use crate::step::Step;

/// Static intake policy: session lifetime and the field allow-lists.
///
/// The allow-lists filter fields at final assembly only; earlier steps store
/// whatever the user sent.
#[derive(Debug, Clone)]
pub struct IntakePolicy {
    pub session_ttl: Duration,
    pub categories: Vec<String>,
    pub countries: Vec<String>,
    pub projects: Vec<String>,
}

/// Drives the intake conversation for every chat.
///
/// All collaborators are trait objects so tests can substitute in-memory
/// fakes. A per-chat mutex serializes concurrent messages from the same chat
/// id; without it a duplicate webhook delivery could race the step
/// read-then-write and double-create a task.
pub struct IntakeEngine {
    sessions: Arc<dyn SessionStore>,
    tasks: Arc<dyn TaskStore>,
    users: Arc<dyn UserDirectory>,
    notifier: Arc<dyn Notifier>,
    policy: IntakePolicy,
    chat_locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl IntakeEngine {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        tasks: Arc<dyn TaskStore>,
        users: Arc<dyn UserDirectory>,
        notifier: Arc<dyn Notifier>,
        policy: IntakePolicy,
    ) -> Self {
        Self {
            sessions,
            tasks,
            users,
            notifier,
            policy,
            chat_locks: DashMap::new(),
        }
    }

    /// Handle one inbound message for `chat_id`.
    ///
    /// `text` arrives already stripped of any bot self-mention. Errors from
    /// the session store or the repository propagate to the caller; replies
    /// are fire-and-forget through the notifier.
    pub async fn handle_message(&self, chat_id: i64, text: &str) -> Result<(), OpsdeskError> {
        let lock = self
            .chat_locks
            .entry(chat_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let outcome = {
            let _guard = lock.lock().await;
            self.dispatch(chat_id, text).await
        };
        drop(lock);
        // The last holder removes the entry; a concurrent holder keeps the
        // strong count above one and the entry stays.
        self.chat_locks
            .remove_if(&chat_id, |_, entry| Arc::strong_count(entry) == 1);
        outcome
    }

    /// Number of chats currently holding a message lock. Returns to zero
    /// once the engine is quiescent.
    pub fn active_chat_locks(&self) -> usize {
        self.chat_locks.len()
    }

    async fn dispatch(&self, chat_id: i64, text: &str) -> Result<(), OpsdeskError> {
        counter!("intake_messages_total").increment(1);

        let trimmed = text.trim();
        let command = trimmed.to_lowercase();

        // /task and /abort work from any step; everything else depends on
        // where the chat currently is.
        if command == "/task" {
            return self.start_flow(chat_id).await;
        }
        if command == "/abort" {
            return self.abort_flow(chat_id).await;
        }

        let stored = self.sessions.get(&step_key(chat_id)).await?;
        let step = Step::decode(stored.as_deref());
        debug!(chat_id, ?step, "dispatching message");

        match step {
            None => match command.as_str() {
                "/list" => self.report_open_tasks(chat_id).await,
                "/done" => self.start_close(chat_id).await,
                _ => self.notifier.send(chat_id, prompts::USAGE_HINT).await,
            },
            Some(Step::AwaitingTitle) => self.collect_title(chat_id, text).await,
            Some(Step::AwaitingAssignee) => self.collect_assignee(chat_id, text).await,
            Some(Step::AwaitingPriority) => self.finish_creation(chat_id, text).await,
            Some(Step::AwaitingTaskId) => self.close_task(chat_id, text).await,
        }
    }

    /// `/task`: unconditional reset. Any half-completed flow is discarded
    /// without warning.
    async fn start_flow(&self, chat_id: i64) -> Result<(), OpsdeskError> {
        for field in Field::iter() {
            self.sessions.delete(&field_key(chat_id, field)).await?;
        }
        self.put_step(chat_id, Step::AwaitingTitle).await?;
        self.notifier.send(chat_id, prompts::TITLE_PROMPT).await
    }

    /// `/abort`: deletes the step key only. Residual field keys are left to
    /// expire; `/task` clears them before the next flow starts.
    async fn abort_flow(&self, chat_id: i64) -> Result<(), OpsdeskError> {
        self.sessions.delete(&step_key(chat_id)).await?;
        self.notifier.send(chat_id, prompts::STATE_RESET).await
    }

    async fn collect_title(&self, chat_id: i64, text: &str) -> Result<(), OpsdeskError> {
        let seed = parse_seed(text);

        // A title is always stored: the parsed one when present, otherwise
        // the raw text verbatim.
        let title = if seed.title.is_empty() { text } else { &seed.title };
        self.put_field(chat_id, Field::Title, title).await?;

        // Optional seed fields only overwrite when non-empty, so partial
        // input never blanks an earlier value.
        for (field, value) in [
            (Field::Category, &seed.category),
            (Field::CountryCode, &seed.country_code),
            (Field::Project, &seed.project),
        ] {
            if !value.is_empty() {
                self.put_field(chat_id, field, value).await?;
            }
        }

        self.put_step(chat_id, Step::AwaitingAssignee).await?;
        let users = self.users.list_users().await?;
        self.notifier
            .send(chat_id, &prompts::assignee_prompt(&users))
            .await
    }

    async fn collect_assignee(&self, chat_id: i64, text: &str) -> Result<(), OpsdeskError> {
        // Stored verbatim; coercion happens at assembly.
        self.put_field(chat_id, Field::Assignee, text).await?;
        self.put_step(chat_id, Step::AwaitingPriority).await?;
        self.notifier.send(chat_id, prompts::PRIORITY_PROMPT).await
    }

    /// Terminal step: assemble the task from collected fields and persist it.
    async fn finish_creation(&self, chat_id: i64, priority: &str) -> Result<(), OpsdeskError> {
        let title = self.field_value(chat_id, Field::Title).await?.unwrap_or_default();
        let category = self.field_value(chat_id, Field::Category).await?.unwrap_or_default();
        let country = self.field_value(chat_id, Field::CountryCode).await?.unwrap_or_default();
        let project = self.field_value(chat_id, Field::Project).await?.unwrap_or_default();
        let assignee = self.field_value(chat_id, Field::Assignee).await?.unwrap_or_default();

        // Assignee 0 covers both the literal "0" reply and non-numeric text.
        let assignee_id = match coerce_id(&assignee) {
            0 => None,
            id => Some(id),
        };

        let country_upper = country.to_uppercase();
        let task = NewTask {
            title,
            assignee_id,
            priority: priority.to_string(),
            category: self
                .policy
                .categories
                .contains(&category)
                .then(|| category.clone()),
            country: (country.len() == 2 && self.policy.countries.contains(&country_upper))
                .then_some(country_upper),
            // The allow-list test for `project` keys off the category value.
            // TODO: confirm whether it should test the project value before
            // changing.
            project: (!project.is_empty() && self.policy.projects.contains(&category))
                .then_some(project),
        };

        let created = self.tasks.create_task(&task).await?;
        counter!("intake_tasks_created_total").increment(1);
        info!(chat_id, task_id = created.id, "task created");

        // Only the step and title keys are cleared; the rest expire via TTL
        // and are wiped by the next /task anyway.
        self.sessions.delete(&step_key(chat_id)).await?;
        self.sessions.delete(&field_key(chat_id, Field::Title)).await?;

        self.notifier
            .send(chat_id, &prompts::task_created(created.id))
            .await
    }

    async fn start_close(&self, chat_id: i64) -> Result<(), OpsdeskError> {
        self.put_step(chat_id, Step::AwaitingTaskId).await?;
        self.notifier.send(chat_id, prompts::CLOSE_PROMPT).await
    }

    async fn close_task(&self, chat_id: i64, text: &str) -> Result<(), OpsdeskError> {
        let id = coerce_id(text);
        let reply = match self.tasks.get_task(id).await? {
            Some(task) => {
                self.tasks
                    .set_task_status(task.id, TaskStatus::Completed)
                    .await?;
                counter!("intake_tasks_completed_total").increment(1);
                info!(chat_id, task_id = task.id, "task completed");
                prompts::task_completed(task.id)
            }
            None => prompts::task_not_found(id),
        };
        self.sessions.delete(&step_key(chat_id)).await?;
        self.notifier.send(chat_id, &reply).await
    }

    async fn report_open_tasks(&self, chat_id: i64) -> Result<(), OpsdeskError> {
        let open = self
            .tasks
            .list_open_tasks(&[TaskStatus::Pending, TaskStatus::InProgress])
            .await?;
        let reply = if open.is_empty() {
            prompts::NO_PENDING.to_string()
        } else {
            render_open_tasks(&open)
        };
        self.notifier.send(chat_id, &reply).await
    }

    async fn put_step(&self, chat_id: i64, step: Step) -> Result<(), OpsdeskError> {
        self.sessions
            .put(&step_key(chat_id), &step.to_string(), self.policy.session_ttl)
            .await
    }

    async fn put_field(&self, chat_id: i64, field: Field, value: &str) -> Result<(), OpsdeskError> {
        self.sessions
            .put(&field_key(chat_id, field), value, self.policy.session_ttl)
            .await
    }

    async fn field_value(
        &self,
        chat_id: i64,
        field: Field,
    ) -> Result<Option<String>, OpsdeskError> {
        self.sessions.get(&field_key(chat_id, field)).await
    }
}
